//! Plugin lifecycle and the entry points the host calls.
//!
//! A plugin implements [`Plugin`] and registers its handlers once, at
//! load time, inside [`Plugin::init`].  The host drives everything else:
//! it calls [`bootstrap`] to initialise the plugin, feeds events to the
//! returned [`Dispatcher`], and calls [`teardown`] before unloading.
//!
//! Nothing in this module unwinds into host code.  `bootstrap` and
//! `teardown` fence the plugin's own methods with `catch_unwind` and
//! convert failures into reported errors.

use crate::dispatch::{Dispatcher, SubscriptionTable};
use crate::error::Error;
use crate::host::Host;
use log::{error, info};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A native plugin loaded by the window-manager host.
///
/// # Example
///
/// ```
/// use tilebridge::prelude::*;
///
/// struct BorderPlugin;
///
/// impl<H: Host + 'static> Plugin<H> for BorderPlugin {
///     fn name(&self) -> &'static str {
///         "border"
///     }
///
///     fn version(&self) -> &'static str {
///         "0.1.0"
///     }
///
///     fn init(&mut self, host: &H, table: &mut SubscriptionTable<H>) -> Result<(), Error> {
///         let width: CVar<i32> = CVar::create(host, "focused_border_width", 4)?;
///         table.subscribe(EventKind::WindowFocused, move |scope, _| {
///             let _ = width.get(scope.host())?;
///             Ok(())
///         });
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin<H: Host> {
    /// The plugin's name, reported to the host.
    fn name(&self) -> &'static str;

    /// The plugin's version, reported to the host.
    fn version(&self) -> &'static str;

    /// Register subscriptions and set up state.  Called once at load
    /// time, before any event is delivered.
    fn init(&mut self, host: &H, table: &mut SubscriptionTable<H>) -> Result<(), Error>;

    /// Release resources.  Called once when the host unloads the plugin.
    fn shutdown(&mut self, _host: &H) {}
}

/// Initialise a plugin and build its dispatcher.
///
/// This is the plugin-init entry point the host calls.  A failing or
/// panicking `init` is reported as [`Error::PluginInit`]; it never
/// unwinds past this function.
pub fn bootstrap<H, P>(plugin: &mut P, host: &H) -> Result<Dispatcher<H>, Error>
where
    H: Host,
    P: Plugin<H>,
{
    let mut table = SubscriptionTable::new();
    match catch_unwind(AssertUnwindSafe(|| plugin.init(host, &mut table))) {
        Ok(Ok(())) => {
            info!("plugin {} {} initialised", plugin.name(), plugin.version());
            Ok(Dispatcher::new(table))
        }
        Ok(Err(e)) => {
            error!("plugin {} init failed: {}", plugin.name(), e);
            Err(Error::PluginInit(e.to_string()))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("plugin {} init panicked: {}", plugin.name(), message);
            Err(Error::PluginInit(message))
        }
    }
}

/// Shut a plugin down on behalf of the host.
///
/// A panicking `shutdown` is caught and logged; the host's unload path
/// continues either way.
pub fn teardown<H, P>(plugin: &mut P, host: &H)
where
    H: Host,
    P: Plugin<H>,
{
    if catch_unwind(AssertUnwindSafe(|| plugin.shutdown(host))).is_err() {
        error!("plugin {} shutdown panicked", plugin.name());
    } else {
        info!("plugin {} shut down", plugin.name());
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "init panicked".to_owned()
    }
}

//  Tests
