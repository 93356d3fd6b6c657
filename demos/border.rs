//! A small border plugin driven end to end against an in-memory host.
//!
//! Shows the full lifecycle: `bootstrap` registers the subscriptions,
//! a channel stands in for the host's event queue, and the dispatcher
//! drains it on the main thread.  Run with `RUST_LOG=debug` to watch the
//! dispatch decisions.

use log::info;
use std::sync::mpsc;
use tilebridge::handle::WindowRecord;
use tilebridge::host::MemoryHost;
use tilebridge::prelude::*;

/// Draws a border around the focused window (here: just logs what it
/// would draw, sized by the `focused_border_width` cvar).
struct BorderPlugin;

impl<H: Host + 'static> Plugin<H> for BorderPlugin {
    fn name(&self) -> &'static str {
        "border"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn init(&mut self, host: &H, table: &mut SubscriptionTable<H>) -> Result<(), Error> {
        let width: CVar<i32> = CVar::create(host, "focused_border_width", 4)?;

        table.subscribe(EventKind::WindowFocused, move |scope, event| {
            let Event::WindowFocused(payload) = event else {
                return Ok(());
            };
            let width = width.get(scope.host())?;
            match scope.window(payload.id) {
                Some(window) => info!(
                    "border: {}px around {:?} at {:?}",
                    width,
                    window.title(),
                    window.frame().origin
                ),
                None => info!("border: window {} already gone", payload.id),
            }
            Ok(())
        });

        table.subscribe_all(|_, event| {
            info!("border: ignoring {:?}", event.kind());
            Ok(())
        });

        Ok(())
    }

    fn shutdown(&mut self, _host: &H) {
        info!("border: shutting down");
    }
}

fn main() {
    env_logger::init();

    // Stand-in for the real host process.
    let mut host = MemoryHost::new();
    host.insert_window(WindowRecord {
        id: WindowId(42),
        title: "zsh".into(),
        owner: ProcessId(501),
        frame: Rect::new(100.0, 50.0, 640.0, 480.0),
        level: 0,
        minimized: false,
        display: DisplayId(1),
    });
    host.focus_window(Some(WindowId(42)));

    let mut plugin = BorderPlugin;
    let mut dispatcher = match bootstrap(&mut plugin, &host) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            eprintln!("plugin failed to load: {}", e);
            std::process::exit(1);
        }
    };

    // The host would feed this queue from its event loop; here we enqueue
    // a handful of raw blobs the way they arrive on the wire.
    let (tx, rx) = mpsc::channel();
    for blob in [
        r#"{"event":"window_focused","window":{"id":42,"frame":{"origin":{"x":100.0,"y":50.0},"size":{"width":640.0,"height":480.0}}}}"#,
        r#"{"event":"space_changed"}"#,
        r#"{"event":"window_teleported"}"#,
    ] {
        match Event::decode(blob) {
            Ok(event) => tx.send(event).expect("queue open"),
            Err(e) => eprintln!("bad blob: {}", e),
        }
    }
    drop(tx);

    dispatcher.run(&host, rx);
    teardown(&mut plugin, &host);
}
