//! Routing of host events to subscribed handlers.
//!
//! The host feeds events into a queue; [`Dispatcher::run`] drains it on a
//! single thread, in delivery order, and routes each event to the handler
//! bound to its kind.  There is no global handler table: the
//! [`SubscriptionTable`] travels through the dispatch entry point.
//!
//! Failure in a handler never escapes this module.  A handler that
//! returns an error is logged; a handler that panics is caught at the
//! dispatch boundary and logged with the offending kind.  Either way the
//! next event is delivered normally.

use crate::application::Application;
use crate::cvar::CVars;
use crate::display::Display;
use crate::error::Error;
use crate::event::{Event, EventKind};
use crate::handle::{DisplayId, ProcessId, WindowId};
use crate::host::Host;
use crate::window::Window;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;

/// A handler bound to one event kind (or to all of them, for the
/// catch-all).  Invoked synchronously with the borrow scope of the
/// current event and the event itself.
pub type Handler<H> = Box<dyn FnMut(&mut EventScope<'_, H>, &Event) -> Result<(), Error>>;

//  Subscription table

/// Mapping from event kind to the one handler bound to it, plus an
/// optional catch-all.
///
/// At most one specific handler per kind is active at a time: a second
/// [`subscribe`](SubscriptionTable::subscribe) for the same kind
/// **replaces** the first (last registration wins).  The same policy
/// applies to the catch-all.
pub struct SubscriptionTable<H: Host> {
    bound: HashMap<EventKind, Handler<H>>,
    catch_all: Option<Handler<H>>,
}

impl<H: Host> Default for SubscriptionTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> SubscriptionTable<H> {
    /// An empty table: every event is dropped until something subscribes.
    pub fn new() -> Self {
        Self {
            bound: HashMap::new(),
            catch_all: None,
        }
    }

    /// Bind `handler` to `kind`, replacing any previous binding.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut EventScope<'_, H>, &Event) -> Result<(), Error> + 'static,
    {
        if self.bound.insert(kind, Box::new(handler)).is_some() {
            debug!("replaced handler for {}", kind);
        }
    }

    /// Bind a catch-all handler, replacing any previous one.
    ///
    /// The catch-all receives every event whose kind has no specific
    /// handler, including events this crate does not recognize
    /// ([`Event::Other`]).  A specific binding always takes precedence
    /// for its kind.
    pub fn subscribe_all<F>(&mut self, handler: F)
    where
        F: FnMut(&mut EventScope<'_, H>, &Event) -> Result<(), Error> + 'static,
    {
        if self.catch_all.replace(Box::new(handler)).is_some() {
            debug!("replaced catch-all handler");
        }
    }

    /// Drop the binding for `kind`, returning the kind to the
    /// unregistered state.  Does nothing if no handler is bound.
    pub fn unsubscribe(&mut self, kind: EventKind) {
        if self.bound.remove(&kind).is_some() {
            debug!("unsubscribed handler for {}", kind);
        }
    }

    /// Whether a specific handler is bound to `kind`.
    pub fn is_bound(&self, kind: EventKind) -> bool {
        self.bound.contains_key(&kind)
    }

    /// Whether a catch-all handler is bound.
    pub fn has_catch_all(&self) -> bool {
        self.catch_all.is_some()
    }

    fn apply(&mut self, pending: PendingSubscriptions<H>) {
        for op in pending.ops {
            match op {
                PendingOp::Bind(kind, handler) => {
                    if self.bound.insert(kind, handler).is_some() {
                        debug!("replaced handler for {}", kind);
                    }
                }
                PendingOp::BindAll(handler) => {
                    if self.catch_all.replace(handler).is_some() {
                        debug!("replaced catch-all handler");
                    }
                }
                PendingOp::Unbind(kind) => {
                    if self.bound.remove(&kind).is_some() {
                        debug!("unsubscribed handler for {}", kind);
                    }
                }
            }
        }
    }
}

/// Registrations made from inside a handler, applied after the handler
/// returns so the table is never mutated mid-dispatch.
struct PendingSubscriptions<H: Host> {
    ops: Vec<PendingOp<H>>,
}

enum PendingOp<H: Host> {
    Bind(EventKind, Handler<H>),
    BindAll(Handler<H>),
    Unbind(EventKind),
}

impl<H: Host> Default for PendingSubscriptions<H> {
    fn default() -> Self {
        Self { ops: Vec::new() }
    }
}

//  Event scope

/// The borrow scope a handler runs in.
///
/// Gives the handler host access (cvars, entity facades) and deferred
/// registration.  Facades resolved through the scope borrow from it and
/// cannot outlive the handler call, which is exactly the lifetime the
/// host guarantees for the underlying objects.
pub struct EventScope<'a, H: Host> {
    host: &'a H,
    pending: &'a mut PendingSubscriptions<H>,
}

impl<'a, H: Host> EventScope<'a, H> {
    /// The host this event came from.
    pub fn host(&self) -> &'a H {
        self.host
    }

    /// Accessor for the host's cvar namespace.
    pub fn cvars(&self) -> CVars<'a, H> {
        CVars::new(self.host)
    }

    /// Resolve a window facade for this scope.
    pub fn window(&self, id: WindowId) -> Option<Window<'a, H>> {
        Window::lookup(self.host, id)
    }

    /// Resolve a display facade for this scope.
    pub fn display(&self, id: DisplayId) -> Option<Display<'a, H>> {
        Display::lookup(self.host, id)
    }

    /// Resolve an application facade for this scope.
    pub fn application(&self, pid: ProcessId) -> Option<Application<'a, H>> {
        Application::lookup(self.host, pid)
    }

    /// Bind a handler to `kind` once the current handler returns.
    ///
    /// Deferred so that a registration made while an event is in flight
    /// cannot corrupt the dispatch lookup; it takes effect for the next
    /// event, not the current one.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut EventScope<'_, H>, &Event) -> Result<(), Error> + 'static,
    {
        self.pending
            .ops
            .push(PendingOp::Bind(kind, Box::new(handler)));
    }

    /// Bind a catch-all handler once the current handler returns.
    pub fn subscribe_all<F>(&mut self, handler: F)
    where
        F: FnMut(&mut EventScope<'_, H>, &Event) -> Result<(), Error> + 'static,
    {
        self.pending.ops.push(PendingOp::BindAll(Box::new(handler)));
    }

    /// Drop the binding for `kind` once the current handler returns.
    /// A handler may unsubscribe itself; the current event still
    /// completes normally.
    pub fn unsubscribe(&mut self, kind: EventKind) {
        self.pending.ops.push(PendingOp::Unbind(kind));
    }
}

//  Dispatcher

/// Routes each delivered event to the handler bound to its kind.
pub struct Dispatcher<H: Host> {
    table: SubscriptionTable<H>,
}

impl<H: Host> Dispatcher<H> {
    /// Wrap a populated subscription table.
    pub fn new(table: SubscriptionTable<H>) -> Self {
        Self { table }
    }

    /// The current subscription table.
    pub fn table(&self) -> &SubscriptionTable<H> {
        &self.table
    }

    /// Deliver one event.
    ///
    /// Called by the host (or the [`run`](Dispatcher::run) loop) once per
    /// event.  Resolves the specific handler for the event's kind,
    /// falling back to the catch-all; with neither bound the event is
    /// silently dropped.  The handler runs synchronously; a panic or an
    /// error is logged and never propagates past this call.
    pub fn dispatch(&mut self, host: &H, event: &Event) {
        let kind = event.kind();
        let mut pending = PendingSubscriptions::default();
        {
            let handler = match kind {
                Some(k) => self.table.bound.get_mut(&k).or(self.table.catch_all.as_mut()),
                None => self.table.catch_all.as_mut(),
            };
            let Some(handler) = handler else {
                debug!("no handler bound, dropping {:?}", event);
                return;
            };

            let mut scope = EventScope {
                host,
                pending: &mut pending,
            };
            match catch_unwind(AssertUnwindSafe(|| handler(&mut scope, event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => match kind {
                    Some(kind) => warn!("handler for {} failed: {}", kind, e),
                    None => warn!("catch-all handler failed: {}", e),
                },
                Err(_) => match kind {
                    Some(kind) => error!("{}", Error::HandlerPanic { kind }),
                    None => error!("catch-all handler panicked on unrecognized event"),
                },
            }
        }
        self.table.apply(pending);
    }

    /// Drain the host's event queue until every sender is gone.
    ///
    /// Events are dispatched strictly in delivery order, on the calling
    /// thread.  This layer never buffers or reorders.
    pub fn run(&mut self, host: &H, events: mpsc::Receiver<Event>) {
        for event in events {
            self.dispatch(host, &event);
        }
        info!("event queue closed, dispatch loop exiting");
    }
}

//  Tests
