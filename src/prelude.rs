//! One-import surface for plugin authors.
//!
//! `use tilebridge::prelude::*` brings in everything a typical plugin
//! needs: the lifecycle trait, the host seam, the cvar types, the event
//! vocabulary and the entity facades.

pub use crate::application::Application;
pub use crate::cvar::{CVar, CVars, NumericBool};
pub use crate::dispatch::{Dispatcher, EventScope, SubscriptionTable};
pub use crate::display::Display;
pub use crate::error::Error;
pub use crate::event::{
    ApplicationPayload, CommandPayload, DisplayPayload, Event, EventKind, WindowPayload,
};
pub use crate::handle::{CVarHandle, DisplayId, ProcessId, Rect, SpaceId, WindowId};
pub use crate::host::Host;
pub use crate::plugin::{bootstrap, teardown, Plugin};
