//! Events delivered by the host and their typed payloads.
//!
//! The host hands this layer a raw JSON blob per event (one object with an
//! `event` name and an optional payload field).  [`Event::decode`] turns
//! the blob into a typed variant so handlers can pattern match without
//! ever re-checking payload shapes: the dispatcher only routes an event to
//! a handler whose subscribed kind matches, so kind and payload always
//! agree.
//!
//! # Wire format
//!
//! ```json
//! {"event":"window_created","window":{"id":42,"frame":{"origin":{"x":0.0,"y":0.0},"size":{"width":640.0,"height":480.0}}}}
//! {"event":"display_changed"}
//! {"event":"daemon_command","payload":{"command":"border","message":"toggle"}}
//! ```

use crate::handle::{DisplayId, ProcessId, Rect, SpaceId, WindowId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every event kind the host can emit.
///
/// The wire name of each kind is its snake_case form (see [`fmt::Display`]
/// and [`FromStr`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ApplicationLaunched,
    ApplicationTerminated,
    ApplicationActivated,
    ApplicationDeactivated,
    ApplicationHidden,
    ApplicationUnhidden,
    WindowCreated,
    WindowDestroyed,
    WindowFocused,
    WindowMoved,
    WindowResized,
    WindowMinimized,
    WindowDeminimized,
    WindowTitleChanged,
    DisplayAdded,
    DisplayRemoved,
    DisplayMoved,
    DisplayResized,
    DisplayChanged,
    SpaceChanged,
    DaemonCommand,
}

impl EventKind {
    /// All kinds, in the order the host declares them.
    pub fn all() -> &'static [EventKind] {
        use EventKind::*;
        &[
            ApplicationLaunched,
            ApplicationTerminated,
            ApplicationActivated,
            ApplicationDeactivated,
            ApplicationHidden,
            ApplicationUnhidden,
            WindowCreated,
            WindowDestroyed,
            WindowFocused,
            WindowMoved,
            WindowResized,
            WindowMinimized,
            WindowDeminimized,
            WindowTitleChanged,
            DisplayAdded,
            DisplayRemoved,
            DisplayMoved,
            DisplayResized,
            DisplayChanged,
            SpaceChanged,
            DaemonCommand,
        ]
    }

    /// The kind's wire name.
    pub fn name(&self) -> &'static str {
        use EventKind::*;
        match self {
            ApplicationLaunched => "application_launched",
            ApplicationTerminated => "application_terminated",
            ApplicationActivated => "application_activated",
            ApplicationDeactivated => "application_deactivated",
            ApplicationHidden => "application_hidden",
            ApplicationUnhidden => "application_unhidden",
            WindowCreated => "window_created",
            WindowDestroyed => "window_destroyed",
            WindowFocused => "window_focused",
            WindowMoved => "window_moved",
            WindowResized => "window_resized",
            WindowMinimized => "window_minimized",
            WindowDeminimized => "window_deminimized",
            WindowTitleChanged => "window_title_changed",
            DisplayAdded => "display_added",
            DisplayRemoved => "display_removed",
            DisplayMoved => "display_moved",
            DisplayResized => "display_resized",
            DisplayChanged => "display_changed",
            SpaceChanged => "space_changed",
            DaemonCommand => "daemon_command",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::all()
            .iter()
            .find(|k| k.name() == s)
            .copied()
            .ok_or_else(|| UnknownEventKind(s.to_owned()))
    }
}

/// Wire name did not match any known event kind.
#[derive(Debug, thiserror::Error)]
#[error("unknown event kind {0:?}")]
pub struct UnknownEventKind(pub String);

//  Payloads

/// Payload of every window event: the window's identity and geometry at
/// the moment the host emitted the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPayload {
    pub id: WindowId,
    pub frame: Rect,
}

/// Payload of every display event: the display's identity and the space
/// active on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayPayload {
    pub id: DisplayId,
    pub space: SpaceId,
}

/// Payload of every application event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub pid: ProcessId,
    pub name: String,
}

/// Payload of a daemon command, as in `tilec plugin::command message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandPayload {
    pub command: String,
    pub message: String,
}

//  Event

/// One delivered host event, tagged by kind with a kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ApplicationLaunched(ApplicationPayload),
    ApplicationTerminated(ApplicationPayload),
    ApplicationActivated(ApplicationPayload),
    ApplicationDeactivated(ApplicationPayload),
    ApplicationHidden(ApplicationPayload),
    ApplicationUnhidden(ApplicationPayload),
    WindowCreated(WindowPayload),
    WindowDestroyed(WindowPayload),
    WindowFocused(WindowPayload),
    WindowMoved(WindowPayload),
    WindowResized(WindowPayload),
    WindowMinimized(WindowPayload),
    WindowDeminimized(WindowPayload),
    WindowTitleChanged(WindowPayload),
    DisplayAdded(DisplayPayload),
    DisplayRemoved(DisplayPayload),
    DisplayMoved(DisplayPayload),
    DisplayResized(DisplayPayload),
    DisplayChanged,
    SpaceChanged,
    DaemonCommand(CommandPayload),
    /// An event name this crate does not know.  Routed to the catch-all
    /// handler when one is bound, dropped otherwise.
    Other(String),
}

impl Event {
    /// The kind of this event, or `None` for [`Event::Other`].
    pub fn kind(&self) -> Option<EventKind> {
        use EventKind as K;
        Some(match self {
            Event::ApplicationLaunched(_) => K::ApplicationLaunched,
            Event::ApplicationTerminated(_) => K::ApplicationTerminated,
            Event::ApplicationActivated(_) => K::ApplicationActivated,
            Event::ApplicationDeactivated(_) => K::ApplicationDeactivated,
            Event::ApplicationHidden(_) => K::ApplicationHidden,
            Event::ApplicationUnhidden(_) => K::ApplicationUnhidden,
            Event::WindowCreated(_) => K::WindowCreated,
            Event::WindowDestroyed(_) => K::WindowDestroyed,
            Event::WindowFocused(_) => K::WindowFocused,
            Event::WindowMoved(_) => K::WindowMoved,
            Event::WindowResized(_) => K::WindowResized,
            Event::WindowMinimized(_) => K::WindowMinimized,
            Event::WindowDeminimized(_) => K::WindowDeminimized,
            Event::WindowTitleChanged(_) => K::WindowTitleChanged,
            Event::DisplayAdded(_) => K::DisplayAdded,
            Event::DisplayRemoved(_) => K::DisplayRemoved,
            Event::DisplayMoved(_) => K::DisplayMoved,
            Event::DisplayResized(_) => K::DisplayResized,
            Event::DisplayChanged => K::DisplayChanged,
            Event::SpaceChanged => K::SpaceChanged,
            Event::DaemonCommand(_) => K::DaemonCommand,
            Event::Other(_) => return None,
        })
    }

    /// Decode a raw host blob into a typed event.
    ///
    /// Unknown event names decode to [`Event::Other`]; malformed JSON and
    /// known kinds missing their payload are errors.
    pub fn decode(blob: &str) -> Result<Event, DecodeError> {
        let raw: RawEvent = serde_json::from_str(blob)?;
        let kind = match raw.event.parse::<EventKind>() {
            Ok(kind) => kind,
            Err(_) => return Ok(Event::Other(raw.event)),
        };

        use EventKind as K;
        let event = match kind {
            K::ApplicationLaunched => Event::ApplicationLaunched(raw.application(kind)?),
            K::ApplicationTerminated => Event::ApplicationTerminated(raw.application(kind)?),
            K::ApplicationActivated => Event::ApplicationActivated(raw.application(kind)?),
            K::ApplicationDeactivated => Event::ApplicationDeactivated(raw.application(kind)?),
            K::ApplicationHidden => Event::ApplicationHidden(raw.application(kind)?),
            K::ApplicationUnhidden => Event::ApplicationUnhidden(raw.application(kind)?),
            K::WindowCreated => Event::WindowCreated(raw.window(kind)?),
            K::WindowDestroyed => Event::WindowDestroyed(raw.window(kind)?),
            K::WindowFocused => Event::WindowFocused(raw.window(kind)?),
            K::WindowMoved => Event::WindowMoved(raw.window(kind)?),
            K::WindowResized => Event::WindowResized(raw.window(kind)?),
            K::WindowMinimized => Event::WindowMinimized(raw.window(kind)?),
            K::WindowDeminimized => Event::WindowDeminimized(raw.window(kind)?),
            K::WindowTitleChanged => Event::WindowTitleChanged(raw.window(kind)?),
            K::DisplayAdded => Event::DisplayAdded(raw.display(kind)?),
            K::DisplayRemoved => Event::DisplayRemoved(raw.display(kind)?),
            K::DisplayMoved => Event::DisplayMoved(raw.display(kind)?),
            K::DisplayResized => Event::DisplayResized(raw.display(kind)?),
            K::DisplayChanged => Event::DisplayChanged,
            K::SpaceChanged => Event::SpaceChanged,
            K::DaemonCommand => Event::DaemonCommand(raw.payload(kind)?),
        };
        Ok(event)
    }
}

/// Errors from decoding a host event blob.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed event blob: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event {kind} is missing its payload")]
    MissingPayload { kind: EventKind },
}

/// The blob shape the host sends: an event name plus at most one payload
/// field, keyed by payload family.
#[derive(Debug, Deserialize)]
struct RawEvent {
    event: String,
    #[serde(default)]
    window: Option<WindowPayload>,
    #[serde(default)]
    display: Option<DisplayPayload>,
    #[serde(default)]
    application: Option<ApplicationPayload>,
    #[serde(default)]
    payload: Option<CommandPayload>,
}

impl RawEvent {
    fn window(self, kind: EventKind) -> Result<WindowPayload, DecodeError> {
        self.window.ok_or(DecodeError::MissingPayload { kind })
    }

    fn display(self, kind: EventKind) -> Result<DisplayPayload, DecodeError> {
        self.display.ok_or(DecodeError::MissingPayload { kind })
    }

    fn application(self, kind: EventKind) -> Result<ApplicationPayload, DecodeError> {
        self.application.ok_or(DecodeError::MissingPayload { kind })
    }

    fn payload(self, kind: EventKind) -> Result<CommandPayload, DecodeError> {
        self.payload.ok_or(DecodeError::MissingPayload { kind })
    }
}

//  Tests
