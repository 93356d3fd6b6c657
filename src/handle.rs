//! Opaque identifiers and host-owned table rows.
//!
//! The host process owns every window, display, application and
//! configuration variable.  This layer only ever sees *identifiers* for
//! them, plus borrowed snapshots of the rows the host keeps.  Nothing in
//! this module carries logic; it is the shared vocabulary for everything
//! built on top.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket for one named configuration variable, issued by the host.
///
/// A handle is only meaningful for the host session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CVarHandle(pub u32);

/// Host identifier for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u32);

/// Host identifier for a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayId(pub u32);

/// Process id of an application the host tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub i32);

/// Index of a virtual desktop ("space") on a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window:{}", self.0)
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display:{}", self.0)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pid:{}", self.0)
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "space:{}", self.0)
    }
}

//  Geometry

/// A point on the virtual desktop, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Extent of a window or display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Position and extent of a window or display frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Build a rect from raw coordinates.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }
}

//  Host table rows

/// One row of the host's window table.
///
/// Borrowed by [`Window`](crate::window::Window) facades for the duration
/// of a single event or query; never retained by this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    pub id: WindowId,
    /// Window title as last reported by the host.
    pub title: String,
    /// Process id of the owning application.
    pub owner: ProcessId,
    pub frame: Rect,
    /// Stacking level; larger values sit above smaller ones.
    pub level: u32,
    pub minimized: bool,
    /// The display the host currently places this window on.
    pub display: DisplayId,
}

/// One row of the host's display table.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    pub id: DisplayId,
    pub frame: Rect,
    /// The space currently active on this display.
    pub space: SpaceId,
    /// Position in the host's left-to-right display arrangement.
    pub arrangement: u32,
}

/// One row of the host's application table.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRecord {
    pub pid: ProcessId,
    pub name: String,
    /// Whether this application currently has input focus.
    pub active: bool,
    pub hidden: bool,
}
