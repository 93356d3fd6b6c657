//! Borrow-scoped view of one host-owned display.

use crate::handle::{DisplayId, DisplayRecord, Rect, SpaceId};
use crate::host::Host;
use crate::window::Window;

/// Read-only view of a display the host tracks.
///
/// Valid only for the scope of the event or query that produced it, like
/// every facade in this crate.
pub struct Display<'h, H: Host> {
    host: &'h H,
    record: &'h DisplayRecord,
}

impl<'h, H: Host> Display<'h, H> {
    /// Resolve a display by id, or `None` if the host no longer knows it.
    pub fn lookup(host: &'h H, id: DisplayId) -> Option<Self> {
        host.display(id).map(|record| Self { host, record })
    }

    pub fn id(&self) -> DisplayId {
        self.record.id
    }

    pub fn frame(&self) -> Rect {
        self.record.frame
    }

    /// The space currently active on this display.
    pub fn space(&self) -> SpaceId {
        self.record.space
    }

    /// Position in the host's left-to-right display arrangement.
    pub fn arrangement(&self) -> u32 {
        self.record.arrangement
    }

    /// Windows the host currently places on this display.
    pub fn windows(&self) -> Vec<Window<'h, H>> {
        let id = self.record.id;
        self.host
            .window_ids()
            .into_iter()
            .filter(|wid| {
                self.host
                    .window(*wid)
                    .map(|r| r.display == id)
                    .unwrap_or(false)
            })
            .filter_map(|wid| Window::lookup(self.host, wid))
            .collect()
    }
}
