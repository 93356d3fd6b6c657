//! Borrow-scoped view of one host-owned window.

use crate::application::Application;
use crate::display::Display;
use crate::handle::{Rect, WindowId, WindowRecord};
use crate::host::Host;

/// Read-only view of a window the host tracks.
///
/// A `Window` borrows the host's row and is only valid for the scope of
/// the event or query that produced it; the host may destroy or reassign
/// the underlying window afterwards.  Resolve a fresh facade per event
/// instead of retaining one.
pub struct Window<'h, H: Host> {
    host: &'h H,
    record: &'h WindowRecord,
}

impl<'h, H: Host> Window<'h, H> {
    /// Resolve a window by id, or `None` if the host no longer knows it.
    pub fn lookup(host: &'h H, id: WindowId) -> Option<Self> {
        host.window(id).map(|record| Self { host, record })
    }

    pub fn id(&self) -> WindowId {
        self.record.id
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }

    pub fn frame(&self) -> Rect {
        self.record.frame
    }

    /// Stacking level; larger values sit above smaller ones.
    pub fn level(&self) -> u32 {
        self.record.level
    }

    pub fn is_minimized(&self) -> bool {
        self.record.minimized
    }

    /// Whether this window currently has input focus.
    pub fn is_focused(&self) -> bool {
        self.host.focused_window() == Some(self.record.id)
    }

    /// The display the host currently places this window on.
    pub fn display(&self) -> Option<Display<'h, H>> {
        Display::lookup(self.host, self.record.display)
    }

    /// The application that owns this window.
    pub fn application(&self) -> Option<Application<'h, H>> {
        Application::lookup(self.host, self.record.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{
        ApplicationRecord, DisplayId, DisplayRecord, ProcessId, SpaceId, WindowRecord,
    };
    use crate::host::MemoryHost;

    fn populated_host() -> MemoryHost {
        let mut host = MemoryHost::new();
        host.insert_display(DisplayRecord {
            id: DisplayId(1),
            frame: Rect::new(0.0, 0.0, 1920.0, 1080.0),
            space: SpaceId(2),
            arrangement: 0,
        });
        host.insert_application(ApplicationRecord {
            pid: ProcessId(501),
            name: "Terminal".into(),
            active: true,
            hidden: false,
        });
        host.insert_window(WindowRecord {
            id: WindowId(42),
            title: "zsh".into(),
            owner: ProcessId(501),
            frame: Rect::new(100.0, 50.0, 640.0, 480.0),
            level: 0,
            minimized: false,
            display: DisplayId(1),
        });
        host
    }

    #[test]
    fn lookup_and_read_fields() {
        let host = populated_host();
        let w = Window::lookup(&host, WindowId(42)).unwrap();
        assert_eq!(w.id(), WindowId(42));
        assert_eq!(w.title(), "zsh");
        assert_eq!(w.frame().origin.x, 100.0);
        assert!(!w.is_minimized());
    }

    #[test]
    fn lookup_of_unknown_id_is_none() {
        let host = populated_host();
        assert!(Window::lookup(&host, WindowId(9)).is_none());
    }

    #[test]
    fn focus_tracks_host_state() {
        let mut host = populated_host();
        host.focus_window(Some(WindowId(42)));
        let w = Window::lookup(&host, WindowId(42)).unwrap();
        assert!(w.is_focused());

        let mut host = populated_host();
        host.focus_window(None);
        let w = Window::lookup(&host, WindowId(42)).unwrap();
        assert!(!w.is_focused());
    }

    #[test]
    fn window_resolves_its_display_and_application() {
        let host = populated_host();
        let w = Window::lookup(&host, WindowId(42)).unwrap();
        assert_eq!(w.display().unwrap().space(), SpaceId(2));
        assert_eq!(w.application().unwrap().name(), "Terminal");
    }
}
