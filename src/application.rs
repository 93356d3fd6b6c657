//! Borrow-scoped view of one host-owned application.

use crate::handle::{ApplicationRecord, ProcessId};
use crate::host::Host;
use crate::window::Window;

/// Read-only view of an application the host tracks.
///
/// Valid only for the scope of the event or query that produced it.
pub struct Application<'h, H: Host> {
    host: &'h H,
    record: &'h ApplicationRecord,
}

impl<'h, H: Host> Application<'h, H> {
    /// Resolve an application by pid, or `None` if the host no longer
    /// tracks it.
    pub fn lookup(host: &'h H, pid: ProcessId) -> Option<Self> {
        host.application(pid).map(|record| Self { host, record })
    }

    pub fn pid(&self) -> ProcessId {
        self.record.pid
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Whether this application currently has input focus.
    pub fn is_active(&self) -> bool {
        self.record.active
    }

    pub fn is_hidden(&self) -> bool {
        self.record.hidden
    }

    /// Windows the host attributes to this application.
    pub fn windows(&self) -> Vec<Window<'h, H>> {
        let pid = self.record.pid;
        self.host
            .window_ids()
            .into_iter()
            .filter(|wid| {
                self.host
                    .window(*wid)
                    .map(|r| r.owner == pid)
                    .unwrap_or(false)
            })
            .filter_map(|wid| Window::lookup(self.host, wid))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{DisplayId, Rect, WindowId, WindowRecord};
    use crate::host::MemoryHost;

    fn host_with_app() -> MemoryHost {
        let mut host = MemoryHost::new();
        host.insert_application(ApplicationRecord {
            pid: ProcessId(501),
            name: "Terminal".into(),
            active: false,
            hidden: true,
        });
        for wid in [1u32, 2] {
            host.insert_window(WindowRecord {
                id: WindowId(wid),
                title: format!("w{}", wid),
                owner: ProcessId(501),
                frame: Rect::new(0.0, 0.0, 640.0, 480.0),
                level: 0,
                minimized: false,
                display: DisplayId(1),
            });
        }
        host
    }

    #[test]
    fn lookup_and_read_fields() {
        let host = host_with_app();
        let app = Application::lookup(&host, ProcessId(501)).unwrap();
        assert_eq!(app.pid(), ProcessId(501));
        assert_eq!(app.name(), "Terminal");
        assert!(!app.is_active());
        assert!(app.is_hidden());
    }

    #[test]
    fn lookup_of_unknown_pid_is_none() {
        let host = host_with_app();
        assert!(Application::lookup(&host, ProcessId(999)).is_none());
    }

    #[test]
    fn windows_lists_owned_windows() {
        let host = host_with_app();
        let app = Application::lookup(&host, ProcessId(501)).unwrap();
        let mut ids: Vec<u32> = app.windows().iter().map(|w| w.id().0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }
}
