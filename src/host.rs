//! The boundary to the window-manager host process.
//!
//! Everything the host exposes to this layer goes through the [`Host`]
//! trait: text-level cvar primitives and borrowed views of the entity
//! tables.  A real embedding implements it over whatever transport the
//! host provides; [`MemoryHost`] implements it in-process so plugins can
//! be exercised without a live window manager.
//!
//! The host is the sole arbiter of the cvar namespace.  Every read and
//! write crosses into host state and may race with other plugins; this
//! layer never caches values.

use crate::error::Error;
use crate::handle::{
    ApplicationRecord, CVarHandle, DisplayId, DisplayRecord, ProcessId, WindowId, WindowRecord,
};
use std::cell::RefCell;

/// Primitives the host process provides to this layer.
///
/// CVar values cross the boundary as text; typing happens on this side
/// (see [`CVars`](crate::cvar::CVars)).  Entity lookups return borrowed
/// rows that are only valid until the host mutates its tables, which is
/// why facades never retain them past a single event or query.
pub trait Host {
    /// Look up a cvar by name.  Absence is a normal outcome.
    fn find_cvar(&self, name: &str) -> Option<CVarHandle>;

    /// Read the current text of a cvar.
    ///
    /// Fails with [`Error::HostRejected`] if the handle is stale or the
    /// host is tearing down.
    fn read_cvar(&self, handle: CVarHandle) -> Result<String, Error>;

    /// Write new text to a cvar.
    ///
    /// Fails with [`Error::HostRejected`] if the variable is read-only or
    /// the host refuses the write.
    fn write_cvar(&self, handle: CVarHandle, value: &str) -> Result<(), Error>;

    /// Register a new cvar with an initial value.
    ///
    /// Fails with [`Error::DuplicateName`] if the name is already taken.
    fn create_cvar(&self, name: &str, initial: &str) -> Result<CVarHandle, Error>;

    /// The host's row for `id`, if the window still exists.
    fn window(&self, id: WindowId) -> Option<&WindowRecord>;

    /// The host's row for `id`, if the display still exists.
    fn display(&self, id: DisplayId) -> Option<&DisplayRecord>;

    /// The host's row for `pid`, if the application is still tracked.
    fn application(&self, pid: ProcessId) -> Option<&ApplicationRecord>;

    /// Id of the window that currently has focus, if any.
    fn focused_window(&self) -> Option<WindowId>;

    /// Ids of every window the host currently tracks.
    fn window_ids(&self) -> Vec<WindowId>;
}

//  In-memory host

/// One named variable in the [`MemoryHost`] store.
#[derive(Debug, Clone)]
struct CVarSlot {
    name: String,
    value: String,
    read_only: bool,
}

/// An in-process [`Host`] for tests, demos and plugin development.
///
/// Cvar state lives behind a `RefCell`: the host model is single-threaded
/// and host-driven, so interior mutability through `&self` mirrors how a
/// real host mutates its own tables between calls into this layer.
///
/// # Example
///
/// ```
/// use tilebridge::host::{Host, MemoryHost};
///
/// let host = MemoryHost::new();
/// let handle = host.create_cvar("global_desktop_mode", "bsp").unwrap();
/// assert_eq!(host.read_cvar(handle).unwrap(), "bsp");
/// assert_eq!(host.find_cvar("missing"), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryHost {
    cvars: RefCell<Vec<CVarSlot>>,
    windows: Vec<WindowRecord>,
    displays: Vec<DisplayRecord>,
    applications: Vec<ApplicationRecord>,
    focused: Option<WindowId>,
}

impl MemoryHost {
    /// An empty host: no cvars, no entities, nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window row.  Replaces any existing row with the same id.
    pub fn insert_window(&mut self, record: WindowRecord) {
        self.windows.retain(|w| w.id != record.id);
        self.windows.push(record);
    }

    /// Add a display row.  Replaces any existing row with the same id.
    pub fn insert_display(&mut self, record: DisplayRecord) {
        self.displays.retain(|d| d.id != record.id);
        self.displays.push(record);
    }

    /// Add an application row.  Replaces any existing row with the same pid.
    pub fn insert_application(&mut self, record: ApplicationRecord) {
        self.applications.retain(|a| a.pid != record.pid);
        self.applications.push(record);
    }

    /// Give focus to `id`, or clear focus with `None`.
    pub fn focus_window(&mut self, id: Option<WindowId>) {
        self.focused = id;
    }

    /// Remove a window row, as the host would after the window closes.
    pub fn remove_window(&mut self, id: WindowId) {
        self.windows.retain(|w| w.id != id);
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Mark an existing cvar read-only so writes fail with
    /// [`Error::HostRejected`].
    pub fn set_read_only(&mut self, name: &str) {
        if let Some(slot) = self.cvars.borrow_mut().iter_mut().find(|s| s.name == name) {
            slot.read_only = true;
        }
    }
}

impl Host for MemoryHost {
    fn find_cvar(&self, name: &str) -> Option<CVarHandle> {
        self.cvars
            .borrow()
            .iter()
            .position(|s| s.name == name)
            .map(|i| CVarHandle(i as u32))
    }

    fn read_cvar(&self, handle: CVarHandle) -> Result<String, Error> {
        self.cvars
            .borrow()
            .get(handle.0 as usize)
            .map(|s| s.value.clone())
            .ok_or_else(|| Error::HostRejected(format!("unknown cvar handle {}", handle.0)))
    }

    fn write_cvar(&self, handle: CVarHandle, value: &str) -> Result<(), Error> {
        let mut cvars = self.cvars.borrow_mut();
        let slot = cvars
            .get_mut(handle.0 as usize)
            .ok_or_else(|| Error::HostRejected(format!("unknown cvar handle {}", handle.0)))?;
        if slot.read_only {
            return Err(Error::HostRejected(format!(
                "cvar {:?} is read-only",
                slot.name
            )));
        }
        slot.value = value.to_owned();
        Ok(())
    }

    fn create_cvar(&self, name: &str, initial: &str) -> Result<CVarHandle, Error> {
        let mut cvars = self.cvars.borrow_mut();
        if cvars.iter().any(|s| s.name == name) {
            return Err(Error::DuplicateName(name.to_owned()));
        }
        cvars.push(CVarSlot {
            name: name.to_owned(),
            value: initial.to_owned(),
            read_only: false,
        });
        Ok(CVarHandle((cvars.len() - 1) as u32))
    }

    fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn display(&self, id: DisplayId) -> Option<&DisplayRecord> {
        self.displays.iter().find(|d| d.id == id)
    }

    fn application(&self, pid: ProcessId) -> Option<&ApplicationRecord> {
        self.applications.iter().find(|a| a.pid == pid)
    }

    fn focused_window(&self) -> Option<WindowId> {
        self.focused
    }

    fn window_ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|w| w.id).collect()
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{Rect, SpaceId};

    fn window(id: u32, display: u32) -> WindowRecord {
        WindowRecord {
            id: WindowId(id),
            title: format!("window {}", id),
            owner: ProcessId(100),
            frame: Rect::new(0.0, 0.0, 640.0, 480.0),
            level: 0,
            minimized: false,
            display: DisplayId(display),
        }
    }

    #[test]
    fn create_then_find_then_read() {
        let host = MemoryHost::new();
        let handle = host.create_cvar("bsp_spawn_left", "1").unwrap();
        assert_eq!(host.find_cvar("bsp_spawn_left"), Some(handle));
        assert_eq!(host.read_cvar(handle).unwrap(), "1");
    }

    #[test]
    fn find_unknown_name_is_absence() {
        let host = MemoryHost::new();
        assert_eq!(host.find_cvar("never_created"), None);
    }

    #[test]
    fn create_duplicate_name_rejected() {
        let host = MemoryHost::new();
        host.create_cvar("mode", "bsp").unwrap();
        match host.create_cvar("mode", "float") {
            Err(Error::DuplicateName(name)) => assert_eq!(name, "mode"),
            other => panic!("expected DuplicateName, got {:?}", other),
        }
        // The original value is untouched.
        let handle = host.find_cvar("mode").unwrap();
        assert_eq!(host.read_cvar(handle).unwrap(), "bsp");
    }

    #[test]
    fn write_is_visible_to_next_read() {
        let host = MemoryHost::new();
        let handle = host.create_cvar("gap", "10").unwrap();
        host.write_cvar(handle, "20").unwrap();
        assert_eq!(host.read_cvar(handle).unwrap(), "20");
    }

    #[test]
    fn read_only_cvar_rejects_write() {
        let mut host = MemoryHost::new();
        host.create_cvar("version", "3").unwrap();
        host.set_read_only("version");
        let handle = host.find_cvar("version").unwrap();
        assert!(matches!(
            host.write_cvar(handle, "4"),
            Err(Error::HostRejected(_))
        ));
        assert_eq!(host.read_cvar(handle).unwrap(), "3");
    }

    #[test]
    fn stale_handle_rejected() {
        let host = MemoryHost::new();
        assert!(matches!(
            host.read_cvar(CVarHandle(7)),
            Err(Error::HostRejected(_))
        ));
        assert!(matches!(
            host.write_cvar(CVarHandle(7), "x"),
            Err(Error::HostRejected(_))
        ));
    }

    #[test]
    fn entity_lookup_and_focus() {
        let mut host = MemoryHost::new();
        host.insert_display(DisplayRecord {
            id: DisplayId(1),
            frame: Rect::new(0.0, 0.0, 1920.0, 1080.0),
            space: SpaceId(1),
            arrangement: 0,
        });
        host.insert_window(window(42, 1));
        host.focus_window(Some(WindowId(42)));

        assert_eq!(host.window(WindowId(42)).unwrap().title, "window 42");
        assert_eq!(host.focused_window(), Some(WindowId(42)));
        assert_eq!(host.window_ids(), vec![WindowId(42)]);
        assert!(host.window(WindowId(99)).is_none());
    }

    #[test]
    fn remove_window_clears_focus() {
        let mut host = MemoryHost::new();
        host.insert_window(window(7, 1));
        host.focus_window(Some(WindowId(7)));
        host.remove_window(WindowId(7));
        assert!(host.window(WindowId(7)).is_none());
        assert_eq!(host.focused_window(), None);
    }
}
