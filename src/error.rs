//! Failure vocabulary for everything this layer can report.
//!
//! Absence is not failure: looking up a cvar or an entity that does not
//! exist yields `Option::None`, never an [`Error`].  The variants here
//! cover the cases a caller can actually act on.

use crate::event::EventKind;

/// Errors produced by the cvar accessor, the dispatcher and the plugin
/// entry point.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The text the host stores does not parse as the requested type.
    #[error("cvar value {value:?} does not parse as {wanted}")]
    ParseFailure {
        /// The raw text the host returned.
        value: String,
        /// Name of the type the caller asked for.
        wanted: &'static str,
    },

    /// The host refused an operation (read-only variable, stale handle,
    /// host shutting down).
    #[error("host rejected operation: {0}")]
    HostRejected(String),

    /// A cvar with this name already exists in the host session.
    #[error("cvar {0:?} already exists")]
    DuplicateName(String),

    /// A handler panicked while processing an event.  Caught at the
    /// dispatch boundary and logged; never unwinds into the host.
    #[error("handler for {kind} panicked")]
    HandlerPanic { kind: EventKind },

    /// The plugin init entry point failed or panicked.
    #[error("plugin init failed: {0}")]
    PluginInit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        let e = Error::ParseFailure {
            value: "abc".into(),
            wanted: "i32",
        };
        assert_eq!(e.to_string(), "cvar value \"abc\" does not parse as i32");

        let e = Error::DuplicateName("focused_border_width".into());
        assert_eq!(e.to_string(), "cvar \"focused_border_width\" already exists");

        let e = Error::HandlerPanic {
            kind: EventKind::WindowCreated,
        };
        assert_eq!(e.to_string(), "handler for window_created panicked");
    }
}
