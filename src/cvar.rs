//! Typed access to host-owned configuration variables.
//!
//! The host stores every cvar as text.  Typing happens entirely on this
//! side of the boundary: any type that implements [`FromStr`] can be read
//! and any type that implements [`Display`] can be written, so one
//! serialize/parse pair per call site replaces a dynamic-typing runtime.
//!
//! [`CVars`] is the accessor for ad-hoc operations; [`CVar`] pins the name
//! and the value type once so repeated reads and writes of the same
//! variable cannot drift apart.

use crate::error::Error;
use crate::handle::CVarHandle;
use crate::host::Host;
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

/// Accessor for the host's cvar namespace.
///
/// Borrowed from a [`Host`] for the duration of a call scope; every
/// operation crosses into host state immediately, so a value read here
/// reflects whatever the host holds right now, including writes made by
/// other plugins in between.
///
/// # Example
///
/// ```
/// use tilebridge::cvar::CVars;
/// use tilebridge::host::MemoryHost;
///
/// let host = MemoryHost::new();
/// let cvars = CVars::new(&host);
/// let handle = cvars.create("focused_border_width", &4i32).unwrap();
/// assert_eq!(cvars.get::<i32>(handle).unwrap(), 4);
/// ```
pub struct CVars<'h, H: Host> {
    host: &'h H,
}

impl<'h, H: Host> CVars<'h, H> {
    /// Borrow the host's cvar namespace.
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }

    /// Look up a cvar by name.
    ///
    /// Returns `None` when no cvar with that name exists.  Absence is a
    /// normal outcome, not an error.
    pub fn find(&self, name: &str) -> Option<CVarHandle> {
        self.host.find_cvar(name)
    }

    /// Read the cvar and parse it as `T`.
    ///
    /// Fails with [`Error::ParseFailure`] when the stored text does not
    /// parse as `T`, and with [`Error::HostRejected`] when the host
    /// refuses the read.
    pub fn get<T: FromStr>(&self, handle: CVarHandle) -> Result<T, Error> {
        let text = self.host.read_cvar(handle)?;
        text.parse().map_err(|_| Error::ParseFailure {
            value: text,
            wanted: std::any::type_name::<T>(),
        })
    }

    /// Serialize `value` and write it to the host.
    ///
    /// Fails with [`Error::HostRejected`] when the host refuses the write.
    pub fn set<T: Display>(&self, handle: CVarHandle, value: &T) -> Result<(), Error> {
        self.host.write_cvar(handle, &value.to_string())
    }

    /// Register a new cvar with an initial value.
    ///
    /// Fails with [`Error::DuplicateName`] when the name is already taken.
    pub fn create<T: Display>(&self, name: &str, initial: &T) -> Result<CVarHandle, Error> {
        self.host.create_cvar(name, &initial.to_string())
    }
}

/// A named cvar with its value type fixed at the binding site.
///
/// The host reference is passed per call rather than stored, so a `CVar`
/// can live in plugin state without borrowing the host across events.
///
/// # Example
///
/// ```
/// use tilebridge::cvar::{CVar, NumericBool};
/// use tilebridge::host::MemoryHost;
///
/// let host = MemoryHost::new();
/// let spawn_left: CVar<NumericBool> =
///     CVar::create(&host, "bsp_spawn_left", NumericBool(true)).unwrap();
/// assert!(spawn_left.get(&host).unwrap().0);
///
/// spawn_left.set(&host, NumericBool(false)).unwrap();
/// assert!(!spawn_left.get(&host).unwrap().0);
/// ```
pub struct CVar<T> {
    name: String,
    handle: CVarHandle,
    _value: PhantomData<T>,
}

impl<T: FromStr + Display> CVar<T> {
    /// Bind to an existing cvar by name, or `None` if it does not exist.
    pub fn bind<H: Host>(host: &H, name: &str) -> Option<Self> {
        host.find_cvar(name).map(|handle| Self {
            name: name.to_owned(),
            handle,
            _value: PhantomData,
        })
    }

    /// Register a new cvar and bind to it.
    pub fn create<H: Host>(host: &H, name: &str, initial: T) -> Result<Self, Error> {
        let handle = host.create_cvar(name, &initial.to_string())?;
        Ok(Self {
            name: name.to_owned(),
            handle,
            _value: PhantomData,
        })
    }

    /// The cvar's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying host handle.
    pub fn handle(&self) -> CVarHandle {
        self.handle
    }

    /// Read and parse the current value.
    pub fn get<H: Host>(&self, host: &H) -> Result<T, Error> {
        CVars::new(host).get(self.handle)
    }

    /// Serialize and write a new value.
    pub fn set<H: Host>(&self, host: &H, value: T) -> Result<(), Error> {
        CVars::new(host).set(self.handle, &value)
    }
}

//  NumericBool

/// A boolean stored as `"0"` or `"1"`, the convention the host's config
/// files use for flag cvars.
///
/// Parsing accepts exactly those two tokens; anything else, including
/// `"true"` and `"2"`, is a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericBool(pub bool);

impl Display for NumericBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { 1 } else { 0 })
    }
}

impl From<bool> for NumericBool {
    fn from(v: bool) -> Self {
        NumericBool(v)
    }
}

impl From<NumericBool> for bool {
    fn from(v: NumericBool) -> bool {
        v.0
    }
}

impl FromStr for NumericBool {
    type Err = ParseNumericBoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(NumericBool(false)),
            "1" => Ok(NumericBool(true)),
            _ => Err(ParseNumericBoolError(s.to_owned())),
        }
    }
}

/// Token was neither `"0"` nor `"1"`.
#[derive(Debug, thiserror::Error)]
#[error("expected \"0\" or \"1\", got {0:?}")]
pub struct ParseNumericBoolError(String);

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn set_then_get_round_trips() {
        let host = MemoryHost::new();
        let cvars = CVars::new(&host);
        let handle = cvars.create("gap", &12i32).unwrap();
        cvars.set(handle, &37i32).unwrap();
        assert_eq!(cvars.get::<i32>(handle).unwrap(), 37);

        let handle = cvars.create("ratio", &0.5f64).unwrap();
        assert_eq!(cvars.get::<f64>(handle).unwrap(), 0.5);

        let handle = cvars.create("mode", &"bsp").unwrap();
        assert_eq!(cvars.get::<String>(handle).unwrap(), "bsp");
    }

    #[test]
    fn find_absent_name_returns_none() {
        let host = MemoryHost::new();
        assert!(CVars::new(&host).find("never_created").is_none());
    }

    #[test]
    fn border_width_scenario() {
        // create with 4, read as i32, set to 6, read again, then misread
        // the same handle as a bool.
        let host = MemoryHost::new();
        let cvars = CVars::new(&host);

        let handle = cvars.create("focused_border_width", &4i32).unwrap();
        assert_eq!(cvars.get::<i32>(handle).unwrap(), 4);

        cvars.set(handle, &6i32).unwrap();
        assert_eq!(cvars.get::<i32>(handle).unwrap(), 6);

        match cvars.get::<bool>(handle) {
            Err(Error::ParseFailure { value, .. }) => assert_eq!(value, "6"),
            other => panic!("expected ParseFailure, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_create_reports_name() {
        let host = MemoryHost::new();
        let cvars = CVars::new(&host);
        cvars.create("mode", &"bsp").unwrap();
        assert!(matches!(
            cvars.create("mode", &"float"),
            Err(Error::DuplicateName(_))
        ));
    }

    #[test]
    fn typed_cvar_binds_existing() {
        let host = MemoryHost::new();
        host.create_cvar("gap", "8").unwrap();

        let gap: CVar<i32> = CVar::bind(&host, "gap").unwrap();
        assert_eq!(gap.name(), "gap");
        assert_eq!(gap.get(&host).unwrap(), 8);

        gap.set(&host, 16).unwrap();
        assert_eq!(gap.get(&host).unwrap(), 16);
    }

    #[test]
    fn typed_cvar_bind_missing_is_none() {
        let host = MemoryHost::new();
        assert!(CVar::<i32>::bind(&host, "missing").is_none());
    }

    #[test]
    fn writes_are_shared_across_accessors() {
        // No caching layer: a write through one binding is visible to a
        // read through another immediately.
        let host = MemoryHost::new();
        let a: CVar<i32> = CVar::create(&host, "gap", 10).unwrap();
        let b: CVar<i32> = CVar::bind(&host, "gap").unwrap();
        a.set(&host, 99).unwrap();
        assert_eq!(b.get(&host).unwrap(), 99);
    }

    #[test]
    fn numeric_bool_accepts_only_two_tokens() {
        assert_eq!("0".parse::<NumericBool>().unwrap(), NumericBool(false));
        assert_eq!("1".parse::<NumericBool>().unwrap(), NumericBool(true));
        for bad in ["2", "true", "false", "", " 1", "01"] {
            assert!(bad.parse::<NumericBool>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn numeric_bool_displays_as_digit() {
        assert_eq!(NumericBool(true).to_string(), "1");
        assert_eq!(NumericBool(false).to_string(), "0");
    }

    #[test]
    fn numeric_bool_cvar_round_trip() {
        let host = MemoryHost::new();
        let flag: CVar<NumericBool> = CVar::create(&host, "bsp_spawn_left", true.into()).unwrap();
        assert_eq!(host.read_cvar(flag.handle()).unwrap(), "1");
        assert!(bool::from(flag.get(&host).unwrap()));
    }
}
