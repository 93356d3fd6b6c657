//! **tilebridge**: typed bindings for writing native plugins against a
//! tiling-window-manager host.
//!
//! The host process owns all window-manager state: windows, displays,
//! applications, the event stream and a namespace of named configuration
//! variables ("cvars") stored as text.  This crate is the layer a plugin
//! links against to talk to it with types.
//!
//! # Architecture
//!
//! Everything hangs off two seams:
//!
//! * [`host::Host`] abstracts the host process itself (cvar primitives,
//!   entity tables) so plugin logic is not coupled to any transport.
//!   [`host::MemoryHost`] implements it in-process for tests and demos.
//! * [`plugin::Plugin`] is the lifecycle a plugin implements; at load time
//!   it fills a [`dispatch::SubscriptionTable`] with handlers, and the
//!   host then feeds events through the [`dispatch::Dispatcher`].
//!
//! On top of those sit the typed cvar accessors ([`cvar`]), the event
//! vocabulary with its wire decoding ([`event`]) and the borrow-scoped
//! entity facades ([`window`], [`display`], [`application`]).
//!
//! Handlers run synchronously on the host's dispatch thread; this crate
//! spawns no threads, buffers nothing and never lets a panic cross back
//! into host code.

pub mod application;
pub mod cvar;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod event;
pub mod handle;
pub mod host;
pub mod plugin;
pub mod prelude;
pub mod window;
