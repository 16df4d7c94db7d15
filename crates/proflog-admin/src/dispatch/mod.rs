//! Dispatcher module exports.
//!
//! Re-exports the dispatcher and command trait so downstream consumers can
//! register their own admin commands.

pub mod dispatcher;

pub use dispatcher::{AdminCommand, CommandCtx, Dispatcher};
