//! Transport layer (Unix domain socket).
//!
//! Exposes the admin socket server, which owns the listener lifecycle, and
//! the matching client.

pub mod client;
pub mod server;

pub use client::AdminSocketClient;
pub use server::AdminSocket;

use std::io;

use proflog_core::error::ProflogError;

fn transport(what: &str, e: io::Error) -> ProflogError {
    ProflogError::Transport(format!("{what}: {e}"))
}
