//! proflog admin socket library entry.
//!
//! This crate serves a `MetricRegistry` over a local Unix domain socket: the
//! strict YAML config, the command dispatcher with its built-in commands, the
//! socket server with its bind/rebind lifecycle, and the matching client. It
//! is consumed by the `proflog-admin` binary, by host processes embedding the
//! socket, and by integration tests.

pub mod app_state;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod transport;

pub use app_state::AppState;
pub use transport::{AdminSocket, AdminSocketClient};
