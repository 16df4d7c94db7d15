//! Top-level facade crate for proflog.
//!
//! Re-exports the counter core and the admin socket library so users can
//! depend on a single crate.

pub mod core {
    pub use proflog_core::*;
}

pub mod admin {
    pub use proflog_admin::*;
}
