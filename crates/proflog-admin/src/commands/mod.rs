//! Built-in admin commands.
//!
//! These sit beside the implicit dump (empty request):
//! - `schema`: counter types of every registered set.
//! - `version`: crate version of the serving process.

pub mod schema;
pub mod version;

pub use schema::SchemaCommand;
pub use version::VersionCommand;
