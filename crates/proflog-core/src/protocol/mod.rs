//! Admin socket wire contract.
//!
//! Both directions are length-prefixed so neither side depends on half-close
//! to find the end of a message. Decoders are panic-free: short or garbage
//! input is reported as `ProflogError`.

pub mod frame;
pub mod reply;

pub use frame::{Status, REQUEST_HEADER_LEN, RESPONSE_HEADER_LEN};
pub use reply::ErrorBody;
