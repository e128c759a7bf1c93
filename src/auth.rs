//! Credential decoding and per-request bearer authentication.

pub mod authenticator;
pub mod claims;
pub mod secret;

pub use authenticator::*;
pub use claims::*;
pub use secret::*;
