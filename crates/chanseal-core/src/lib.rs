//! Chanseal Authorization Core
//!
//! Capability parsing and condition evaluation for the Chanseal envelope
//! and framing core: given a capability's bytes (public key + JSON
//! condition list) and a candidate envelope, decide whether the capability
//! authorizes it.
//!
//! This crate is the one layer where the core logs: authorization
//! decisions are worth a trace for operators, unlike the proto/crypto
//! layers below it, which stay on a silent hot path.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod authorization;
pub mod error;

pub use authorization::{Authorization, Condition};
pub use error::{AuthorizationError, Result};
