//! Error handling for cryptographic primitives
//!
//! Primitives share the workspace-wide error type; this module adds the
//! validation helpers every algorithm uses to check its inputs.

pub use sodix_api::error::{Error, Result, ResultExt};

pub mod validate;
