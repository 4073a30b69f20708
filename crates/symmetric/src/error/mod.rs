//! Error handling for the protocol layer
//!
//! SecretStream reports through the workspace-wide error type. This module
//! adds the state checks and I/O conversions the stream adapters share.

pub use sodix_algorithms::error::validate;
pub use sodix_api::error::{Error, Result, ResultExt};

/// Convert an I/O error to an API Error, keeping its kind
#[cfg(feature = "std")]
pub fn from_io_error(err: std::io::Error, context: &'static str) -> Error {
    Error::Io {
        context,
        kind: err.kind(),
    }
}

/// Extension trait to make I/O conversions more ergonomic
#[cfg(feature = "std")]
pub trait SymmetricResultExt<T> {
    /// Convert a Result with IO Error to a Result with API Error
    fn map_io_err(self) -> Result<T>;

    /// As [`map_io_err`](Self::map_io_err), naming the failed operation
    fn map_io_err_with(self, context: &'static str) -> Result<T>;
}

#[cfg(feature = "std")]
impl<T> SymmetricResultExt<T> for core::result::Result<T, std::io::Error> {
    fn map_io_err(self) -> Result<T> {
        self.map_err(Error::from)
    }

    fn map_io_err_with(self, context: &'static str) -> Result<T> {
        self.map_err(|e| from_io_error(e, context))
    }
}

/// Fail with `Error::InvalidState` unless `condition` holds
pub fn validate_stream_state(condition: bool, operation: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::InvalidState { context: operation });
    }
    Ok(())
}
