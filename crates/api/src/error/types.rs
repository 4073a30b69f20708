//! Error type definitions for cryptographic operations

/// Primary error type for sodix operations
///
/// Payloads are static context strings and sizes only, so an error value can
/// be logged or displayed without exposing key, nonce or plaintext bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Authentication tag mismatch, or a stream that ended before its final chunk
    ForgedOrCorrupted { context: &'static str },

    /// A collaborator rejected a public key (e.g. a low-order curve point)
    InvalidPoint { context: &'static str },

    /// A combined ciphertext is shorter than its authentication overhead
    CipherTooShort {
        context: &'static str,
        minimum: usize,
        actual: usize,
    },

    /// A caller-supplied output buffer cannot hold the result
    BufferTooShort {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid length error with context
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error
    InvalidParameter {
        context: &'static str,
        message: &'static str,
    },

    /// The operation is not allowed in the object's current state
    InvalidState { context: &'static str },

    /// Random generation error
    RandomGenerationError { context: &'static str },

    /// Underlying reader or writer failed
    #[cfg(feature = "std")]
    Io {
        context: &'static str,
        kind: std::io::ErrorKind,
    },

    /// Other error
    Other { context: &'static str },
}

/// Result type for sodix operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Replace the context of an existing error, keeping its payload
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::ForgedOrCorrupted { .. } => Self::ForgedOrCorrupted { context },
            Self::InvalidPoint { .. } => Self::InvalidPoint { context },
            Self::CipherTooShort { minimum, actual, .. } => Self::CipherTooShort {
                context,
                minimum,
                actual,
            },
            Self::BufferTooShort { expected, actual, .. } => Self::BufferTooShort {
                context,
                expected,
                actual,
            },
            Self::InvalidLength { expected, actual, .. } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::InvalidState { .. } => Self::InvalidState { context },
            Self::RandomGenerationError { .. } => Self::RandomGenerationError { context },
            #[cfg(feature = "std")]
            Self::Io { kind, .. } => Self::Io { context, kind },
            Self::Other { .. } => Self::Other { context },
        }
    }

    /// True for authentication failures
    pub fn is_forged(&self) -> bool {
        matches!(self, Self::ForgedOrCorrupted { .. })
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ForgedOrCorrupted { context } => {
                write!(f, "{}: message forged or corrupted", context)
            }
            Self::InvalidPoint { context } => {
                write!(f, "{}: invalid public key point", context)
            }
            Self::CipherTooShort {
                context,
                minimum,
                actual,
            } => {
                write!(
                    f,
                    "{}: ciphertext too short (need at least {}, got {})",
                    context, minimum, actual
                )
            }
            Self::BufferTooShort {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: output buffer too short (need {}, got {})",
                    context, expected, actual
                )
            }
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::InvalidParameter { context, message } => {
                write!(f, "{}: {}", context, message)
            }
            Self::InvalidState { context } => {
                write!(f, "{}: invalid state", context)
            }
            Self::RandomGenerationError { context } => {
                write!(f, "Random generation error: {}", context)
            }
            #[cfg(feature = "std")]
            Self::Io { context, kind } => {
                write!(f, "{}: {:?}", context, kind)
            }
            Self::Other { context } => {
                write!(f, "Error: {}", context)
            }
        }
    }
}
