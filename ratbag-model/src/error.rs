//! Native layer error types

use thiserror::Error;

/// Native return code for success
pub const SUCCESS: i32 = 0;

/// Errors reported by the native configuration layer.
///
/// The first five variants mirror the native library's fixed return codes
/// (see [`RatbagError::code`]); `NotFound` covers lookups by name or index
/// that never reach the native layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatbagError {
    /// Device or communication failure
    #[error("Device error: {0}")]
    Device(String),

    /// The object does not support the requested capability
    #[error("Capability not supported: {0}")]
    Capability(String),

    /// Value out of range or otherwise invalid
    #[error("Invalid value: {0}")]
    Value(String),

    /// System error (allocation, file access)
    #[error("System error: {0}")]
    System(String),

    /// Bug in the native layer or in the caller's conversion code
    #[error("Implementation error: {0}")]
    Implementation(String),

    /// No object with that name or index
    #[error("Not found: {0}")]
    NotFound(String),
}

impl RatbagError {
    /// Native return code for this error, `None` for errors that have no
    /// native counterpart.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Device(_) => Some(-1000),
            Self::Capability(_) => Some(-1001),
            Self::Value(_) => Some(-1002),
            Self::System(_) => Some(-1003),
            Self::Implementation(_) => Some(-1004),
            Self::NotFound(_) => None,
        }
    }

    /// Map a native return code to a result.
    ///
    /// Unknown negative codes are treated as implementation errors, positive
    /// codes as success (some native calls return a count).
    pub fn from_code(code: i32, context: &str) -> Result<(), Self> {
        match code {
            c if c >= SUCCESS => Ok(()),
            -1000 => Err(Self::Device(context.to_string())),
            -1001 => Err(Self::Capability(context.to_string())),
            -1002 => Err(Self::Value(context.to_string())),
            -1003 => Err(Self::System(context.to_string())),
            -1004 => Err(Self::Implementation(context.to_string())),
            other => Err(Self::Implementation(format!(
                "{context} (unknown return code {other})"
            ))),
        }
    }
}
