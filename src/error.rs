//! Error types for the DWG decoder core

use crate::types::Handle;
use thiserror::Error;

/// Main error type for object decoding.
///
/// None of these are fatal to a decode session: the orchestrator recovers
/// each one at the smallest enclosing scope and records it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DwgError {
    /// Expected handle absent from the handle table (or already consumed)
    #[error("Handle not found: {0:#X}")]
    HandleNotFound(Handle),

    /// Decoded type code differs from the code expected for the record
    #[error("Type mismatch for handle {handle:#X}: expected {expected:#X}, found {found:#X}")]
    TypeMismatch {
        handle: Handle,
        expected: i16,
        found: i16,
    },

    /// The bit cursor ran past the end of the record
    #[error("Buffer underrun while decoding handle {0:#X}")]
    BufferUnderrun(Handle),

    /// Extended type code not present in the class table
    #[error("Unresolved class {code} for handle {handle:#X}")]
    UnresolvedClass { code: i16, handle: Handle },

    /// Structurally invalid record (zero size, absurd counts, ...)
    #[error("Invalid record {handle:#X}: {reason}")]
    InvalidRecord { handle: Handle, reason: String },

    /// Format generation the object decoder does not handle
    #[error("Unsupported DWG version: {0}")]
    UnsupportedVersion(String),

    /// Text could not be decoded with the active code page
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl DwgError {
    /// Handle of the offending record, when the error carries one.
    pub fn handle(&self) -> Option<Handle> {
        match self {
            DwgError::HandleNotFound(h) | DwgError::BufferUnderrun(h) => Some(*h),
            DwgError::TypeMismatch { handle, .. }
            | DwgError::UnresolvedClass { handle, .. }
            | DwgError::InvalidRecord { handle, .. } => Some(*handle),
            _ => None,
        }
    }
}

/// Result type alias for decoder operations
pub type Result<T> = std::result::Result<T, DwgError>;

impl From<String> for DwgError {
    fn from(s: String) -> Self {
        DwgError::Custom(s)
    }
}

impl From<&str> for DwgError {
    fn from(s: &str) -> Self {
        DwgError::Custom(s.to_string())
    }
}
