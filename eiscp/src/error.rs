//! Error types for the eISCP codec

use thiserror::Error;

/// Errors that can occur while decoding an eISCP frame
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The bytes can never become a valid frame (bad magic, impossible lengths, bad payload)
    #[error("Malformed frame: {0}")]
    Malformed(String),

    /// The buffer holds the start of a frame but not all of it yet
    #[error("Incomplete frame: {needed} more bytes required")]
    Incomplete {
        /// Minimum number of additional bytes before decoding can make progress
        needed: usize,
    },
}

impl FrameError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }

    /// Whether more input could turn this error into a decoded frame
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete { .. })
    }
}

/// Errors raised when building command values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Command codes are exactly three ASCII uppercase letters or digits
    #[error("Invalid command code '{0}'")]
    InvalidCode(String),

    /// Unit types are empty or exactly three ASCII uppercase letters or digits
    #[error("Invalid unit type '{0}'")]
    InvalidUnitType(String),
}
