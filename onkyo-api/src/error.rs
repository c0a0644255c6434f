use thiserror::Error;

/// Errors returned when an abstract command cannot become a wire command
///
/// Translation never fails for out-of-range volumes (those are clamped); it only fails
/// when the receiver does not offer what was asked for. Capability sets that cannot be
/// expressed on the wire are rejected by [`crate::ReceiverCapabilities::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// The receiver's capability set does not contain the requested input, sound mode
    /// or feature
    #[error("Unsupported {kind}: {value}")]
    Unsupported {
        /// What was requested, e.g. "input" or "sound mode"
        kind: &'static str,
        /// The requested value as given by the caller
        value: String,
    },

    /// A capability value does not fit the wire format
    #[error("Invalid capabilities: {0}")]
    InvalidCapabilities(String),
}

impl TranslationError {
    pub(crate) fn unsupported(kind: &'static str, value: impl Into<String>) -> Self {
        Self::Unsupported {
            kind,
            value: value.into(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
