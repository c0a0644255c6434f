//! Error types for the discovery system.

use thiserror::Error;

/// Error type for discovery operations.
///
/// A pass that simply hears no replies is not an error; only failures to put the
/// discovery request on the network are reported.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The UDP socket could not be bound, switched to broadcast, or could not send
    #[error("Network unavailable: {context}: {source}")]
    NetworkUnavailable {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The discovery configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DiscoveryError {
    pub(crate) fn network(context: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| DiscoveryError::NetworkUnavailable { context, source }
    }
}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_unavailable_display() {
        let error = DiscoveryError::network("failed to send discovery request")(
            std::io::Error::new(std::io::ErrorKind::Other, "network is unreachable"),
        );
        assert_eq!(
            error.to_string(),
            "Network unavailable: failed to send discovery request: network is unreachable"
        );
    }
}
