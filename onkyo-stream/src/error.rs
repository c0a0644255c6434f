//! Error types for the onkyo-stream crate.

use std::io;
use std::net::SocketAddr;

use onkyo_api::TranslationError;

/// Errors returned by [`crate::Connection::connect`].
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// The receiver actively refused the connection
    #[error("Connection refused by {0}")]
    Refused(SocketAddr),

    /// The connect attempt did not finish within the connect timeout
    #[error("Connection to {0} timed out")]
    Timeout(SocketAddr),

    /// No route to the receiver
    #[error("Receiver {0} is unreachable")]
    Unreachable(SocketAddr),

    /// A session is already open or being opened
    #[error("Connection already established")]
    AlreadyConnected,

    /// The connection was closed and cannot be reused
    #[error("Connection is closed")]
    Closed,

    /// Invalid configuration provided
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Any other I/O failure while connecting
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ConnectError {
    /// Classify an I/O error from a connect attempt.
    pub fn from_io(address: SocketAddr, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::ConnectionRefused => ConnectError::Refused(address),
            io::ErrorKind::TimedOut => ConnectError::Timeout(address),
            io::ErrorKind::NetworkUnreachable
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::AddrNotAvailable => ConnectError::Unreachable(address),
            _ => ConnectError::Io(error),
        }
    }
}

/// Errors returned by [`crate::Connection::send`].
///
/// None of these are fatal; a `Disconnected` send has already started reconnection.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// No session is open right now
    #[error("Not connected")]
    NotConnected,

    /// The write failed and the connection is reconnecting
    #[error("Connection lost while sending")]
    Disconnected,

    /// The connection was closed
    #[error("Connection is closed")]
    Closed,

    /// The abstract command could not be translated
    #[error(transparent)]
    Translation(#[from] TranslationError),
}

/// Why a live session was abandoned. Only used to trigger and log reconnection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum TransportFault {
    #[error("broken pipe")]
    BrokenPipe,

    #[error("connection reset by peer")]
    Reset,

    #[error("receiver stopped responding")]
    Timeout,

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<&io::Error> for TransportFault {
    fn from(error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::BrokenPipe => TransportFault::BrokenPipe,
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::UnexpectedEof => TransportFault::Reset,
            io::ErrorKind::TimedOut => TransportFault::Timeout,
            _ => TransportFault::Io(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn addr() -> SocketAddr {
        "192.168.1.20:60128".parse().unwrap()
    }

    #[rstest]
    #[case(io::ErrorKind::ConnectionRefused, "Connection refused by 192.168.1.20:60128")]
    #[case(io::ErrorKind::TimedOut, "Connection to 192.168.1.20:60128 timed out")]
    #[case(io::ErrorKind::HostUnreachable, "Receiver 192.168.1.20:60128 is unreachable")]
    #[case(io::ErrorKind::NetworkUnreachable, "Receiver 192.168.1.20:60128 is unreachable")]
    fn test_connect_error_classification(#[case] kind: io::ErrorKind, #[case] expected: &str) {
        let error = ConnectError::from_io(addr(), io::Error::from(kind));
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_other_io_errors_pass_through() {
        let error = ConnectError::from_io(addr(), io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(matches!(error, ConnectError::Io(_)));
    }

    #[rstest]
    #[case(io::ErrorKind::BrokenPipe, TransportFault::BrokenPipe)]
    #[case(io::ErrorKind::ConnectionReset, TransportFault::Reset)]
    #[case(io::ErrorKind::UnexpectedEof, TransportFault::Reset)]
    #[case(io::ErrorKind::TimedOut, TransportFault::Timeout)]
    fn test_transport_fault_classification(
        #[case] kind: io::ErrorKind,
        #[case] expected: TransportFault,
    ) {
        assert_eq!(TransportFault::from(&io::Error::from(kind)), expected);
    }

    #[test]
    fn test_translation_error_is_transparent() {
        let error: SendError = TranslationError::Unsupported {
            kind: "input",
            value: "HDMI9".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "Unsupported input: HDMI9");
    }
}
