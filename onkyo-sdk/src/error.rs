use thiserror::Error;

use onkyo_discovery::DiscoveryError;
use onkyo_stream::{ConnectError, SendError};

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Connection error: {0}")]
    Connect(#[from] ConnectError),

    #[error("Send error: {0}")]
    Send(#[from] SendError),

    #[error("Receiver not found: {0}")]
    ReceiverNotFound(String),

    #[error("Background task failed: {0}")]
    Task(String),
}
