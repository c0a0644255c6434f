//! # Onkyo SDK
//!
//! Discover Onkyo/Integra receivers on the local network, keep a control session open to
//! one and follow its status as typed events.
//!
//! ```rust,no_run
//! use onkyo_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SdkError> {
//!     let receivers = discover(DiscoveryConfig::default()).await?;
//!     let receiver = receivers
//!         .first()
//!         .ok_or_else(|| SdkError::ReceiverNotFound("no receiver answered".to_string()))?;
//!
//!     let connection = connect(receiver, ConnectionConfig::default()).await?;
//!     let mut events = connection.events();
//!
//!     connection.send(AbstractCommand::PowerOn).await?;
//!     connection.send(AbstractCommand::SetVolume(30)).await?;
//!
//!     while let Some(event) = events.recv().await {
//!         println!("{:?}", event);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! onkyo-sdk (facade, logging)
//!     ↓
//! onkyo-discovery (UDP broadcast)     onkyo-stream (sessions, status events)
//!     ↓                                   ↓
//!     ↓                               onkyo-api (abstract commands → wire commands)
//!     ↓                                   ↓
//! eiscp (frame codec) ←───────────────────┘
//! ```

pub mod logging;
pub mod prelude;

mod error;

pub use error::SdkError;
pub use logging::{init_logging, LoggingMode};

pub use eiscp::{Command, CommandCode, FrameError, PacketCodec, UnitType, DEFAULT_PORT};
pub use onkyo_api::{
    AbstractCommand, CommandTranslator, DimmerLevel, NavigationKey, PowerState,
    ReceiverCapabilities, Selection, SleepTimer, TranslationError, TransportAction,
};
pub use onkyo_discovery::{DiscoveryConfig, DiscoveryError, ReceiverDescriptor};
pub use onkyo_stream::{
    BackoffConfig, ConnectError, Connection, ConnectionConfig, ConnectionState,
    PlaybackPosition, PlaybackStatus, SendError, StatusEvent,
};

/// Run one discovery pass without blocking the async runtime.
///
/// The pass runs on tokio's blocking pool and resolves once the configured timeout has
/// elapsed. Receivers are returned in reply order, one entry per identifier.
pub async fn discover(config: DiscoveryConfig) -> Result<Vec<ReceiverDescriptor>, SdkError> {
    let receivers = tokio::task::spawn_blocking(move || {
        onkyo_discovery::discover(&config).map(|pass| pass.collect::<Vec<_>>())
    })
    .await
    .map_err(|e| SdkError::Task(e.to_string()))??;

    tracing::info!(count = receivers.len(), "Discovery finished");
    Ok(receivers)
}

/// Open a session to a discovered receiver.
pub async fn connect(
    receiver: &ReceiverDescriptor,
    config: ConnectionConfig,
) -> Result<Connection, SdkError> {
    let connection = Connection::new(config)?;
    connection.connect(receiver.control_address()).await?;
    Ok(connection)
}
