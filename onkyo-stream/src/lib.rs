//! Event streaming and session management for onkyo-sdk
//!
//! This crate keeps a live eISCP session to a receiver and turns what the receiver
//! pushes into typed [`StatusEvent`]s.
//!
//! # Quick Start
//!
//! ```no_run
//! use onkyo_stream::{Connection, ConnectionConfig};
//! use onkyo_api::AbstractCommand;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connection = Connection::new(ConnectionConfig::default())?;
//! let mut events = connection.events();
//!
//! connection.connect("192.168.1.50:60128".parse()?).await?;
//! connection.send(AbstractCommand::SetVolume(30)).await?;
//!
//! while let Some(event) = events.recv().await {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backoff;
pub mod config;
pub mod connection;
pub mod error;
pub mod event;
pub mod parser;
pub mod subscribers;
pub mod transport;

pub use backoff::Backoff;
pub use config::{BackoffConfig, ConnectionConfig};
pub use connection::Connection;
pub use error::{ConnectError, SendError};
pub use event::{ConnectionState, PlaybackPosition, PlaybackStatus, PowerState, StatusEvent};
pub use parser::{classify, StatusStreamParser};
pub use subscribers::{Callback, Subscribers};
pub use transport::{BoxedReader, BoxedWriter, Connector, TcpConnector};
