//! Transport seam between a connection and the network.

use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::ConnectError;

/// Read half of an open session
pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;

/// Write half of an open session
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Opens byte streams to a receiver.
///
/// The connection applies its own connect timeout around [`Connector::connect`].
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, address: SocketAddr)
        -> Result<(BoxedReader, BoxedWriter), ConnectError>;
}

/// TCP connector used against real receivers
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(
        &self,
        address: SocketAddr,
    ) -> Result<(BoxedReader, BoxedWriter), ConnectError> {
        let stream = TcpStream::connect(address)
            .await
            .map_err(|e| ConnectError::from_io(address, e))?;
        // Frames are small and latency matters more than throughput
        stream.set_nodelay(true)?;
        debug!(%address, "TCP session opened");

        let (reader, writer) = stream.into_split();
        Ok((Box::new(reader), Box::new(writer)))
    }
}
