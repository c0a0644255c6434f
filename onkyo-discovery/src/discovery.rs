//! Core discovery logic and iterator implementation.
//!
//! A pass sends one `!xECNQSTN` broadcast, then reads replies from the same socket until
//! the configured timeout has elapsed in total. Each reply is decoded with the eISCP codec
//! and turned into a [`ReceiverDescriptor`]; receivers answering more than once are
//! reported only the first time.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::Instant;

use eiscp::PacketCodec;
use tracing::{debug, info, warn};

use crate::config::DiscoveryConfig;
use crate::descriptor::{self, ReceiverDescriptor};
use crate::error::{DiscoveryError, Result};

const RECV_BUFFER_SIZE: usize = 1024;

/// Iterator over receivers answering one discovery pass.
///
/// The iterator is lazy: each call to `next` blocks until a new receiver answers or the
/// pass deadline passes. Dropping it early closes the socket.
///
/// # Examples
///
/// ```no_run
/// use onkyo_discovery::{discover, DiscoveryConfig};
///
/// for receiver in discover(&DiscoveryConfig::default())? {
///     println!("{} at {}", receiver.model, receiver.address);
/// }
/// # Ok::<(), onkyo_discovery::DiscoveryError>(())
/// ```
pub struct DiscoveryIterator {
    socket: Option<UdpSocket>,
    codec: PacketCodec,
    deadline: Instant,
    seen_identifiers: HashSet<String>,
    buffer: [u8; RECV_BUFFER_SIZE],
}

impl DiscoveryIterator {
    /// Bind a socket, broadcast the discovery request and start listening
    pub fn new(config: &DiscoveryConfig) -> Result<Self> {
        config.validate()?;

        let socket = UdpSocket::bind(("0.0.0.0", 0))
            .map_err(DiscoveryError::network("failed to bind discovery socket"))?;
        socket
            .set_broadcast(true)
            .map_err(DiscoveryError::network("failed to enable broadcast"))?;

        let codec = PacketCodec::default();
        let target = SocketAddr::new(config.broadcast_address, config.port);
        socket
            .send_to(&codec.discovery_request(), target)
            .map_err(DiscoveryError::network("failed to send discovery request"))?;
        debug!(%target, timeout = ?config.timeout, "Sent discovery request");

        Ok(Self {
            socket: Some(socket),
            codec,
            deadline: Instant::now() + config.timeout,
            seen_identifiers: HashSet::new(),
            buffer: [0; RECV_BUFFER_SIZE],
        })
    }

    /// Create an empty iterator that yields no results
    pub(crate) fn empty() -> Self {
        Self {
            socket: None,
            codec: PacketCodec::default(),
            deadline: Instant::now(),
            seen_identifiers: HashSet::new(),
            buffer: [0; RECV_BUFFER_SIZE],
        }
    }

    fn finish(&mut self) {
        if self.socket.take().is_some() {
            debug!(
                receivers = self.seen_identifiers.len(),
                "Discovery pass finished"
            );
        }
    }

    fn handle_datagram(&mut self, size: usize, source: SocketAddr) -> Option<ReceiverDescriptor> {
        let command = match self.codec.decode(&self.buffer[..size]) {
            Ok((command, _)) => command,
            Err(error) => {
                debug!(%source, %error, "Skipping undecodable discovery reply");
                return None;
            }
        };

        let Some(receiver) = descriptor::from_reply(&command, source) else {
            debug!(%source, %command, "Skipping non-discovery reply");
            return None;
        };

        if !self.seen_identifiers.insert(receiver.identifier.clone()) {
            debug!(identifier = %receiver.identifier, "Skipping duplicate discovery reply");
            return None;
        }

        info!(
            identifier = %receiver.identifier,
            model = %receiver.model,
            address = %receiver.address,
            "Discovered receiver"
        );
        Some(receiver)
    }
}

impl Iterator for DiscoveryIterator {
    type Item = ReceiverDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let socket = self.socket.as_ref()?;

            let remaining = self.deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || socket.set_read_timeout(Some(remaining)).is_err() {
                self.finish();
                return None;
            }

            match socket.recv_from(&mut self.buffer) {
                Ok((size, source)) => {
                    if let Some(receiver) = self.handle_datagram(size, source) {
                        return Some(receiver);
                    }
                }
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    self.finish();
                    return None;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "Discovery socket error, ending pass");
                    self.finish();
                    return None;
                }
            }
        }
    }
}
