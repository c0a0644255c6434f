//! Receiver descriptors built from discovery replies.

use std::net::{IpAddr, SocketAddr};

use chrono::{DateTime, Utc};
use eiscp::{Command, CommandCode};
use serde::{Deserialize, Serialize};

/// A receiver that answered a discovery request.
///
/// Descriptors are immutable; a later reply from the same receiver produces a new
/// descriptor rather than updating this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverDescriptor {
    /// Unique receiver identifier (usually the MAC address), e.g. "0009B0E4A1C2".
    /// Falls back to the source IP when the reply carries none.
    pub identifier: String,
    /// Model name, e.g. "TX-NR686"
    pub model: String,
    /// Address the reply came from
    pub address: IpAddr,
    /// TCP control port advertised by the receiver (typically 60128)
    pub port: u16,
    /// Region code, e.g. "DX" (North America), "XX" (Europe/Asia), "JJ" (Japan)
    pub region: String,
    /// When the reply was received
    pub discovered_at: DateTime<Utc>,
}

impl ReceiverDescriptor {
    /// Socket address of the receiver's control port
    pub fn control_address(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// Build a descriptor from an `ECN` reply of the form `<model>/<port>/<region>/<identifier>`.
///
/// Returns `None` for anything that is not an `ECN` answer, including our own query when
/// it loops back.
pub(crate) fn from_reply(command: &Command, source: SocketAddr) -> Option<ReceiverDescriptor> {
    if command.code() != CommandCode::RECEIVER_INFO || command.is_query() {
        return None;
    }

    let mut fields = command.parameter().split('/');
    let model = fields.next().map(str::trim).filter(|model| !model.is_empty())?;
    let port = fields
        .next()
        .and_then(|port| port.trim().parse::<u16>().ok())
        .filter(|port| *port != 0)
        .unwrap_or(eiscp::DEFAULT_PORT);
    let region = fields.next().map(str::trim).unwrap_or_default();
    let identifier = fields
        .next()
        .map(|id| id.trim_matches(|c: char| c.is_control() || c.is_whitespace()))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| source.ip().to_string());

    Some(ReceiverDescriptor {
        identifier,
        model: model.to_string(),
        address: source.ip(),
        port,
        region: region.to_string(),
        discovered_at: Utc::now(),
    })
}
