//! Test helpers for discovery integration tests
//!
//! A fake receiver listens on a loopback UDP port, waits for the discovery request and
//! answers with scripted datagrams.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::thread::JoinHandle;
use std::time::Duration;

use eiscp::{Command, CommandCode, PacketCodec, UnitType};
use onkyo_discovery::DiscoveryConfig;

pub struct FakeReceiver {
    pub port: u16,
    handle: JoinHandle<Option<String>>,
}

impl FakeReceiver {
    /// Start a fake receiver that answers the first request with `replies`
    pub fn start(replies: Vec<Vec<u8>>) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").expect("bind fake receiver");
        socket
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("set read timeout");
        let port = socket.local_addr().expect("local addr").port();

        let handle = std::thread::spawn(move || {
            let mut buffer = [0u8; 512];
            let (size, client) = socket.recv_from(&mut buffer).ok()?;
            let (request, _) = PacketCodec::default().decode(&buffer[..size]).ok()?;
            for reply in replies {
                socket.send_to(&reply, client).ok()?;
            }
            Some(request.to_string())
        });

        Self { port, handle }
    }

    /// The request the fake received, e.g. "ECNQSTN"
    pub fn request(self) -> Option<String> {
        self.handle.join().ok().flatten()
    }

    pub fn config(&self, timeout: Duration) -> DiscoveryConfig {
        DiscoveryConfig::default()
            .with_broadcast_address(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .with_port(self.port)
            .with_timeout(timeout)
    }
}

/// An `ECN` reply frame the way receivers send it: no unit type, EOF terminated
pub fn ecn_reply(model: &str, identifier: &str) -> Vec<u8> {
    let codec = PacketCodec::new(UnitType::none());
    let parameter = format!("{}/60128/DX/{}\u{1a}", model, identifier);
    codec
        .encode(&Command::new(CommandCode::RECEIVER_INFO, parameter))
        .to_vec()
}
