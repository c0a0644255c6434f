//! Test helpers for connection tests
//!
//! `FakeConnector` replays a script of connect outcomes and hands the receiver side of
//! every accepted session to the test as an in-memory duplex pipe.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use eiscp::{Command, PacketCodec, UnitType, HEADER_SIZE};
use onkyo_stream::{BoxedReader, BoxedWriter, ConnectError, Connector};
use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, DuplexStream};
use tokio::sync::mpsc;
use tokio::time::Instant;

pub fn receiver_address() -> SocketAddr {
    "192.168.1.50:60128".parse().unwrap()
}

/// Outcome of one connect attempt
#[derive(Debug, Clone, Copy)]
pub enum Script {
    /// Open a healthy session
    Accept,
    /// Open a session whose writes always fail with a broken pipe
    BrokenWriter,
    /// Refuse the connection
    Refuse,
    /// Never complete the connect
    Hang,
}

pub struct FakeConnector {
    script: Mutex<VecDeque<Script>>,
    attempts: Arc<Mutex<Vec<Instant>>>,
    peers: mpsc::UnboundedSender<DuplexStream>,
}

/// Test-side view of a [`FakeConnector`]
pub struct FakeNetwork {
    pub attempts: Arc<Mutex<Vec<Instant>>>,
    pub peers: mpsc::UnboundedReceiver<DuplexStream>,
}

impl FakeNetwork {
    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().len()
    }

    /// Receiver end of the next accepted session
    pub async fn next_peer(&mut self) -> DuplexStream {
        self.peers.recv().await.expect("connector dropped")
    }
}

/// Build a connector following `script`; attempts past its end are refused.
pub fn fake_connector(script: &[Script]) -> (FakeConnector, FakeNetwork) {
    let attempts = Arc::new(Mutex::new(Vec::new()));
    let (tx, rx) = mpsc::unbounded_channel();
    let connector = FakeConnector {
        script: Mutex::new(script.iter().copied().collect()),
        attempts: Arc::clone(&attempts),
        peers: tx,
    };
    (connector, FakeNetwork { attempts, peers: rx })
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(
        &self,
        address: SocketAddr,
    ) -> Result<(BoxedReader, BoxedWriter), ConnectError> {
        self.attempts.lock().push(Instant::now());
        let step = self.script.lock().pop_front().unwrap_or(Script::Refuse);

        match step {
            Script::Accept => {
                let (client, peer) = tokio::io::duplex(8192);
                let _ = self.peers.send(peer);
                let (reader, writer) = tokio::io::split(client);
                Ok((Box::new(reader), Box::new(writer)))
            }
            Script::BrokenWriter => {
                let (client, peer) = tokio::io::duplex(8192);
                let _ = self.peers.send(peer);
                let (reader, _writer) = tokio::io::split(client);
                Ok((Box::new(reader), Box::new(FailingWriter)))
            }
            Script::Refuse => Err(ConnectError::Refused(address)),
            Script::Hang => std::future::pending().await,
        }
    }
}

/// Writer whose every write fails with a broken pipe
pub struct FailingWriter;

impl AsyncWrite for FailingWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::from(io::ErrorKind::BrokenPipe)))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Read one complete frame from the receiver side and decode it
pub async fn read_frame<R: AsyncRead + Unpin>(peer: &mut R) -> Vec<u8> {
    let mut header = [0u8; HEADER_SIZE];
    peer.read_exact(&mut header).await.expect("read header");
    let data_len = u32::from_be_bytes([header[8], header[9], header[10], header[11]]) as usize;
    let mut frame = header.to_vec();
    frame.resize(HEADER_SIZE + data_len, 0);
    peer.read_exact(&mut frame[HEADER_SIZE..])
        .await
        .expect("read payload");
    frame
}

pub async fn read_command<R: AsyncRead + Unpin>(peer: &mut R) -> Command {
    let frame = read_frame(peer).await;
    PacketCodec::default().decode(&frame).expect("decodable frame").0
}

/// Write a status frame the way a receiver does
pub async fn push<W: AsyncWrite + Unpin>(peer: &mut W, command: &Command) {
    let frame = PacketCodec::new(UnitType::none()).encode(command);
    peer.write_all(&frame).await.expect("write frame");
}

/// Answer every keep-alive query on `peer` with a power report
pub fn spawn_responder(mut peer: DuplexStream) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let mut header = [0u8; HEADER_SIZE];
            if peer.read_exact(&mut header).await.is_err() {
                return;
            }
            let data_len =
                u32::from_be_bytes([header[8], header[9], header[10], header[11]]) as usize;
            let mut data = vec![0u8; data_len];
            if peer.read_exact(&mut data).await.is_err() {
                return;
            }
            let reply = Command::new(eiscp::CommandCode::POWER, "01");
            let frame = PacketCodec::new(UnitType::none()).encode(&reply);
            if peer.write_all(&frame).await.is_err() {
                return;
            }
        }
    })
}
