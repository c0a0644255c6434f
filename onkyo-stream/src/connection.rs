//! Persistent receiver sessions
//!
//! A [`Connection`] owns one session to one receiver at a time. After a successful
//! [`Connection::connect`] a supervisor task reads the socket and feeds the status
//! parser, while a per-session keep-alive task probes an idle receiver. Any transport
//! fault moves the connection to [`ConnectionState::Reconnecting`] and the supervisor
//! retries with exponential backoff until it succeeds or [`Connection::close`] is called.
//!
//! ```text
//! Disconnected -> Connecting -> Connected -> Reconnecting -> Connected ...
//!       ^____________ close() from any state (terminal) ____________|
//! ```

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eiscp::{Command, PacketCodec};
use onkyo_api::{AbstractCommand, CommandTranslator};
use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, sleep_until, timeout, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backoff::Backoff;
use crate::config::ConnectionConfig;
use crate::error::{ConnectError, SendError, TransportFault};
use crate::event::{ConnectionState, StatusEvent};
use crate::parser::StatusStreamParser;
use crate::subscribers::Subscribers;
use crate::transport::{BoxedReader, BoxedWriter, Connector, TcpConnector};

const READ_BUFFER_SIZE: usize = 4096;

/// Session to a single receiver with reconnection and keep-alive
///
/// Dropping a connection has the same effect as closing it, except that subscribers
/// are not notified.
pub struct Connection {
    inner: Arc<Inner>,
}

struct Inner {
    config: ConnectionConfig,
    codec: PacketCodec,
    translator: CommandTranslator,
    connector: Arc<dyn Connector>,
    state: watch::Sender<ConnectionState>,
    address: Mutex<Option<SocketAddr>>,
    writer: tokio::sync::Mutex<Option<BoxedWriter>>,
    subscribers: Subscribers,
    last_activity: Mutex<Option<Instant>>,
    inbound_frames: AtomicU64,
    shutdown: CancellationToken,
    session: Mutex<CancellationToken>,
    supervisor: Mutex<Option<JoinHandle<()>>>,
}

impl Connection {
    /// Create a TCP connection handle; nothing is opened until [`Connection::connect`].
    pub fn new(config: ConnectionConfig) -> Result<Self, ConnectError> {
        Self::with_connector(config, TcpConnector)
    }

    /// Create a connection handle that opens sessions through `connector`.
    pub fn with_connector<C: Connector>(
        config: ConnectionConfig,
        connector: C,
    ) -> Result<Self, ConnectError> {
        config.validate()?;

        let shutdown = CancellationToken::new();
        let session = shutdown.child_token();
        let (state, _) = watch::channel(ConnectionState::Disconnected);

        Ok(Self {
            inner: Arc::new(Inner {
                codec: PacketCodec::new(config.unit_type.clone()),
                translator: CommandTranslator::new(config.capabilities.clone()),
                config,
                connector: Arc::new(connector),
                state,
                address: Mutex::new(None),
                writer: tokio::sync::Mutex::new(None),
                subscribers: Subscribers::new(),
                last_activity: Mutex::new(None),
                inbound_frames: AtomicU64::new(0),
                shutdown,
                session: Mutex::new(session),
                supervisor: Mutex::new(None),
            }),
        })
    }

    /// Open a session to the receiver at `address`.
    ///
    /// On success the connection is [`ConnectionState::Connected`] and keeps itself
    /// connected until closed. On failure it returns to
    /// [`ConnectionState::Disconnected`] and may be connected again.
    pub async fn connect(&self, address: SocketAddr) -> Result<(), ConnectError> {
        let inner = &self.inner;
        if inner.shutdown.is_cancelled() {
            return Err(ConnectError::Closed);
        }

        let claimed = inner.state.send_if_modified(|state| {
            if *state == ConnectionState::Disconnected {
                *state = ConnectionState::Connecting;
                true
            } else {
                false
            }
        });
        if !claimed {
            return Err(ConnectError::AlreadyConnected);
        }

        *inner.address.lock() = Some(address);
        info!(%address, "Connecting to receiver");

        let (reader, writer) = match inner.open(address).await {
            Ok(halves) => halves,
            Err(error) => {
                // A concurrent close() already left the state at Disconnected
                inner.state.send_if_modified(|state| {
                    if *state == ConnectionState::Connecting {
                        *state = ConnectionState::Disconnected;
                        true
                    } else {
                        false
                    }
                });
                warn!(%address, %error, "Connect failed");
                return Err(error);
            }
        };

        let session = inner.establish(writer).await.ok_or(ConnectError::Closed)?;
        let handle = tokio::spawn(supervise(Arc::clone(inner), reader, session));
        *inner.supervisor.lock() = Some(handle);
        Ok(())
    }

    /// Translate and send an abstract command.
    pub async fn send(&self, command: AbstractCommand) -> Result<(), SendError> {
        if self.inner.shutdown.is_cancelled() {
            return Err(SendError::Closed);
        }
        let command = self.inner.translator.translate(&command)?;
        self.send_command(command).await
    }

    /// Send a wire command as is.
    ///
    /// A failed write returns [`SendError::Disconnected`] and the connection starts
    /// reconnecting; the command is not retried.
    pub async fn send_command(&self, command: Command) -> Result<(), SendError> {
        if self.inner.shutdown.is_cancelled() {
            return Err(SendError::Closed);
        }
        if self.state() != ConnectionState::Connected {
            return Err(SendError::NotConnected);
        }
        let session = self.inner.session.lock().clone();
        self.inner.write_command(&command, &session).await
    }

    /// Register a callback for every status event, in subscription order.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&StatusEvent) + Send + Sync + 'static,
    {
        self.inner.subscribers.subscribe(callback);
    }

    /// Channel of all status events published from now on.
    ///
    /// The channel ends when the connection is closed.
    pub fn events(&self) -> mpsc::UnboundedReceiver<StatusEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribe(move |event| {
            // Receiver dropped; the callback lingers until close()
            let _ = tx.send(event.clone());
        });
        rx
    }

    /// Close the session and stop reconnecting. Idempotent and terminal.
    pub async fn close(&self) {
        let inner = &self.inner;
        inner.shutdown.cancel();
        let previous = inner.state.send_replace(ConnectionState::Disconnected);

        inner.drop_writer().await;
        let supervisor = inner.supervisor.lock().take();
        if let Some(handle) = supervisor {
            if let Err(error) = handle.await {
                warn!(%error, "Connection supervisor ended abnormally");
            }
        }

        if previous != ConnectionState::Disconnected {
            info!(address = ?self.address(), "Connection closed");
            inner.subscribers.publish(&StatusEvent::ConnectionChanged {
                state: ConnectionState::Disconnected,
            });
        }
        inner.subscribers.clear();
    }

    pub fn state(&self) -> ConnectionState {
        *self.inner.state.borrow()
    }

    /// Watch channel following every state transition
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state.subscribe()
    }

    /// When a frame was last sent or any bytes were last received
    pub fn last_activity(&self) -> Option<Instant> {
        *self.inner.last_activity.lock()
    }

    /// Receiver address of the current or last connect
    pub fn address(&self) -> Option<SocketAddr> {
        *self.inner.address.lock()
    }

    pub fn translator(&self) -> &CommandTranslator {
        &self.inner.translator
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.inner.shutdown.cancel();
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("address", &self.address())
            .field("state", &self.state())
            .finish()
    }
}

impl Inner {
    /// One connect attempt, bounded by the connect timeout and by close()
    async fn open(&self, address: SocketAddr) -> Result<(BoxedReader, BoxedWriter), ConnectError> {
        tokio::select! {
            _ = self.shutdown.cancelled() => Err(ConnectError::Closed),
            result = timeout(self.config.connect_timeout, self.connector.connect(address)) => {
                match result {
                    Ok(halves) => halves,
                    Err(_) => Err(ConnectError::Timeout(address)),
                }
            }
        }
    }

    /// Install a freshly opened writer and enter `Connected`. Returns `None` when the
    /// connection was closed in the meantime.
    async fn establish(&self, writer: BoxedWriter) -> Option<CancellationToken> {
        let mut slot = self.writer.lock().await;
        // Senders read the session token after observing Connected
        let session = self.shutdown.child_token();
        *self.session.lock() = session.clone();

        let promoted = self.state.send_if_modified(|state| {
            let opening = matches!(
                *state,
                ConnectionState::Connecting | ConnectionState::Reconnecting
            );
            if opening && !self.shutdown.is_cancelled() {
                *state = ConnectionState::Connected;
                true
            } else {
                false
            }
        });
        if !promoted {
            return None;
        }

        *slot = Some(writer);
        self.touch();

        // close() takes the slot before announcing Disconnected, so this cannot follow it
        info!(address = ?*self.address.lock(), "Connected to receiver");
        self.subscribers.publish(&StatusEvent::ConnectionChanged {
            state: ConnectionState::Connected,
        });
        drop(slot);
        Some(session)
    }

    async fn write_command(
        &self,
        command: &Command,
        session: &CancellationToken,
    ) -> Result<(), SendError> {
        let frame = self.codec.encode(command);

        let mut slot = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return Err(SendError::Closed),
            _ = session.cancelled() => return Err(SendError::Disconnected),
            slot = self.writer.lock() => slot,
        };
        let Some(writer) = slot.as_mut() else {
            return Err(SendError::NotConnected);
        };

        let result = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return Err(SendError::Closed),
            _ = session.cancelled() => return Err(SendError::Disconnected),
            result = async {
                writer.write_all(&frame).await?;
                writer.flush().await
            } => result,
        };
        drop(slot);

        match result {
            Ok(()) => {
                self.touch();
                debug!(%command, "Sent command");
                Ok(())
            }
            Err(error) => {
                self.transport_failed(session, TransportFault::from(&error));
                Err(SendError::Disconnected)
            }
        }
    }

    /// Read until the session ends, feeding a fresh parser.
    async fn read_session(&self, reader: &mut BoxedReader, session: &CancellationToken) {
        let mut parser =
            StatusStreamParser::with_codec(self.codec.clone(), self.subscribers.clone());
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];

        loop {
            let read = tokio::select! {
                biased;
                _ = session.cancelled() => return,
                read = reader.read(&mut buffer) => read,
            };

            match read {
                Ok(0) => {
                    self.transport_failed(session, TransportFault::Reset);
                    return;
                }
                Ok(n) => {
                    if *self.state.borrow() != ConnectionState::Connected {
                        debug!(bytes = n, "Discarding bytes from closing session");
                        return;
                    }
                    self.touch();
                    let frames = parser.feed(&buffer[..n]);
                    self.inbound_frames
                        .fetch_add(frames as u64, Ordering::Relaxed);
                }
                Err(error) => {
                    self.transport_failed(session, TransportFault::from(&error));
                    return;
                }
            }
        }
    }

    /// Abandon the current session and enter `Reconnecting`. Faults reported by an
    /// already abandoned session are ignored.
    fn transport_failed(&self, session: &CancellationToken, fault: TransportFault) {
        if session.is_cancelled() {
            return;
        }
        let changed = self.state.send_if_modified(|state| {
            if *state == ConnectionState::Connected {
                *state = ConnectionState::Reconnecting;
                true
            } else {
                false
            }
        });
        session.cancel();

        if changed {
            warn!(address = ?*self.address.lock(), %fault, "Receiver session lost, reconnecting");
            self.subscribers.publish(&StatusEvent::ConnectionChanged {
                state: ConnectionState::Reconnecting,
            });
        }
    }

    /// Retry with backoff until connected; `None` once closed.
    async fn reconnect(&self) -> Option<(BoxedReader, CancellationToken)> {
        let address = (*self.address.lock())?;
        let mut backoff = Backoff::new(self.config.backoff.clone());

        loop {
            let delay = backoff.next_delay();
            debug!(%address, attempt = backoff.attempt(), ?delay, "Scheduling reconnect");
            tokio::select! {
                _ = self.shutdown.cancelled() => return None,
                _ = sleep(delay) => {}
            }

            match self.open(address).await {
                Ok((reader, writer)) => {
                    let session = self.establish(writer).await?;
                    info!(%address, attempts = backoff.attempt(), "Reconnected to receiver");
                    return Some((reader, session));
                }
                Err(ConnectError::Closed) => return None,
                Err(error) => {
                    warn!(%address, attempt = backoff.attempt(), %error, "Reconnect attempt failed");
                }
            }
        }
    }

    async fn drop_writer(&self) {
        if let Some(mut writer) = self.writer.lock().await.take() {
            if let Err(error) = writer.shutdown().await {
                debug!(%error, "Socket shutdown failed");
            }
        }
    }

    fn touch(&self) {
        *self.last_activity.lock() = Some(Instant::now());
    }

    fn idle_since(&self) -> Instant {
        self.last_activity.lock().unwrap_or_else(Instant::now)
    }
}

/// Supervisor task: runs sessions back to back until the connection is closed.
async fn supervise(inner: Arc<Inner>, mut reader: BoxedReader, mut session: CancellationToken) {
    loop {
        let keepalive = tokio::spawn(maintain_session(Arc::clone(&inner), session.clone()));

        inner.read_session(&mut reader, &session).await;
        session.cancel();
        if let Err(error) = keepalive.await {
            warn!(%error, "Keep-alive task ended abnormally");
        }
        drop(reader);
        inner.drop_writer().await;

        if inner.shutdown.is_cancelled() {
            return;
        }
        match inner.reconnect().await {
            Some((next_reader, next_session)) => {
                reader = next_reader;
                session = next_session;
            }
            None => return,
        }
    }
}

/// Per-session writer duties: the initial status queries, then keep-alive probing.
async fn maintain_session(inner: Arc<Inner>, session: CancellationToken) {
    if inner.config.query_on_connect {
        for query in AbstractCommand::status_queries() {
            let Ok(command) = inner.translator.translate(&query) else {
                continue;
            };
            if inner.write_command(&command, &session).await.is_err() {
                return;
            }
        }
    }

    let idle = inner.config.keepalive_idle;
    loop {
        tokio::select! {
            _ = session.cancelled() => return,
            _ = sleep_until(inner.idle_since() + idle) => {}
        }
        if inner.idle_since() + idle > Instant::now() {
            continue;
        }

        let frames_before = inner.inbound_frames.load(Ordering::Relaxed);
        debug!("Sending keep-alive query");
        if inner
            .write_command(&inner.config.keepalive_command, &session)
            .await
            .is_err()
        {
            return;
        }

        tokio::select! {
            _ = session.cancelled() => return,
            _ = sleep(inner.config.keepalive_response_timeout) => {}
        }
        if inner.inbound_frames.load(Ordering::Relaxed) == frames_before {
            inner.transport_failed(&session, TransportFault::Timeout);
            return;
        }
    }
}
