//! End-to-end tests for the SDK facade
//!
//! A loopback "receiver" answers discovery over UDP and accepts the control session over
//! TCP, so discovery, connect, send and status events run against real sockets.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use std::time::Duration;

use onkyo_sdk::prelude::*;
use onkyo_sdk::{Command, CommandCode, PacketCodec, UnitType};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Answer one discovery request with an `ECN` reply advertising `control_port`
fn spawn_discovery_responder(control_port: u16) -> DiscoveryConfig {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    let port = socket.local_addr().unwrap().port();

    std::thread::spawn(move || {
        let mut buffer = [0u8; 512];
        if let Ok((_, client)) = socket.recv_from(&mut buffer) {
            let reply = Command::new(
                CommandCode::RECEIVER_INFO,
                format!("TX-NR686/{}/DX/0009B0E4A1C2\u{1a}", control_port),
            );
            let frame = PacketCodec::new(UnitType::none()).encode(&reply);
            let _ = socket.send_to(&frame, client);
        }
    });

    DiscoveryConfig::default()
        .with_broadcast_address(IpAddr::V4(Ipv4Addr::LOCALHOST))
        .with_port(port)
        .with_timeout(Duration::from_millis(300))
}

async fn read_payload(socket: &mut tokio::net::TcpStream) -> String {
    let mut header = [0u8; 16];
    socket.read_exact(&mut header).await.unwrap();
    let len = u32::from_be_bytes([header[8], header[9], header[10], header[11]]) as usize;
    let mut data = vec![0u8; len];
    socket.read_exact(&mut data).await.unwrap();
    String::from_utf8(data).unwrap()
}

#[tokio::test]
async fn test_discover_then_control() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = spawn_discovery_responder(listener.local_addr().unwrap().port());

    let receivers = discover(config).await.unwrap();
    assert_eq!(receivers.len(), 1);
    assert_eq!(receivers[0].model, "TX-NR686");

    let receiver_task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_payload(&mut socket).await;
        let status = PacketCodec::new(UnitType::none())
            .encode(&Command::new(CommandCode::VOLUME, "28\u{1a}"));
        socket.write_all(&status).await.unwrap();
        (socket, request)
    });

    let connection = connect(
        &receivers[0],
        ConnectionConfig::default().with_query_on_connect(false),
    )
    .await
    .unwrap();
    let mut events = connection.events();
    assert_eq!(connection.state(), ConnectionState::Connected);

    connection.send(AbstractCommand::SetVolume(40)).await.unwrap();
    let (_socket, request) = receiver_task.await.unwrap();
    assert_eq!(request, "!1AVRMVL28\r\n");

    let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .unwrap();
    assert_eq!(event, Some(StatusEvent::VolumeChanged { level: 40 }));

    connection.close().await;
    assert_eq!(connection.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_discover_with_no_receivers() {
    let silent = UdpSocket::bind("127.0.0.1:0").unwrap();
    let config = DiscoveryConfig::default()
        .with_broadcast_address(IpAddr::V4(Ipv4Addr::LOCALHOST))
        .with_port(silent.local_addr().unwrap().port())
        .with_timeout(Duration::from_millis(200));

    assert!(discover(config).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_discovery_config_is_reported() {
    let config = DiscoveryConfig::default().with_port(0);

    let error = discover(config).await.unwrap_err();

    assert!(matches!(error, SdkError::Discovery(_)));
}

#[tokio::test]
async fn test_connect_refused_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = spawn_discovery_responder(listener.local_addr().unwrap().port());
    let receivers = discover(config).await.unwrap();
    drop(listener);

    let error = connect(&receivers[0], ConnectionConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(error, SdkError::Connect(_)), "{error}");
}
