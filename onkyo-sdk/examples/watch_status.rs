//! Connect to a receiver and print its status events until Ctrl-C
//!
//! Run with: cargo run -p onkyo-sdk --example watch_status [--json] [receiver-ip]
//!
//! Without an address the first receiver found by discovery is used. `--json` prints
//! each event as one JSON object per line. Set
//! `ONKYO_LOG_LEVEL=debug` to see frames and reconnect attempts.

use std::net::{IpAddr, SocketAddr};

use onkyo_sdk::prelude::*;
use onkyo_sdk::{init_logging, LoggingMode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingMode::Development)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|arg| arg == "--json");

    let address = match args.iter().find(|arg| !arg.starts_with("--")) {
        Some(ip) => SocketAddr::new(ip.parse::<IpAddr>()?, onkyo_sdk::DEFAULT_PORT),
        None => {
            println!("Discovering receivers...");
            let receivers = discover(DiscoveryConfig::default()).await?;
            for receiver in &receivers {
                println!(
                    "  {} {} at {} ({})",
                    receiver.model,
                    receiver.identifier,
                    receiver.address,
                    receiver.region
                );
            }
            let receiver = receivers
                .into_iter()
                .next()
                .ok_or_else(|| SdkError::ReceiverNotFound("no receiver answered".to_string()))?;
            receiver.control_address()
        }
    };

    let connection = Connection::new(ConnectionConfig::default())?;
    let mut events = connection.events();
    connection.connect(address).await?;
    println!("Connected to {}, watching status (Ctrl-C to stop)", address);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) if json => println!("{}", serde_json::to_string(&event)?),
                Some(event) => println!("{:<26} {}", event.event_type(), describe(&event)),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    connection.close().await;
    Ok(())
}

fn describe(event: &StatusEvent) -> String {
    match event {
        StatusEvent::ConnectionChanged { state } => format!("{:?}", state),
        StatusEvent::PowerChanged { power } => format!("{:?}", power),
        StatusEvent::VolumeChanged { level } => level.to_string(),
        StatusEvent::MuteChanged { muted } => muted.to_string(),
        StatusEvent::InputChanged { code, name } | StatusEvent::SoundModeChanged { code, name } => {
            format!("{} ({})", name.as_deref().unwrap_or("unknown"), code)
        }
        StatusEvent::TitleChanged { title } => title.clone(),
        StatusEvent::ArtistChanged { artist } => artist.clone(),
        StatusEvent::AlbumChanged { album } => album.clone(),
        StatusEvent::PlaybackPositionChanged { position } => match position.total {
            Some(total) => format!("{}s / {}s", position.elapsed.as_secs(), total.as_secs()),
            None => format!("{}s", position.elapsed.as_secs()),
        },
        StatusEvent::PlaybackStatusChanged { status } => format!("{:?}", status),
        StatusEvent::Unrecognized { code, parameter } => format!("{}{}", code, parameter),
    }
}
