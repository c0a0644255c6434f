//! Event types for the onkyo-stream crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use onkyo_api::PowerState;

/// Lifecycle state of a [`crate::Connection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
}

/// Network/USB play status reported by `NST`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
    FastForward,
    Rewind,
}

/// Elapsed and total time of the current network/USB track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaybackPosition {
    pub elapsed: Duration,
    /// `None` for streams without a known length
    pub total: Option<Duration>,
}

/// Events emitted by a connection.
///
/// Every variant carries the new value. Selections keep the raw two-digit code so
/// callers can tell apart inputs that share a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusEvent {
    /// The session to the receiver changed state
    ConnectionChanged { state: ConnectionState },

    PowerChanged { power: PowerState },

    /// Master volume in native receiver units
    VolumeChanged { level: u16 },

    MuteChanged { muted: bool },

    InputChanged { code: String, name: Option<String> },

    SoundModeChanged { code: String, name: Option<String> },

    TitleChanged { title: String },

    ArtistChanged { artist: String },

    AlbumChanged { album: String },

    PlaybackPositionChanged { position: PlaybackPosition },

    PlaybackStatusChanged { status: PlaybackStatus },

    /// A frame this crate does not classify, or a known code with an unexpected parameter
    Unrecognized { code: String, parameter: String },
}

impl StatusEvent {
    /// Get the event type identifier.
    pub fn event_type(&self) -> &'static str {
        match self {
            StatusEvent::ConnectionChanged { .. } => "connection_changed",
            StatusEvent::PowerChanged { .. } => "power_changed",
            StatusEvent::VolumeChanged { .. } => "volume_changed",
            StatusEvent::MuteChanged { .. } => "mute_changed",
            StatusEvent::InputChanged { .. } => "input_changed",
            StatusEvent::SoundModeChanged { .. } => "sound_mode_changed",
            StatusEvent::TitleChanged { .. } => "title_changed",
            StatusEvent::ArtistChanged { .. } => "artist_changed",
            StatusEvent::AlbumChanged { .. } => "album_changed",
            StatusEvent::PlaybackPositionChanged { .. } => "playback_position_changed",
            StatusEvent::PlaybackStatusChanged { .. } => "playback_status_changed",
            StatusEvent::Unrecognized { .. } => "unrecognized",
        }
    }
}
