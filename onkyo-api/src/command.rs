//! Abstract command vocabulary
//!
//! These types describe what a caller wants the receiver to do, independent of the
//! receiver's wire codes. [`crate::CommandTranslator`] turns them into [`eiscp::Command`]s.

use eiscp::{Command, CommandCode};
use serde::{Deserialize, Serialize};

/// Receiver power state as reported by `PWR`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerState {
    On,
    Standby,
}

impl PowerState {
    /// The opposite state, used to resolve a power toggle.
    pub fn toggled(self) -> Self {
        match self {
            PowerState::On => PowerState::Standby,
            PowerState::Standby => PowerState::On,
        }
    }
}

/// On-screen menu keys (`OSD`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Exit,
    Home,
    Menu,
    Return,
    Quick,
}

impl NavigationKey {
    pub(crate) fn parameter(self) -> &'static str {
        match self {
            NavigationKey::Up => "UP",
            NavigationKey::Down => "DOWN",
            NavigationKey::Left => "LEFT",
            NavigationKey::Right => "RIGHT",
            NavigationKey::Enter => "ENTER",
            NavigationKey::Exit => "EXIT",
            NavigationKey::Home => "HOME",
            NavigationKey::Menu => "MENU",
            NavigationKey::Return => "RETURN",
            NavigationKey::Quick => "QUICK",
        }
    }
}

/// Network/USB transport controls (`NTC`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportAction {
    Play,
    Pause,
    Stop,
    NextTrack,
    PreviousTrack,
    FastForward,
    Rewind,
    Repeat,
    Shuffle,
}

impl TransportAction {
    pub(crate) fn parameter(self) -> &'static str {
        match self {
            TransportAction::Play => "PLAY",
            TransportAction::Pause => "PAUSE",
            TransportAction::Stop => "STOP",
            TransportAction::NextTrack => "TRUP",
            TransportAction::PreviousTrack => "TRDN",
            TransportAction::FastForward => "FF",
            TransportAction::Rewind => "REW",
            TransportAction::Repeat => "REPEAT",
            TransportAction::Shuffle => "RANDOM",
        }
    }
}

/// Front panel brightness (`DIM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimmerLevel {
    Bright,
    Dim,
    Dark,
    Off,
    /// Step to the next brightness level
    Cycle,
}

impl DimmerLevel {
    pub(crate) fn parameter(self) -> &'static str {
        match self {
            DimmerLevel::Bright => "00",
            DimmerLevel::Dim => "01",
            DimmerLevel::Dark => "02",
            DimmerLevel::Off => "03",
            DimmerLevel::Cycle => "DIM",
        }
    }
}

/// Sleep timer setting (`SLP`)
///
/// The receiver accepts 1 to 90 minutes; `Minutes(0)` disables the timer and larger
/// values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepTimer {
    Off,
    Minutes(u8),
}

/// Longest sleep timer the receiver accepts, in minutes
pub const MAX_SLEEP_MINUTES: u8 = 90;

/// A receiver operation expressed independently of the wire protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbstractCommand {
    PowerOn,
    PowerOff,
    /// Flip power relative to the state the caller last observed
    PowerToggle { current: PowerState },
    /// Set the absolute volume in native receiver units
    SetVolume(u16),
    /// Move the volume by `delta` native units from a known `current` level
    AdjustVolume { current: u16, delta: i32 },
    VolumeUp,
    VolumeDown,
    MuteOn,
    MuteOff,
    MuteToggle,
    /// Select an input by catalog name, e.g. "BD/DVD"
    SelectInput(String),
    /// Select a listening mode by catalog name, e.g. "STEREO"
    SelectSoundMode(String),
    SoundModeUp,
    SoundModeDown,
    Navigate(NavigationKey),
    Transport(TransportAction),
    /// Ask the receiver to report the current value of a command code
    Query(CommandCode),
    Dimmer(DimmerLevel),
    SleepTimer(SleepTimer),
    AudioInfo,
    VideoInfo,
    /// Pass a wire command through untouched
    Raw(Command),
}

impl AbstractCommand {
    /// Queries for the state a freshly connected client should learn first.
    pub fn status_queries() -> Vec<AbstractCommand> {
        [
            CommandCode::POWER,
            CommandCode::VOLUME,
            CommandCode::MUTE,
            CommandCode::INPUT,
            CommandCode::LISTENING_MODE,
        ]
        .into_iter()
        .map(AbstractCommand::Query)
        .collect()
    }
}
