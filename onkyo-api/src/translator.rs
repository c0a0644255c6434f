use eiscp::{Command, CommandCode};
use tracing::debug;

use crate::capabilities::{ReceiverCapabilities, MAX_VOLUME_LEVEL};
use crate::command::{AbstractCommand, PowerState, SleepTimer, MAX_SLEEP_MINUTES};
use crate::error::{Result, TranslationError};

/// Maps [`AbstractCommand`]s to wire [`Command`]s for one receiver
///
/// The translator is stateless apart from the receiver's capabilities; commands that
/// depend on current device state (power toggle, relative volume) carry that state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTranslator {
    capabilities: ReceiverCapabilities,
}

impl CommandTranslator {
    pub fn new(capabilities: ReceiverCapabilities) -> Self {
        Self { capabilities }
    }

    pub fn capabilities(&self) -> &ReceiverCapabilities {
        &self.capabilities
    }

    /// Translate an abstract command into the wire command that performs it.
    ///
    /// Volume levels outside the receiver's range are clamped. Inputs and sound modes
    /// missing from the capability set fail with [`TranslationError::Unsupported`].
    pub fn translate(&self, command: &AbstractCommand) -> Result<Command> {
        let translated = match command {
            AbstractCommand::PowerOn => power(PowerState::On),
            AbstractCommand::PowerOff => power(PowerState::Standby),
            AbstractCommand::PowerToggle { current } => power(current.toggled()),
            AbstractCommand::SetVolume(level) => self.volume(i64::from(*level)),
            AbstractCommand::AdjustVolume { current, delta } => {
                self.volume(i64::from(*current) + i64::from(*delta))
            }
            AbstractCommand::VolumeUp => Command::new(CommandCode::VOLUME, "UP"),
            AbstractCommand::VolumeDown => Command::new(CommandCode::VOLUME, "DOWN"),
            AbstractCommand::MuteOn => Command::new(CommandCode::MUTE, "01"),
            AbstractCommand::MuteOff => Command::new(CommandCode::MUTE, "00"),
            AbstractCommand::MuteToggle => Command::new(CommandCode::MUTE, "TG"),
            AbstractCommand::SelectInput(name) => {
                let code = self
                    .capabilities
                    .input_code(name)
                    .ok_or_else(|| unsupported("input", name))?;
                Command::new(CommandCode::INPUT, code)
            }
            AbstractCommand::SelectSoundMode(name) => {
                let code = self
                    .capabilities
                    .sound_mode_code(name)
                    .ok_or_else(|| unsupported("sound mode", name))?;
                Command::new(CommandCode::LISTENING_MODE, code)
            }
            AbstractCommand::SoundModeUp => Command::new(CommandCode::LISTENING_MODE, "UP"),
            AbstractCommand::SoundModeDown => Command::new(CommandCode::LISTENING_MODE, "DOWN"),
            AbstractCommand::Navigate(key) => Command::new(CommandCode::OSD, key.parameter()),
            AbstractCommand::Transport(action) => {
                Command::new(CommandCode::NET_USB_CONTROL, action.parameter())
            }
            AbstractCommand::Query(code) => Command::query(*code),
            AbstractCommand::Dimmer(level) => Command::new(CommandCode::DIMMER, level.parameter()),
            AbstractCommand::SleepTimer(timer) => sleep(*timer),
            AbstractCommand::AudioInfo => Command::query(CommandCode::AUDIO_INFO),
            AbstractCommand::VideoInfo => Command::query(CommandCode::VIDEO_INFO),
            AbstractCommand::Raw(raw) => raw.clone(),
        };
        Ok(translated)
    }

    fn volume(&self, requested: i64) -> Command {
        let max = i64::from(self.capabilities.volume_max.min(MAX_VOLUME_LEVEL));
        let level = requested.clamp(0, max);
        if level != requested {
            debug!(requested, level, "Clamped volume to receiver range");
        }
        Command::new(CommandCode::VOLUME, format!("{:02X}", level))
    }
}

fn power(state: PowerState) -> Command {
    let parameter = match state {
        PowerState::On => "01",
        PowerState::Standby => "00",
    };
    Command::new(CommandCode::POWER, parameter)
}

fn sleep(timer: SleepTimer) -> Command {
    match timer {
        SleepTimer::Off | SleepTimer::Minutes(0) => Command::new(CommandCode::SLEEP, "OFF"),
        SleepTimer::Minutes(minutes) => Command::new(
            CommandCode::SLEEP,
            format!("{:02X}", minutes.min(MAX_SLEEP_MINUTES)),
        ),
    }
}

fn unsupported(kind: &'static str, value: &str) -> TranslationError {
    debug!(kind, value, "Rejected selection missing from receiver capabilities");
    TranslationError::unsupported(kind, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DimmerLevel, NavigationKey, TransportAction};
    use rstest::rstest;

    fn translate(command: AbstractCommand) -> String {
        CommandTranslator::default()
            .translate(&command)
            .unwrap()
            .to_string()
    }

    #[rstest]
    #[case(AbstractCommand::PowerOn, "PWR01")]
    #[case(AbstractCommand::PowerOff, "PWR00")]
    #[case(AbstractCommand::PowerToggle { current: PowerState::On }, "PWR00")]
    #[case(AbstractCommand::PowerToggle { current: PowerState::Standby }, "PWR01")]
    #[case(AbstractCommand::VolumeUp, "MVLUP")]
    #[case(AbstractCommand::VolumeDown, "MVLDOWN")]
    #[case(AbstractCommand::MuteOn, "AMT01")]
    #[case(AbstractCommand::MuteOff, "AMT00")]
    #[case(AbstractCommand::MuteToggle, "AMTTG")]
    #[case(AbstractCommand::SoundModeUp, "LMDUP")]
    #[case(AbstractCommand::SoundModeDown, "LMDDOWN")]
    #[case(AbstractCommand::Navigate(NavigationKey::Enter), "OSDENTER")]
    #[case(AbstractCommand::Navigate(NavigationKey::Return), "OSDRETURN")]
    #[case(AbstractCommand::Transport(TransportAction::NextTrack), "NTCTRUP")]
    #[case(AbstractCommand::Transport(TransportAction::Shuffle), "NTCRANDOM")]
    #[case(AbstractCommand::Query(CommandCode::INPUT), "SLIQSTN")]
    #[case(AbstractCommand::Dimmer(DimmerLevel::Dark), "DIM02")]
    #[case(AbstractCommand::Dimmer(DimmerLevel::Cycle), "DIMDIM")]
    #[case(AbstractCommand::SleepTimer(SleepTimer::Off), "SLPOFF")]
    #[case(AbstractCommand::SleepTimer(SleepTimer::Minutes(0)), "SLPOFF")]
    #[case(AbstractCommand::SleepTimer(SleepTimer::Minutes(30)), "SLP1E")]
    #[case(AbstractCommand::SleepTimer(SleepTimer::Minutes(200)), "SLP5A")]
    #[case(AbstractCommand::AudioInfo, "IFAQSTN")]
    #[case(AbstractCommand::VideoInfo, "IFVQSTN")]
    fn test_static_mapping(#[case] command: AbstractCommand, #[case] expected: &str) {
        assert_eq!(translate(command), expected);
    }

    #[rstest]
    #[case(0, "MVL00")]
    #[case(42, "MVL2A")]
    #[case(80, "MVL50")]
    #[case(95, "MVL50")]
    fn test_set_volume_clamps_to_default_max(#[case] level: u16, #[case] expected: &str) {
        assert_eq!(translate(AbstractCommand::SetVolume(level)), expected);
    }

    #[rstest]
    #[case(40, 5, "MVL2D")]
    #[case(3, -10, "MVL00")]
    #[case(78, 10, "MVL50")]
    fn test_adjust_volume_clamps(#[case] current: u16, #[case] delta: i32, #[case] expected: &str) {
        assert_eq!(
            translate(AbstractCommand::AdjustVolume { current, delta }),
            expected
        );
    }

    #[test]
    fn test_volume_max_comes_from_capabilities() {
        let translator =
            CommandTranslator::new(ReceiverCapabilities::default().with_volume_max(100));
        let command = translator.translate(&AbstractCommand::SetVolume(95)).unwrap();
        assert_eq!(command.parameter(), "5F");
    }

    #[test]
    fn test_volume_stays_two_hex_digits_for_oversized_max() {
        let translator =
            CommandTranslator::new(ReceiverCapabilities::default().with_volume_max(1000));
        let command = translator.translate(&AbstractCommand::SetVolume(300)).unwrap();
        assert_eq!(command.parameter(), "FF");
    }

    #[test]
    fn test_raw_passes_through() {
        let raw = Command::new(CommandCode::LATE_NIGHT, "01");
        assert_eq!(translate(AbstractCommand::Raw(raw)), "LTN01");
    }
}
