//! Integration tests for command translation
//!
//! These tests exercise the translator together with the eISCP codec, checking the
//! exact bytes a receiver would see.

use eiscp::PacketCodec;
use onkyo_api::{
    catalog, AbstractCommand, CommandTranslator, PowerState, ReceiverCapabilities, Selection,
    TranslationError,
};
use proptest::prelude::*;

#[test]
fn test_power_on_encodes_to_avr_frame() {
    let command = CommandTranslator::default()
        .translate(&AbstractCommand::PowerOn)
        .unwrap();
    let frame = PacketCodec::default().encode(&command);

    assert_eq!(&frame[16..], b"!1AVRPWR01\r\n");
    assert_eq!(&frame[4..8], &16u32.to_be_bytes());
    assert_eq!(&frame[8..12], &12u32.to_be_bytes());
}

#[test]
fn test_volume_clamped_to_receiver_max() {
    let command = CommandTranslator::default()
        .translate(&AbstractCommand::SetVolume(95))
        .unwrap();
    assert_eq!(command.to_string(), "MVL50");
}

#[test]
fn test_input_selection_is_case_insensitive() {
    let translator = CommandTranslator::default();
    for name in ["bd/dvd", "BD/DVD", "Bd/Dvd"] {
        let command = translator
            .translate(&AbstractCommand::SelectInput(name.to_string()))
            .unwrap();
        assert_eq!(command.to_string(), "SLI10");
    }
}

#[test]
fn test_sound_mode_selection_uses_catalog_code() {
    let command = CommandTranslator::default()
        .translate(&AbstractCommand::SelectSoundMode("all ch stereo".to_string()))
        .unwrap();
    assert_eq!(
        command.parameter(),
        catalog::listening_mode_code("ALL CH STEREO").unwrap()
    );
}

#[test]
fn test_input_outside_capabilities_is_unsupported() {
    let capabilities = ReceiverCapabilities::default()
        .with_inputs(vec![Selection::new("10", "BD/DVD"), Selection::new("12", "TV")]);
    let translator = CommandTranslator::new(capabilities);

    let error = translator
        .translate(&AbstractCommand::SelectInput("PHONO".to_string()))
        .unwrap_err();
    assert_eq!(
        error,
        TranslationError::Unsupported {
            kind: "input",
            value: "PHONO".to_string()
        }
    );
}

#[test]
fn test_unknown_sound_mode_is_unsupported() {
    let error = CommandTranslator::default()
        .translate(&AbstractCommand::SelectSoundMode("Hall".to_string()))
        .unwrap_err();
    assert_eq!(error.to_string(), "Unsupported sound mode: Hall");
}

#[test]
fn test_toggle_uses_caller_state() {
    let translator = CommandTranslator::default();
    let off = translator
        .translate(&AbstractCommand::PowerToggle {
            current: PowerState::On,
        })
        .unwrap();
    assert_eq!(off.parameter(), "00");
}

#[test]
fn test_capabilities_load_from_json() {
    let json = r#"{
        "volume_max": 60,
        "inputs": [{"code": "2B", "name": "NET"}],
        "sound_modes": [{"code": "00", "name": "STEREO"}]
    }"#;
    let capabilities: ReceiverCapabilities = serde_json::from_str(json).unwrap();
    let translator = CommandTranslator::new(capabilities);

    assert_eq!(
        translator
            .translate(&AbstractCommand::SetVolume(70))
            .unwrap()
            .parameter(),
        "3C"
    );
    assert_eq!(
        translator
            .translate(&AbstractCommand::SelectInput("net".to_string()))
            .unwrap()
            .parameter(),
        "2B"
    );
}

proptest! {
    #[test]
    fn prop_volume_never_exceeds_max(level in 0u16..1000, max in 0u16..=255) {
        let translator = CommandTranslator::new(ReceiverCapabilities::default().with_volume_max(max));
        let command = translator.translate(&AbstractCommand::SetVolume(level)).unwrap();
        let encoded = u16::from_str_radix(command.parameter(), 16).unwrap();
        prop_assert_eq!(encoded, level.min(max));
        prop_assert_eq!(command.parameter().len(), 2);
    }
}
