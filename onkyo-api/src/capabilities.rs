use serde::{Deserialize, Serialize};

use crate::catalog::{INPUT_SOURCES, LISTENING_MODES};
use crate::error::{Result, TranslationError};

/// Highest native volume level of most receivers in the family
pub const DEFAULT_VOLUME_MAX: u16 = 80;

/// Highest level the two-hex-digit `MVL` parameter can carry
pub const MAX_VOLUME_LEVEL: u16 = 0xFF;

/// A selectable input or listening mode: its two-hex-digit code and display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub code: String,
    pub name: String,
}

impl Selection {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// What a specific receiver supports
///
/// The host layer can persist this per receiver and restrict it to the inputs the
/// device actually exposes. The default is the full catalog with a volume ceiling of
/// [`DEFAULT_VOLUME_MAX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverCapabilities {
    /// Highest native volume level the receiver accepts
    pub volume_max: u16,
    pub inputs: Vec<Selection>,
    pub sound_modes: Vec<Selection>,
}

impl Default for ReceiverCapabilities {
    fn default() -> Self {
        Self {
            volume_max: DEFAULT_VOLUME_MAX,
            inputs: to_selections(INPUT_SOURCES),
            sound_modes: to_selections(LISTENING_MODES),
        }
    }
}

impl ReceiverCapabilities {
    /// Set the volume ceiling
    pub fn with_volume_max(mut self, volume_max: u16) -> Self {
        self.volume_max = volume_max;
        self
    }

    /// Replace the input list
    pub fn with_inputs(mut self, inputs: Vec<Selection>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Replace the listening mode list
    pub fn with_sound_modes(mut self, sound_modes: Vec<Selection>) -> Self {
        self.sound_modes = sound_modes;
        self
    }

    /// Check that every value fits the wire format
    pub fn validate(&self) -> Result<()> {
        if self.volume_max > MAX_VOLUME_LEVEL {
            return Err(TranslationError::InvalidCapabilities(format!(
                "volume_max {} exceeds {}",
                self.volume_max, MAX_VOLUME_LEVEL
            )));
        }
        Ok(())
    }

    /// Code of the last input with this name, compared case-insensitively
    pub fn input_code(&self, name: &str) -> Option<&str> {
        find_code(&self.inputs, name)
    }

    /// Code of the last listening mode with this name, compared case-insensitively
    pub fn sound_mode_code(&self, name: &str) -> Option<&str> {
        find_code(&self.sound_modes, name)
    }
}

fn to_selections(table: &[(&str, &str)]) -> Vec<Selection> {
    table
        .iter()
        .map(|(code, name)| Selection::new(*code, *name))
        .collect()
}

fn find_code<'a>(selections: &'a [Selection], name: &str) -> Option<&'a str> {
    let name = name.trim();
    selections
        .iter()
        .rev()
        .find(|selection| selection.name.eq_ignore_ascii_case(name))
        .map(|selection| selection.code.as_str())
}
