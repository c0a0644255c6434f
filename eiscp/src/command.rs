//! Command values carried inside eISCP frames.

use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;

/// Parameter used by every eISCP status query.
pub const QUERY_PARAMETER: &str = "QSTN";

/// Three-character eISCP command code such as `PWR` or `MVL`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CommandCode([u8; 3]);

impl CommandCode {
    /// System power
    pub const POWER: Self = Self(*b"PWR");
    /// Master volume
    pub const VOLUME: Self = Self(*b"MVL");
    /// Audio muting
    pub const MUTE: Self = Self(*b"AMT");
    /// Input selector
    pub const INPUT: Self = Self(*b"SLI");
    /// Listening mode
    pub const LISTENING_MODE: Self = Self(*b"LMD");
    /// On-screen menu navigation
    pub const OSD: Self = Self(*b"OSD");
    /// NET/USB transport control
    pub const NET_USB_CONTROL: Self = Self(*b"NTC");
    /// NET/USB title name
    pub const NET_USB_TITLE: Self = Self(*b"NTI");
    /// NET/USB artist name
    pub const NET_USB_ARTIST: Self = Self(*b"NAT");
    /// NET/USB album name
    pub const NET_USB_ALBUM: Self = Self(*b"NAL");
    /// NET/USB elapsed/total time
    pub const NET_USB_TIME: Self = Self(*b"NTM");
    /// NET/USB play status
    pub const NET_USB_STATUS: Self = Self(*b"NST");
    /// Audio information
    pub const AUDIO_INFO: Self = Self(*b"IFA");
    /// Video information
    pub const VIDEO_INFO: Self = Self(*b"IFV");
    /// Front panel dimmer
    pub const DIMMER: Self = Self(*b"DIM");
    /// Sleep timer
    pub const SLEEP: Self = Self(*b"SLP");
    /// Late night mode
    pub const LATE_NIGHT: Self = Self(*b"LTN");
    /// Receiver information, answered by discovery replies
    pub const RECEIVER_INFO: Self = Self(*b"ECN");

    /// Parse a command code, accepting exactly three ASCII uppercase letters or digits.
    pub fn new(code: &str) -> Result<Self, CommandError> {
        Self::from_bytes(code.as_bytes()).ok_or_else(|| CommandError::InvalidCode(code.to_string()))
    }

    pub(crate) fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [a, b, c] if bytes.iter().all(|byte| is_code_byte(*byte)) => Some(Self([*a, *b, *c])),
            _ => None,
        }
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        // Construction guarantees ASCII.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }

    /// The raw code bytes as written on the wire.
    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandCode {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unit type inserted after the `!1` start marker of every outbound payload.
///
/// Receivers of this family use `AVR`. Some firmware expects the bare `!1<command>` form,
/// which [`UnitType::none`] produces.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct UnitType(String);

impl UnitType {
    /// Parse a unit type: empty, or exactly three ASCII uppercase letters or digits.
    pub fn new(unit: &str) -> Result<Self, CommandError> {
        let valid = unit.is_empty() || (unit.len() == 3 && unit.bytes().all(is_code_byte));
        if valid {
            Ok(Self(unit.to_string()))
        } else {
            Err(CommandError::InvalidUnitType(unit.to_string()))
        }
    }

    /// Unit type of the AV receiver family.
    pub fn avr() -> Self {
        Self("AVR".to_string())
    }

    /// No unit type; payloads start directly with the command code.
    pub fn none() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for UnitType {
    fn default() -> Self {
        Self::avr()
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A command code with its parameter, e.g. `PWR` + `01`.
///
/// Immutable once built. The parameter never contains the `\r`, `\n` or EOF terminators;
/// they are stripped on construction.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Command {
    code: CommandCode,
    parameter: String,
}

impl Command {
    pub fn new(code: CommandCode, parameter: impl Into<String>) -> Self {
        let mut parameter = parameter.into();
        parameter.retain(|c| !is_terminator(c));
        Self { code, parameter }
    }

    /// Status query for a command code (`<code>QSTN`).
    pub fn query(code: CommandCode) -> Self {
        Self::new(code, QUERY_PARAMETER)
    }

    pub fn code(&self) -> CommandCode {
        self.code
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Whether this command is a `QSTN` status query.
    pub fn is_query(&self) -> bool {
        self.parameter == QUERY_PARAMETER
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.code, self.parameter)
    }
}

fn is_code_byte(b: u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit()
}

pub(crate) fn is_terminator(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\u{1a}')
}
