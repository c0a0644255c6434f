//! Status stream parsing
//!
//! [`StatusStreamParser`] buffers raw session bytes, cuts them into eISCP frames and turns
//! each frame into a [`StatusEvent`] for the subscribers. [`classify`] is the pure
//! command-to-event mapping and can be used on its own.

use std::time::Duration;

use bytes::{Buf, BytesMut};
use eiscp::{find_frame_start, Command, CommandCode, FrameError, PacketCodec, MAGIC};
use onkyo_api::catalog;
use tracing::{debug, warn};

use crate::event::{PlaybackPosition, PlaybackStatus, PowerState, StatusEvent};
use crate::subscribers::Subscribers;

/// Incremental decoder from session bytes to published status events
///
/// The parser holds no device state. Partial frames stay buffered until the rest arrives;
/// malformed input is dropped up to the next `ISCP` magic.
#[derive(Debug)]
pub struct StatusStreamParser {
    codec: PacketCodec,
    buffer: BytesMut,
    subscribers: Subscribers,
}

impl StatusStreamParser {
    pub fn new(subscribers: Subscribers) -> Self {
        Self::with_codec(PacketCodec::default(), subscribers)
    }

    pub fn with_codec(codec: PacketCodec, subscribers: Subscribers) -> Self {
        Self {
            codec,
            buffer: BytesMut::with_capacity(1024),
            subscribers,
        }
    }

    /// Feed raw bytes; publishes one event per completed frame and returns how many.
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        self.buffer.extend_from_slice(bytes);

        let mut published = 0;
        while !self.buffer.is_empty() {
            match self.codec.decode(&self.buffer) {
                Ok((command, consumed)) => {
                    self.buffer.advance(consumed);
                    let event = classify(&command);
                    debug!(%command, event = event.event_type(), "Received status frame");
                    self.subscribers.publish(&event);
                    published += 1;
                }
                Err(FrameError::Incomplete { .. }) => break,
                Err(FrameError::Malformed(reason)) => {
                    let skipped = self.skip_to_next_frame();
                    warn!(%reason, skipped, "Dropping malformed data from status stream");
                }
            }
        }
        published
    }

    /// Number of buffered bytes not yet forming a complete frame
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Discard any buffered partial frame
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Drop at least one byte, then everything before the next magic. A trailing partial
    /// magic is kept since the rest may still arrive.
    fn skip_to_next_frame(&mut self) -> usize {
        let skipped = match find_frame_start(&self.buffer[1..]) {
            Some(offset) => offset + 1,
            None => self.buffer.len() - partial_magic_suffix(&self.buffer[1..]),
        };
        self.buffer.advance(skipped);
        skipped
    }
}

/// Length of the longest suffix of `buf` that is a proper prefix of the magic
fn partial_magic_suffix(buf: &[u8]) -> usize {
    (1..MAGIC.len())
        .rev()
        .find(|len| buf.len() >= *len && buf[buf.len() - len..] == MAGIC[..*len])
        .unwrap_or(0)
}

/// Map a received command to the status event it reports.
pub fn classify(command: &Command) -> StatusEvent {
    let parameter = command.parameter();
    let classified = match command.code() {
        CommandCode::POWER => match parameter {
            "00" => Some(StatusEvent::PowerChanged {
                power: PowerState::Standby,
            }),
            "01" => Some(StatusEvent::PowerChanged {
                power: PowerState::On,
            }),
            _ => None,
        },
        CommandCode::VOLUME => {
            hex_level(parameter).map(|level| StatusEvent::VolumeChanged { level })
        }
        CommandCode::MUTE => match parameter {
            "00" => Some(StatusEvent::MuteChanged { muted: false }),
            "01" => Some(StatusEvent::MuteChanged { muted: true }),
            _ => None,
        },
        CommandCode::INPUT => selection_code(parameter).map(|code| StatusEvent::InputChanged {
            name: catalog::input_name(&code).map(str::to_string),
            code,
        }),
        CommandCode::LISTENING_MODE => {
            selection_code(parameter).map(|code| StatusEvent::SoundModeChanged {
                name: catalog::listening_mode_name(&code).map(str::to_string),
                code,
            })
        }
        CommandCode::NET_USB_TITLE => Some(StatusEvent::TitleChanged {
            title: parameter.to_string(),
        }),
        CommandCode::NET_USB_ARTIST => Some(StatusEvent::ArtistChanged {
            artist: parameter.to_string(),
        }),
        CommandCode::NET_USB_ALBUM => Some(StatusEvent::AlbumChanged {
            album: parameter.to_string(),
        }),
        CommandCode::NET_USB_TIME => {
            playback_position(parameter).map(|position| StatusEvent::PlaybackPositionChanged {
                position,
            })
        }
        CommandCode::NET_USB_STATUS => {
            playback_status(parameter).map(|status| StatusEvent::PlaybackStatusChanged { status })
        }
        _ => None,
    };

    classified.unwrap_or_else(|| StatusEvent::Unrecognized {
        code: command.code().to_string(),
        parameter: parameter.to_string(),
    })
}

fn is_two_hex_digits(parameter: &str) -> bool {
    parameter.len() == 2 && parameter.bytes().all(|b| b.is_ascii_hexdigit())
}

fn hex_level(parameter: &str) -> Option<u16> {
    if !is_two_hex_digits(parameter) {
        return None;
    }
    u16::from_str_radix(parameter, 16).ok()
}

fn selection_code(parameter: &str) -> Option<String> {
    is_two_hex_digits(parameter).then(|| parameter.to_ascii_uppercase())
}

/// `mm:ss/mm:ss` or `hh:mm:ss/hh:mm:ss`; an unknown total is sent as dashes.
fn playback_position(parameter: &str) -> Option<PlaybackPosition> {
    let (elapsed, total) = parameter.split_once('/')?;
    Some(PlaybackPosition {
        elapsed: parse_clock(elapsed)?,
        total: parse_clock(total),
    })
}

fn parse_clock(text: &str) -> Option<Duration> {
    let mut seconds = 0u64;
    let mut fields = 0;
    for field in text.trim().split(':') {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        seconds = seconds
            .checked_mul(60)?
            .checked_add(field.parse::<u64>().ok()?)?;
        fields += 1;
    }
    (2..=3).contains(&fields).then(|| Duration::from_secs(seconds))
}

fn playback_status(parameter: &str) -> Option<PlaybackStatus> {
    match parameter.chars().next()? {
        'P' => Some(PlaybackStatus::Playing),
        'p' => Some(PlaybackStatus::Paused),
        'S' => Some(PlaybackStatus::Stopped),
        'F' => Some(PlaybackStatus::FastForward),
        'R' => Some(PlaybackStatus::Rewind),
        _ => None,
    }
}
