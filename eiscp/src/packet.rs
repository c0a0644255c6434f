//! eISCP frame encoding and decoding.
//!
//! Every frame is a 16-byte header followed by an ISCP message:
//!
//! ```text
//! "ISCP" | header_len:u32be | data_len:u32be | version:u8 | reserved:[u8; 3] | data
//! data = "!1" + unit_type + command(3) + parameter + "\r\n"
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::command::{is_terminator, Command, CommandCode, UnitType};
use crate::error::FrameError;

/// Magic bytes opening every frame.
pub const MAGIC: &[u8; 4] = b"ISCP";

/// Size of the canonical header written by [`PacketCodec::encode`].
pub const HEADER_SIZE: usize = 16;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Largest header length accepted when decoding.
pub const MAX_HEADER_SIZE: usize = 256;

/// Largest data length accepted when decoding.
pub const MAX_DATA_SIZE: usize = 64 * 1024;

/// Registered eISCP port, used for both TCP control and UDP discovery.
pub const DEFAULT_PORT: u16 = 60128;

const DISCOVERY_MESSAGE: &[u8] = b"!xECNQSTN\r\n";

/// Parsed fixed-width part of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub header_len: usize,
    pub data_len: usize,
    pub version: u8,
}

impl FrameHeader {
    /// Validate and parse the header at the start of `buf`.
    ///
    /// Only as many magic bytes as are present are checked, so a buffer holding `"IS"`
    /// is incomplete while one holding `"IX"` is already malformed.
    pub fn parse(buf: &[u8]) -> Result<Self, FrameError> {
        let probe = buf.len().min(MAGIC.len());
        if buf[..probe] != MAGIC[..probe] {
            return Err(FrameError::malformed("missing ISCP magic"));
        }
        if buf.len() < HEADER_SIZE {
            return Err(FrameError::Incomplete {
                needed: HEADER_SIZE - buf.len(),
            });
        }

        let header_len = read_u32_be(&buf[4..8]) as usize;
        let data_len = read_u32_be(&buf[8..12]) as usize;

        if !(HEADER_SIZE..=MAX_HEADER_SIZE).contains(&header_len) {
            return Err(FrameError::malformed(format!(
                "header length {} outside {}..={}",
                header_len, HEADER_SIZE, MAX_HEADER_SIZE
            )));
        }
        if data_len == 0 || data_len > MAX_DATA_SIZE {
            return Err(FrameError::malformed(format!(
                "data length {} outside 1..={}",
                data_len, MAX_DATA_SIZE
            )));
        }

        Ok(Self {
            header_len,
            data_len,
            version: buf[12],
        })
    }

    /// Total number of bytes the frame occupies.
    pub fn frame_len(&self) -> usize {
        self.header_len + self.data_len
    }
}

/// Encoder/decoder for eISCP frames.
///
/// The codec is stateless apart from its unit type; buffering of partial frames is the
/// caller's job (see `FrameError::Incomplete`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketCodec {
    unit_type: UnitType,
}

impl PacketCodec {
    pub fn new(unit_type: UnitType) -> Self {
        Self { unit_type }
    }

    pub fn unit_type(&self) -> &UnitType {
        &self.unit_type
    }

    /// Encode a command into a complete frame with canonical field widths.
    pub fn encode(&self, command: &Command) -> Bytes {
        let parameter = command.parameter().as_bytes();
        let mut data =
            BytesMut::with_capacity(2 + self.unit_type.as_str().len() + 3 + parameter.len() + 2);
        data.put_slice(b"!1");
        data.put_slice(self.unit_type.as_str().as_bytes());
        data.put_slice(command.code().as_bytes());
        data.put_slice(parameter);
        data.put_slice(b"\r\n");
        frame(&data)
    }

    /// The broadcast discovery request (`!xECNQSTN`).
    pub fn discovery_request(&self) -> Bytes {
        frame(DISCOVERY_MESSAGE)
    }

    /// Decode the frame at the start of `buf`.
    ///
    /// Returns the command and the number of bytes the frame occupied. Trailing bytes
    /// beyond the frame are left for the next call.
    pub fn decode(&self, buf: &[u8]) -> Result<(Command, usize), FrameError> {
        let header = FrameHeader::parse(buf)?;
        let frame_len = header.frame_len();
        if buf.len() < frame_len {
            return Err(FrameError::Incomplete {
                needed: frame_len - buf.len(),
            });
        }

        let command = self.parse_message(&buf[header.header_len..frame_len])?;
        Ok((command, frame_len))
    }

    fn parse_message(&self, data: &[u8]) -> Result<Command, FrameError> {
        let text = std::str::from_utf8(data)
            .map_err(|_| FrameError::malformed("message is not valid UTF-8"))?;
        let text = text.trim_end_matches(is_terminator);

        let body = text
            .strip_prefix('!')
            .ok_or_else(|| FrameError::malformed("message does not start with '!'"))?;

        // Destination marker: '1' for receivers, 'x' for "any unit" discovery traffic.
        match body.as_bytes().first() {
            Some(b) if b.is_ascii_alphanumeric() => {}
            _ => return Err(FrameError::malformed("missing destination marker")),
        }
        let body = &body[1..];

        let body = if self.unit_type.is_none() {
            body
        } else {
            body.strip_prefix(self.unit_type.as_str()).unwrap_or(body)
        };

        if body.len() < 3 {
            return Err(FrameError::malformed(format!(
                "message '{}' too short for a command code",
                text
            )));
        }
        let code = CommandCode::from_bytes(&body.as_bytes()[..3]).ok_or_else(|| {
            FrameError::malformed(format!("invalid command code in '{}'", text))
        })?;

        Ok(Command::new(code, &body[3..]))
    }
}

/// Position of the next frame magic in `buf`, if any.
pub fn find_frame_start(buf: &[u8]) -> Option<usize> {
    buf.windows(MAGIC.len()).position(|window| window == MAGIC)
}

fn frame(data: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity(HEADER_SIZE + data.len());
    out.put_slice(MAGIC);
    out.put_u32(HEADER_SIZE as u32);
    out.put_u32(data.len() as u32);
    out.put_u8(PROTOCOL_VERSION);
    out.put_bytes(0, 3);
    out.put_slice(data);
    out.freeze()
}

fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
