//! Private eISCP codec for Onkyo/Integra receiver communication
//!
//! This crate implements the binary framing of the eISCP control protocol: a fixed
//! 16-byte `ISCP` header wrapping a textual `!1<unit><command><parameter>` message.
//! It is shared by the discovery and connection crates and performs no I/O itself.
//!
//! ```
//! use eiscp::{Command, CommandCode, PacketCodec};
//!
//! let codec = PacketCodec::default();
//! let frame = codec.encode(&Command::new(CommandCode::POWER, "01"));
//! let (command, _) = codec.decode(&frame).unwrap();
//! assert_eq!(command.to_string(), "PWR01");
//! ```

mod command;
mod error;
mod packet;

pub use command::{Command, CommandCode, UnitType, QUERY_PARAMETER};
pub use error::{CommandError, FrameError};
pub use packet::{
    find_frame_start, FrameHeader, PacketCodec, DEFAULT_PORT, HEADER_SIZE, MAGIC, MAX_DATA_SIZE,
    MAX_HEADER_SIZE, PROTOCOL_VERSION,
};
