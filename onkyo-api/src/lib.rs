//! High-level command vocabulary for Onkyo/Integra receivers
//!
//! This crate describes receiver operations as [`AbstractCommand`]s and translates them
//! into wire commands through the private `eiscp` codec crate. It performs no I/O; the
//! connection layer sends whatever the translator produces.
//!
//! ```rust
//! use onkyo_api::{AbstractCommand, CommandTranslator};
//!
//! let translator = CommandTranslator::default();
//! let command = translator.translate(&AbstractCommand::SetVolume(95))?;
//! assert_eq!(command.to_string(), "MVL50");
//! # Ok::<(), onkyo_api::TranslationError>(())
//! ```

pub mod capabilities;
pub mod catalog;
pub mod command;
pub mod error;
pub mod translator;

pub use capabilities::{ReceiverCapabilities, Selection, DEFAULT_VOLUME_MAX, MAX_VOLUME_LEVEL};
pub use command::{
    AbstractCommand, DimmerLevel, NavigationKey, PowerState, SleepTimer, TransportAction,
};
pub use error::{Result, TranslationError};
pub use translator::CommandTranslator;

// Wire types callers need alongside the vocabulary
pub use eiscp::{Command, CommandCode};
