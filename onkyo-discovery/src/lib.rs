//! Onkyo/Integra receiver discovery library
//!
//! This crate finds eISCP receivers on the local network by broadcasting the
//! `!xECNQSTN` request over UDP and collecting the `ECN` replies.
//!
//! # Quick Start
//!
//! ```no_run
//! use onkyo_discovery::get;
//!
//! // Discover all receivers on the network
//! for receiver in get() {
//!     println!("Found {} at {}", receiver.model, receiver.address);
//! }
//! ```
//!
//! # Iterator-based Discovery
//!
//! For more control, configure a pass and consume it lazily:
//!
//! ```no_run
//! use onkyo_discovery::{discover, DiscoveryConfig};
//! use std::time::Duration;
//!
//! let config = DiscoveryConfig::default().with_timeout(Duration::from_secs(2));
//! for receiver in discover(&config)? {
//!     println!("Found: {}", receiver.model);
//!     // Can break early if needed
//! }
//! # Ok::<(), onkyo_discovery::DiscoveryError>(())
//! ```

mod config;
mod descriptor;
mod discovery;
mod error;

pub use config::DiscoveryConfig;
pub use descriptor::ReceiverDescriptor;
pub use discovery::DiscoveryIterator;
pub use error::{DiscoveryError, Result};

use std::time::Duration;
use tracing::warn;

/// Start a discovery pass with the given configuration.
///
/// Fails with [`DiscoveryError::NetworkUnavailable`] when the request cannot be sent.
/// A pass that hears nothing yields an empty iterator.
pub fn discover(config: &DiscoveryConfig) -> Result<DiscoveryIterator> {
    DiscoveryIterator::new(config)
}

/// Discover all receivers on the local network with the default 5-second timeout.
pub fn get() -> Vec<ReceiverDescriptor> {
    get_with_timeout(DiscoveryConfig::default().timeout)
}

/// Discover all receivers on the local network with a custom timeout.
///
/// Network failures are logged and produce an empty list; use [`discover`] to observe
/// them.
///
/// ```no_run
/// use onkyo_discovery::get_with_timeout;
/// use std::time::Duration;
///
/// let receivers = get_with_timeout(Duration::from_secs(2));
/// println!("{} receiver(s) found", receivers.len());
/// ```
pub fn get_with_timeout(timeout: Duration) -> Vec<ReceiverDescriptor> {
    get_iter_with_timeout(timeout).collect()
}

/// Get a lazy discovery iterator with a custom timeout.
pub fn get_iter_with_timeout(timeout: Duration) -> DiscoveryIterator {
    let config = DiscoveryConfig::default().with_timeout(timeout);
    discover(&config).unwrap_or_else(|error| {
        warn!(%error, "Discovery could not start");
        DiscoveryIterator::empty()
    })
}
