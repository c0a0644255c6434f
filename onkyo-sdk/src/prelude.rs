//! Everything a typical application needs: `use onkyo_sdk::prelude::*;`

pub use crate::{connect, discover, SdkError};
pub use onkyo_api::{AbstractCommand, ReceiverCapabilities};
pub use onkyo_discovery::{DiscoveryConfig, ReceiverDescriptor};
pub use onkyo_stream::{
    Connection, ConnectionConfig, ConnectionState, PowerState, StatusEvent,
};
