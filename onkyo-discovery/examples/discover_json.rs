//! Simple receiver discovery that outputs JSON for scripting
//!
//! Usage: cargo run -p onkyo-sdk-discovery --example discover_json [timeout-seconds]

use onkyo_discovery::get_with_timeout;
use std::time::Duration;

fn main() -> Result<(), serde_json::Error> {
    let timeout = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    let receivers = get_with_timeout(Duration::from_secs(timeout));

    println!("{}", serde_json::to_string_pretty(&receivers)?);
    Ok(())
}
