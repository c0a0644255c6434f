//! Configuration types for the onkyo-stream crate
//!
//! This module defines the structures that control a [`crate::Connection`]: connect and
//! keep-alive timing, reconnection backoff, the unit type written into every frame and
//! the receiver capabilities used for command translation.

use std::time::Duration;

use eiscp::{Command, CommandCode, UnitType};
use onkyo_api::ReceiverCapabilities;

use crate::error::ConnectError;

/// Reconnection backoff settings
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffConfig {
    /// Delay before the first reconnect attempt
    /// Default: 1 second
    pub initial_delay: Duration,

    /// Factor applied to the delay after each failed attempt
    /// Default: 2.0
    pub multiplier: f64,

    /// Upper bound for a single delay
    /// Default: 60 seconds
    pub max_delay: Duration,

    /// Add a random extra delay below `initial_delay` to every attempt
    /// Default: true
    pub jitter: bool,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: Duration::from_secs(60),
            jitter: true,
        }
    }
}

impl BackoffConfig {
    /// Backoff without jitter, for deterministic schedules
    pub fn fixed_schedule() -> Self {
        Self {
            jitter: false,
            ..Default::default()
        }
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<(), ConnectError> {
        if self.initial_delay.is_zero() {
            return Err(ConnectError::Configuration(
                "Backoff initial delay must be greater than 0".to_string(),
            ));
        }

        if self.initial_delay > self.max_delay {
            return Err(ConnectError::Configuration(
                "Invalid backoff: initial delay must not exceed max delay".to_string(),
            ));
        }

        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(ConnectError::Configuration(
                "Backoff multiplier must be at least 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration for a receiver connection
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    /// Timeout for a single TCP connect attempt
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Idle time without any frame after which a keep-alive query is sent
    /// Default: 30 seconds
    pub keepalive_idle: Duration,

    /// Time to wait for any inbound frame after a keep-alive query
    /// Default: 5 seconds
    pub keepalive_response_timeout: Duration,

    /// Query sent as keep-alive
    /// Default: `PWRQSTN`
    pub keepalive_command: Command,

    /// Query power, volume, mute, input and listening mode after every connect
    /// Default: true
    pub query_on_connect: bool,

    /// Unit type written into outbound frames
    /// Default: `AVR`
    pub unit_type: UnitType,

    /// Capabilities used to translate abstract commands
    /// Default: full catalog, volume max 80
    pub capabilities: ReceiverCapabilities,

    /// Reconnection backoff
    pub backoff: BackoffConfig,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            keepalive_idle: Duration::from_secs(30),
            keepalive_response_timeout: Duration::from_secs(5),
            keepalive_command: Command::query(CommandCode::POWER),
            query_on_connect: true,
            unit_type: UnitType::default(),
            capabilities: ReceiverCapabilities::default(),
            backoff: BackoffConfig::default(),
        }
    }
}

impl ConnectionConfig {
    /// Create a new ConnectionConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ConnectionConfig that notices dead receivers quickly
    pub fn fast_failover() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            keepalive_idle: Duration::from_secs(10),
            keepalive_response_timeout: Duration::from_secs(2),
            backoff: BackoffConfig::default().with_max_delay(Duration::from_secs(15)),
            ..Default::default()
        }
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<(), ConnectError> {
        if self.connect_timeout.is_zero() {
            return Err(ConnectError::Configuration(
                "Connect timeout must be greater than 0".to_string(),
            ));
        }

        if self.keepalive_idle.is_zero() {
            return Err(ConnectError::Configuration(
                "Keep-alive idle time must be greater than 0".to_string(),
            ));
        }

        if self.keepalive_response_timeout.is_zero() {
            return Err(ConnectError::Configuration(
                "Keep-alive response timeout must be greater than 0".to_string(),
            ));
        }

        self.capabilities
            .validate()
            .map_err(|e| ConnectError::Configuration(e.to_string()))?;

        self.backoff.validate()
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_keepalive(mut self, idle: Duration, response_timeout: Duration) -> Self {
        self.keepalive_idle = idle;
        self.keepalive_response_timeout = response_timeout;
        self
    }

    pub fn with_keepalive_command(mut self, command: Command) -> Self {
        self.keepalive_command = command;
        self
    }

    pub fn with_query_on_connect(mut self, enabled: bool) -> Self {
        self.query_on_connect = enabled;
        self
    }

    pub fn with_unit_type(mut self, unit_type: UnitType) -> Self {
        self.unit_type = unit_type;
        self
    }

    pub fn with_capabilities(mut self, capabilities: ReceiverCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = backoff;
        self
    }
}
