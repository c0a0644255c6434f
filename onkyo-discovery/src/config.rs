use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::error::{DiscoveryError, Result};

/// Configuration for a discovery pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Address the discovery request is broadcast to
    pub broadcast_address: IpAddr,

    /// UDP port receivers listen on for discovery requests
    pub port: u16,

    /// How long to listen for replies after the request is sent
    pub timeout: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            broadcast_address: IpAddr::V4(Ipv4Addr::BROADCAST),
            port: eiscp::DEFAULT_PORT,
            timeout: Duration::from_secs(5),
        }
    }
}

impl DiscoveryConfig {
    /// Short pass for interactive use, where a late receiver is an acceptable miss
    pub fn quick() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            ..Default::default()
        }
    }

    pub fn with_broadcast_address(mut self, address: IpAddr) -> Self {
        self.broadcast_address = address;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(DiscoveryError::InvalidConfig(
                "port must be greater than 0".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(DiscoveryError::InvalidConfig(
                "timeout must be greater than 0".to_string(),
            ));
        }

        if self.broadcast_address.is_ipv6() {
            return Err(DiscoveryError::InvalidConfig(
                "broadcast address must be IPv4".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.broadcast_address, IpAddr::V4(Ipv4Addr::new(255, 255, 255, 255)));
        assert_eq!(config.port, 60128);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = DiscoveryConfig::quick()
            .with_broadcast_address(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 255)))
            .with_port(60129)
            .with_timeout(Duration::from_millis(250));

        assert_eq!(config.port, 60129);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let config = DiscoveryConfig::default().with_port(0);
        assert!(config.validate().is_err());

        let config = DiscoveryConfig::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());

        let config =
            DiscoveryConfig::default().with_broadcast_address(IpAddr::V6(std::net::Ipv6Addr::LOCALHOST));
        assert!(config.validate().is_err());
    }
}
