//! Configuration for the SensorCloud client.

use std::time::Duration;

/// The production authentication endpoint.
pub const DEFAULT_AUTH_SERVER: &str = "https://sensorcloud.microstrain.com";

/// Configuration for the SensorCloud client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the authentication server.
    pub auth_server: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout (separate from the request timeout).
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_server: DEFAULT_AUTH_SERVER.to_owned(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("sensorcloud-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.auth_server, DEFAULT_AUTH_SERVER);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("sensorcloud-rs/"));
    }
}
