//! Configuration for the live reload client.
//!
//! The client talks to a single notification server at a fixed endpoint,
//! `ws://localhost:8081`. [`ClientConfig::default`] yields exactly that
//! endpoint and is what the `lr` binary uses. Library callers may build a
//! config pointing elsewhere (integration tests bind an ephemeral port).

/// Default notification server host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default notification server port.
pub const DEFAULT_PORT: u16 = 8081;

/// Live reload client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Notification server host.
    pub host: String,
    /// Notification server port.
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl ClientConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the host is empty, contains
    /// characters that cannot appear in a URL authority, or the port is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.host, "host")?;

        if self
            .host
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
        {
            return Err(ConfigError::Validation(format!(
                "host contains invalid characters: {:?}",
                self.host
            )));
        }

        // The client never listens, so an OS-assigned port makes no sense here
        if self.port == 0 {
            return Err(ConfigError::Validation("port cannot be 0".to_owned()));
        }

        Ok(())
    }

    /// WebSocket URL of the notification server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the config is invalid.
    pub fn endpoint(&self) -> Result<String, ConfigError> {
        self.validate()?;
        Ok(format!("ws://{}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8081);
    }

    #[test]
    fn test_default_endpoint() {
        let endpoint = ClientConfig::default().endpoint().unwrap();
        assert_eq!(endpoint, "ws://localhost:8081");
    }

    #[test]
    fn test_custom_endpoint() {
        let config = ClientConfig {
            host: "127.0.0.1".to_owned(),
            port: 49152,
        };
        assert_eq!(config.endpoint().unwrap(), "ws://127.0.0.1:49152");
    }

    #[test]
    fn test_validate_empty_host() {
        let config = ClientConfig {
            host: String::new(),
            ..ClientConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: host cannot be empty");
    }

    #[test]
    fn test_validate_host_with_path() {
        let config = ClientConfig {
            host: "localhost/reload".to_owned(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("invalid characters")
        ));
    }

    #[test]
    fn test_validate_zero_port() {
        let config = ClientConfig {
            port: 0,
            ..ClientConfig::default()
        };
        let err = config.endpoint().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: port cannot be 0");
    }
}
