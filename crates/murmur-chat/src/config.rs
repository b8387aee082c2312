//! Configuration
//!
//! TOML-loadable config with serde defaults per section, validated up
//! front so a bad value is rejected at startup instead of surfacing as a
//! misbehaving actor later.

use murmur_core::{
    Error, Result, CLIENT_POST_INTERVAL_MS_DEFAULT, CLIENT_STATE_SYNC_INTERVAL_MS_DEFAULT,
    ROOM_STATE_SYNC_INTERVAL_MS_DEFAULT, TIMER_PERIOD_MS_MIN,
};
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration for the chat service
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub visualizer: VisualizerConfig,
    pub room: RoomConfig,
    pub clients: ClientsConfig,
}

/// Where lifecycle and delivery events are streamed
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// TCP endpoint of the visualizer, host:port
    pub endpoint: String,
    /// When false, events are discarded locally
    pub enabled: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            endpoint: "127.0.0.1:3000".to_string(),
            enabled: true,
        }
    }
}

/// Chat room settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Actor name of the room
    pub name: String,
    /// Period of the room's membership snapshot
    pub sync_interval_ms: u64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            name: "chatroom".to_string(),
            sync_interval_ms: ROOM_STATE_SYNC_INTERVAL_MS_DEFAULT,
        }
    }
}

/// Demo client population
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientsConfig {
    /// Number of clients the guardian spawns
    pub count: usize,
    /// Clients are named `{name_prefix}-{i}`
    pub name_prefix: String,
    /// Node groups clients are randomly assigned to
    pub groups: Vec<String>,
    /// Period of each client's demo post
    pub post_interval_ms: u64,
    /// Period of each client's state snapshot
    pub sync_interval_ms: u64,
}

impl Default for ClientsConfig {
    fn default() -> Self {
        Self {
            count: 5,
            name_prefix: "client".to_string(),
            groups: vec![
                "group-a".to_string(),
                "group-b".to_string(),
                "group-c".to_string(),
            ],
            post_interval_ms: CLIENT_POST_INTERVAL_MS_DEFAULT,
            sync_interval_ms: CLIENT_STATE_SYNC_INTERVAL_MS_DEFAULT,
        }
    }
}

impl ChatConfig {
    /// Load and validate from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_config("config file", format!("{}: {e}", path.display()))
        })?;
        let config: ChatConfig = toml::from_str(&text)
            .map_err(|e| Error::invalid_config("config file", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.visualizer.enabled && self.visualizer.endpoint.is_empty() {
            return Err(Error::invalid_config(
                "visualizer.endpoint",
                "must not be empty when the visualizer is enabled",
            ));
        }
        if self.room.name.is_empty() {
            return Err(Error::invalid_config("room.name", "must not be empty"));
        }
        if self.clients.count == 0 {
            return Err(Error::invalid_config("clients.count", "must be positive"));
        }
        if self.clients.name_prefix.is_empty() {
            return Err(Error::invalid_config(
                "clients.name_prefix",
                "must not be empty",
            ));
        }
        if self.clients.groups.is_empty() {
            return Err(Error::invalid_config("clients.groups", "must not be empty"));
        }
        for (field, value) in [
            ("room.sync_interval_ms", self.room.sync_interval_ms),
            ("clients.post_interval_ms", self.clients.post_interval_ms),
            ("clients.sync_interval_ms", self.clients.sync_interval_ms),
        ] {
            if value < TIMER_PERIOD_MS_MIN {
                return Err(Error::invalid_config(
                    field,
                    format!("must be at least {TIMER_PERIOD_MS_MIN} ms"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        ChatConfig::default().validate().unwrap();
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: ChatConfig = toml::from_str(
            r#"
            [clients]
            count = 2
            groups = ["red", "blue"]

            [visualizer]
            endpoint = "10.0.0.5:4000"
            "#,
        )
        .unwrap();

        assert_eq!(config.clients.count, 2);
        assert_eq!(config.clients.groups, vec!["red", "blue"]);
        assert_eq!(config.visualizer.endpoint, "10.0.0.5:4000");
        // Untouched sections keep their defaults.
        assert_eq!(config.room.name, "chatroom");
        assert_eq!(
            config.clients.post_interval_ms,
            CLIENT_POST_INTERVAL_MS_DEFAULT
        );
    }

    #[test]
    fn test_zero_clients_rejected() {
        let mut config = ChatConfig::default();
        config.clients.count = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = ChatConfig::default();
        config.room.sync_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_groups_rejected() {
        let mut config = ChatConfig::default();
        config.clients.groups.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ChatConfig::load("/nonexistent/murmur.toml").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }
}
