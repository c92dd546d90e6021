//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file, then `GRUBDASH_*`
//! environment variables override individual keys:
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 5000
//! logging:
//!   filter: grubdash=debug,tower_http=info
//! seed_file: config/seed.yaml
//! ```

use crate::entities::{Dish, Order};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_VAR: &str = "GRUBDASH_CONFIG";

/// Errors raised while loading configuration or seed data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid YAML: {message}")]
    Parse { message: String },

    #[error("invalid value {value:?} for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        value: String,
        message: String,
    },

    #[error("seed {entity} {id} rejected: {message}")]
    InvalidSeed {
        entity: &'static str,
        id: String,
        message: String,
    },

    #[error("seed {entity} id {id} appears more than once")]
    DuplicateSeedId { entity: &'static str, id: String },
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_filter() -> String {
    "grubdash=info,tower_http=info".to_string()
}

/// Listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` as accepted by `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Tracing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// YAML file of dishes and orders loaded at startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&read_file(path.as_ref())?)
    }

    /// Load configuration from a YAML string
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Apply `GRUBDASH_HOST`, `GRUBDASH_PORT`, `GRUBDASH_LOG` and `GRUBDASH_SEED`
    ///
    /// `lookup` resolves a variable name; pass `|k| std::env::var(k).ok()`
    /// for the process environment.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("GRUBDASH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("GRUBDASH_PORT") {
            self.server.port = port.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    field: "GRUBDASH_PORT",
                    value: port.clone(),
                    message: e.to_string(),
                }
            })?;
        }
        if let Some(filter) = lookup("GRUBDASH_LOG") {
            self.logging.filter = filter;
        }
        if let Some(seed) = lookup("GRUBDASH_SEED") {
            self.seed_file = Some(PathBuf::from(seed));
        }
        Ok(())
    }

    /// Load from `GRUBDASH_CONFIG` (defaults when unset), then apply the
    /// environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(lookup)?;
        Ok(config)
    }

    /// Seed data named by `seed_file`, if any
    pub fn load_seed(&self) -> Result<Option<SeedData>, ConfigError> {
        self.seed_file
            .as_deref()
            .map(SeedData::from_yaml_file)
            .transpose()
    }
}

/// Records loaded into the stores at startup
///
/// Every record goes through the create rules of its collection before the
/// server accepts it. Orders keep the status given here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub dishes: Vec<Dish>,

    #[serde(default)]
    pub orders: Vec<Order>,
}

impl SeedData {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&read_file(path.as_ref())?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::OrderStatus;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.logging.filter, "grubdash=info,tower_http=info");
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml_str("server:\n  port: 8080\n").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = AppConfig {
            seed_file: Some(PathBuf::from("seed.yaml")),
            ..AppConfig::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();

        // Should be able to parse it back
        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = AppConfig::from_yaml_str("server: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[
                ("GRUBDASH_HOST", "0.0.0.0"),
                ("GRUBDASH_PORT", "9000"),
                ("GRUBDASH_LOG", "grubdash=debug"),
                ("GRUBDASH_SEED", "/tmp/seed.yaml"),
            ]))
            .unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.logging.filter, "grubdash=debug");
        assert_eq!(config.seed_file, Some(PathBuf::from("/tmp/seed.yaml")));
    }

    #[test]
    fn test_env_port_must_be_u16() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(env(&[("GRUBDASH_PORT", "70000")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "GRUBDASH_PORT",
                ..
            }
        ));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_without_config_file() {
        let config = AppConfig::load_with(env(&[("GRUBDASH_PORT", "6000")])).unwrap();
        assert_eq!(config.server.port, 6000);
    }

    #[test]
    fn test_load_missing_config_file() {
        let err = AppConfig::load_with(env(&[(CONFIG_PATH_VAR, "/nonexistent/grubdash.yaml")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_seed_from_yaml() {
        let seed = SeedData::from_yaml_str(
            r#"
dishes:
  - id: d1
    name: Dirty Bird
    description: Crisp fried chicken
    price: 12
    image_url: https://example.com/bird.jpg
orders:
  - id: o1
    deliverTo: 1 Main St
    mobileNumber: "555-0100"
    status: out-for-delivery
    dishes:
      - dishId: d1
        quantity: 2
"#,
        )
        .unwrap();

        assert_eq!(seed.dishes.len(), 1);
        assert_eq!(seed.dishes[0].price, 12);
        assert_eq!(seed.orders[0].status, OrderStatus::OutForDelivery);
        assert_eq!(seed.orders[0].dishes[0].quantity, 2);
    }

    #[test]
    fn test_seed_sections_optional() {
        let seed = SeedData::from_yaml_str("dishes: []\n").unwrap();
        assert!(seed.dishes.is_empty());
        assert!(seed.orders.is_empty());
    }
}
