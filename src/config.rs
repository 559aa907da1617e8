//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file; every section has working
//! defaults so a missing file runs the engine with the bundled fixtures.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Address the WebSocket feed binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8090".into()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// Seconds between simulation ticks.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

const fn default_tick_seconds() -> u64 {
    5
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_seconds: default_tick_seconds(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Starting balance for the seeded demo account.
    #[serde(default = "default_demo_balance")]
    pub demo_balance: Decimal,
    /// Seed the store with the bundled fixture games at startup.
    #[serde(default = "default_true")]
    pub fixtures: bool,
}

fn default_demo_balance() -> Decimal {
    Decimal::from(1000)
}

const fn default_true() -> bool {
    true
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            demo_balance: default_demo_balance(),
            fixtures: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.network.listen_addr.is_empty() {
            return Err(ConfigError::MissingField {
                field: "listen_addr",
            }
            .into());
        }
        if self.simulator.tick_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_seconds",
                reason: "must be at least 1 second".into(),
            }
            .into());
        }
        if self.seed.demo_balance < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "demo_balance",
                reason: "cannot be negative".into(),
            }
            .into());
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            simulator: SimulatorConfig::default(),
            seed: SeedConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.network.listen_addr, "127.0.0.1:8090");
        assert_eq!(config.simulator.tick_seconds, 5);
        assert_eq!(config.seed.demo_balance, dec!(1000));
        assert!(config.seed.fixtures);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
[simulator]
tick_seconds = 2
"#,
        )
        .unwrap();
        assert_eq!(config.simulator.tick_seconds, 2);
        assert_eq!(config.network.listen_addr, "127.0.0.1:8090");
    }
}
