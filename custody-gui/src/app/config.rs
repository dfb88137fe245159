use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::filter;

use crate::store::model::{Beneficiary, FiatAmount, FiatBalance, FiatCurrency, KycState};

pub const DEFAULT_FILE_NAME: &str = "gui.toml";
pub const DEFAULT_FLYOUT_TRANSITION_MS: u64 = 500;

fn default_flyout_transition_ms() -> u64 {
    DEFAULT_FLYOUT_TRANSITION_MS
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// log level, can be "info", "debug", "trace".
    pub log_level: Option<String>,
    /// Use iced debug feature if true.
    pub debug: Option<bool>,
    /// Duration of the flyout exit animation, the modal is removed once it elapsed.
    #[serde(default = "default_flyout_transition_ms")]
    pub flyout_transition_ms: u64,
    #[serde(default)]
    pub custody: CustodyConfig,
}

/// Account served by the demo custody backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CustodyConfig {
    pub fiat_currency: FiatCurrency,
    pub kyc_state: KycState,
    pub eligible: bool,
    /// Simulated round trip of every backend request.
    pub latency_ms: u64,
    pub balance: FiatBalance,
    pub beneficiaries: Vec<Beneficiary>,
}

impl Default for CustodyConfig {
    fn default() -> Self {
        Self {
            fiat_currency: FiatCurrency::EUR,
            kyc_state: KycState::Verified,
            eligible: true,
            latency_ms: 300,
            balance: FiatBalance {
                total: FiatAmount(250_000),
                withdrawable: FiatAmount(200_000),
            },
            beneficiaries: vec![Beneficiary {
                id: "bank-1".to_string(),
                name: "Checking account".to_string(),
                agent_account: "•••• 4242".to_string(),
                currency: FiatCurrency::EUR,
            }],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            debug: None,
            flyout_transition_ms: DEFAULT_FLYOUT_TRANSITION_MS,
            custody: CustodyConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = std::fs::read_to_string(path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ConfigError::NotFound,
                _ => ConfigError::ReadingFile(format!("Reading configuration file: {}", e)),
            })
            .and_then(|file_content| {
                toml::from_str::<Config>(&file_content).map_err(|e| {
                    ConfigError::ReadingFile(format!("Parsing configuration file: {}", e))
                })
            })?;

        // check if log_level field is valid
        config.log_level()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string(&self)
            .map_err(|e| ConfigError::WritingFile(format!("Failed to serialize config: {}", e)))?;

        let mut config_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| ConfigError::WritingFile(e.to_string()))?;

        config_file.write_all(content.as_bytes()).map_err(|e| {
            tracing::warn!("failed to write to file: {:?}", e);
            ConfigError::WritingFile(e.to_string())
        })?;

        tracing::info!("Done writing gui configuration file");
        Ok(())
    }

    pub fn log_level(&self) -> Result<filter::LevelFilter, ConfigError> {
        if let Some(level) = &self.log_level {
            match level.as_ref() {
                "info" => Ok(filter::LevelFilter::INFO),
                "debug" => Ok(filter::LevelFilter::DEBUG),
                "trace" => Ok(filter::LevelFilter::TRACE),
                _ => Err(ConfigError::InvalidField(
                    "log_level",
                    format!("Unknown value '{}'", level),
                )),
            }
        } else if let Some(true) = self.debug {
            Ok(filter::LevelFilter::DEBUG)
        } else {
            Ok(filter::LevelFilter::INFO)
        }
    }

    pub fn flyout_transition(&self) -> Duration {
        Duration::from_millis(self.flyout_transition_ms)
    }
}

#[derive(PartialEq, Eq, Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Config field {0} is invalid: {1}")]
    InvalidField(&'static str, String),
    #[error("Config file not found")]
    NotFound,
    #[error("Error while reading file: {0}")]
    ReadingFile(String),
    #[error("Error while writing file: {0}")]
    WritingFile(String),
}
