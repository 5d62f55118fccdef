use crate::error::ConfigError;
use crate::types::{AudioQuality, DEFAULT_SAMPLING_DURATION_MS, DEFAULT_SAMPLING_FREQUENCY_HZ};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub sampling: SamplingConfig,

    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct SessionConfig {
    /// Lazily initialize the service on the first recognition instead of
    /// refusing until `initialize` has been called.
    #[serde(default)]
    pub auto_initialize: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SamplingConfig {
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: u32,

    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,

    #[serde(default)]
    pub quality: Option<AudioQuality>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            frequency_hz: default_frequency_hz(),
            duration_ms: default_duration_ms(),
            quality: None,
        }
    }
}

impl SamplingConfig {
    /// A quality preset, when present, wins over the raw frequency.
    pub fn effective_frequency_hz(&self) -> u32 {
        self.quality
            .map(AudioQuality::frequency_hz)
            .unwrap_or(self.frequency_hz)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_engine")]
    pub engine: String,

    #[serde(default)]
    pub simulated: Option<SimulatedConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            simulated: None,
        }
    }
}

impl ServiceConfig {
    /// Engine-specific settings as a TOML table, empty when the engine has none.
    pub fn engine_config(&self) -> Result<toml::Value, ConfigError> {
        match (self.engine.as_str(), &self.simulated) {
            ("simulated", Some(simulated)) => toml::Value::try_from(simulated)
                .map_err(|e| ConfigError::InvalidValue(e.to_string())),
            _ => Ok(toml::Value::Table(Default::default())),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SimulatedConfig {
    #[serde(default = "default_label")]
    pub label: String,

    #[serde(default = "default_confidence")]
    pub confidence: f32,

    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            confidence: default_confidence(),
            latency_ms: default_latency_ms(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_frequency_hz() -> u32 {
    DEFAULT_SAMPLING_FREQUENCY_HZ
}

fn default_duration_ms() -> u32 {
    DEFAULT_SAMPLING_DURATION_MS
}

fn default_engine() -> String {
    "simulated".to_string()
}

fn default_label() -> String {
    "microbit".to_string()
}

fn default_confidence() -> f32 {
    0.85
}

fn default_latency_ms() -> u64 {
    50
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = ?path, engine = %config.service.engine, "config loaded");
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref simulated) = self.service.simulated {
            if !(0.0..=1.0).contains(&simulated.confidence) {
                return Err(ConfigError::InvalidValue(format!(
                    "service.simulated.confidence must be within [0, 1], got {}",
                    simulated.confidence
                )));
            }
        }
        Ok(())
    }
}
