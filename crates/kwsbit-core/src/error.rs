use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InferenceError {
    #[error("inference service initialization failed: {0}")]
    InitializationFailed(String),

    #[error("no recognition result this cycle: {0}")]
    NoResult(String),

    #[error("inference service not initialized")]
    NotInitialized,

    #[error("inference engine not found: {0}")]
    EngineNotFound(String),

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}
