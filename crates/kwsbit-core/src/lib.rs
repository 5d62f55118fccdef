pub mod board_types;
pub mod config;
pub mod config_diff;
pub mod error;
pub mod types;

pub use board_types::{BoardCommand, BoardDisplay, BoardState, Icon, SessionSnapshot};
pub use config::{AppConfig, SamplingConfig, ServiceConfig, SessionConfig, SimulatedConfig};
pub use config_diff::ConfigDiff;
pub use error::{ConfigError, InferenceError};
pub use types::{
    AudioQuality, RecognitionResult, SamplingDuration, SamplingFrequency,
    DEFAULT_SAMPLING_DURATION_MS, DEFAULT_SAMPLING_FREQUENCY_HZ, MAX_LISTENING_TIME_MS,
    MIN_LISTENING_TIME_MS, MODEL_NOMINAL_FREQUENCY_HZ,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_result_fields() {
        let result = RecognitionResult {
            keyword: "microbit".to_string(),
            confidence_raw: 0.85,
            processing_time_ms: 50,
        };
        assert_eq!(result.keyword, "microbit");
        assert_eq!(result.confidence_raw, 0.85);
        assert_eq!(result.processing_time_ms, 50);
    }

    #[test]
    fn test_default_sampling_parameters() {
        assert_eq!(DEFAULT_SAMPLING_FREQUENCY_HZ, 16000);
        assert_eq!(DEFAULT_SAMPLING_DURATION_MS, 1000);
        assert_eq!(MIN_LISTENING_TIME_MS, 500);
        assert_eq!(MAX_LISTENING_TIME_MS, 3000);
    }
}
