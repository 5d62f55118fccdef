use crate::service_trait::InferenceService;
use kwsbit_core::{InferenceError, DEFAULT_SAMPLING_DURATION_MS, DEFAULT_SAMPLING_FREQUENCY_HZ};
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

/// Rates the native wrapper accepts; anything else is silently ignored.
pub const ACCEPTED_FREQUENCY_HZ: RangeInclusive<u32> = 8000..=48000;

/// Windows the native wrapper accepts; anything else is silently ignored.
pub const ACCEPTED_DURATION_MS: RangeInclusive<u32> = 100..=5000;

/// Host-side stand-in for the on-device pipeline. Blocks for the configured
/// latency and reports a fixed label and confidence.
pub struct SimulatedService {
    initialized: bool,
    frequency_hz: u32,
    duration_ms: u32,
    label: String,
    confidence: f32,
    latency: Duration,
    last_label: String,
    last_confidence: f32,
    last_processing_time_ms: u32,
}

impl SimulatedService {
    pub fn new() -> Self {
        Self {
            initialized: false,
            frequency_hz: DEFAULT_SAMPLING_FREQUENCY_HZ,
            duration_ms: DEFAULT_SAMPLING_DURATION_MS,
            label: "microbit".to_string(),
            confidence: 0.85,
            latency: Duration::from_millis(50),
            last_label: String::new(),
            last_confidence: 0.0,
            last_processing_time_ms: 0,
        }
    }

    /// Frequency the service is actually using, which may differ from what was requested.
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Duration the service is actually using, which may differ from what was requested.
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Number of samples captured per window.
    pub fn window_samples(&self) -> usize {
        (u64::from(self.frequency_hz) * u64::from(self.duration_ms) / 1000) as usize
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Default for SimulatedService {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceService for SimulatedService {
    fn name(&self) -> &str {
        "simulated"
    }

    fn configure(&mut self, config: &toml::Value) -> Result<(), InferenceError> {
        if let Some(label) = config.get("label").and_then(|v| v.as_str()) {
            self.label = label.to_string();
        }

        if let Some(value) = config.get("confidence") {
            let confidence = value
                .as_float()
                .or_else(|| value.as_integer().map(|i| i as f64))
                .ok_or_else(|| {
                    InferenceError::InvalidConfig("'confidence' must be a number".to_string())
                })?;
            if !(0.0..=1.0).contains(&confidence) {
                return Err(InferenceError::InvalidConfig(format!(
                    "'confidence' must be within [0, 1], got {confidence}"
                )));
            }
            self.confidence = confidence as f32;
        }

        if let Some(value) = config.get("latency_ms") {
            let latency_ms = value
                .as_integer()
                .and_then(|ms| u64::try_from(ms).ok())
                .ok_or_else(|| {
                    InferenceError::InvalidConfig(
                        "'latency_ms' must be a non-negative integer".to_string(),
                    )
                })?;
            self.latency = Duration::from_millis(latency_ms);
        }

        tracing::debug!(
            label = %self.label,
            confidence = self.confidence,
            latency_ms = self.latency.as_millis() as u64,
            "SimulatedService configured"
        );
        Ok(())
    }

    fn init(&mut self) -> Result<(), InferenceError> {
        if !self.initialized {
            self.initialized = true;
            tracing::info!(
                frequency_hz = self.frequency_hz,
                duration_ms = self.duration_ms,
                "SimulatedService initialized (no model loaded)"
            );
        }
        Ok(())
    }

    fn deinit(&mut self) {
        if self.initialized {
            self.initialized = false;
            tracing::debug!("SimulatedService deinitialized");
        }
    }

    fn set_sampling_frequency(&mut self, hz: u32) {
        if ACCEPTED_FREQUENCY_HZ.contains(&hz) {
            self.frequency_hz = hz;
        } else {
            tracing::trace!("SimulatedService ignoring frequency {hz} Hz");
        }
    }

    fn set_sampling_duration(&mut self, ms: u32) {
        if ACCEPTED_DURATION_MS.contains(&ms) {
            self.duration_ms = ms;
        } else {
            tracing::trace!("SimulatedService ignoring duration {ms} ms");
        }
    }

    fn process(&mut self) -> Result<(), InferenceError> {
        if !self.initialized {
            return Err(InferenceError::NotInitialized);
        }

        let start = Instant::now();
        std::thread::sleep(self.latency);
        let elapsed = start.elapsed().as_millis();

        self.last_label = self.label.clone();
        self.last_confidence = self.confidence;
        self.last_processing_time_ms = u32::try_from(elapsed).unwrap_or(u32::MAX);

        tracing::trace!(
            samples = self.window_samples(),
            elapsed_ms = self.last_processing_time_ms,
            "SimulatedService processed window"
        );
        Ok(())
    }

    fn last_label(&self) -> String {
        self.last_label.clone()
    }

    fn last_confidence(&self) -> f32 {
        self.last_confidence
    }

    fn last_processing_time_ms(&self) -> u32 {
        self.last_processing_time_ms
    }
}
