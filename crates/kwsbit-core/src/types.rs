use serde::Deserialize;

pub const DEFAULT_SAMPLING_FREQUENCY_HZ: u32 = 16000;
pub const DEFAULT_SAMPLING_DURATION_MS: u32 = 1000;

/// Frequency the bundled keyword model was trained at.
pub const MODEL_NOMINAL_FREQUENCY_HZ: u32 = 11000;

pub const MIN_LISTENING_TIME_MS: u32 = 500;
pub const MAX_LISTENING_TIME_MS: u32 = 3000;

/// Outcome of one successful `process()` call, read from the service in a single snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    pub keyword: String,
    pub confidence_raw: f32,
    pub processing_time_ms: u32,
}

impl RecognitionResult {
    /// Confidence as a 0-100 percentage, `round(raw * 100)`.
    ///
    /// Float-to-int casts saturate, so a misbehaving service reporting a
    /// negative or NaN confidence yields 0.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence_raw * 100.0).round() as u32
    }
}

/// Standard sampling rates offered by the advanced block API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingFrequency {
    Hz8000,
    Hz16000,
    Hz22050,
    Hz44100,
}

impl SamplingFrequency {
    pub const ALL: [SamplingFrequency; 4] = [
        SamplingFrequency::Hz8000,
        SamplingFrequency::Hz16000,
        SamplingFrequency::Hz22050,
        SamplingFrequency::Hz44100,
    ];

    pub fn hz(self) -> u32 {
        match self {
            SamplingFrequency::Hz8000 => 8000,
            SamplingFrequency::Hz16000 => 16000,
            SamplingFrequency::Hz22050 => 22050,
            SamplingFrequency::Hz44100 => 44100,
        }
    }
}

/// Standard listening windows offered by the advanced block API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingDuration {
    Ms500,
    Ms1000,
    Ms1500,
    Ms2000,
    Ms3000,
}

impl SamplingDuration {
    pub fn ms(self) -> u32 {
        match self {
            SamplingDuration::Ms500 => 500,
            SamplingDuration::Ms1000 => 1000,
            SamplingDuration::Ms1500 => 1500,
            SamplingDuration::Ms2000 => 2000,
            SamplingDuration::Ms3000 => 3000,
        }
    }
}

/// Quality presets of the simplified block API. Higher quality means a
/// higher sampling frequency and slower inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioQuality {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl AudioQuality {
    pub fn frequency_hz(self) -> u32 {
        match self {
            AudioQuality::Low => 8000,
            AudioQuality::Medium => MODEL_NOMINAL_FREQUENCY_HZ,
            AudioQuality::High => 16000,
            AudioQuality::VeryHigh => 22050,
        }
    }

    /// Block editors pass presets as their numeric level (1-4).
    pub fn from_level(level: i32) -> Option<Self> {
        match level {
            1 => Some(AudioQuality::Low),
            2 => Some(AudioQuality::Medium),
            3 => Some(AudioQuality::High),
            4 => Some(AudioQuality::VeryHigh),
            _ => None,
        }
    }

    /// Frequency for a numeric level; unknown levels fall back to the model's nominal rate.
    pub fn frequency_for_level(level: i32) -> u32 {
        Self::from_level(level)
            .map(Self::frequency_hz)
            .unwrap_or(MODEL_NOMINAL_FREQUENCY_HZ)
    }

    pub fn label(self) -> &'static str {
        match self {
            AudioQuality::Low => "low (fast)",
            AudioQuality::Medium => "medium (balanced)",
            AudioQuality::High => "high (good)",
            AudioQuality::VeryHigh => "very high (slow)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_percent_rounds() {
        let result = RecognitionResult {
            keyword: "microbit".to_string(),
            confidence_raw: 0.92,
            processing_time_ms: 45,
        };
        assert_eq!(result.confidence_percent(), 92);

        let up = RecognitionResult {
            confidence_raw: 0.926,
            ..result.clone()
        };
        assert_eq!(up.confidence_percent(), 93);
    }

    #[test]
    fn test_confidence_percent_saturates_on_bad_input() {
        let result = RecognitionResult {
            keyword: "noise".to_string(),
            confidence_raw: -0.3,
            processing_time_ms: 0,
        };
        assert_eq!(result.confidence_percent(), 0);
    }

    #[test]
    fn test_audio_quality_presets() {
        assert_eq!(AudioQuality::Low.frequency_hz(), 8000);
        assert_eq!(AudioQuality::Medium.frequency_hz(), 11000);
        assert_eq!(AudioQuality::High.frequency_hz(), 16000);
        assert_eq!(AudioQuality::VeryHigh.frequency_hz(), 22050);
    }

    #[test]
    fn test_audio_quality_level_fallback() {
        assert_eq!(AudioQuality::frequency_for_level(1), 8000);
        assert_eq!(AudioQuality::frequency_for_level(4), 22050);
        assert_eq!(AudioQuality::frequency_for_level(0), 11000);
        assert_eq!(AudioQuality::frequency_for_level(99), 11000);
    }

    #[test]
    fn test_standard_frequencies() {
        let hz: Vec<u32> = SamplingFrequency::ALL.iter().map(|f| f.hz()).collect();
        assert_eq!(hz, vec![8000, 16000, 22050, 44100]);
    }

    #[test]
    fn test_standard_durations_within_listening_range() {
        for d in [
            SamplingDuration::Ms500,
            SamplingDuration::Ms1000,
            SamplingDuration::Ms1500,
            SamplingDuration::Ms2000,
            SamplingDuration::Ms3000,
        ] {
            assert!((MIN_LISTENING_TIME_MS..=MAX_LISTENING_TIME_MS).contains(&d.ms()));
        }
    }
}
