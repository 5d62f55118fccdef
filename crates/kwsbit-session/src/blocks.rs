//! Block-level API as exposed to the scripting environment.
//!
//! Both façades wrap the same [`Session`] and differ only in their
//! initialization policy and naming. Failures collapse into sentinel values:
//! `""` for keywords, `false` for matches and `0` for numbers.

use crate::harness::MICROBIT_KEYWORD;
use crate::indicator::Indicator;
use crate::session::{InitPolicy, Recognition, Session};
use kwsbit_core::{AudioQuality, SamplingDuration, SamplingFrequency, MODEL_NOMINAL_FREQUENCY_HZ};
use kwsbit_engine::InferenceService;

fn keyword_or_empty(outcome: Recognition) -> String {
    match outcome {
        Recognition::Detected(result) => result.keyword,
        Recognition::NoDetection | Recognition::NotInitialized => String::new(),
    }
}

/// Voice Recognition blocks: explicit `initialize` is required before listening.
pub struct VoiceRecognition {
    session: Session,
}

impl VoiceRecognition {
    pub fn new(service: Box<dyn InferenceService>, indicator: Box<dyn Indicator>) -> Self {
        Self {
            session: Session::new(service, indicator, InitPolicy::Explicit),
        }
    }

    pub fn initialize(&mut self) {
        self.session.setup();
    }

    pub fn set_sampling_frequency(&mut self, frequency: SamplingFrequency) {
        self.session.set_standard_frequency(frequency);
    }

    pub fn set_sampling_duration(&mut self, duration: SamplingDuration) {
        self.session.set_sampling_duration_exact(duration.ms());
    }

    /// Blocking. Returns the detected keyword, or `""` when nothing was detected
    /// or the system is not initialized.
    pub fn recognize_voice(&mut self) -> String {
        keyword_or_empty(self.session.recognize())
    }

    pub fn last_confidence(&self) -> u32 {
        self.session.last_confidence()
    }

    pub fn last_processing_time(&self) -> u32 {
        self.session.last_processing_time()
    }

    pub fn is_keyword_detected(&self, keyword: &str) -> bool {
        self.session.is_keyword_detected(keyword)
    }

    pub fn current_sampling_frequency(&self) -> u32 {
        self.session.sampling_frequency()
    }

    pub fn current_sampling_duration(&self) -> u32 {
        self.session.sampling_duration()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}

/// Simplified blocks plus their advanced section: listening initializes on demand.
pub struct SimpleVoice {
    session: Session,
}

impl SimpleVoice {
    pub fn new(service: Box<dyn InferenceService>, indicator: Box<dyn Indicator>) -> Self {
        Self {
            session: Session::new(service, indicator, InitPolicy::AutoInitialize),
        }
    }

    pub fn setup(&mut self) {
        self.session.setup();
    }

    /// Blocking. Returns the detected word or `""`.
    pub fn listen(&mut self) -> String {
        keyword_or_empty(self.session.recognize())
    }

    pub fn heard_word(&self, word: &str) -> bool {
        self.session.is_keyword_detected(word)
    }

    /// 0-100.
    pub fn confidence(&self) -> u32 {
        self.session.last_confidence()
    }

    /// Listening time is kept within 500-3000 ms.
    pub fn set_listening_time(&mut self, duration_ms: u32) {
        self.session.set_sampling_duration_clamped(duration_ms);
    }

    pub fn set_audio_quality(&mut self, quality: AudioQuality) {
        self.session.set_audio_quality(quality);
    }

    /// Numeric preset level as sent by block editors; unknown levels use the model's nominal rate.
    pub fn set_audio_quality_level(&mut self, level: i32) {
        self.session
            .set_sampling_frequency(AudioQuality::frequency_for_level(level));
    }

    // Advanced

    pub fn processing_time(&self) -> u32 {
        self.session.last_processing_time()
    }

    /// Configured rate, which may differ from the model's nominal 11000 Hz.
    pub fn sample_rate(&self) -> u32 {
        let rate = self.session.sampling_frequency();
        if rate != MODEL_NOMINAL_FREQUENCY_HZ {
            tracing::debug!(
                configured_hz = rate,
                nominal_hz = MODEL_NOMINAL_FREQUENCY_HZ,
                "sample rate differs from the model's nominal rate"
            );
        }
        rate
    }

    pub fn listening_duration(&self) -> u32 {
        self.session.sampling_duration()
    }

    pub fn microbit_detected(&self) -> bool {
        self.session.is_keyword_detected(MICROBIT_KEYWORD)
    }

    /// Unvalidated; forwarded as given.
    pub fn set_sample_rate(&mut self, frequency_hz: u32) {
        self.session.set_sampling_frequency(frequency_hz);
    }

    /// Unclamped; forwarded as given.
    pub fn set_exact_duration(&mut self, duration_ms: u32) {
        self.session.set_sampling_duration_exact(duration_ms);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
