use crate::cache::ResultCache;
use crate::indicator::Indicator;
use kwsbit_core::{
    AudioQuality, Icon, RecognitionResult, SamplingFrequency, SessionConfig, SessionSnapshot,
    DEFAULT_SAMPLING_DURATION_MS, DEFAULT_SAMPLING_FREQUENCY_HZ, MAX_LISTENING_TIME_MS,
    MIN_LISTENING_TIME_MS,
};
use kwsbit_engine::InferenceService;

/// What `recognize` does when the service has not been initialized yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitPolicy {
    /// Refuse and report `NotInitialized` until `setup` succeeds.
    #[default]
    Explicit,
    /// Run `setup` lazily on the first recognition.
    AutoInitialize,
}

impl From<&SessionConfig> for InitPolicy {
    fn from(config: &SessionConfig) -> Self {
        if config.auto_initialize {
            InitPolicy::AutoInitialize
        } else {
            InitPolicy::Explicit
        }
    }
}

/// Initialization flag and the requested sampling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub initialized: bool,
    pub sampling_frequency_hz: u32,
    pub sampling_duration_ms: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            initialized: false,
            sampling_frequency_hz: DEFAULT_SAMPLING_FREQUENCY_HZ,
            sampling_duration_ms: DEFAULT_SAMPLING_DURATION_MS,
        }
    }
}

/// Outcome of one `recognize` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Recognition {
    Detected(RecognitionResult),
    /// The service ran but produced no result; the cache is untouched.
    NoDetection,
    /// Refused without calling the service.
    NotInitialized,
}

impl Recognition {
    pub fn keyword(&self) -> Option<&str> {
        match self {
            Recognition::Detected(result) => Some(result.keyword.as_str()),
            _ => None,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Recognition::Detected(_))
    }
}

/// A keyword-spotting session: gates recognition on initialization, owns the
/// sampling configuration and caches the last successful result.
///
/// Every operation takes `&mut self`; hosts sharing a session across tasks
/// must serialize access themselves.
pub struct Session {
    service: Box<dyn InferenceService>,
    indicator: Box<dyn Indicator>,
    policy: InitPolicy,
    state: SessionState,
    cache: ResultCache,
}

impl Session {
    pub fn new(
        service: Box<dyn InferenceService>,
        indicator: Box<dyn Indicator>,
        policy: InitPolicy,
    ) -> Self {
        Self {
            service,
            indicator,
            policy,
            state: SessionState::default(),
            cache: ResultCache::new(),
        }
    }

    pub fn policy(&self) -> InitPolicy {
        self.policy
    }

    pub fn engine_name(&self) -> &str {
        self.service.name()
    }

    /// Initialize the service once. Later calls return immediately without
    /// touching the service or the display.
    pub fn setup(&mut self) -> bool {
        if self.state.initialized {
            return true;
        }

        match self.service.init() {
            Ok(()) => {
                self.state.initialized = true;
                tracing::info!(engine = self.service.name(), "voice recognition ready");
                self.indicator.show_icon(Icon::Yes);
            }
            Err(e) => {
                tracing::warn!(engine = self.service.name(), "voice recognition init failed: {e}");
                self.indicator.show_icon(Icon::No);
            }
        }
        self.state.initialized
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    /// Persist and forward verbatim. The service may silently ignore rates it cannot use.
    pub fn set_sampling_frequency(&mut self, hz: u32) {
        self.state.sampling_frequency_hz = hz;
        self.service.set_sampling_frequency(hz);
        tracing::debug!(frequency_hz = hz, "sampling frequency set");
    }

    pub fn set_standard_frequency(&mut self, frequency: SamplingFrequency) {
        self.set_sampling_frequency(frequency.hz());
    }

    pub fn set_audio_quality(&mut self, quality: AudioQuality) {
        self.set_sampling_frequency(quality.frequency_hz());
    }

    /// Force the window into the listening range before persisting.
    pub fn set_sampling_duration_clamped(&mut self, ms: u32) {
        self.set_sampling_duration_exact(ms.clamp(MIN_LISTENING_TIME_MS, MAX_LISTENING_TIME_MS));
    }

    pub fn set_sampling_duration_exact(&mut self, ms: u32) {
        self.state.sampling_duration_ms = ms;
        self.service.set_sampling_duration(ms);
        tracing::debug!(duration_ms = ms, "sampling duration set");
    }

    /// Requested frequency; not necessarily what the service is honouring.
    pub fn sampling_frequency(&self) -> u32 {
        self.state.sampling_frequency_hz
    }

    /// Requested duration; not necessarily what the service is honouring.
    pub fn sampling_duration(&self) -> u32 {
        self.state.sampling_duration_ms
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Capture and classify one window. Blocks for the whole capture plus inference.
    pub fn recognize(&mut self) -> Recognition {
        if !self.state.initialized {
            match self.policy {
                InitPolicy::AutoInitialize => {
                    if !self.setup() {
                        return Recognition::NotInitialized;
                    }
                }
                InitPolicy::Explicit => {
                    tracing::warn!("recognition refused: call initialize first");
                    self.indicator.show_string("INIT");
                    return Recognition::NotInitialized;
                }
            }
        }

        self.indicator.show_icon(Icon::Ear);

        match self.service.process() {
            Ok(()) => {
                let result = RecognitionResult {
                    keyword: self.service.last_label(),
                    confidence_raw: self.service.last_confidence(),
                    processing_time_ms: self.service.last_processing_time_ms(),
                };
                tracing::info!(
                    keyword = %result.keyword,
                    confidence = result.confidence_percent(),
                    processing_time_ms = result.processing_time_ms,
                    "keyword detected"
                );
                self.indicator.show_string(&result.keyword);
                self.cache.replace(result.clone());
                Recognition::Detected(result)
            }
            Err(e) => {
                tracing::debug!("no detection: {e}");
                self.indicator.show_icon(Icon::No);
                Recognition::NoDetection
            }
        }
    }

    pub fn last_result(&self) -> Option<&RecognitionResult> {
        self.cache.last()
    }

    /// Last confidence as a 0-100 percentage, 0 before the first detection.
    pub fn last_confidence(&self) -> u32 {
        self.cache.confidence_percent()
    }

    pub fn last_processing_time(&self) -> u32 {
        self.cache.processing_time_ms()
    }

    pub fn is_keyword_detected(&self, word: &str) -> bool {
        self.cache.is_keyword_detected(word)
    }

    pub fn indicator_mut(&mut self) -> &mut dyn Indicator {
        self.indicator.as_mut()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            initialized: self.state.initialized,
            sampling_frequency_hz: self.state.sampling_frequency_hz,
            sampling_duration_ms: self.state.sampling_duration_ms,
            last_keyword: self.cache.keyword().map(str::to_string),
            last_confidence: self.cache.confidence_percent(),
            last_processing_time_ms: self.cache.processing_time_ms(),
        }
    }

    /// Release the service and return to the uninitialized state. The cached
    /// result stays queryable.
    pub fn shutdown(&mut self) {
        if self.state.initialized {
            self.service.deinit();
            self.state.initialized = false;
            tracing::info!(engine = self.service.name(), "voice recognition shut down");
        }
    }
}
