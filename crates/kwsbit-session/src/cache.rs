use kwsbit_core::RecognitionResult;

/// The single most recent successful recognition.
///
/// Replaced wholesale on every success and never cleared on failure, so
/// queries always answer for the last successful detection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultCache {
    last: Option<RecognitionResult>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, result: RecognitionResult) {
        self.last = Some(result);
    }

    pub fn last(&self) -> Option<&RecognitionResult> {
        self.last.as_ref()
    }

    pub fn keyword(&self) -> Option<&str> {
        self.last.as_ref().map(|r| r.keyword.as_str())
    }

    /// `round(confidence * 100)`, or 0 before the first result.
    pub fn confidence_percent(&self) -> u32 {
        self.last
            .as_ref()
            .map(RecognitionResult::confidence_percent)
            .unwrap_or(0)
    }

    pub fn processing_time_ms(&self) -> u32 {
        self.last.as_ref().map_or(0, |r| r.processing_time_ms)
    }

    /// Exact, case-sensitive match against the cached keyword.
    pub fn is_keyword_detected(&self, word: &str) -> bool {
        self.keyword() == Some(word)
    }
}
