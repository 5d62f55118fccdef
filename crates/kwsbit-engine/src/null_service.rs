use crate::service_trait::InferenceService;
use kwsbit_core::InferenceError;

/// Service that initializes fine but never detects anything.
pub struct NullService {
    process_count: usize,
}

impl NullService {
    pub fn new() -> Self {
        Self { process_count: 0 }
    }

    pub fn process_count(&self) -> usize {
        self.process_count
    }
}

impl Default for NullService {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceService for NullService {
    fn name(&self) -> &str {
        "null"
    }

    fn init(&mut self) -> Result<(), InferenceError> {
        Ok(())
    }

    fn deinit(&mut self) {}

    fn set_sampling_frequency(&mut self, hz: u32) {
        tracing::trace!("NullService ignoring frequency {hz} Hz");
    }

    fn set_sampling_duration(&mut self, ms: u32) {
        tracing::trace!("NullService ignoring duration {ms} ms");
    }

    fn process(&mut self) -> Result<(), InferenceError> {
        self.process_count += 1;
        tracing::trace!("NullService process #{}", self.process_count);
        Err(InferenceError::NoResult("null engine never detects".to_string()))
    }

    fn last_label(&self) -> String {
        String::new()
    }

    fn last_confidence(&self) -> f32 {
        0.0
    }

    fn last_processing_time_ms(&self) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_service_name() {
        let service = NullService::new();
        assert_eq!(service.name(), "null");
    }

    #[test]
    fn test_null_service_init_succeeds() {
        let mut service = NullService::new();
        assert!(service.init().is_ok());
    }

    #[test]
    fn test_null_service_process_never_detects() {
        let mut service = NullService::new();
        service.init().unwrap();
        for _ in 0..3 {
            match service.process() {
                Err(InferenceError::NoResult(_)) => {}
                other => panic!("expected NoResult, got {:?}", other),
            }
        }
        assert_eq!(service.process_count(), 3);
    }

    #[test]
    fn test_null_service_empty_result_fields() {
        let service = NullService::new();
        assert!(service.last_label().is_empty());
        assert_eq!(service.last_confidence(), 0.0);
        assert_eq!(service.last_processing_time_ms(), 0);
    }

    #[test]
    fn test_null_service_configure_accepts_anything() {
        let mut service = NullService::new();
        let result = service.configure(&toml::Value::Table(Default::default()));
        assert!(result.is_ok());
    }

    #[test]
    fn test_null_service_implements_send() {
        fn assert_send<T: Send>() {}
        assert_send::<NullService>();
    }
}
