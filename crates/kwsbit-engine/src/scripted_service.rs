use crate::service_trait::InferenceService;
use crate::status::check_status;
use kwsbit_core::InferenceError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// One scripted `process()` cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedOutcome {
    Detected {
        label: String,
        confidence: f32,
        processing_time_ms: u32,
    },
    /// Nonzero native status: no result this cycle.
    Failed(i32),
}

impl ScriptedOutcome {
    pub fn detected(label: &str, confidence: f32, processing_time_ms: u32) -> Self {
        ScriptedOutcome::Detected {
            label: label.to_string(),
            confidence,
            processing_time_ms,
        }
    }
}

#[derive(Debug, Default)]
struct ScriptState {
    init_statuses: VecDeque<i32>,
    outcomes: VecDeque<ScriptedOutcome>,
    init_calls: usize,
    deinit_calls: usize,
    process_calls: usize,
    frequencies: Vec<u32>,
    durations: Vec<u32>,
    last_label: String,
    last_confidence: f32,
    last_processing_time_ms: u32,
}

/// Service driven by a queue of canned outcomes.
///
/// Cloning yields another handle onto the same script, so a caller can keep a
/// handle after moving the service into a session. Unscripted `init` calls
/// succeed; unscripted `process` calls fail with status `-1`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedService {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue the status code returned by the next unscripted `init`.
    pub fn push_init_status(&self, status: i32) -> &Self {
        self.state().init_statuses.push_back(status);
        self
    }

    pub fn push_outcome(&self, outcome: ScriptedOutcome) -> &Self {
        self.state().outcomes.push_back(outcome);
        self
    }

    pub fn init_calls(&self) -> usize {
        self.state().init_calls
    }

    pub fn deinit_calls(&self) -> usize {
        self.state().deinit_calls
    }

    pub fn process_calls(&self) -> usize {
        self.state().process_calls
    }

    /// Every frequency forwarded so far, in order.
    pub fn frequencies(&self) -> Vec<u32> {
        self.state().frequencies.clone()
    }

    /// Every duration forwarded so far, in order.
    pub fn durations(&self) -> Vec<u32> {
        self.state().durations.clone()
    }
}

impl InferenceService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    fn init(&mut self) -> Result<(), InferenceError> {
        let mut state = self.state();
        state.init_calls += 1;
        let status = state.init_statuses.pop_front().unwrap_or(0);
        check_status(status, |code| {
            InferenceError::InitializationFailed(format!("init returned status {code}"))
        })
    }

    fn deinit(&mut self) {
        self.state().deinit_calls += 1;
    }

    fn set_sampling_frequency(&mut self, hz: u32) {
        self.state().frequencies.push(hz);
    }

    fn set_sampling_duration(&mut self, ms: u32) {
        self.state().durations.push(ms);
    }

    fn process(&mut self) -> Result<(), InferenceError> {
        let mut state = self.state();
        state.process_calls += 1;
        let outcome = state
            .outcomes
            .pop_front()
            .unwrap_or(ScriptedOutcome::Failed(-1));
        match outcome {
            ScriptedOutcome::Detected {
                label,
                confidence,
                processing_time_ms,
            } => {
                state.last_label = label;
                state.last_confidence = confidence;
                state.last_processing_time_ms = processing_time_ms;
                Ok(())
            }
            ScriptedOutcome::Failed(code) => check_status(code, |code| {
                InferenceError::NoResult(format!("process returned status {code}"))
            }),
        }
    }

    fn last_label(&self) -> String {
        self.state().last_label.clone()
    }

    fn last_confidence(&self) -> f32 {
        self.state().last_confidence
    }

    fn last_processing_time_ms(&self) -> u32 {
        self.state().last_processing_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_service_unscripted_init_succeeds() {
        let mut service = ScriptedService::new();
        assert!(service.init().is_ok());
        assert_eq!(service.init_calls(), 1);
    }

    #[test]
    fn test_scripted_service_init_status_failure() {
        let mut service = ScriptedService::new();
        service.push_init_status(-1);
        match service.init() {
            Err(InferenceError::InitializationFailed(msg)) => assert!(msg.contains("-1")),
            other => panic!("expected InitializationFailed, got {:?}", other),
        }
        assert!(service.init().is_ok());
        assert_eq!(service.init_calls(), 2);
    }

    #[test]
    fn test_scripted_service_outcomes_in_order() {
        let mut service = ScriptedService::new();
        service
            .push_outcome(ScriptedOutcome::detected("microbit", 0.92, 45))
            .push_outcome(ScriptedOutcome::Failed(-1));

        assert!(service.process().is_ok());
        assert_eq!(service.last_label(), "microbit");
        assert_eq!(service.last_confidence(), 0.92);
        assert_eq!(service.last_processing_time_ms(), 45);

        assert!(matches!(service.process(), Err(InferenceError::NoResult(_))));
        // Unscripted cycles fail too
        assert!(service.process().is_err());
        assert_eq!(service.process_calls(), 3);
    }

    #[test]
    fn test_scripted_service_clone_shares_script() {
        let handle = ScriptedService::new();
        let mut service = handle.clone();
        service.set_sampling_frequency(8000);
        service.set_sampling_duration(700);
        service.deinit();
        assert_eq!(handle.frequencies(), vec![8000]);
        assert_eq!(handle.durations(), vec![700]);
        assert_eq!(handle.deinit_calls(), 1);
    }
}
