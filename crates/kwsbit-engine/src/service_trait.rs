use kwsbit_core::InferenceError;

/// The native keyword-spotting pipeline: audio capture, feature extraction
/// and model execution behind a small blocking call surface.
///
/// Implementations are created through [`ServiceRegistry`](crate::ServiceRegistry).
/// Native status codes map onto `Result` via [`check_status`](crate::check_status):
/// `0` is `Ok`, anything else is an error.
pub trait InferenceService: Send {
    /// Registry name of the engine (e.g. `"simulated"`, `"null"`).
    fn name(&self) -> &str;

    /// Engine-specific settings, applied before `init`.
    fn configure(&mut self, _config: &toml::Value) -> Result<(), InferenceError> {
        Ok(())
    }

    fn init(&mut self) -> Result<(), InferenceError>;

    /// Release service resources.
    fn deinit(&mut self);

    /// Best-effort; the service may silently ignore rates it cannot honour.
    fn set_sampling_frequency(&mut self, hz: u32);

    /// Best-effort; the service may silently ignore windows it cannot honour.
    fn set_sampling_duration(&mut self, ms: u32);

    /// Capture one window and classify it. Blocks for capture plus inference.
    /// `Ok` means a result is available through the `last_*` accessors.
    fn process(&mut self) -> Result<(), InferenceError>;

    /// Valid only after `process` returned `Ok`.
    fn last_label(&self) -> String;

    /// Raw classifier probability in `[0, 1]`. Valid only after `process` returned `Ok`.
    fn last_confidence(&self) -> f32;

    /// Valid only after `process` returned `Ok`.
    fn last_processing_time_ms(&self) -> u32;
}
