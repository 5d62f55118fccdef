use kwsbit_core::InferenceError;

pub const STATUS_OK: i32 = 0;

/// Convert a native status code into a `Result`, building the error from the code on failure.
pub fn check_status(
    code: i32,
    on_failure: impl FnOnce(i32) -> InferenceError,
) -> Result<(), InferenceError> {
    if code == STATUS_OK {
        Ok(())
    } else {
        Err(on_failure(code))
    }
}
