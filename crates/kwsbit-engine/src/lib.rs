pub mod null_service;
pub mod registry;
pub mod scripted_service;
pub mod service_trait;
pub mod simulated_service;
pub mod status;

pub use null_service::NullService;
pub use registry::ServiceRegistry;
pub use scripted_service::{ScriptedOutcome, ScriptedService};
pub use service_trait::InferenceService;
pub use simulated_service::SimulatedService;
pub use status::{check_status, STATUS_OK};
