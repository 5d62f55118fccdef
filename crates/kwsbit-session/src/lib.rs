pub mod blocks;
pub mod cache;
pub mod harness;
pub mod indicator;
pub mod session;

pub use blocks::{SimpleVoice, VoiceRecognition};
pub use cache::ResultCache;
pub use harness::{BenchReport, MICROBIT_KEYWORD, NOISE_KEYWORD};
pub use indicator::{Indicator, LogIndicator, NullIndicator, RecordingIndicator};
pub use session::{InitPolicy, Recognition, Session, SessionState};
