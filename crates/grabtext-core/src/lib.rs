pub mod error;
pub mod normalize;
pub mod orchestrator;
pub mod presenter;

pub use error::{NormalizationError, PipelineError};
pub use normalize::{MIN_DIM, encode_png, normalize};
pub use orchestrator::{CaptureOrchestrator, ProcessOutcome};
pub use presenter::{ResultPayload, ResultPresenter};
