mod handle;
mod service;
mod snapshot;

// Public API of the assessment subsystem.
pub use crate::error::AttemptServiceError;
pub use handle::AttemptHandle;
pub use service::AttemptService;
pub use snapshot::{AttemptSnapshot, format_countdown};
