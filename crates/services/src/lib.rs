#![forbid(unsafe_code)]

pub mod analytics_service;
pub mod app_services;
pub mod assessment;
pub mod auth_service;
pub mod authoring_service;
pub mod error;
pub mod generation;
pub mod roster_service;

pub use quiz_core::Clock;

pub use analytics_service::{AnalyticsService, StudentReport};
pub use app_services::PortalServices;
pub use assessment::{AttemptHandle, AttemptService, AttemptSnapshot, format_countdown};
pub use auth_service::AuthService;
pub use authoring_service::AuthoringService;
pub use error::{
    AnalyticsError, AppServicesError, AttemptServiceError, AuthError, AuthoringError,
    RosterServiceError,
};
pub use generation::{CannedQuestionGenerator, QuestionGenerator};
pub use roster_service::{ClassSummary, NewStudent, RosterService};
