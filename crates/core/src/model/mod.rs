pub mod analytics;
mod attempt;
mod ids;
pub mod quiz;
mod record;
mod roster;
mod settings;
mod user;

pub use analytics::{AttemptHistoryRow, PerformanceSplit, StudentAnalytics};
pub use attempt::{
    AttemptError, AttemptPhase, AttemptResult, AttemptState, Mutation, SubmissionKind,
    SubmitOutcome, TickOutcome, score_percent,
};
pub use ids::{AttemptId, ClassId, ParseIdError, QuestionId, QuizId, StudentId, UserId};
pub use quiz::{QuestionDef, QuestionDraft, QuizDef, QuizDraft, QuizError};
pub use record::{AttemptRecord, StoredAttempt};
pub use roster::{ClassInfo, RosterError, Student};
pub use settings::{DemoAccount, PortalSettings};
pub use user::{ParseRoleError, Role, SessionContext, User};
