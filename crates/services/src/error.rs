//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{AttemptError, QuizError, QuizId, RosterError};
use storage::fixtures::FixtureError;
use storage::repository::StorageError;

/// Errors emitted while starting or driving an attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptServiceError {
    #[error("quiz {0} does not exist")]
    QuizNotFound(QuizId),
    #[error("quiz {0} is not open for attempts")]
    QuizInactive(QuizId),
    #[error("only students can take quizzes")]
    NotAStudent,
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("student account is not linked to an enrolment")]
    UnlinkedStudent,
}

/// Errors emitted by `AuthoringService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthoringError {
    #[error("only administrators can publish quizzes")]
    Forbidden,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RosterService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RosterServiceError {
    #[error("only administrators can change the roster")]
    Forbidden,
    #[error("class does not exist")]
    UnknownClass,
    #[error("USN {0} is already enrolled")]
    DuplicateUsn(String),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AnalyticsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalyticsError {
    #[error("only administrators can view other students")]
    Forbidden,
    #[error("student does not exist")]
    UnknownStudent,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping portal services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}
