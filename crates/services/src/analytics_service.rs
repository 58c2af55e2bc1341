use std::collections::BTreeMap;
use std::sync::Arc;

use quiz_core::model::{SessionContext, Student, StudentAnalytics, StudentId};
use storage::repository::{AttemptRecordRepository, QuizCatalog, RosterRepository, StorageError};

use crate::error::AnalyticsError;

/// Analytics for one student, together with their roster entry when known.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentReport {
    pub student: Option<Student>,
    pub analytics: StudentAnalytics,
}

/// Derives dashboard figures from stored attempts.
#[derive(Clone)]
pub struct AnalyticsService {
    catalog: Arc<dyn QuizCatalog>,
    attempts: Arc<dyn AttemptRecordRepository>,
    roster: Arc<dyn RosterRepository>,
}

impl AnalyticsService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn QuizCatalog>,
        attempts: Arc<dyn AttemptRecordRepository>,
        roster: Arc<dyn RosterRepository>,
    ) -> Self {
        Self {
            catalog,
            attempts,
            roster,
        }
    }

    /// # Errors
    ///
    /// Returns `AnalyticsError::Storage` if attempts or quizzes cannot be read.
    pub async fn student_analytics(
        &self,
        student_id: StudentId,
    ) -> Result<StudentAnalytics, AnalyticsError> {
        let attempts = self.attempts.list_attempts(Some(student_id)).await?;
        let titles: BTreeMap<_, _> = self
            .catalog
            .list_quizzes(false)
            .await?
            .into_iter()
            .map(|quiz| (quiz.id(), quiz.title().to_owned()))
            .collect();

        Ok(StudentAnalytics::from_attempts(student_id, &attempts, |id| {
            titles.get(&id).cloned()
        }))
    }

    /// Analytics for the signed-in student.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::UnknownStudent` for a context without an
    /// enrolment, or `AnalyticsError::Storage`.
    pub async fn for_context(
        &self,
        ctx: &SessionContext,
    ) -> Result<StudentAnalytics, AnalyticsError> {
        let student_id = ctx.student_id().ok_or(AnalyticsError::UnknownStudent)?;
        self.student_analytics(student_id).await
    }

    /// Analytics for any student, as viewed by an administrator.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for non-admins, `UnknownStudent` if the student is
    /// neither enrolled nor has attempts, or `Storage`.
    pub async fn student_report(
        &self,
        ctx: &SessionContext,
        student_id: StudentId,
    ) -> Result<StudentReport, AnalyticsError> {
        if !ctx.is_admin() {
            return Err(AnalyticsError::Forbidden);
        }
        let student = match self.roster.get_student(student_id).await {
            Ok(student) => Some(student),
            Err(StorageError::NotFound) => None,
            Err(err) => return Err(err.into()),
        };
        let analytics = self.student_analytics(student_id).await?;
        if student.is_none() && analytics.history.is_empty() {
            return Err(AnalyticsError::UnknownStudent);
        }
        Ok(StudentReport { student, analytics })
    }
}
