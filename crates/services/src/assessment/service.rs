use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::Clock;
use quiz_core::model::{AttemptState, PortalSettings, QuizDef, QuizId, SessionContext};
use storage::repository::{AttemptRecordRepository, QuizCatalog, StorageError};

use super::handle::AttemptHandle;
use crate::error::AttemptServiceError;

/// Starts attempts and keeps track of the one currently in progress.
///
/// At most one attempt is live at a time. Starting another cancels the
/// previous attempt's countdown before the new one begins.
pub struct AttemptService {
    clock: Clock,
    settings: PortalSettings,
    catalog: Arc<dyn QuizCatalog>,
    sink: Arc<dyn AttemptRecordRepository>,
    active: Mutex<Option<AttemptHandle>>,
}

impl AttemptService {
    #[must_use]
    pub fn new(
        clock: Clock,
        settings: PortalSettings,
        catalog: Arc<dyn QuizCatalog>,
        sink: Arc<dyn AttemptRecordRepository>,
    ) -> Self {
        Self {
            clock,
            settings,
            catalog,
            sink,
            active: Mutex::new(None),
        }
    }

    fn active_slot(&self) -> MutexGuard<'_, Option<AttemptHandle>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Quizzes a student may start, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `AttemptServiceError::Storage` if the catalog cannot be read.
    pub async fn list_available(&self) -> Result<Vec<QuizDef>, AttemptServiceError> {
        Ok(self.catalog.list_quizzes(true).await?)
    }

    /// Start a fresh attempt on `quiz_id` for the signed-in student.
    ///
    /// The countdown begins immediately at the quiz's full time limit. If the
    /// quiz cannot be started, any attempt already in progress keeps running.
    ///
    /// # Errors
    ///
    /// Returns `NotAStudent` for an admin context, `QuizNotFound` or
    /// `QuizInactive` if the quiz cannot be taken, and `Attempt` when the quiz
    /// has no questions or no time limit.
    pub async fn start(
        &self,
        ctx: &SessionContext,
        quiz_id: QuizId,
    ) -> Result<AttemptHandle, AttemptServiceError> {
        let student_id = ctx.student_id().ok_or(AttemptServiceError::NotAStudent)?;

        let quiz = match self.catalog.get_quiz(quiz_id).await {
            Ok(quiz) => quiz,
            Err(StorageError::NotFound) => return Err(AttemptServiceError::QuizNotFound(quiz_id)),
            Err(err) => return Err(err.into()),
        };
        if !quiz.is_active() {
            return Err(AttemptServiceError::QuizInactive(quiz_id));
        }

        let state = AttemptState::start(Arc::new(quiz), self.clock.now()).map_err(|err| {
            tracing::warn!(%quiz_id, "cannot start attempt: {err}");
            err
        })?;

        let mut active = self.active_slot();
        if let Some(previous) = active.take() {
            tracing::info!(quiz_id = %previous.snapshot().quiz_id, "abandoning previous attempt");
            previous.cancel();
        }

        tracing::info!(
            %quiz_id,
            %student_id,
            time_limit_secs = state.remaining_secs(),
            questions = state.question_count(),
            "attempt started"
        );
        let handle = AttemptHandle::spawn(
            state,
            student_id,
            self.clock,
            Arc::clone(&self.sink),
            self.settings.tick_period(),
        );
        *active = Some(handle.clone());
        Ok(handle)
    }

    /// The attempt currently in progress or most recently finished.
    #[must_use]
    pub fn active(&self) -> Option<AttemptHandle> {
        self.active_slot().clone()
    }

    /// Forget the current attempt, stopping its countdown.
    pub fn discard(&self) {
        if let Some(handle) = self.active_slot().take() {
            handle.cancel();
        }
    }
}
