use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{QuestionDraft, QuestionId, QuizDef, QuizDraft, QuizId, SessionContext};
use storage::repository::QuizRepository;

use crate::error::AuthoringError;
use crate::generation::QuestionGenerator;

/// Builds and publishes quizzes on behalf of administrators.
#[derive(Clone)]
pub struct AuthoringService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
    generator: Arc<dyn QuestionGenerator>,
}

impl AuthoringService {
    #[must_use]
    pub fn new(
        clock: Clock,
        quizzes: Arc<dyn QuizRepository>,
        generator: Arc<dyn QuestionGenerator>,
    ) -> Self {
        Self {
            clock,
            quizzes,
            generator,
        }
    }

    /// Suggest questions for the builder.
    pub async fn generate(&self, topic: &str, count: usize) -> Vec<QuestionDraft> {
        self.generator.generate(topic, count).await
    }

    /// Validate a draft and add it to the catalog under the next free ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Forbidden` for non-admin contexts,
    /// `AuthoringError::Quiz` if the draft is invalid, or
    /// `AuthoringError::Storage` if the catalog rejects the write.
    pub async fn publish(
        &self,
        ctx: &SessionContext,
        draft: &QuizDraft,
    ) -> Result<QuizDef, AuthoringError> {
        if !ctx.is_admin() {
            return Err(AuthoringError::Forbidden);
        }
        // Reject bad drafts before burning IDs.
        draft.validate(QuizId::new(0), QuestionId::new(0), self.clock.now())?;

        let (quiz_id, first_question) = self.quizzes.reserve_ids(draft.questions.len()).await?;
        let quiz = draft.validate(quiz_id, first_question, self.clock.now())?;
        self.quizzes.upsert_quiz(&quiz).await?;

        tracing::info!(
            %quiz_id,
            title = quiz.title(),
            questions = quiz.question_count(),
            "quiz published"
        );
        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::CannedQuestionGenerator;
    use quiz_core::model::{PortalSettings, QuizError, StudentId};
    use quiz_core::time::fixed_clock;
    use storage::repository::{InMemoryRepository, QuizCatalog};

    fn service(repo: &InMemoryRepository) -> AuthoringService {
        AuthoringService::new(
            fixed_clock(),
            Arc::new(repo.clone()),
            Arc::new(CannedQuestionGenerator),
        )
    }

    fn admin() -> SessionContext {
        let settings = PortalSettings::default();
        SessionContext::admin(settings.demo_accounts()[1].user.clone())
    }

    #[tokio::test]
    async fn publishes_generated_questions() {
        let repo = InMemoryRepository::new();
        let authoring = service(&repo);
        let draft = QuizDraft {
            title: "ML Basics".into(),
            subject: "Machine Learning".into(),
            questions: authoring.generate("ml", 5).await,
            ..QuizDraft::default()
        };

        let quiz = authoring.publish(&admin(), &draft).await.unwrap();
        assert_eq!(quiz.id(), QuizId::new(1));
        assert_eq!(quiz.time_limit_minutes(), 30);
        assert_eq!(repo.get_quiz(quiz.id()).await.unwrap(), quiz);
    }

    #[tokio::test]
    async fn students_cannot_publish() {
        let repo = InMemoryRepository::new();
        let settings = PortalSettings::default();
        let ctx = SessionContext::student(settings.demo_accounts()[0].user.clone(), StudentId::new(1));
        let err = service(&repo)
            .publish(&ctx, &QuizDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthoringError::Forbidden));
    }

    #[tokio::test]
    async fn invalid_draft_does_not_consume_ids() {
        let repo = InMemoryRepository::new();
        let authoring = service(&repo);
        let empty = QuizDraft {
            title: "Empty".into(),
            subject: "None".into(),
            ..QuizDraft::default()
        };
        let err = authoring.publish(&admin(), &empty).await.unwrap_err();
        assert!(matches!(err, AuthoringError::Quiz(QuizError::NoQuestions)));

        let (next, _) = repo.reserve_ids(0).await.unwrap();
        assert_eq!(next, QuizId::new(1));
    }
}
