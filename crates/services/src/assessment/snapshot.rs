use std::collections::BTreeMap;

use quiz_core::model::{AttemptPhase, AttemptResult, AttemptState, QuizId, SubmissionKind};

/// Render a countdown as `m:ss`.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

/// Point-in-time view of an attempt, published to observers after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSnapshot {
    pub quiz_id: QuizId,
    pub current_index: usize,
    pub question_count: usize,
    pub remaining_secs: u32,
    pub answers: BTreeMap<usize, usize>,
    pub phase: AttemptPhase,
    pub result: Option<AttemptResult>,
    pub submission: Option<SubmissionKind>,
}

impl AttemptSnapshot {
    #[must_use]
    pub fn of(state: &AttemptState) -> Self {
        Self {
            quiz_id: state.quiz().id(),
            current_index: state.current_index(),
            question_count: state.question_count(),
            remaining_secs: state.remaining_secs(),
            answers: state.answers().clone(),
            phase: state.phase(),
            result: state.result(),
            submission: state.submission_kind(),
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == AttemptPhase::Completed
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn selected(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.question_count
    }

    #[must_use]
    pub fn countdown(&self) -> String {
        format_countdown(self.remaining_secs)
    }
}
