use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::attempt::{AttemptResult, AttemptState, SubmissionKind};
use crate::model::ids::{AttemptId, QuizId, StudentId};

/// What the result sink receives once an attempt completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub quiz_id: QuizId,
    pub student_id: StudentId,
    pub result: AttemptResult,
    pub time_spent_secs: u32,
    pub submission: SubmissionKind,
    pub completed_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// Capture a completed attempt. Returns `None` while it is still in progress.
    #[must_use]
    pub fn from_completed(state: &AttemptState, student_id: StudentId) -> Option<Self> {
        let result = state.result()?;
        let submission = state.submission_kind()?;
        let completed_at = state.completed_at()?;
        Some(Self {
            quiz_id: state.quiz().id(),
            student_id,
            result,
            time_spent_secs: state.elapsed_secs(),
            submission,
            completed_at,
        })
    }
}

/// An attempt record as stored, with the id the sink assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAttempt {
    pub id: AttemptId,
    pub record: AttemptRecord,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::ids::QuestionId;
    use crate::model::quiz::{QuestionDef, QuizDef};
    use crate::time::fixed_now;

    #[test]
    fn record_captures_time_spent_and_kind() {
        let question = QuestionDef::new(
            QuestionId::new(1),
            "2 + 2?",
            vec!["3".into(), "4".into()],
            1,
            None,
        )
        .unwrap();
        let quiz = Arc::new(QuizDef::new(
            QuizId::new(9),
            "Arithmetic",
            "Math",
            1,
            vec![question],
            fixed_now(),
        ));
        let mut state = AttemptState::start(quiz, fixed_now()).unwrap();
        assert!(AttemptRecord::from_completed(&state, StudentId::new(1)).is_none());

        for _ in 0..15 {
            state.tick(fixed_now());
        }
        state.submit(fixed_now());

        let record = AttemptRecord::from_completed(&state, StudentId::new(1)).unwrap();
        assert_eq!(record.quiz_id, QuizId::new(9));
        assert_eq!(record.time_spent_secs, 15);
        assert_eq!(record.submission, SubmissionKind::Manual);
        assert_eq!(record.result.answered_count(), 0);
    }
}
