use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::quiz::{QuizDef, QuizError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("quiz cannot be attempted: {0}")]
    InvalidQuiz(QuizError),

    #[error("selection out of range: question {question}, option {option}")]
    OutOfRangeSelection { question: usize, option: usize },

    #[error("inconsistent result counts: {correct} correct, {answered} answered, {total} total")]
    InvalidCounts { total: u32, answered: u32, correct: u32 },
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// Round-half-up percentage of `correct` out of `total`.
///
/// Returns 0 for an empty total.
#[must_use]
pub fn score_percent(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    // (200k + n) / 2n == floor(100k/n + 1/2)
    let pct = (200 * correct + total) / (2 * total);
    u8::try_from(pct).unwrap_or(100)
}

/// Score of a completed attempt. Unanswered questions count as incorrect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptResult {
    score_percent: u8,
    total_questions: u32,
    answered_count: u32,
    correct_count: u32,
    incorrect_count: u32,
}

impl AttemptResult {
    /// Build a result from raw counts, e.g. when rehydrating stored attempts.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::InvalidCounts` unless
    /// `correct <= answered <= total` and `total > 0`.
    pub fn from_counts(total: u32, answered: u32, correct: u32) -> Result<Self, AttemptError> {
        if total == 0 || answered > total || correct > answered {
            return Err(AttemptError::InvalidCounts {
                total,
                answered,
                correct,
            });
        }
        Ok(Self {
            score_percent: score_percent(correct, total),
            total_questions: total,
            answered_count: answered,
            correct_count: correct,
            incorrect_count: total - correct,
        })
    }

    fn score(quiz: &QuizDef, answers: &BTreeMap<usize, usize>) -> Self {
        let mut correct = 0_u32;
        for (index, question) in quiz.questions().iter().enumerate() {
            if answers
                .get(&index)
                .is_some_and(|option| question.is_correct(*option))
            {
                correct = correct.saturating_add(1);
            }
        }
        let total = u32::try_from(quiz.question_count()).unwrap_or(u32::MAX);
        let answered = u32::try_from(answers.len()).unwrap_or(u32::MAX);

        Self {
            score_percent: score_percent(correct, total),
            total_questions: total,
            answered_count: answered,
            correct_count: correct,
            incorrect_count: total.saturating_sub(correct),
        }
    }

    #[must_use]
    pub fn score_percent(&self) -> u8 {
        self.score_percent
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn answered_count(&self) -> u32 {
        self.answered_count
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }
}

//
// ─── STATE MACHINE ─────────────────────────────────────────────────────────────
//

/// How an attempt reached `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionKind {
    /// The student confirmed submission.
    Manual,
    /// The countdown reached zero.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    InProgress,
    Completed,
}

/// Effect of a selection or navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// State changed.
    Applied,
    /// Valid call that left state as it was (same option, same index, invalid jump).
    Unchanged,
    /// The attempt is already completed; nothing was touched.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counted { remaining_secs: u32 },
    /// This tick reached zero and scored the attempt.
    Expired(AttemptResult),
    /// Tick arrived after completion and was suppressed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// This call completed the attempt.
    Scored(AttemptResult),
    /// The attempt was already completed; the stored result is returned.
    AlreadyCompleted(AttemptResult),
}

impl SubmitOutcome {
    #[must_use]
    pub fn result(&self) -> AttemptResult {
        match self {
            Self::Scored(result) | Self::AlreadyCompleted(result) => *result,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Completion {
    result: AttemptResult,
    kind: SubmissionKind,
    completed_at: DateTime<Utc>,
}

/// One student's attempt at one quiz.
///
/// Constructed in `InProgress` by [`AttemptState::start`]; moves to
/// `Completed` on [`submit`](AttemptState::submit) or when a
/// [`tick`](AttemptState::tick) brings the countdown to zero. Every mutating
/// call on a completed attempt is a no-op.
#[derive(Debug, Clone)]
pub struct AttemptState {
    quiz: Arc<QuizDef>,
    current: usize,
    answers: BTreeMap<usize, usize>,
    remaining_secs: u32,
    started_at: DateTime<Utc>,
    completion: Option<Completion>,
}

impl AttemptState {
    /// Begin an attempt with the full time limit on the clock.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::InvalidQuiz` if the quiz has no questions or a
    /// zero time limit.
    pub fn start(quiz: Arc<QuizDef>, started_at: DateTime<Utc>) -> Result<Self, AttemptError> {
        if quiz.questions().is_empty() {
            return Err(AttemptError::InvalidQuiz(QuizError::NoQuestions));
        }
        if quiz.time_limit_minutes() == 0 {
            return Err(AttemptError::InvalidQuiz(QuizError::InvalidTimeLimit));
        }

        let remaining_secs = quiz.time_limit_secs();
        Ok(Self {
            quiz,
            current: 0,
            answers: BTreeMap::new(),
            remaining_secs,
            started_at,
            completion: None,
        })
    }

    #[must_use]
    pub fn quiz(&self) -> &Arc<QuizDef> {
        &self.quiz
    }

    #[must_use]
    pub fn phase(&self) -> AttemptPhase {
        if self.completion.is_some() {
            AttemptPhase::Completed
        } else {
            AttemptPhase::InProgress
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.question_count()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Seconds consumed so far (time limit minus what is left on the clock).
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.quiz.time_limit_secs().saturating_sub(self.remaining_secs)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completion.map(|c| c.completed_at)
    }

    #[must_use]
    pub fn submission_kind(&self) -> Option<SubmissionKind> {
        self.completion.map(|c| c.kind)
    }

    #[must_use]
    pub fn result(&self) -> Option<AttemptResult> {
        self.completion.map(|c| c.result)
    }

    #[must_use]
    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Record `option` as the answer to `question`, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::OutOfRangeSelection` without touching state when
    /// either index is out of bounds on an attempt still in progress.
    pub fn select_answer(&mut self, question: usize, option: usize) -> Result<Mutation, AttemptError> {
        if self.is_completed() {
            return Ok(Mutation::Ignored);
        }
        let in_range = self
            .quiz
            .question(question)
            .is_some_and(|q| option < q.option_count());
        if !in_range {
            return Err(AttemptError::OutOfRangeSelection { question, option });
        }

        match self.answers.insert(question, option) {
            Some(previous) if previous == option => Ok(Mutation::Unchanged),
            _ => Ok(Mutation::Applied),
        }
    }

    /// Move to question `index`. Out-of-range targets leave the position as is.
    pub fn go_to(&mut self, index: usize) -> Mutation {
        if self.is_completed() {
            return Mutation::Ignored;
        }
        if index >= self.quiz.question_count() || index == self.current {
            return Mutation::Unchanged;
        }
        self.current = index;
        Mutation::Applied
    }

    pub fn next(&mut self) -> Mutation {
        self.go_to(self.current.saturating_add(1))
    }

    pub fn previous(&mut self) -> Mutation {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index),
            None if self.is_completed() => Mutation::Ignored,
            None => Mutation::Unchanged,
        }
    }

    /// Advance the countdown by one second, auto-submitting when it hits zero.
    pub fn tick(&mut self, at: DateTime<Utc>) -> TickOutcome {
        if self.is_completed() {
            return TickOutcome::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return TickOutcome::Expired(self.complete(SubmissionKind::Expired, at));
        }
        TickOutcome::Counted {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Complete the attempt and score it; repeated calls return the first result.
    pub fn submit(&mut self, at: DateTime<Utc>) -> SubmitOutcome {
        if let Some(completion) = self.completion {
            return SubmitOutcome::AlreadyCompleted(completion.result);
        }
        SubmitOutcome::Scored(self.complete(SubmissionKind::Manual, at))
    }

    fn complete(&mut self, kind: SubmissionKind, at: DateTime<Utc>) -> AttemptResult {
        let result = AttemptResult::score(&self.quiz, &self.answers);
        self.completion = Some(Completion {
            result,
            kind,
            completed_at: at,
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::{QuestionId, QuizId};
    use crate::model::quiz::QuestionDef;
    use crate::time::fixed_now;

    fn question(id: u64, correct: usize) -> QuestionDef {
        QuestionDef::new(
            QuestionId::new(id),
            format!("Question {id}"),
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct,
            None,
        )
        .unwrap()
    }

    fn quiz(correct: &[usize], minutes: u32) -> Arc<QuizDef> {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, c)| question(i as u64 + 1, *c))
            .collect();
        Arc::new(QuizDef::new(
            QuizId::new(1),
            "Quiz",
            "Subject",
            minutes,
            questions,
            fixed_now(),
        ))
    }

    #[test]
    fn start_seeds_countdown_from_time_limit() {
        let state = AttemptState::start(quiz(&[1], 2), fixed_now()).unwrap();
        assert_eq!(state.remaining_secs(), 120);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.answered_count(), 0);
        assert_eq!(state.phase(), AttemptPhase::InProgress);
    }

    #[test]
    fn start_rejects_empty_quiz() {
        let err = AttemptState::start(quiz(&[], 5), fixed_now()).unwrap_err();
        assert_eq!(err, AttemptError::InvalidQuiz(QuizError::NoQuestions));
    }

    #[test]
    fn start_rejects_zero_time_limit() {
        let err = AttemptState::start(quiz(&[0], 0), fixed_now()).unwrap_err();
        assert_eq!(err, AttemptError::InvalidQuiz(QuizError::InvalidTimeLimit));
    }

    #[test]
    fn latest_selection_wins() {
        let mut state = AttemptState::start(quiz(&[1, 2], 1), fixed_now()).unwrap();
        assert_eq!(state.select_answer(0, 3), Ok(Mutation::Applied));
        assert_eq!(state.select_answer(0, 3), Ok(Mutation::Unchanged));
        assert_eq!(state.select_answer(0, 1), Ok(Mutation::Applied));
        assert_eq!(state.answer(0), Some(1));
        assert_eq!(state.answered_count(), 1);
    }

    #[test]
    fn out_of_range_selection_leaves_state_untouched() {
        let mut state = AttemptState::start(quiz(&[1], 1), fixed_now()).unwrap();
        state.select_answer(0, 2).unwrap();

        let err = state.select_answer(0, 4).unwrap_err();
        assert_eq!(err, AttemptError::OutOfRangeSelection { question: 0, option: 4 });
        let err = state.select_answer(1, 0).unwrap_err();
        assert_eq!(err, AttemptError::OutOfRangeSelection { question: 1, option: 0 });
        assert_eq!(state.answer(0), Some(2));
        assert_eq!(state.answered_count(), 1);
    }

    #[test]
    fn navigation_allows_skipping_and_ignores_invalid_targets() {
        let mut state = AttemptState::start(quiz(&[0, 0, 0], 1), fixed_now()).unwrap();
        assert_eq!(state.go_to(2), Mutation::Applied);
        assert_eq!(state.next(), Mutation::Unchanged);
        assert_eq!(state.go_to(3), Mutation::Unchanged);
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.previous(), Mutation::Applied);
        assert_eq!(state.current_index(), 1);
        state.go_to(0);
        assert_eq!(state.previous(), Mutation::Unchanged);
    }

    #[test]
    fn tick_counts_down_and_expires_exactly_once() {
        let mut state = AttemptState::start(quiz(&[1], 1), fixed_now()).unwrap();
        let mut last = state.remaining_secs();
        let mut expirations = 0;
        for _ in 0..65 {
            match state.tick(fixed_now()) {
                TickOutcome::Counted { remaining_secs } => {
                    assert_eq!(remaining_secs, last - 1);
                    last = remaining_secs;
                }
                TickOutcome::Expired(_) => expirations += 1,
                TickOutcome::Ignored => {}
            }
            assert!(state.remaining_secs() <= last);
        }
        assert_eq!(expirations, 1);
        assert_eq!(state.remaining_secs(), 0);
        assert_eq!(state.submission_kind(), Some(SubmissionKind::Expired));
    }

    #[test]
    fn submit_is_idempotent() {
        let mut state = AttemptState::start(quiz(&[1, 0], 1), fixed_now()).unwrap();
        state.select_answer(0, 1).unwrap();

        let first = state.submit(fixed_now());
        assert!(matches!(first, SubmitOutcome::Scored(_)));

        // A late selection must not leak into a rescoring pass.
        assert_eq!(state.select_answer(1, 0), Ok(Mutation::Ignored));
        let second = state.submit(fixed_now());
        assert!(matches!(second, SubmitOutcome::AlreadyCompleted(_)));
        assert_eq!(first.result(), second.result());
        assert_eq!(second.result().correct_count(), 1);
    }

    #[test]
    fn completed_attempt_is_frozen() {
        let mut state = AttemptState::start(quiz(&[1, 0, 2], 1), fixed_now()).unwrap();
        state.select_answer(0, 1).unwrap();
        state.go_to(1);
        state.submit(fixed_now());

        assert_eq!(state.select_answer(0, 2), Ok(Mutation::Ignored));
        assert_eq!(state.select_answer(9, 9), Ok(Mutation::Ignored));
        assert_eq!(state.go_to(2), Mutation::Ignored);
        assert_eq!(state.previous(), Mutation::Ignored);
        assert_eq!(state.tick(fixed_now()), TickOutcome::Ignored);
        assert_eq!(state.answer(0), Some(1));
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.remaining_secs(), 60);
    }

    #[test]
    fn single_question_answered_correctly_scores_full_marks() {
        let mut state = AttemptState::start(quiz(&[1], 1), fixed_now()).unwrap();
        state.select_answer(0, 1).unwrap();
        let result = state.submit(fixed_now()).result();
        assert_eq!(result, AttemptResult::from_counts(1, 1, 1).unwrap());
        assert_eq!(result.score_percent(), 100);
        assert_eq!(result.incorrect_count(), 0);
    }

    #[test]
    fn unanswered_expiry_scores_zero() {
        let mut state = AttemptState::start(quiz(&[1], 1), fixed_now()).unwrap();
        let mut expired = None;
        while expired.is_none() {
            if let TickOutcome::Expired(result) = state.tick(fixed_now()) {
                expired = Some(result);
            }
        }
        let result = expired.unwrap();
        assert_eq!(result.score_percent(), 0);
        assert_eq!(result.answered_count(), 0);
        assert_eq!(result.correct_count(), 0);
        assert_eq!(result.incorrect_count(), 1);
    }

    #[test]
    fn partially_answered_quiz_counts_skips_as_incorrect() {
        let mut state = AttemptState::start(quiz(&[0, 1, 2, 3], 10), fixed_now()).unwrap();
        state.select_answer(0, 0).unwrap();
        state.select_answer(1, 0).unwrap();
        state.select_answer(2, 2).unwrap();

        let result = state.submit(fixed_now()).result();
        assert_eq!(result.score_percent(), 50);
        assert_eq!(result.answered_count(), 3);
        assert_eq!(result.correct_count(), 2);
        assert_eq!(result.incorrect_count(), 2);
    }

    #[test]
    fn score_rounds_half_up() {
        assert_eq!(score_percent(2, 3), 67);
        assert_eq!(score_percent(1, 3), 33);
        assert_eq!(score_percent(1, 8), 13);
        assert_eq!(score_percent(1, 200), 1);
        assert_eq!(score_percent(0, 7), 0);
        assert_eq!(score_percent(7, 7), 100);
        assert_eq!(score_percent(0, 0), 0);
    }

    #[test]
    fn from_counts_rejects_inconsistent_totals() {
        assert!(AttemptResult::from_counts(0, 0, 0).is_err());
        assert!(AttemptResult::from_counts(5, 6, 1).is_err());
        assert!(AttemptResult::from_counts(5, 2, 3).is_err());
        let result = AttemptResult::from_counts(20, 18, 17).unwrap();
        assert_eq!(result.score_percent(), 85);
        assert_eq!(result.incorrect_count(), 3);
    }
}
