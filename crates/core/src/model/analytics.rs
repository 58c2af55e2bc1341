use chrono::{DateTime, Utc};

use crate::model::attempt::score_percent;
use crate::model::ids::{AttemptId, QuizId, StudentId};
use crate::model::record::StoredAttempt;

/// Correct vs incorrect share across every question a student has answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceSplit {
    pub correct: u32,
    pub incorrect: u32,
    pub correct_percent: u8,
    pub incorrect_percent: u8,
}

impl PerformanceSplit {
    /// Returns `None` when there is nothing to split.
    #[must_use]
    pub fn from_counts(correct: u32, incorrect: u32) -> Option<Self> {
        let total = correct.checked_add(incorrect)?;
        if total == 0 {
            return None;
        }
        let correct_percent = score_percent(correct, total);
        Some(Self {
            correct,
            incorrect,
            correct_percent,
            incorrect_percent: 100 - correct_percent,
        })
    }
}

/// One row of a student's attempt history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptHistoryRow {
    pub attempt_id: AttemptId,
    pub quiz_id: QuizId,
    pub quiz_title: String,
    pub score_percent: u8,
    pub total_questions: u32,
    pub time_spent_secs: u32,
    pub completed_at: DateTime<Utc>,
}

/// Dashboard figures for one student, derived from stored attempts only.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentAnalytics {
    pub student_id: StudentId,
    /// Oldest first.
    pub history: Vec<AttemptHistoryRow>,
    pub average_score: f64,
    pub best_score: Option<u8>,
    pub total_time_spent_secs: u64,
    pub performance: Option<PerformanceSplit>,
}

impl StudentAnalytics {
    /// Aggregate a student's attempts.
    ///
    /// `quiz_title` resolves titles for the history rows; unknown quizzes are
    /// labelled by id.
    #[must_use]
    pub fn from_attempts<F>(student_id: StudentId, attempts: &[StoredAttempt], quiz_title: F) -> Self
    where
        F: Fn(QuizId) -> Option<String>,
    {
        let mut own: Vec<&StoredAttempt> = attempts
            .iter()
            .filter(|a| a.record.student_id == student_id)
            .collect();
        own.sort_by_key(|a| (a.record.completed_at, a.id));

        let mut correct = 0_u32;
        let mut incorrect = 0_u32;
        let mut score_sum = 0_u64;
        let mut total_time_spent_secs = 0_u64;
        let mut history = Vec::with_capacity(own.len());

        for stored in own {
            let record = &stored.record;
            correct = correct.saturating_add(record.result.correct_count());
            incorrect = incorrect.saturating_add(record.result.incorrect_count());
            score_sum += u64::from(record.result.score_percent());
            total_time_spent_secs += u64::from(record.time_spent_secs);

            history.push(AttemptHistoryRow {
                attempt_id: stored.id,
                quiz_id: record.quiz_id,
                quiz_title: quiz_title(record.quiz_id)
                    .unwrap_or_else(|| format!("Quiz {}", record.quiz_id)),
                score_percent: record.result.score_percent(),
                total_questions: record.result.total_questions(),
                time_spent_secs: record.time_spent_secs,
                completed_at: record.completed_at,
            });
        }

        #[allow(clippy::cast_precision_loss)]
        let average_score = if history.is_empty() {
            0.0
        } else {
            score_sum as f64 / history.len() as f64
        };
        let best_score = history.iter().map(|row| row.score_percent).max();

        Self {
            student_id,
            history,
            average_score,
            best_score,
            total_time_spent_secs,
            performance: PerformanceSplit::from_counts(correct, incorrect),
        }
    }

    #[must_use]
    pub fn total_quizzes(&self) -> usize {
        self.history.len()
    }

    /// Scores in the order they were achieved.
    #[must_use]
    pub fn score_trend(&self) -> Vec<u8> {
        self.history.iter().map(|row| row.score_percent).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::model::attempt::{AttemptResult, SubmissionKind};
    use crate::model::record::AttemptRecord;
    use crate::time::fixed_now;

    fn stored(id: u64, student: u64, quiz: u64, counts: (u32, u32, u32), day: i64) -> StoredAttempt {
        StoredAttempt {
            id: AttemptId::new(id),
            record: AttemptRecord {
                quiz_id: QuizId::new(quiz),
                student_id: StudentId::new(student),
                result: AttemptResult::from_counts(counts.0, counts.1, counts.2).unwrap(),
                time_spent_secs: 600,
                submission: SubmissionKind::Manual,
                completed_at: fixed_now() + Duration::days(day),
            },
        }
    }

    #[test]
    fn split_is_computed_from_attempt_counts() {
        let attempts = vec![
            stored(1, 1, 1, (4, 4, 3), 0),
            stored(2, 1, 2, (4, 2, 1), 1),
            stored(3, 2, 1, (4, 4, 4), 2),
        ];
        let analytics = StudentAnalytics::from_attempts(StudentId::new(1), &attempts, |id| {
            (id == QuizId::new(1)).then(|| "Algorithms".to_owned())
        });

        assert_eq!(analytics.total_quizzes(), 2);
        let split = analytics.performance.unwrap();
        assert_eq!(split.correct, 4);
        assert_eq!(split.incorrect, 4);
        assert_eq!(split.correct_percent, 50);
        assert_eq!(split.incorrect_percent, 50);
        assert_eq!(analytics.history[0].quiz_title, "Algorithms");
        assert_eq!(analytics.history[1].quiz_title, "Quiz 2");
        assert_eq!(analytics.total_time_spent_secs, 1200);
    }

    #[test]
    fn trend_is_chronological_and_average_uses_scores() {
        let attempts = vec![stored(2, 1, 1, (4, 4, 2), 5), stored(1, 1, 1, (4, 4, 4), 1)];
        let analytics = StudentAnalytics::from_attempts(StudentId::new(1), &attempts, |_| None);
        assert_eq!(analytics.score_trend(), vec![100, 50]);
        assert_eq!(analytics.best_score, Some(100));
        assert!((analytics.average_score - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_attempts_yields_empty_dashboard() {
        let analytics = StudentAnalytics::from_attempts(StudentId::new(1), &[], |_| None);
        assert_eq!(analytics.total_quizzes(), 0);
        assert_eq!(analytics.best_score, None);
        assert_eq!(analytics.performance, None);
        assert!(analytics.average_score.abs() < f64::EPSILON);
    }

    #[test]
    fn split_rounds_and_complements() {
        let split = PerformanceSplit::from_counts(2, 1).unwrap();
        assert_eq!(split.correct_percent, 67);
        assert_eq!(split.incorrect_percent, 33);
        assert_eq!(PerformanceSplit::from_counts(0, 0), None);
    }
}
