use quiz_core::model::{AttemptHistoryRow, StudentAnalytics};

use crate::vm::time_fmt::{format_date, format_duration};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub quiz_title: String,
    pub score_label: String,
    pub grade_class: &'static str,
    pub time_spent: String,
    pub completed_on: String,
}

impl From<&AttemptHistoryRow> for HistoryRowVm {
    fn from(row: &AttemptHistoryRow) -> Self {
        Self {
            quiz_title: row.quiz_title.clone(),
            score_label: format!("{}%", row.score_percent),
            grade_class: grade_class(row.score_percent),
            time_spent: format_duration(u64::from(row.time_spent_secs)),
            completed_on: format_date(row.completed_at),
        }
    }
}

/// A bar in the score chart; `height_percent` equals the score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreBarVm {
    pub label: String,
    pub height_percent: u8,
}

/// Dashboard figures, formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsVm {
    pub average_label: String,
    pub best_label: String,
    pub quizzes_taken: usize,
    pub time_spent: String,
    pub history: Vec<HistoryRowVm>,
    pub score_bars: Vec<ScoreBarVm>,
    pub trend_label: &'static str,
    /// `(correct %, incorrect %)`, absent until the first attempt.
    pub split: Option<(u8, u8)>,
}

impl AnalyticsVm {
    #[must_use]
    pub fn new(analytics: &StudentAnalytics) -> Self {
        let history: Vec<HistoryRowVm> = analytics.history.iter().map(HistoryRowVm::from).collect();
        let score_bars = analytics
            .history
            .iter()
            .map(|row| ScoreBarVm {
                label: row.quiz_title.clone(),
                height_percent: row.score_percent.min(100),
            })
            .collect();

        Self {
            average_label: if history.is_empty() {
                "--".to_owned()
            } else {
                format!("{:.1}%", analytics.average_score)
            },
            best_label: analytics
                .best_score
                .map_or_else(|| "--".to_owned(), |best| format!("{best}%")),
            quizzes_taken: analytics.total_quizzes(),
            time_spent: format_duration(analytics.total_time_spent_secs),
            history,
            score_bars,
            trend_label: trend_label(&analytics.score_trend()),
            split: analytics
                .performance
                .map(|split| (split.correct_percent, split.incorrect_percent)),
        }
    }
}

fn grade_class(score: u8) -> &'static str {
    match score {
        90.. => "score excellent",
        75..=89 => "score good",
        _ => "score low",
    }
}

fn trend_label(scores: &[u8]) -> &'static str {
    match scores {
        [] | [_] => "Not enough attempts yet",
        [.., before, last] if last > before => "Improving",
        [.., before, last] if last < before => "Declining",
        _ => "Steady",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AttemptId, PerformanceSplit, QuizId, StudentId};
    use quiz_core::time::fixed_now;

    fn row(title: &str, score: u8) -> AttemptHistoryRow {
        AttemptHistoryRow {
            attempt_id: AttemptId::new(1),
            quiz_id: QuizId::new(1),
            quiz_title: title.into(),
            score_percent: score,
            total_questions: 10,
            time_spent_secs: 1500,
            completed_at: fixed_now(),
        }
    }

    #[test]
    fn formats_seeded_dashboard() {
        let analytics = StudentAnalytics {
            student_id: StudentId::new(1),
            history: vec![row("Algorithms", 85), row("Security", 92)],
            average_score: 88.5,
            best_score: Some(92),
            total_time_spent_secs: 3900,
            performance: PerformanceSplit::from_counts(40, 5),
        };
        let vm = AnalyticsVm::new(&analytics);

        assert_eq!(vm.average_label, "88.5%");
        assert_eq!(vm.best_label, "92%");
        assert_eq!(vm.time_spent, "1h 5m");
        assert_eq!(vm.trend_label, "Improving");
        assert_eq!(vm.split, Some((89, 11)));
        assert_eq!(vm.history[0].grade_class, "score good");
        assert_eq!(vm.history[1].grade_class, "score excellent");
        assert_eq!(vm.history[0].time_spent, "25 min");
    }

    #[test]
    fn empty_history_shows_placeholders() {
        let analytics = StudentAnalytics {
            student_id: StudentId::new(5),
            history: Vec::new(),
            average_score: 0.0,
            best_score: None,
            total_time_spent_secs: 0,
            performance: None,
        };
        let vm = AnalyticsVm::new(&analytics);
        assert_eq!(vm.average_label, "--");
        assert_eq!(vm.best_label, "--");
        assert_eq!(vm.split, None);
        assert_eq!(vm.trend_label, "Not enough attempts yet");
    }
}
