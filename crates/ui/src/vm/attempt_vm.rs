use quiz_core::model::{AttemptResult, QuizDef, SubmissionKind};
use services::AttemptSnapshot;

/// Countdown at or below this many seconds is rendered as urgent.
pub const LOW_TIME_SECS: u32 = 60;

/// User actions on the take-quiz page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptIntent {
    Select(usize),
    GoTo(usize),
    Next,
    Previous,
    RequestSubmit,
    CancelSubmit,
    ConfirmSubmit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// One button in the question palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntryVm {
    pub index: usize,
    pub number: usize,
    pub current: bool,
    pub answered: bool,
}

impl PaletteEntryVm {
    #[must_use]
    pub fn class(self) -> &'static str {
        if self.current {
            "palette-item current"
        } else if self.answered {
            "palette-item answered"
        } else {
            "palette-item"
        }
    }
}

/// Everything the in-progress page renders for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptVm {
    pub quiz_title: String,
    pub subject: String,
    pub position_label: String,
    pub progress_percent: u32,
    pub countdown: String,
    pub low_time: bool,
    pub question_index: usize,
    pub question_text: String,
    pub options: Vec<OptionVm>,
    pub palette: Vec<PaletteEntryVm>,
    pub can_go_back: bool,
    pub is_last: bool,
    pub answered_count: usize,
}

impl AttemptVm {
    #[must_use]
    pub fn new(quiz: &QuizDef, snapshot: &AttemptSnapshot) -> Self {
        let index = snapshot.current_index;
        let total = snapshot.question_count.max(1);
        let question = quiz.question(index);
        let selected = snapshot.selected(index);

        let options = question
            .map(|q| {
                q.options()
                    .iter()
                    .enumerate()
                    .map(|(i, label)| OptionVm {
                        index: i,
                        label: label.clone(),
                        selected: selected == Some(i),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let palette = (0..snapshot.question_count)
            .map(|i| PaletteEntryVm {
                index: i,
                number: i + 1,
                current: i == index,
                answered: snapshot.selected(i).is_some(),
            })
            .collect();

        let progress_percent = u32::try_from((index + 1) * 100 / total).unwrap_or(100);

        Self {
            quiz_title: quiz.title().to_owned(),
            subject: quiz.subject().to_owned(),
            position_label: format!("Question {} of {}", index + 1, snapshot.question_count),
            progress_percent,
            countdown: snapshot.countdown(),
            low_time: snapshot.remaining_secs <= LOW_TIME_SECS,
            question_index: index,
            question_text: question.map(|q| q.text().to_owned()).unwrap_or_default(),
            options,
            palette,
            can_go_back: index > 0,
            is_last: snapshot.is_last_question(),
            answered_count: snapshot.answered_count(),
        }
    }
}

/// Completion card shown once an attempt is scored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub quiz_title: String,
    pub score_label: String,
    pub answered: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub headline: &'static str,
}

impl ResultVm {
    #[must_use]
    pub fn new(quiz_title: &str, result: AttemptResult, submission: Option<SubmissionKind>) -> Self {
        let headline = match submission {
            Some(SubmissionKind::Expired) => "Time's up! Your quiz was submitted automatically.",
            _ => "Quiz Completed!",
        };
        Self {
            quiz_title: quiz_title.to_owned(),
            score_label: format!("{}%", result.score_percent()),
            answered: result.answered_count(),
            correct: result.correct_count(),
            incorrect: result.incorrect_count(),
            headline,
        }
    }
}
