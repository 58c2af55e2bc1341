use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuestionId, QuizId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz subject cannot be empty")]
    EmptySubject,

    #[error("time limit must be > 0 minutes")]
    InvalidTimeLimit,

    #[error("quiz must contain at least one question")]
    NoQuestions,

    #[error("question text cannot be empty")]
    EmptyQuestionText,

    #[error("question needs at least {min} options, got {got}")]
    TooFewOptions { min: usize, got: usize },

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct option {index} is out of range for {len} options")]
    CorrectOptionOutOfRange { index: usize, len: usize },
}

/// Fewest options a multiple-choice question may offer.
pub const MIN_OPTIONS: usize = 2;

/// Default time limit offered by the authoring form.
pub const DEFAULT_TIME_LIMIT_MINUTES: u32 = 30;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDef {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    correct_option: usize,
    explanation: Option<String>,
}

impl QuestionDef {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the text or any option is blank, fewer than
    /// [`MIN_OPTIONS`] options are given, or `correct_option` is out of range.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        correct_option: usize,
        explanation: Option<String>,
    ) -> Result<Self, QuizError> {
        let text = text.into().trim().to_owned();
        if text.is_empty() {
            return Err(QuizError::EmptyQuestionText);
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuizError::TooFewOptions {
                min: MIN_OPTIONS,
                got: options.len(),
            });
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuizError::EmptyOption { index });
        }
        if correct_option >= options.len() {
            return Err(QuizError::CorrectOptionOutOfRange {
                index: correct_option,
                len: options.len(),
            });
        }
        let explanation = explanation
            .map(|e| e.trim().to_owned())
            .filter(|e| !e.is_empty());

        Ok(Self {
            id,
            text,
            options,
            correct_option,
            explanation,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// A quiz as published in the catalog.
///
/// Questions are individually validated, but an empty question list or a zero
/// time limit is representable; starting an attempt rejects both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDef {
    id: QuizId,
    title: String,
    subject: String,
    time_limit_minutes: u32,
    questions: Vec<QuestionDef>,
    created_at: DateTime<Utc>,
    is_active: bool,
}

impl QuizDef {
    #[must_use]
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        subject: impl Into<String>,
        time_limit_minutes: u32,
        questions: Vec<QuestionDef>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            subject: subject.into(),
            time_limit_minutes,
            questions,
            created_at,
            is_active: true,
        }
    }

    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_minutes
    }

    /// Time limit in seconds, saturating on overflow.
    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_minutes.saturating_mul(60)
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionDef] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&QuestionDef> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Editable question as entered on the authoring form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub explanation: Option<String>,
}

impl QuestionDraft {
    /// A blank question with four empty options, as the form starts with.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            options: vec![String::new(); 4],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_question(question: &QuestionDef) -> Self {
        Self {
            text: question.text().to_owned(),
            options: question.options().to_vec(),
            correct_option: question.correct_option(),
            explanation: question.explanation().map(str::to_owned),
        }
    }
}

/// Quiz under construction by an admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub subject: String,
    pub time_limit_minutes: u32,
    pub questions: Vec<QuestionDraft>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            subject: String::new(),
            time_limit_minutes: DEFAULT_TIME_LIMIT_MINUTES,
            questions: Vec::new(),
        }
    }
}

impl QuizDraft {
    /// Validate the draft into a publishable quiz.
    ///
    /// Question ids are allocated sequentially starting at `first_question_id`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` for a blank title or subject, a zero time limit, no
    /// questions, or the first invalid question.
    pub fn validate(
        &self,
        id: QuizId,
        first_question_id: QuestionId,
        created_at: DateTime<Utc>,
    ) -> Result<QuizDef, QuizError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(QuizError::EmptySubject);
        }
        if self.time_limit_minutes == 0 {
            return Err(QuizError::InvalidTimeLimit);
        }
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        let mut next_id = first_question_id;
        let mut questions = Vec::with_capacity(self.questions.len());
        for draft in &self.questions {
            questions.push(QuestionDef::new(
                next_id,
                draft.text.clone(),
                draft.options.clone(),
                draft.correct_option,
                draft.explanation.clone(),
            )?);
            next_id = next_id.next();
        }

        Ok(QuizDef::new(
            id,
            title,
            subject,
            self.time_limit_minutes,
            questions,
            created_at,
        ))
    }
}
