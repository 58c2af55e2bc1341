//! Demo data the portal ships with: classes, students, two quizzes and a short
//! attempt history for the analytics dashboards.

use chrono::{DateTime, TimeZone, Utc};
use quiz_core::model::{
    AttemptError, AttemptId, AttemptRecord, AttemptResult, ClassId, ClassInfo, QuestionDef,
    QuestionId, QuizDef, QuizError, QuizId, RosterError, StoredAttempt, Student, StudentId,
    SubmissionKind,
};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FixtureError {
    #[error("invalid fixture date {0}")]
    InvalidDate(&'static str),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
}

/// Seed content for an in-memory repository.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub quizzes: Vec<QuizDef>,
    pub classes: Vec<ClassInfo>,
    pub students: Vec<Student>,
    pub attempts: Vec<StoredAttempt>,
}

fn date(raw: &'static str, y: i32, m: u32, d: u32) -> Result<DateTime<Utc>, FixtureError> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0)
        .single()
        .ok_or(FixtureError::InvalidDate(raw))
}

fn options(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

/// Build the demo fixture.
///
/// # Errors
///
/// Returns `FixtureError` if any seed entity fails domain validation.
pub fn demo_fixture() -> Result<Fixture, FixtureError> {
    let classes = vec![
        ClassInfo::new(ClassId::new(1), "Information Science", "Core computer science concepts")?,
        ClassInfo::new(ClassId::new(2), "Cybersecurity", "Network and system security")?,
        ClassInfo::new(ClassId::new(3), "Data Structures", "Algorithms and data organization")?,
        ClassInfo::new(ClassId::new(4), "Machine Learning", "AI and ML fundamentals")?,
    ];

    let students = vec![
        Student::new(StudentId::new(1), "CS21001", "Alex Johnson", "alex.johnson@university.edu", ClassId::new(1))?,
        Student::new(StudentId::new(2), "CS21002", "Sarah Davis", "sarah.davis@university.edu", ClassId::new(1))?,
        Student::new(StudentId::new(3), "CS21003", "Michael Brown", "michael.brown@university.edu", ClassId::new(1))?,
        Student::new(StudentId::new(4), "CS21004", "Emily Wilson", "emily.wilson@university.edu", ClassId::new(2))?,
        Student::new(StudentId::new(5), "CS21005", "David Lee", "david.lee@university.edu", ClassId::new(2))?,
    ];

    let algorithms = QuizDef::new(
        QuizId::new(1),
        "Introduction to Algorithms",
        "Data Structures",
        30,
        vec![QuestionDef::new(
            QuestionId::new(1),
            "What is the time complexity of binary search?",
            options(&["O(n)", "O(log n)", "O(n²)", "O(1)"]),
            1,
            Some("Binary search divides the search space in half with each comparison.".into()),
        )?],
        date("2024-01-15", 2024, 1, 15)?,
    );
    let security = QuizDef::new(
        QuizId::new(2),
        "Network Security Basics",
        "Cybersecurity",
        45,
        vec![QuestionDef::new(
            QuestionId::new(2),
            "What does SSL stand for?",
            options(&[
                "Secure Socket Layer",
                "System Security Level",
                "Safe Server Link",
                "Secure System Login",
            ]),
            0,
            Some("SSL stands for Secure Socket Layer, a protocol for secure communications.".into()),
        )?],
        date("2024-01-20", 2024, 1, 20)?,
    );

    // (id, quiz, student, total, answered, correct, minutes spent, day)
    let history: [(u64, u64, u64, u32, u32, u32, u32, (&'static str, u32)); 3] = [
        (1, 1, 1, 20, 20, 17, 25, ("2024-01-16", 16)),
        (2, 2, 1, 25, 24, 23, 40, ("2024-01-21", 21)),
        (3, 1, 2, 50, 46, 39, 28, ("2024-01-17", 17)),
    ];
    let mut attempts = Vec::with_capacity(history.len());
    for (id, quiz, student, total, answered, correct, minutes, (raw, day)) in history {
        attempts.push(StoredAttempt {
            id: AttemptId::new(id),
            record: AttemptRecord {
                quiz_id: QuizId::new(quiz),
                student_id: StudentId::new(student),
                result: AttemptResult::from_counts(total, answered, correct)?,
                time_spent_secs: minutes * 60,
                submission: SubmissionKind::Manual,
                completed_at: date(raw, 2024, 1, day)?,
            },
        });
    }

    Ok(Fixture {
        quizzes: vec![algorithms, security],
        classes,
        students,
        attempts,
    })
}
