use quiz_core::model::{
    AttemptRecord, AttemptResult, ClassId, QuestionDraft, QuizDraft, QuizId, StudentId,
    SubmissionKind,
};
use quiz_core::time::fixed_now;
use storage::fixtures::demo_fixture;
use storage::repository::{
    AttemptRecordRepository, InMemoryRepository, QuizCatalog, QuizRepository, RosterRepository,
    Storage,
};

fn seeded() -> Storage {
    Storage::from_repository(InMemoryRepository::from_fixture(demo_fixture().unwrap()))
}

#[tokio::test]
async fn seeded_storage_serves_catalog_roster_and_history() {
    let storage = seeded();

    let quizzes = storage.catalog().list_quizzes(true).await.unwrap();
    let titles: Vec<&str> = quizzes.iter().map(|q| q.title()).collect();
    assert_eq!(titles, vec!["Introduction to Algorithms", "Network Security Basics"]);

    let info_science = storage.roster.list_students(Some(ClassId::new(1))).await.unwrap();
    assert_eq!(info_science.len(), 3);

    let alex = storage.attempts.list_attempts(Some(StudentId::new(1))).await.unwrap();
    assert_eq!(alex.len(), 2);
}

#[tokio::test]
async fn new_records_and_quizzes_do_not_collide_with_seed_ids() {
    let storage = seeded();

    let id = storage
        .attempts
        .append_attempt(&AttemptRecord {
            quiz_id: QuizId::new(1),
            student_id: StudentId::new(3),
            result: AttemptResult::from_counts(1, 1, 1).unwrap(),
            time_spent_secs: 30,
            submission: SubmissionKind::Expired,
            completed_at: fixed_now(),
        })
        .await
        .unwrap();
    assert_eq!(id.value(), 4);

    let draft = QuizDraft {
        title: "Graphs".into(),
        subject: "Data Structures".into(),
        time_limit_minutes: 10,
        questions: vec![QuestionDraft {
            text: "BFS uses which structure?".into(),
            options: vec!["Stack".into(), "Queue".into()],
            correct_option: 1,
            explanation: None,
        }],
    };
    let (quiz_id, question_id) = storage.quizzes.reserve_ids(draft.questions.len()).await.unwrap();
    assert_eq!(quiz_id, QuizId::new(3));
    assert_eq!(question_id.value(), 3);

    let quiz = draft.validate(quiz_id, question_id, fixed_now()).unwrap();
    storage.quizzes.upsert_quiz(&quiz).await.unwrap();
    assert_eq!(storage.catalog().list_quizzes(true).await.unwrap().len(), 3);
}
