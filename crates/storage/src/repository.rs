use async_trait::async_trait;
use quiz_core::model::{
    AttemptId, AttemptRecord, ClassId, ClassInfo, QuestionId, QuizDef, QuizId, StoredAttempt,
    Student, StudentId,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

use crate::fixtures::Fixture;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Read-only view of the quiz catalog, as consumed by attempts.
#[async_trait]
pub trait QuizCatalog: Send + Sync {
    /// Fetch a quiz by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_quiz(&self, id: QuizId) -> Result<QuizDef, StorageError>;

    /// List quizzes ordered by ID, optionally only the active ones.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_quizzes(&self, active_only: bool) -> Result<Vec<QuizDef>, StorageError>;
}

/// Write side of the catalog, used by quiz authoring only.
#[async_trait]
pub trait QuizRepository: QuizCatalog {
    /// Reserve a quiz ID and a run of `question_count` question IDs.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if IDs cannot be allocated.
    async fn reserve_ids(&self, question_count: usize)
    -> Result<(QuizId, QuestionId), StorageError>;

    /// Persist or replace a quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the quiz cannot be stored.
    async fn upsert_quiz(&self, quiz: &QuizDef) -> Result<(), StorageError>;
}

/// Result sink for completed attempts.
#[async_trait]
pub trait AttemptRecordRepository: Send + Sync {
    /// Append a completed attempt and return its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_attempt(&self, record: &AttemptRecord) -> Result<AttemptId, StorageError>;

    /// List stored attempts, oldest ID first, optionally for one student.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if attempts cannot be read.
    async fn list_attempts(
        &self,
        student_id: Option<StudentId>,
    ) -> Result<Vec<StoredAttempt>, StorageError>;
}

#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if classes cannot be read.
    async fn list_classes(&self) -> Result<Vec<ClassInfo>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing.
    async fn get_class(&self, id: ClassId) -> Result<ClassInfo, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the ID cannot be allocated.
    async fn next_class_id(&self) -> Result<ClassId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the class cannot be stored.
    async fn upsert_class(&self, class: &ClassInfo) -> Result<(), StorageError>;

    /// List students, optionally restricted to one class, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if students cannot be read.
    async fn list_students(&self, class_id: Option<ClassId>) -> Result<Vec<Student>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing.
    async fn get_student(&self, id: StudentId) -> Result<Student, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the ID cannot be allocated.
    async fn next_student_id(&self) -> Result<StudentId, StorageError>;

    /// Insert a new student.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the ID or USN is already taken.
    async fn insert_student(&self, student: &Student) -> Result<(), StorageError>;
}

#[derive(Default)]
struct Tables {
    quizzes: BTreeMap<QuizId, QuizDef>,
    last_quiz_id: u64,
    last_question_id: u64,
    attempts: BTreeMap<AttemptId, AttemptRecord>,
    classes: BTreeMap<ClassId, ClassInfo>,
    students: BTreeMap<StudentId, Student>,
}

/// In-memory backend seeded from a fixture; contents live as long as the process.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_fixture(fixture: Fixture) -> Self {
        let mut tables = Tables::default();
        for quiz in fixture.quizzes {
            let max_question = quiz
                .questions()
                .iter()
                .map(|q| q.id().value())
                .max()
                .unwrap_or(0);
            tables.last_question_id = tables.last_question_id.max(max_question);
            tables.last_quiz_id = tables.last_quiz_id.max(quiz.id().value());
            tables.quizzes.insert(quiz.id(), quiz);
        }
        for class in fixture.classes {
            tables.classes.insert(class.id(), class);
        }
        for student in fixture.students {
            tables.students.insert(student.id(), student);
        }
        for stored in fixture.attempts {
            tables.attempts.insert(stored.id, stored.record);
        }
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StorageError> {
        self.tables
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

fn next_key<K: Copy, V>(map: &BTreeMap<K, V>, value: impl Fn(&K) -> u64) -> u64 {
    map.keys().next_back().map_or(1, |k| value(k).saturating_add(1))
}

#[async_trait]
impl QuizCatalog for InMemoryRepository {
    async fn get_quiz(&self, id: QuizId) -> Result<QuizDef, StorageError> {
        let guard = self.lock()?;
        guard.quizzes.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn list_quizzes(&self, active_only: bool) -> Result<Vec<QuizDef>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .quizzes
            .values()
            .filter(|quiz| !active_only || quiz.is_active())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn reserve_ids(
        &self,
        question_count: usize,
    ) -> Result<(QuizId, QuestionId), StorageError> {
        let mut guard = self.lock()?;
        guard.last_quiz_id = guard.last_quiz_id.saturating_add(1);
        let first_question = guard.last_question_id.saturating_add(1);
        let count = u64::try_from(question_count).unwrap_or(u64::MAX);
        guard.last_question_id = guard.last_question_id.saturating_add(count);
        Ok((QuizId::new(guard.last_quiz_id), QuestionId::new(first_question)))
    }

    async fn upsert_quiz(&self, quiz: &QuizDef) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.last_quiz_id = guard.last_quiz_id.max(quiz.id().value());
        guard.quizzes.insert(quiz.id(), quiz.clone());
        Ok(())
    }
}

#[async_trait]
impl AttemptRecordRepository for InMemoryRepository {
    async fn append_attempt(&self, record: &AttemptRecord) -> Result<AttemptId, StorageError> {
        let mut guard = self.lock()?;
        let id = AttemptId::new(next_key(&guard.attempts, AttemptId::value));
        guard.attempts.insert(id, record.clone());
        Ok(id)
    }

    async fn list_attempts(
        &self,
        student_id: Option<StudentId>,
    ) -> Result<Vec<StoredAttempt>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .attempts
            .iter()
            .filter(|(_, record)| student_id.is_none_or(|id| record.student_id == id))
            .map(|(id, record)| StoredAttempt {
                id: *id,
                record: record.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl RosterRepository for InMemoryRepository {
    async fn list_classes(&self) -> Result<Vec<ClassInfo>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.classes.values().cloned().collect())
    }

    async fn get_class(&self, id: ClassId) -> Result<ClassInfo, StorageError> {
        let guard = self.lock()?;
        guard.classes.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn next_class_id(&self) -> Result<ClassId, StorageError> {
        let guard = self.lock()?;
        Ok(ClassId::new(next_key(&guard.classes, ClassId::value)))
    }

    async fn upsert_class(&self, class: &ClassInfo) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.classes.insert(class.id(), class.clone());
        Ok(())
    }

    async fn list_students(&self, class_id: Option<ClassId>) -> Result<Vec<Student>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .students
            .values()
            .filter(|s| class_id.is_none_or(|id| s.class_id() == id))
            .cloned()
            .collect())
    }

    async fn get_student(&self, id: StudentId) -> Result<Student, StorageError> {
        let guard = self.lock()?;
        guard.students.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn next_student_id(&self) -> Result<StudentId, StorageError> {
        let guard = self.lock()?;
        Ok(StudentId::new(next_key(&guard.students, StudentId::value)))
    }

    async fn insert_student(&self, student: &Student) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if guard.students.contains_key(&student.id()) {
            return Err(StorageError::Conflict(format!("student id {}", student.id())));
        }
        if guard.students.values().any(|s| s.usn() == student.usn()) {
            return Err(StorageError::Conflict(format!("usn {}", student.usn())));
        }
        guard.students.insert(student.id(), student.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuizRepository>,
    pub attempts: Arc<dyn AttemptRecordRepository>,
    pub roster: Arc<dyn RosterRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_repository(repo: InMemoryRepository) -> Self {
        let quizzes: Arc<dyn QuizRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRecordRepository> = Arc::new(repo.clone());
        let roster: Arc<dyn RosterRepository> = Arc::new(repo);
        Self {
            quizzes,
            attempts,
            roster,
        }
    }

    /// The catalog as a read-only handle.
    #[must_use]
    pub fn catalog(&self) -> Arc<dyn QuizCatalog> {
        Arc::new(CatalogView(Arc::clone(&self.quizzes)))
    }
}

struct CatalogView(Arc<dyn QuizRepository>);

#[async_trait]
impl QuizCatalog for CatalogView {
    async fn get_quiz(&self, id: QuizId) -> Result<QuizDef, StorageError> {
        self.0.get_quiz(id).await
    }

    async fn list_quizzes(&self, active_only: bool) -> Result<Vec<QuizDef>, StorageError> {
        self.0.list_quizzes(active_only).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AttemptResult, QuestionDef, SubmissionKind};
    use quiz_core::time::fixed_now;

    fn build_quiz(id: u64, active: bool) -> QuizDef {
        let question = QuestionDef::new(
            QuestionId::new(id * 10),
            "Q",
            vec!["a".into(), "b".into()],
            0,
            None,
        )
        .unwrap();
        QuizDef::new(QuizId::new(id), format!("Quiz {id}"), "S", 5, vec![question], fixed_now())
            .with_active(active)
    }

    fn record(student: u64) -> AttemptRecord {
        AttemptRecord {
            quiz_id: QuizId::new(1),
            student_id: StudentId::new(student),
            result: AttemptResult::from_counts(2, 2, 1).unwrap(),
            time_spent_secs: 42,
            submission: SubmissionKind::Manual,
            completed_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn catalog_lists_active_quizzes_only_when_asked() {
        let repo = InMemoryRepository::new();
        repo.upsert_quiz(&build_quiz(1, true)).await.unwrap();
        repo.upsert_quiz(&build_quiz(2, false)).await.unwrap();

        assert_eq!(repo.list_quizzes(true).await.unwrap().len(), 1);
        assert_eq!(repo.list_quizzes(false).await.unwrap().len(), 2);
        assert!(matches!(
            repo.get_quiz(QuizId::new(3)).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn reserved_ids_follow_existing_catalog() {
        let repo = InMemoryRepository::from_fixture(Fixture {
            quizzes: vec![build_quiz(4, true)],
            ..Fixture::default()
        });
        let (quiz_id, first_question) = repo.reserve_ids(3).await.unwrap();
        assert_eq!(quiz_id, QuizId::new(5));
        assert_eq!(first_question, QuestionId::new(41));

        let (_, next_question) = repo.reserve_ids(1).await.unwrap();
        assert_eq!(next_question, QuestionId::new(44));
    }

    #[tokio::test]
    async fn attempts_are_numbered_and_filtered_by_student() {
        let repo = InMemoryRepository::new();
        let first = repo.append_attempt(&record(1)).await.unwrap();
        let second = repo.append_attempt(&record(2)).await.unwrap();
        assert_eq!(first, AttemptId::new(1));
        assert_eq!(second, AttemptId::new(2));

        let mine = repo.list_attempts(Some(StudentId::new(2))).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, second);
        assert_eq!(repo.list_attempts(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_usn_is_a_conflict() {
        let repo = InMemoryRepository::new();
        let class = ClassInfo::new(ClassId::new(1), "IS", "").unwrap();
        repo.upsert_class(&class).await.unwrap();
        let a = Student::new(StudentId::new(1), "CS1", "A", "a@u.edu", class.id()).unwrap();
        let b = Student::new(StudentId::new(2), "cs1", "B", "b@u.edu", class.id()).unwrap();
        repo.insert_student(&a).await.unwrap();

        let err = repo.insert_student(&b).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
        assert_eq!(repo.next_student_id().await.unwrap(), StudentId::new(2));
    }

    #[tokio::test]
    async fn catalog_view_reads_through_storage() {
        let storage = Storage::in_memory();
        storage.quizzes.upsert_quiz(&build_quiz(1, true)).await.unwrap();
        let catalog = storage.catalog();
        assert_eq!(catalog.get_quiz(QuizId::new(1)).await.unwrap().title(), "Quiz 1");
    }
}
