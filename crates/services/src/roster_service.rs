use std::sync::Arc;

use quiz_core::model::{ClassId, ClassInfo, SessionContext, Student, StudentId};
use storage::repository::{RosterRepository, StorageError};

use crate::error::RosterServiceError;

/// A class together with how many students are enrolled in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSummary {
    pub class: ClassInfo,
    pub student_count: usize,
}

/// Fields entered on the add-student form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStudent {
    pub usn: String,
    pub name: String,
    pub email: String,
}

/// Class and student management for administrators.
#[derive(Clone)]
pub struct RosterService {
    roster: Arc<dyn RosterRepository>,
}

impl RosterService {
    #[must_use]
    pub fn new(roster: Arc<dyn RosterRepository>) -> Self {
        Self { roster }
    }

    /// # Errors
    ///
    /// Returns `RosterServiceError::Storage` if the roster cannot be read.
    pub async fn list_classes(&self) -> Result<Vec<ClassSummary>, RosterServiceError> {
        let classes = self.roster.list_classes().await?;
        let students = self.roster.list_students(None).await?;
        Ok(classes
            .into_iter()
            .map(|class| {
                let student_count = students.iter().filter(|s| s.class_id() == class.id()).count();
                ClassSummary {
                    class,
                    student_count,
                }
            })
            .collect())
    }

    /// The class and its students, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RosterServiceError::UnknownClass` if the class does not exist.
    pub async fn class_roster(
        &self,
        class_id: ClassId,
    ) -> Result<(ClassInfo, Vec<Student>), RosterServiceError> {
        let class = self.class(class_id).await?;
        let students = self.roster.list_students(Some(class_id)).await?;
        Ok((class, students))
    }

    /// # Errors
    ///
    /// Returns `RosterServiceError::Storage` if the student cannot be read.
    pub async fn student(
        &self,
        id: StudentId,
    ) -> Result<Option<Student>, RosterServiceError> {
        match self.roster.get_student(id).await {
            Ok(student) => Ok(Some(student)),
            Err(StorageError::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// # Errors
    ///
    /// Returns `Forbidden` for non-admins and `Roster` for a blank name.
    pub async fn add_class(
        &self,
        ctx: &SessionContext,
        name: &str,
        description: &str,
    ) -> Result<ClassInfo, RosterServiceError> {
        require_admin(ctx)?;
        let id = self.roster.next_class_id().await?;
        let class = ClassInfo::new(id, name, description)?;
        self.roster.upsert_class(&class).await?;
        tracing::info!(class_id = %id, name = class.name(), "class added");
        Ok(class)
    }

    /// Enrol a new student in `class_id`.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for non-admins, `UnknownClass` for a missing class,
    /// `Roster` for blank fields or a malformed email, and `DuplicateUsn` when
    /// the USN is already enrolled.
    pub async fn add_student(
        &self,
        ctx: &SessionContext,
        class_id: ClassId,
        form: &NewStudent,
    ) -> Result<Student, RosterServiceError> {
        require_admin(ctx)?;
        self.class(class_id).await?;

        let id = self.roster.next_student_id().await?;
        let student = Student::new(id, &form.usn, &form.name, &form.email, class_id)?;
        match self.roster.insert_student(&student).await {
            Ok(()) => {}
            Err(StorageError::Conflict(_)) => {
                return Err(RosterServiceError::DuplicateUsn(student.usn().to_owned()));
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(student_id = %id, %class_id, usn = student.usn(), "student enrolled");
        Ok(student)
    }

    async fn class(&self, class_id: ClassId) -> Result<ClassInfo, RosterServiceError> {
        match self.roster.get_class(class_id).await {
            Ok(class) => Ok(class),
            Err(StorageError::NotFound) => Err(RosterServiceError::UnknownClass),
            Err(err) => Err(err.into()),
        }
    }
}

fn require_admin(ctx: &SessionContext) -> Result<(), RosterServiceError> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(RosterServiceError::Forbidden)
    }
}
