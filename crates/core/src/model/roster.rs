use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ClassId, StudentId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RosterError {
    #[error("class name cannot be empty")]
    EmptyClassName,

    #[error("student {field} cannot be empty")]
    EmptyStudentField { field: &'static str },

    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// A course group students are enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    id: ClassId,
    name: String,
    description: String,
}

impl ClassInfo {
    /// # Errors
    ///
    /// Returns `RosterError::EmptyClassName` for a blank name.
    pub fn new(
        id: ClassId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, RosterError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(RosterError::EmptyClassName);
        }
        Ok(Self {
            id,
            name,
            description: description.into().trim().to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> ClassId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// An enrolled student. `usn` is the university serial number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    id: StudentId,
    usn: String,
    name: String,
    email: String,
    class_id: ClassId,
}

impl Student {
    /// # Errors
    ///
    /// Returns `RosterError` for blank fields or an email without `@`.
    pub fn new(
        id: StudentId,
        usn: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        class_id: ClassId,
    ) -> Result<Self, RosterError> {
        let usn = usn.into().trim().to_uppercase();
        if usn.is_empty() {
            return Err(RosterError::EmptyStudentField { field: "usn" });
        }
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(RosterError::EmptyStudentField { field: "name" });
        }
        let email = email.into().trim().to_owned();
        if email.is_empty() {
            return Err(RosterError::EmptyStudentField { field: "email" });
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(RosterError::InvalidEmail(email)),
        }

        Ok(Self {
            id,
            usn,
            name,
            email,
            class_id,
        })
    }

    #[must_use]
    pub fn id(&self) -> StudentId {
        self.id
    }

    #[must_use]
    pub fn usn(&self) -> &str {
        &self.usn
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn class_id(&self) -> ClassId {
        self.class_id
    }
}
