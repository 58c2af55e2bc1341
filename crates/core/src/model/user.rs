use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::ids::{StudentId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "student" => Ok(Role::Student),
            other => Err(ParseRoleError(other.to_owned())),
        }
    }
}

/// A signed-in portal account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Who is using the portal right now.
///
/// Created by a successful login and dropped on logout; pages that need the
/// current user receive it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user: User,
    student_id: Option<StudentId>,
}

impl SessionContext {
    #[must_use]
    pub fn admin(user: User) -> Self {
        Self {
            user,
            student_id: None,
        }
    }

    #[must_use]
    pub fn student(user: User, student_id: StudentId) -> Self {
        Self {
            user,
            student_id: Some(student_id),
        }
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Enrolment linked to this account; `None` for admins.
    #[must_use]
    pub fn student_id(&self) -> Option<StudentId> {
        self.student_id
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }
}
