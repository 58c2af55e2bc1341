use std::time::Duration;

use crate::model::ids::{StudentId, UserId};
use crate::model::user::{Role, User};

/// A credential accepted by the simulated login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    pub user: User,
    /// Enrolment backing a student account.
    pub student_id: Option<StudentId>,
}

/// Runtime knobs shared by the services layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalSettings {
    tick_period: Duration,
    demo_accounts: Vec<DemoAccount>,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            demo_accounts: default_demo_accounts(),
        }
    }
}

impl PortalSettings {
    /// Period between countdown ticks. Each tick removes one second from the clock.
    #[must_use]
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        if !period.is_zero() {
            self.tick_period = period;
        }
        self
    }

    #[must_use]
    pub fn demo_accounts(&self) -> &[DemoAccount] {
        &self.demo_accounts
    }

    #[must_use]
    pub fn with_demo_accounts(mut self, accounts: Vec<DemoAccount>) -> Self {
        self.demo_accounts = accounts;
        self
    }
}

fn default_demo_accounts() -> Vec<DemoAccount> {
    vec![
        DemoAccount {
            email: "demo@student.edu".into(),
            password: "student123".into(),
            user: User {
                id: UserId::new(1),
                name: "Alex Johnson".into(),
                email: "demo@student.edu".into(),
                role: Role::Student,
            },
            student_id: Some(StudentId::new(1)),
        },
        DemoAccount {
            email: "admin@riverside.edu".into(),
            password: "admin123".into(),
            user: User {
                id: UserId::new(2),
                name: "Portal Administrator".into(),
                email: "admin@riverside.edu".into(),
                role: Role::Admin,
            },
            student_id: None,
        },
    ]
}
