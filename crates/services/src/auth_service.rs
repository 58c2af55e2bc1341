use std::time::Duration;

use quiz_core::model::{DemoAccount, Role, SessionContext};

use crate::error::AuthError;

/// Simulated sign-in against the demo credential table.
#[derive(Clone, Debug)]
pub struct AuthService {
    accounts: Vec<DemoAccount>,
    latency: Duration,
}

impl AuthService {
    #[must_use]
    pub fn new(accounts: Vec<DemoAccount>) -> Self {
        Self {
            accounts,
            latency: Duration::ZERO,
        }
    }

    /// Delay every login by `latency`, imitating a network round trip.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Sign in with an email, password and the role the user claims.
    ///
    /// The email is matched case-insensitively; password and role must match exactly.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches, or
    /// `AuthError::UnlinkedStudent` for a student account without an enrolment.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<SessionContext, AuthError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let email = email.trim();
        let Some(account) = self.accounts.iter().find(|account| {
            account.email.eq_ignore_ascii_case(email)
                && account.password == password
                && account.user.role == role
        }) else {
            tracing::warn!(email, %role, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let ctx = match role {
            Role::Admin => SessionContext::admin(account.user.clone()),
            Role::Student => {
                let student_id = account.student_id.ok_or(AuthError::UnlinkedStudent)?;
                SessionContext::student(account.user.clone(), student_id)
            }
        };
        tracing::info!(user_id = %account.user.id, %role, "signed in");
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{PortalSettings, StudentId};

    fn service() -> AuthService {
        AuthService::new(PortalSettings::default().demo_accounts().to_vec())
    }

    #[tokio::test]
    async fn student_login_links_enrolment() {
        let ctx = service()
            .login("demo@student.edu", "student123", Role::Student)
            .await
            .unwrap();
        assert_eq!(ctx.role(), Role::Student);
        assert_eq!(ctx.student_id(), Some(StudentId::new(1)));
    }

    #[tokio::test]
    async fn admin_login_has_no_enrolment() {
        let ctx = service()
            .login(" Admin@Riverside.edu ", "admin123", Role::Admin)
            .await
            .unwrap();
        assert!(ctx.is_admin());
        assert_eq!(ctx.student_id(), None);
    }

    #[tokio::test]
    async fn wrong_role_is_rejected() {
        let err = service()
            .login("demo@student.edu", "student123", Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let err = service()
            .login("admin@riverside.edu", "student123", Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_the_answer() {
        let auth = service().with_latency(Duration::from_secs(1));
        let started = tokio::time::Instant::now();
        auth.login("demo@student.edu", "student123", Role::Student)
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
