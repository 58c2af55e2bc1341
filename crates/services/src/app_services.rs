use std::sync::Arc;

use quiz_core::model::PortalSettings;
use storage::fixtures::demo_fixture;
use storage::repository::{InMemoryRepository, Storage};

use crate::Clock;
use crate::analytics_service::AnalyticsService;
use crate::assessment::AttemptService;
use crate::auth_service::AuthService;
use crate::authoring_service::AuthoringService;
use crate::error::AppServicesError;
use crate::generation::CannedQuestionGenerator;
use crate::roster_service::RosterService;

/// Assembles the portal's services over one storage backend.
#[derive(Clone)]
pub struct PortalServices {
    settings: PortalSettings,
    auth: Arc<AuthService>,
    attempts: Arc<AttemptService>,
    analytics: Arc<AnalyticsService>,
    authoring: Arc<AuthoringService>,
    roster: Arc<RosterService>,
}

impl PortalServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, settings: PortalSettings) -> Self {
        let auth = Arc::new(AuthService::new(settings.demo_accounts().to_vec()));
        let attempts = Arc::new(AttemptService::new(
            clock,
            settings.clone(),
            storage.catalog(),
            Arc::clone(&storage.attempts),
        ));
        let analytics = Arc::new(AnalyticsService::new(
            storage.catalog(),
            Arc::clone(&storage.attempts),
            Arc::clone(&storage.roster),
        ));
        let authoring = Arc::new(AuthoringService::new(
            clock,
            Arc::clone(&storage.quizzes),
            Arc::new(CannedQuestionGenerator),
        ));
        let roster = Arc::new(RosterService::new(Arc::clone(&storage.roster)));

        Self {
            settings,
            auth,
            attempts,
            analytics,
            authoring,
            roster,
        }
    }

    /// Build services over an in-memory store seeded with the demo data.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Fixture` if the demo data fails validation.
    pub fn demo(clock: Clock, settings: PortalSettings) -> Result<Self, AppServicesError> {
        let repo = InMemoryRepository::from_fixture(demo_fixture()?);
        Ok(Self::new(&Storage::from_repository(repo), clock, settings))
    }

    #[must_use]
    pub fn settings(&self) -> &PortalSettings {
        &self.settings
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn attempts(&self) -> Arc<AttemptService> {
        Arc::clone(&self.attempts)
    }

    #[must_use]
    pub fn analytics(&self) -> Arc<AnalyticsService> {
        Arc::clone(&self.analytics)
    }

    #[must_use]
    pub fn authoring(&self) -> Arc<AuthoringService> {
        Arc::clone(&self.authoring)
    }

    #[must_use]
    pub fn roster(&self) -> Arc<RosterService> {
        Arc::clone(&self.roster)
    }
}
