use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::{Role, SessionContext};
use services::{
    AnalyticsService, AttemptService, AuthService, AuthoringService, PortalServices, RosterService,
};

pub trait UiApp: Send + Sync {
    fn services(&self) -> PortalServices;

    /// Session to open the portal with, when the launcher signed in already.
    fn initial_session(&self) -> Option<SessionContext>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_session: Option<SessionContext>,

    auth: Arc<AuthService>,
    attempts: Arc<AttemptService>,
    analytics: Arc<AnalyticsService>,
    authoring: Arc<AuthoringService>,
    roster: Arc<RosterService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let services = app.services();
        Self {
            initial_session: app.initial_session(),
            auth: services.auth(),
            attempts: services.attempts(),
            analytics: services.analytics(),
            authoring: services.authoring(),
            roster: services.roster(),
        }
    }

    #[must_use]
    pub fn initial_session(&self) -> Option<SessionContext> {
        self.initial_session.clone()
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

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// The signed-in user. Set by login, cleared by logout.
#[derive(Clone, Copy)]
pub struct CurrentSession(pub Signal<Option<SessionContext>>);

impl CurrentSession {
    #[must_use]
    pub fn get(&self) -> Option<SessionContext> {
        self.0.read().clone()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.0.read().as_ref().map(SessionContext::role)
    }

    pub fn sign_in(mut self, ctx: SessionContext) {
        self.0.set(Some(ctx));
    }

    pub fn sign_out(mut self) {
        self.0.set(None);
    }
}

/// Install the session signal, seeded from the app context.
pub fn provide_current_session() -> CurrentSession {
    let ctx = use_context::<AppContext>();
    use_context_provider(|| CurrentSession(Signal::new(ctx.initial_session())))
}

#[must_use]
pub fn use_current_session() -> CurrentSession {
    use_context::<CurrentSession>()
}
