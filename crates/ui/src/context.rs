use std::sync::Arc;

use dioxus::prelude::*;
use services::{AppServices, ClientService, Session, SessionService, TemplateService};

pub trait UiApp: Send + Sync {
    fn clients(&self) -> Arc<ClientService>;
    fn templates(&self) -> Arc<TemplateService>;
    fn sessions(&self) -> Arc<SessionService>;
}

impl UiApp for AppServices {
    fn clients(&self) -> Arc<ClientService> {
        AppServices::clients(self)
    }

    fn templates(&self) -> Arc<TemplateService> {
        AppServices::templates(self)
    }

    fn sessions(&self) -> Arc<SessionService> {
        AppServices::sessions(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    clients: Arc<ClientService>,
    templates: Arc<TemplateService>,
    sessions: Arc<SessionService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clients: app.clients(),
            templates: app.templates(),
            sessions: app.sessions(),
        }
    }

    #[must_use]
    pub fn clients(&self) -> Arc<ClientService> {
        Arc::clone(&self.clients)
    }

    #[must_use]
    pub fn templates(&self) -> Arc<TemplateService> {
        Arc::clone(&self.templates)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<SessionService> {
        Arc::clone(&self.sessions)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// The signed-in session, shared by every view.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionState(Signal<Option<Session>>);

impl SessionState {
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.0.read().clone()
    }

    pub fn sign_in(&mut self, session: Session) {
        self.0.set(Some(session));
    }

    /// Clears the session and hands it back for logging out.
    pub fn sign_out(&mut self) -> Option<Session> {
        self.0.write().take()
    }
}

/// Install the session state for this subtree.
pub fn use_session_provider(initial: Option<Session>) -> SessionState {
    use_context_provider(|| SessionState(Signal::new(initial)))
}

#[must_use]
pub fn use_session() -> SessionState {
    use_context::<SessionState>()
}
