use std::sync::Arc;

use portal_core::model::{Client, ClientId};
use storage::repository::ClientRepository;

use crate::error::SessionError;

/// Who is looking at the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Client(ClientId),
    Admin,
}

/// The signed-in identity. There is no password check; the login screen is a role picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
}

impl Session {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    #[must_use]
    pub fn client_id(&self) -> Option<&ClientId> {
        match &self.role {
            Role::Client(id) => Some(id),
            Role::Admin => None,
        }
    }
}

/// Resolves role choices into sessions.
#[derive(Clone)]
pub struct SessionService {
    clients: Arc<dyn ClientRepository>,
}

impl SessionService {
    #[must_use]
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    /// Sign in as a specific client.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownClient` if no such client exists.
    /// Returns `SessionError::Storage` if repository access fails.
    pub async fn login_client(&self, id: &ClientId) -> Result<(Session, Client), SessionError> {
        let client = self
            .clients
            .get_client(id)
            .await?
            .ok_or_else(|| SessionError::UnknownClient(id.clone()))?;
        tracing::info!(client_id = %client.id, "client signed in");
        Ok((
            Session {
                role: Role::Client(client.id.clone()),
            },
            client,
        ))
    }

    /// Sign in as the first client on record, as the demo login does.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoClients` if the client list is empty.
    /// Returns `SessionError::Storage` if repository access fails.
    pub async fn login_demo_client(&self) -> Result<(Session, Client), SessionError> {
        let client = self
            .clients
            .list_clients()
            .await?
            .into_iter()
            .next()
            .ok_or(SessionError::NoClients)?;
        tracing::info!(client_id = %client.id, "demo client signed in");
        Ok((
            Session {
                role: Role::Client(client.id.clone()),
            },
            client,
        ))
    }

    #[must_use]
    pub fn login_admin(&self) -> Session {
        tracing::info!("admin signed in");
        Session { role: Role::Admin }
    }

    /// Ends the session. Data is left untouched.
    pub fn logout(&self, session: Session) {
        tracing::info!(admin = session.is_admin(), "signed out");
    }
}
