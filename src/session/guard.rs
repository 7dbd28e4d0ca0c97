use serde::{Deserialize, Serialize};

use crate::api::Transport;
use crate::config::PagesConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::{Session, SessionStore};
use crate::surface::{Surface, WELCOME_ELEMENT};
use crate::types::Role;

/// Profile fields the dashboards greet with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "First_Name")]
    pub first_name: String,
    #[serde(rename = "Last_Name")]
    pub last_name: String,
}

impl Profile {
    pub fn greeting(&self, role: Role) -> String {
        match role {
            Role::Doctor => format!("Welcome Dr. {} {}", self.first_name, self.last_name),
            Role::Patient | Role::Administrator => {
                format!("Welcome {} {}", self.first_name, self.last_name)
            }
        }
    }
}

/// Result of gating a protected page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Missing token or wrong role; the page was abandoned for the login page
    Redirected { page: String },
    /// Access granted and the greeting was written
    Welcomed { greeting: String },
    /// Access granted but the profile could not be loaded
    Degraded,
}

impl GuardOutcome {
    pub fn is_authorized(&self) -> bool {
        !matches!(self, GuardOutcome::Redirected { .. })
    }
}

/// Per-page authorization check run once on load of a role dashboard
pub struct SessionGuard<'a> {
    transport: &'a dyn Transport,
    pages: &'a PagesConfig,
}

impl<'a> SessionGuard<'a> {
    pub fn new(transport: &'a dyn Transport, pages: &'a PagesConfig) -> Self {
        Self { transport, pages }
    }

    /// Gate a page that requires `required`.
    ///
    /// Fails closed: an unreadable session is treated like a missing one and
    /// no request is made before the stored flags pass.
    pub async fn guard_page(
        &self,
        store: &dyn SessionStore,
        required: Role,
        surface: &mut dyn Surface,
    ) -> GuardOutcome {
        let session = store.load().unwrap_or_else(|e| {
            tracing::warn!("Session unreadable, treating as logged out: {}", e);
            Session::default()
        });

        let token = match session.token.as_deref() {
            Some(token) if !token.is_empty() && session.role() == Some(required) => token,
            _ => {
                tracing::info!(
                    "Rejecting {} page: token present={}, stored role={:?}",
                    required,
                    session.has_token(),
                    session.user_type
                );
                surface.alert("Not authorized!");
                surface.navigate(&self.pages.login);
                return GuardOutcome::Redirected { page: self.pages.login.clone() };
            }
        };

        let user_id = session.user_id.as_deref().unwrap_or_default();
        match self.fetch_profile(required, user_id, token).await {
            Ok(profile) => {
                let greeting = profile.greeting(required);
                surface.set_text(WELCOME_ELEMENT, &greeting);
                GuardOutcome::Welcomed { greeting }
            }
            Err(e) => {
                tracing::error!("Loading {} profile failed: {}", required, e);
                surface.alert(&format!("Error loading {} data.", required));
                GuardOutcome::Degraded
            }
        }
    }

    async fn fetch_profile(&self, role: Role, user_id: &str, token: &str) -> ClientResult<Profile> {
        let path = format!("/{}/{}", role, user_id);
        let body = self.transport.get(&path, Some(token)).await?;
        serde_json::from_value(body).map_err(|e| ClientError::unexpected_shape(path, e.to_string()))
    }
}
