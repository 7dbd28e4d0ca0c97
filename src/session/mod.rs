pub mod guard;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::types::Role;

pub use guard::{GuardOutcome, SessionGuard};

/// Client-local session, persisted under the same keys the browser pages use.
///
/// Replaced wholesale at login and cleared at logout; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(rename = "userName", default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Stored role tag, normalized; unknown tags read as no role
    pub fn role(&self) -> Option<Role> {
        self.user_type.as_deref().and_then(Role::parse)
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        *self == Session::default()
    }
}

/// Key-value home of the session between runs
pub trait SessionStore {
    fn load(&self) -> ClientResult<Session>;

    fn save(&mut self, session: &Session) -> ClientResult<()>;

    fn clear(&mut self) -> ClientResult<()>;
}

/// Session store that lives only as long as the value
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    session: Session,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self { session }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Session> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &Session) -> ClientResult<()> {
        self.session = session.clone();
        Ok(())
    }

    fn clear(&mut self) -> ClientResult<()> {
        self.session = Session::default();
        Ok(())
    }
}
