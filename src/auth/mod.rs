use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::format::string_field;
use crate::api::Transport;
use crate::config::PagesConfig;
use crate::error::ClientResult;
use crate::session::{Session, SessionStore};
use crate::surface::Surface;
use crate::types::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// New patient account; the backend always creates patients
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    /// Logged in and sent to the role's dashboard
    Dashboard { role: Role, page: String },
    /// Logged in, but the account type maps to no dashboard
    UnknownRole { user_type: String },
    WrongCredentials,
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SignupOutcome {
    Created,
    Refused { message: String },
    Unreachable,
}

/// Login, signup and logout against the backend
pub struct AuthFlow<'a> {
    transport: &'a dyn Transport,
    pages: &'a PagesConfig,
}

impl<'a> AuthFlow<'a> {
    pub fn new(transport: &'a dyn Transport, pages: &'a PagesConfig) -> Self {
        Self { transport, pages }
    }

    /// POST `/login`; on success replace the stored session and route by role.
    ///
    /// Only a failing session write is an error; backend and network
    /// failures are outcomes.
    pub async fn login(
        &self,
        store: &mut dyn SessionStore,
        credentials: &Credentials,
        surface: &mut dyn Surface,
    ) -> ClientResult<LoginOutcome> {
        let body = json!({ "email": credentials.email, "password": credentials.password });

        let response = match self.transport.post("/login", Some(&body)).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Login request failed: {}", e);
                surface.alert("Could not connect to backend.");
                return Ok(LoginOutcome::Unreachable);
            }
        };

        if response.get("status").and_then(Value::as_str) != Some("ok") {
            tracing::info!("Login refused for {}", credentials.email);
            surface.alert("Wrong credentials");
            return Ok(LoginOutcome::WrongCredentials);
        }

        let user_type = string_field(&response, "type").unwrap_or_default();
        let role = Role::parse(&user_type);

        let session = Session {
            token: string_field(&response, "token"),
            user_id: string_field(&response, "user_id").or_else(|| string_field(&response, "User_ID")),
            user_type: Some(role.map(|r| r.as_str().to_string()).unwrap_or_else(|| user_type.clone())),
            user_name: string_field(&response, "name"),
            logged_in_at: Some(Utc::now()),
        };
        store.save(&session)?;

        match role {
            Some(role) => {
                let page = self.pages.dashboard(role).to_string();
                tracing::info!("Logged in as {}, opening {}", role, page);
                surface.navigate(&page);
                Ok(LoginOutcome::Dashboard { role, page })
            }
            None => {
                tracing::warn!("Login returned unknown account type '{}'", user_type);
                Ok(LoginOutcome::UnknownRole { user_type })
            }
        }
    }

    /// POST `/signup` with the new patient's details
    pub async fn signup(&self, form: &SignupForm, surface: &mut dyn Surface) -> SignupOutcome {
        let body = match serde_json::to_value(form) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Signup form not serializable: {}", e);
                surface.alert("Signup failed");
                return SignupOutcome::Refused { message: "Signup failed".to_string() };
            }
        };

        match self.transport.post("/signup", Some(&body)).await {
            Ok(response) if response.get("status").and_then(Value::as_str) == Some("ok") => {
                surface.alert("Account created successfully!");
                surface.navigate(&self.pages.after_signup);
                SignupOutcome::Created
            }
            Ok(response) => {
                let message = string_field(&response, "message").unwrap_or_else(|| "Signup failed".to_string());
                surface.alert(&message);
                SignupOutcome::Refused { message }
            }
            Err(e) => {
                tracing::error!("Signup request failed: {}", e);
                surface.alert("Backend not reachable.");
                SignupOutcome::Unreachable
            }
        }
    }

    /// Forget the local session, then tell the backend.
    ///
    /// The backend call is best effort; the local session is gone either way.
    pub async fn logout(&self, store: &mut dyn SessionStore, surface: &mut dyn Surface) -> ClientResult<()> {
        let had_token = store.load().map(|s| s.has_token()).unwrap_or(false);
        store.clear()?;

        if had_token {
            if let Err(e) = self.transport.get("/logout", None).await {
                tracing::debug!("Backend logout not acknowledged: {}", e);
            }
        }

        surface.navigate(&self.pages.login);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use crate::surface::RecordedSurface;
    use crate::testing::RecordingTransport;

    fn credentials() -> Credentials {
        Credentials { email: "ann@example.com".into(), password: "pw".into() }
    }

    #[tokio::test]
    async fn doctor_login_routes_to_doctor_dashboard_regardless_of_case() {
        let transport = RecordingTransport::new()
            .on_post("/login", json!({"status": "ok", "name": "Ann Lee", "type": "Doctor"}));
        let pages = PagesConfig::default();
        let auth = AuthFlow::new(&transport, &pages);
        let mut store = MemorySessionStore::new();
        let mut surface = RecordedSurface::new();

        let outcome = auth.login(&mut store, &credentials(), &mut surface).await.unwrap();

        assert_eq!(outcome, LoginOutcome::Dashboard { role: Role::Doctor, page: "doctor.html".into() });
        assert_eq!(surface.navigations(), vec!["doctor.html"]);
        let session = store.load().unwrap();
        assert_eq!(session.user_name.as_deref(), Some("Ann Lee"));
        assert_eq!(session.user_type.as_deref(), Some("doctor"));
        assert!(session.logged_in_at.is_some());

        let sent = transport.calls()[0].body.clone().unwrap();
        assert_eq!(sent, json!({"email": "ann@example.com", "password": "pw"}));
    }

    #[tokio::test]
    async fn admin_type_routes_to_administrator_dashboard() {
        let transport = RecordingTransport::new().on_post(
            "/login",
            json!({"status": "ok", "name": "Bo Ek", "type": "admin", "token": "jwt", "user_id": 4}),
        );
        let pages = PagesConfig::default();
        let auth = AuthFlow::new(&transport, &pages);
        let mut store = MemorySessionStore::new();
        let mut surface = RecordedSurface::new();

        let outcome = auth.login(&mut store, &credentials(), &mut surface).await.unwrap();

        assert_eq!(
            outcome,
            LoginOutcome::Dashboard { role: Role::Administrator, page: "administrator.html".into() }
        );
        let session = store.load().unwrap();
        assert_eq!(session.token.as_deref(), Some("jwt"));
        assert_eq!(session.user_id.as_deref(), Some("4"));
        assert_eq!(session.role(), Some(Role::Administrator));
    }

    #[tokio::test]
    async fn wrong_credentials_leave_session_untouched() {
        let transport = RecordingTransport::new().on_post("/login", json!({"status": "error"}));
        let pages = PagesConfig::default();
        let auth = AuthFlow::new(&transport, &pages);
        let mut store = MemorySessionStore::new();
        let mut surface = RecordedSurface::new();

        let outcome = auth.login(&mut store, &credentials(), &mut surface).await.unwrap();

        assert_eq!(outcome, LoginOutcome::WrongCredentials);
        assert_eq!(surface.alerts(), vec!["Wrong credentials"]);
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_type_stores_name_but_does_not_navigate() {
        let transport =
            RecordingTransport::new().on_post("/login", json!({"status": "ok", "name": "X", "type": "nurse"}));
        let pages = PagesConfig::default();
        let auth = AuthFlow::new(&transport, &pages);
        let mut store = MemorySessionStore::new();
        let mut surface = RecordedSurface::new();

        let outcome = auth.login(&mut store, &credentials(), &mut surface).await.unwrap();

        assert_eq!(outcome, LoginOutcome::UnknownRole { user_type: "nurse".into() });
        assert!(surface.navigations().is_empty());
        assert_eq!(store.load().unwrap().user_name.as_deref(), Some("X"));
    }

    #[tokio::test]
    async fn unreachable_backend_on_login() {
        let transport = RecordingTransport::new();
        let pages = PagesConfig::default();
        let auth = AuthFlow::new(&transport, &pages);
        let mut store = MemorySessionStore::new();
        let mut surface = RecordedSurface::new();

        let outcome = auth.login(&mut store, &credentials(), &mut surface).await.unwrap();

        assert_eq!(outcome, LoginOutcome::Unreachable);
        assert_eq!(surface.alerts(), vec!["Could not connect to backend."]);
    }

    #[tokio::test]
    async fn signup_reports_backend_message() {
        let transport = RecordingTransport::new()
            .on_post("/signup", json!({"status": "error", "message": "Email already exists"}));
        let pages = PagesConfig::default();
        let auth = AuthFlow::new(&transport, &pages);
        let mut surface = RecordedSurface::new();

        let outcome = auth.signup(&SignupForm::default(), &mut surface).await;

        assert_eq!(outcome, SignupOutcome::Refused { message: "Email already exists".into() });
        let sent = transport.calls()[0].body.clone().unwrap();
        let mut keys: Vec<&String> = sent.as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["address", "email", "first_name", "last_name", "password", "phone"]);
    }

    #[tokio::test]
    async fn signup_success_returns_to_start() {
        let transport = RecordingTransport::new().on_post("/signup", json!({"status": "ok"}));
        let pages = PagesConfig::default();
        let auth = AuthFlow::new(&transport, &pages);
        let mut surface = RecordedSurface::new();

        let outcome = auth.signup(&SignupForm::default(), &mut surface).await;

        assert_eq!(outcome, SignupOutcome::Created);
        assert_eq!(surface.alerts(), vec!["Account created successfully!"]);
        assert_eq!(surface.navigations(), vec!["/"]);
    }

    #[tokio::test]
    async fn signup_without_message_uses_default() {
        let transport = RecordingTransport::new().on_post("/signup", json!({"status": "error"}));
        let pages = PagesConfig::default();
        let auth = AuthFlow::new(&transport, &pages);
        let mut surface = RecordedSurface::new();

        let outcome = auth.signup(&SignupForm::default(), &mut surface).await;

        assert_eq!(outcome, SignupOutcome::Refused { message: "Signup failed".into() });
    }

    #[tokio::test]
    async fn logout_clears_session_even_if_backend_is_down() {
        let transport = RecordingTransport::new();
        let pages = PagesConfig::default();
        let auth = AuthFlow::new(&transport, &pages);
        let mut store = MemorySessionStore::with_session(Session {
            token: Some("t".into()),
            ..Session::default()
        });
        let mut surface = RecordedSurface::new();

        auth.logout(&mut store, &mut surface).await.unwrap();

        assert!(store.load().unwrap().is_empty());
        assert_eq!(transport.calls_to("GET", "/logout"), 1);
        assert_eq!(surface.navigations(), vec!["index.html"]);
    }
}
