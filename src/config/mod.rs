use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::types::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub pages: PagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// No timeout unless explicitly configured; a hung request stays pending
    pub request_timeout_secs: Option<u64>,
    pub enable_request_logging: bool,
}

/// Page names the client navigates between
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    pub login: String,
    pub after_signup: String,
    pub patient_dashboard: String,
    pub doctor_dashboard: String,
    pub administrator_dashboard: String,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl PagesConfig {
    pub fn dashboard(&self, role: Role) -> &str {
        match role {
            Role::Patient => &self.patient_dashboard,
            Role::Doctor => &self.doctor_dashboard,
            Role::Administrator => &self.administrator_dashboard,
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            login: "index.html".to_string(),
            after_signup: "/".to_string(),
            patient_dashboard: "patient.html".to_string(),
            doctor_dashboard: "doctor.html".to_string(),
            administrator_dashboard: "administrator.html".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply `HOSPITAL_*` overrides read through `var`
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        // API overrides
        if let Some(v) = var("HOSPITAL_API_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().to_string();
            }
        }
        if let Some(v) = var("HOSPITAL_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.trim().parse().ok().filter(|secs| *secs > 0);
        }
        if let Some(v) = var("HOSPITAL_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.trim().parse().unwrap_or(self.api.enable_request_logging);
        }

        // Page overrides
        if let Some(v) = var("HOSPITAL_LOGIN_PAGE") {
            self.pages.login = v;
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://127.0.0.1:5000".to_string(),
                request_timeout_secs: None,
                enable_request_logging: true,
            },
            pages: PagesConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.hospital.example.com".to_string(),
                request_timeout_secs: None,
                enable_request_logging: true,
            },
            pages: PagesConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://hospital.example.com".to_string(),
                request_timeout_secs: None,
                enable_request_logging: false,
            },
            pages: PagesConfig::default(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
