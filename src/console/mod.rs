//! Generic record administration: list a record type as a table, edit it
//! through a form built from the same configuration, submit, refresh.

pub mod form;
pub mod registry;
pub mod table;

use serde::Serialize;
use serde_json::Value;

use crate::api::format::{rows_of, string_field};
use crate::api::Transport;
use crate::error::ClientError;
use crate::surface::Surface;

pub use form::{render_form, Form, FormInput};
pub use registry::{lookup, Column, Field, InputKind, RecordTypeConfig, RECORD_TYPES};
pub use table::{build_table, Table};

/// Where the console is in its select/render/submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleState {
    #[default]
    Idle,
    TypeSelected(&'static str),
    Submitting(&'static str),
}

/// Console view state owned by the caller and threaded through every call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    state: ConsoleState,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConsoleState {
        self.state
    }

    /// Currently selected record type, if any
    pub fn selected(&self) -> Option<&'static str> {
        match self.state {
            ConsoleState::Idle => None,
            ConsoleState::TypeSelected(t) | ConsoleState::Submitting(t) => Some(t),
        }
    }

    /// Select a type; unknown names leave nothing selected
    fn select(&mut self, type_name: &str) {
        self.state = match registry::lookup(type_name) {
            Some(config) => ConsoleState::TypeSelected(config.type_name),
            None => ConsoleState::Idle,
        };
    }
}

/// Table and form shown together for one record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordsView {
    pub type_name: String,
    /// None for unknown types and for failed fetches
    pub table: Option<Table>,
    pub form: Form,
}

/// What the backend made of a submitted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Created { id: Option<String> },
    Updated { id: Option<String> },
    /// The backend answered but refused the record
    Rejected { message: String },
    /// No answer at all
    Failed { message: String },
}

impl SubmitOutcome {
    fn from_response(config: &RecordTypeConfig, body: &Value) -> Self {
        let id = string_field(body, config.id_key());
        match body.get("status").and_then(Value::as_str) {
            Some("created") => SubmitOutcome::Created { id },
            Some("updated") => SubmitOutcome::Updated { id },
            _ => match string_field(body, "error").or_else(|| string_field(body, "message")) {
                Some(message) => SubmitOutcome::Rejected { message },
                None => SubmitOutcome::Rejected {
                    message: format!("unrecognized response: {}", body),
                },
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created { .. } | SubmitOutcome::Updated { .. })
    }
}

/// Outcome of a submit plus the table re-rendered after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitResult {
    pub outcome: SubmitOutcome,
    /// Present whenever the backend answered, success or not
    pub refreshed: Option<RecordsView>,
}

pub struct Console<'a> {
    transport: &'a dyn Transport,
}

impl<'a> Console<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Select `type_name` and build its form
    pub fn render_form(&self, view: &mut ViewState, type_name: &str) -> Form {
        view.select(type_name);
        form::render_form(type_name)
    }

    /// Fetch and tabulate a record type, then render its form.
    ///
    /// Exactly one GET for known types; unknown types make no request and
    /// still get their (empty) form.
    pub async fn display_records(
        &self,
        view: &mut ViewState,
        type_name: &str,
        surface: &mut dyn Surface,
    ) -> RecordsView {
        let table = match registry::lookup(type_name) {
            Some(config) => match self.fetch_table(config).await {
                Ok(table) => Some(table),
                Err(e) => {
                    tracing::error!("Loading {} failed: {}", config.type_name, e);
                    surface.alert(&format!("Error loading {} records.", config.type_name));
                    None
                }
            },
            None => {
                tracing::debug!("No record type named '{}'", type_name);
                None
            }
        };

        let form = self.render_form(view, type_name);
        RecordsView {
            type_name: type_name.to_string(),
            table,
            form,
        }
    }

    /// Submit the form as the selected type's record and refresh its table.
    ///
    /// Returns None when nothing is selected. The payload always carries
    /// exactly the selected type's field keys; values missing from `form`
    /// are sent as empty strings.
    pub async fn submit_record(
        &self,
        view: &mut ViewState,
        form: &Form,
        surface: &mut dyn Surface,
    ) -> Option<SubmitResult> {
        let type_name = view.selected()?;
        let config = registry::lookup(type_name)?;
        view.state = ConsoleState::Submitting(type_name);

        let body = Value::Object(form.payload(config.fields));

        match self.transport.post(&config.submit_path(), Some(&body)).await {
            Ok(response) => {
                let outcome = SubmitOutcome::from_response(config, &response);
                match &outcome {
                    SubmitOutcome::Rejected { message } => {
                        tracing::warn!("{} submit rejected: {}", type_name, message);
                        surface.alert(&format!("Failed to save {}: {}", type_name, message));
                    }
                    _ => tracing::info!("{} submit accepted: {:?}", type_name, outcome),
                }
                let refreshed = self.display_records(view, type_name, surface).await;
                Some(SubmitResult { outcome, refreshed: Some(refreshed) })
            }
            Err(e) => {
                tracing::error!("{} submit failed: {}", type_name, e);
                surface.alert(&format!("Could not save {}: {}", type_name, e));
                view.state = ConsoleState::TypeSelected(type_name);
                Some(SubmitResult {
                    outcome: SubmitOutcome::Failed { message: e.to_string() },
                    refreshed: None,
                })
            }
        }
    }

    async fn fetch_table(&self, config: &RecordTypeConfig) -> Result<Table, ClientError> {
        let path = config.collection_path();
        let body = self.transport.get(&path, None).await?;
        let rows = rows_of(&body)
            .ok_or_else(|| ClientError::unexpected_shape(path.as_str(), "expected a JSON array"))?;
        Ok(build_table(config.columns, &rows))
    }
}
