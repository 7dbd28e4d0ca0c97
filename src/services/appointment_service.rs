use serde::Serialize;
use serde_json::Value;

use crate::api::format::string_field;
use crate::api::Transport;
use crate::surface::Surface;

pub const AUTO_SCHEDULE_PATH: &str = "/api/appointments/auto";

/// Result of asking the backend to pick the next free slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScheduleOutcome {
    /// A slot was booked, or the patient already held one
    Scheduled {
        date: String,
        time: String,
        doctor_name: String,
        already_booked: bool,
    },
    /// The backend refused with a reason
    Refused { error: String },
    /// The backend answered with something else
    Unrecognized,
    /// No answer at all
    NetworkError,
}

impl ScheduleOutcome {
    fn from_response(body: &Value) -> Self {
        match body.get("status").and_then(Value::as_str) {
            Some(status @ ("created" | "exists")) => ScheduleOutcome::Scheduled {
                date: string_field(body, "Date").unwrap_or_default(),
                time: string_field(body, "Time").unwrap_or_default(),
                doctor_name: string_field(body, "Doctor_Name").unwrap_or_default(),
                already_booked: status == "exists",
            },
            _ => match body.get("error") {
                Some(error) if is_truthy(error) => ScheduleOutcome::Refused {
                    error: match error {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    },
                },
                _ => ScheduleOutcome::Unrecognized,
            },
        }
    }

    /// Text shown to the patient
    pub fn message(&self) -> String {
        match self {
            ScheduleOutcome::Scheduled { date, time, doctor_name, .. } => {
                format!("Appointment scheduled on {} at {} with Dr. {}.", date, time, doctor_name)
            }
            ScheduleOutcome::Refused { error } => format!("Failed to schedule: {}", error),
            ScheduleOutcome::Unrecognized => "Failed to schedule appointment.".to_string(),
            ScheduleOutcome::NetworkError => "Network error scheduling appointment.".to_string(),
        }
    }
}

/// Empty strings, `false`, zero and `null` carry no refusal reason
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Patient quick-scheduling: one bodyless POST, one alert, no retry
pub async fn schedule_auto_appointment(
    transport: &dyn Transport,
    surface: &mut dyn Surface,
) -> ScheduleOutcome {
    let outcome = match transport.post(AUTO_SCHEDULE_PATH, None).await {
        Ok(body) => ScheduleOutcome::from_response(&body),
        // Unreadable bodies count as network errors, like unanswered requests
        Err(e) => {
            tracing::error!("Auto-schedule request failed: {}", e);
            ScheduleOutcome::NetworkError
        }
    };

    surface.alert(&outcome.message());
    outcome
}
