#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Html;
use axum::routing::{get, post, MethodRouter};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

pub const DOCTOR_EMAIL: &str = "ann@example.com";
pub const DOCTOR_PASSWORD: &str = "secret";
pub const DOCTOR_TOKEN: &str = "tok-ann";

const COLLECTIONS: &[&str] = &[
    "users",
    "administrators",
    "departments",
    "medical_records",
    "bills",
    "treatments",
    "rooms",
    "appointments",
    "doctors",
    "patients",
];

/// Requests and bodies seen by the stub backend
#[derive(Clone, Default)]
pub struct StubState {
    hits: Arc<Mutex<Vec<String>>>,
    payloads: Arc<Mutex<Vec<Value>>>,
}

impl StubState {
    fn hit(&self, entry: String) {
        tracing::debug!("stub backend: {}", entry);
        self.hits.lock().unwrap().push(entry);
    }
}

/// In-process stand-in for the hospital backend on a free local port
pub struct StubBackend {
    pub base_url: String,
    state: StubState,
}

impl StubBackend {
    pub fn hits(&self) -> Vec<String> {
        self.state.hits.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.hits().iter().filter(|h| h.as_str() == entry).count()
    }

    pub fn payloads(&self) -> Vec<Value> {
        self.state.payloads.lock().unwrap().clone()
    }
}

/// Route client and stub logs to the test harness; quiet unless RUST_LOG is set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_test_writer()
        .try_init();
}

pub async fn spawn_backend() -> Result<StubBackend> {
    init_tracing();
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind stub backend")?;

    let state = StubState::default();
    let app = router(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(StubBackend {
        base_url: format!("http://127.0.0.1:{}", port),
        state,
    })
}

/// Backend that answers every request with an HTML error page
pub async fn spawn_html_backend() -> Result<String> {
    init_tracing();
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind html backend")?;

    let app = Router::new().fallback(|| async {
        (StatusCode::BAD_GATEWAY, Html("<html><body>502 Bad Gateway</body></html>"))
    });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://127.0.0.1:{}", port))
}

/// Base URL of a port nothing listens on
pub fn dead_backend_url() -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(format!("http://127.0.0.1:{}", port))
}

fn router(state: StubState) -> Router {
    let mut app = Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/logout", get(logout))
        .route("/patient/:id", profile_route("patient"))
        .route("/doctor/:id", profile_route("doctor"))
        .route("/administrator/:id", profile_route("administrator"))
        .route("/api/records/:rtype", post(submit_record))
        .route("/api/appointments/auto", post(auto_schedule));

    for collection in COLLECTIONS {
        let name: &'static str = collection;
        app = app.route(
            &format!("/api/{}", name),
            get(move |State(state): State<StubState>| async move {
                state.hit(format!("GET /api/{}", name));
                Json(collection_rows(name))
            }),
        );
    }

    app.with_state(state)
}

fn collection_rows(collection: &str) -> Value {
    match collection {
        "patients" => json!([
            {"Patient_ID": 1, "First_Name": "Jo", "Last_Name": "Doe"},
            {"Patient_ID": 2, "First_Name": "Max", "Last_Name": "Roe"}
        ]),
        "treatments" => json!([
            {"Treatment_ID": 5, "Medicine": "Ibuprofen", "Perscription": "2x daily"}
        ]),
        "bills" => json!([
            {"Payment_ID": 9, "Patient_ID": 1, "Date": "2024-04-02", "Cost": 120.5, "Paid": null}
        ]),
        _ => json!([]),
    }
}

async fn login(State(state): State<StubState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.hit("POST /login".to_string());
    if body["email"] == DOCTOR_EMAIL && body["password"] == DOCTOR_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({"status": "ok", "name": "Ann Lee", "type": "Doctor", "token": DOCTOR_TOKEN, "user_id": 2})),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"status": "error"})))
    }
}

async fn signup(State(state): State<StubState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.hit("POST /signup".to_string());
    state.payloads.lock().unwrap().push(body.clone());
    if body["email"] == DOCTOR_EMAIL {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "Email already exists"})),
        )
    } else {
        (StatusCode::OK, Json(json!({"status": "ok"})))
    }
}

async fn logout(State(state): State<StubState>) -> Json<Value> {
    state.hit("GET /logout".to_string());
    Json(json!({"status": "ok"}))
}

fn profile_route(role: &'static str) -> MethodRouter<StubState> {
    get(
        move |State(state): State<StubState>, Path(id): Path<String>, headers: HeaderMap| async move {
            profile(state, role, id, headers)
        },
    )
}

fn profile(state: StubState, role: &'static str, id: String, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.hit(format!("GET /{}/{}", role, id));
    let expected = format!("Bearer {}", DOCTOR_TOKEN);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if authorized {
        (StatusCode::OK, Json(json!({"First_Name": "Ann", "Last_Name": "Lee"})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"})))
    }
}

async fn submit_record(
    State(state): State<StubState>,
    Path(rtype): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.hit(format!("POST /api/records/{}", rtype));
    state.payloads.lock().unwrap().push(body.clone());

    match rtype.as_str() {
        "Patients" => {
            let id = body["Patient_ID"].as_str().unwrap_or_default();
            if id.is_empty() {
                (StatusCode::OK, Json(json!({"status": "created", "Patient_ID": 3})))
            } else {
                (StatusCode::OK, Json(json!({"status": "updated", "Patient_ID": id.parse::<i64>().unwrap_or(0)})))
            }
        }
        "Bills" => {
            let date = body["Date"].as_str().unwrap_or_default();
            let valid = date.is_empty() || (date.len() == 10 && date.as_bytes()[4] == b'-' && date.as_bytes()[7] == b'-');
            if valid {
                (StatusCode::OK, Json(json!({"status": "created", "Payment_ID": 10})))
            } else {
                (StatusCode::BAD_REQUEST, Json(json!({"error": "Invalid date"})))
            }
        }
        "Users" | "Administrators" | "Doctors" | "Departments" | "MedicalRecords" | "Appointments" | "Rooms"
        | "Treatments" => (StatusCode::OK, Json(json!({"status": "created"}))),
        _ => (StatusCode::BAD_REQUEST, Json(json!({"error": "Unsupported type"}))),
    }
}

async fn auto_schedule(State(state): State<StubState>) -> Json<Value> {
    state.hit("POST /api/appointments/auto".to_string());
    Json(json!({"status": "exists", "Date": "2024-05-01", "Time": "09:00", "Doctor_Name": "Smith"}))
}
