//! HTTP front end for `LoginClient`.
//!
//! Serves the login form, handles its POST, and exposes a JSON API alongside
//! health and metrics endpoints.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::client::LoginClient;
use crate::transport::Transport;
use crate::types::LoginOutcome;
use crate::xml::escape_xml;

/// Application state shared across all requests
struct AppState<T> {
    client: Arc<LoginClient<T>>,
    metrics: Arc<Metrics>,
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Server metrics
struct Metrics {
    total_logins: AtomicU64,
    successful_logins: AtomicU64,
    failed_logins: AtomicU64,
    logins_in_flight: AtomicU64,
    start_time: Instant,
}

impl Metrics {
    fn new() -> Self {
        Self {
            total_logins: AtomicU64::new(0),
            successful_logins: AtomicU64::new(0),
            failed_logins: AtomicU64::new(0),
            logins_in_flight: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    fn record(&self, outcome: &LoginOutcome) {
        let counter = if outcome.is_success() {
            &self.successful_logins
        } else {
            &self.failed_logins
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// RAII guard for tracking in-flight logins
struct InFlightGuard<'a>(&'a AtomicU64);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicU64) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Build the Axum application with routes and middleware
pub fn build_app<T: Transport + 'static>(client: Arc<LoginClient<T>>) -> Router {
    let state = AppState {
        client,
        metrics: Arc::new(Metrics::new()),
    };

    Router::new()
        // Login page and its form POST
        .route("/", get(index))
        .route("/login", post(login_form::<T>))
        // Health check
        .route("/health", get(health_check))
        // API routes
        .route("/api/login", post(login_api::<T>))
        .route("/api/metrics", get(get_metrics::<T>))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn run_login<T: Transport>(state: &AppState<T>, username: &str, password: &str) -> LoginOutcome {
    // Increment metrics, the guard decrements in-flight on exit
    state.metrics.total_logins.fetch_add(1, Ordering::Relaxed);
    let _guard = InFlightGuard::enter(&state.metrics.logins_in_flight);

    let outcome = state.client.login(username, password).await;

    // Count by outcome
    state.metrics.record(&outcome);
    outcome
}

/// Login page
async fn index() -> Html<String> {
    Html(render_page(None))
}

#[derive(Deserialize)]
struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Form POST from the login page
async fn login_form<T: Transport>(
    State(state): State<AppState<T>>,
    Form(form): Form<LoginForm>,
) -> Html<String> {
    let outcome = run_login(&state, &form.username, &form.password).await;
    Html(render_page(Some(&outcome)))
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        match outcome {
            LoginOutcome::Success { rendered_data } => Self {
                success: true,
                data: Some(rendered_data),
                error: None,
            },
            LoginOutcome::Failure { error_message } => Self {
                success: false,
                data: None,
                error: Some(error_message),
            },
        }
    }
}

/// JSON login
async fn login_api<T: Transport>(
    State(state): State<AppState<T>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Reject before spending a round trip on the SOAP endpoint
    if request.username.trim().is_empty() {
        return Err(ApiError::BadRequest("username cannot be empty".to_string()));
    }

    let outcome = run_login(&state, &request.username, &request.password).await;
    Ok(Json(outcome.into()))
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn get_metrics<T: Transport>(State(state): State<AppState<T>>) -> Json<MetricsResponse> {
    let metrics = &state.metrics;
    Json(MetricsResponse {
        total_logins: metrics.total_logins.load(Ordering::Relaxed),
        successful_logins: metrics.successful_logins.load(Ordering::Relaxed),
        failed_logins: metrics.failed_logins.load(Ordering::Relaxed),
        logins_in_flight: metrics.logins_in_flight.load(Ordering::Relaxed),
        uptime_seconds: metrics.start_time.elapsed().as_secs(),
    })
}

#[derive(Serialize)]
struct MetricsResponse {
    total_logins: u64,
    successful_logins: u64,
    failed_logins: u64,
    logins_in_flight: u64,
    uptime_seconds: u64,
}

/// API error types
enum ApiError {
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

fn render_page(outcome: Option<&LoginOutcome>) -> String {
    let banner = match outcome {
        Some(LoginOutcome::Success { rendered_data }) => format!(
            r#"<div class="alert alert-success"><pre>Login successful! User data: {}</pre></div>"#,
            escape_xml(rendered_data)
        ),
        Some(LoginOutcome::Failure { error_message }) => format!(
            r#"<div class="alert alert-danger">{}</div>"#,
            escape_xml(error_message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Login</title>
</head>
<body>
    <h1>Login</h1>
    {banner}
    <form method="post" action="/login">
        <label for="username">Username</label>
        <input type="text" id="username" name="username" required>
        <label for="password">Password</label>
        <input type="password" id="password" name="password" required>
        <button type="submit">Login</button>
    </form>
</body>
</html>
"#
    )
}
