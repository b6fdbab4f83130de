use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use super::domain::{AdmittedSignup, ContactRequest, SignupRequest};
use super::service::{AdmissionError, ContactAdmission, Rejection, WaitlistAdmission};
use super::stats::StatsReporter;
use super::store::{ContactStore, WaitlistStore};

/// Shared state behind the signup routes. Cloning only bumps ref-counts.
pub struct SignupState<W, C> {
    pub waitlist: Arc<WaitlistAdmission<W>>,
    pub contact: Arc<ContactAdmission<C>>,
    pub stats: Arc<StatsReporter<W>>,
}

impl<W, C> Clone for SignupState<W, C> {
    fn clone(&self) -> Self {
        Self {
            waitlist: Arc::clone(&self.waitlist),
            contact: Arc::clone(&self.contact),
            stats: Arc::clone(&self.stats),
        }
    }
}

/// Router builder exposing the waitlist, contact, and stats endpoints.
pub fn signup_router<W, C>(state: SignupState<W, C>) -> Router
where
    W: WaitlistStore + 'static,
    C: ContactStore + 'static,
{
    Router::new()
        .route("/api/v1/waitlist", post(signup_handler::<W, C>))
        .route("/api/v1/contact", post(contact_handler::<W, C>))
        .route("/api/v1/waitlist/stats", get(stats_handler::<W, C>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignupPayload {
    pub(crate) name: String,
    pub(crate) email: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContactPayload {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) subject: String,
    pub(crate) message: String,
}

/// Public view of a successful signup.
#[derive(Debug, Serialize)]
pub struct SignupConfirmation {
    pub position: u64,
    pub status: &'static str,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

impl From<AdmittedSignup> for SignupConfirmation {
    fn from(admitted: AdmittedSignup) -> Self {
        Self {
            position: admitted.position,
            status: admitted.entry.status.label(),
            email: admitted.entry.email,
            joined_at: admitted.entry.joined_at,
        }
    }
}

/// Extract the client IP and user agent the way the reverse proxy presents
/// them. Both fall back to "unknown" rather than failing the request.
pub(crate) fn client_meta(headers: &HeaderMap) -> (String, String) {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    (ip_address, user_agent)
}

pub(crate) async fn signup_handler<W, C>(
    State(state): State<SignupState<W, C>>,
    headers: HeaderMap,
    Json(payload): Json<SignupPayload>,
) -> Response
where
    W: WaitlistStore + 'static,
    C: ContactStore + 'static,
{
    let (ip_address, user_agent) = client_meta(&headers);
    let request = SignupRequest {
        name: payload.name,
        email: payload.email,
        ip_address,
        user_agent,
    };

    match state.waitlist.admit(request) {
        Ok(admitted) => {
            info!(position = admitted.position, "waitlist signup admitted");
            let view = SignupConfirmation::from(admitted);
            (StatusCode::CREATED, Json(view)).into_response()
        }
        Err(error) => admission_error_response("waitlist", error),
    }
}

pub(crate) async fn contact_handler<W, C>(
    State(state): State<SignupState<W, C>>,
    headers: HeaderMap,
    Json(payload): Json<ContactPayload>,
) -> Response
where
    W: WaitlistStore + 'static,
    C: ContactStore + 'static,
{
    let (ip_address, user_agent) = client_meta(&headers);
    let request = ContactRequest {
        name: payload.name,
        email: payload.email,
        subject: payload.subject,
        message: payload.message,
        ip_address,
        user_agent,
    };

    match state.contact.admit(request) {
        Ok(entry) => {
            info!("contact submission accepted");
            let view = json!({
                "status": "received",
                "created_at": entry.created_at,
            });
            (StatusCode::ACCEPTED, Json(view)).into_response()
        }
        Err(error) => admission_error_response("contact", error),
    }
}

pub(crate) async fn stats_handler<W, C>(State(state): State<SignupState<W, C>>) -> Response
where
    W: WaitlistStore + 'static,
    C: ContactStore + 'static,
{
    match state.stats.waitlist_stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(error) => {
            error!(%error, "stats query failed");
            internal_error_response()
        }
    }
}

fn admission_error_response(pipeline: &'static str, error: AdmissionError) -> Response {
    match error {
        AdmissionError::Rejected(rejection) => {
            warn!(pipeline, code = rejection.code(), "submission rejected");
            let payload = json!({
                "error": rejection.to_string(),
                "code": rejection.code(),
            });
            (rejection_status(rejection), Json(payload)).into_response()
        }
        AdmissionError::Store(error) => {
            error!(pipeline, %error, "store failure during admission");
            internal_error_response()
        }
    }
}

fn rejection_status(rejection: Rejection) -> StatusCode {
    match rejection {
        Rejection::InvalidName
        | Rejection::InvalidEmail
        | Rejection::InvalidSubject
        | Rejection::InvalidMessage => StatusCode::UNPROCESSABLE_ENTITY,
        Rejection::DuplicateEmail | Rejection::WaitlistFull => StatusCode::CONFLICT,
        Rejection::IpRateLimited => StatusCode::TOO_MANY_REQUESTS,
    }
}

fn internal_error_response() -> Response {
    let payload = json!({ "error": "internal error" });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
