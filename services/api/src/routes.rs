use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use earlybird::signup::{signup_router, ContactStore, SignupState, WaitlistStore};

/// Body of the `/health` and `/ready` endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct ServiceStatus {
    pub(crate) status: &'static str,
}

pub(crate) fn with_signup_routes<W, C>(state: SignupState<W, C>) -> axum::Router
where
    W: WaitlistStore + 'static,
    C: ContactStore + 'static,
{
    signup_router(state)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<ServiceStatus> {
    Json(ServiceStatus { status: "ok" })
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let (status, payload) = if ready {
        (StatusCode::OK, ServiceStatus { status: "ready" })
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            ServiceStatus {
                status: "initializing",
            },
        )
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
