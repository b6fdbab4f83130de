use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryContacts, InMemoryWaitlist};
use crate::routes::with_signup_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use earlybird::config::AppConfig;
use earlybird::error::AppError;
use earlybird::signup::{ContactAdmission, SignupState, StatsReporter, WaitlistAdmission};
use earlybird::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let waitlist_store = Arc::new(InMemoryWaitlist::default());
    let contact_store = Arc::new(InMemoryContacts::default());
    let signup_state = SignupState {
        waitlist: Arc::new(WaitlistAdmission::new(
            waitlist_store.clone(),
            config.admission,
        )),
        contact: Arc::new(ContactAdmission::new(contact_store, config.admission)),
        stats: Arc::new(StatsReporter::new(waitlist_store, config.admission)),
    };

    let app = with_signup_routes(signup_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        capacity = config.admission.max_waitlist_entries,
        "earlybird signup service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
