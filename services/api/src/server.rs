use crate::cli::ServeArgs;
use crate::infra::{seeded_stores, AppState, InMemoryEmployeeStore, InMemorySuggestionStore};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use msk_advisor::auth::{AdminDirectory, InMemorySessionStore, SessionService};
use msk_advisor::clock::SystemClock;
use msk_advisor::config::AppConfig;
use msk_advisor::dashboard::{DashboardContext, DashboardService, EmployeeRosterImporter};
use msk_advisor::error::AppError;
use msk_advisor::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(config.environment, &config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    // Seed the in-memory collections: a CSV roster when one is supplied,
    // otherwise the bundled sample data.
    let (employees, suggestions) = match args.roster.take() {
        Some(path) => {
            let imported = EmployeeRosterImporter::from_path(&path)?;
            info!(count = imported.len(), ?path, "seeded roster from CSV export");
            (
                Arc::new(InMemoryEmployeeStore::with_employees(imported)),
                Arc::new(InMemorySuggestionStore::default()),
            )
        }
        None => seeded_stores(),
    };

    let context = Arc::new(DashboardContext {
        service: DashboardService::new(employees, suggestions, SystemClock),
        sessions: SessionService::with_ttl_hours(
            AdminDirectory::standard(),
            InMemorySessionStore::default(),
            SystemClock,
            config.session.ttl_hours,
        ),
    });

    let app = with_dashboard_routes(context)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "suggestion dashboard service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
