use crate::cli::ServeArgs;
use crate::infra::{AppState, Backend};
use crate::routes::with_api_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use green_basket::config::AppConfig;
use green_basket::error::AppError;
use green_basket::telemetry;
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
    if let Some(path) = args.catalog_csv.take() {
        config.catalog.seed_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let backend = Backend::new(&config.impact);
    if let Some(path) = config.catalog.seed_csv.as_deref() {
        backend.seed_catalog(path, Utc::now())?;
    }

    let app = with_api_routes(&backend)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        weekly_window_days = config.impact.weekly_window_days,
        "green basket service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
