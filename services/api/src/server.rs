use crate::cli::ServeArgs;
use crate::infra::{narrator_for, AppState};
use crate::routes::comfort_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use room_comfort::config::AppConfig;
use room_comfort::error::AppError;
use room_comfort::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        narrator: narrator_for(config.narration.mode),
    };

    let app = comfort_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        narration = ?config.narration.mode,
        %addr,
        "room comfort service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
