use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_scoring::config::AppConfig;
use lead_scoring::error::AppError;
use lead_scoring::telemetry;
use lead_scoring::workflows::scoring::{gateway_from_config, ScoringSession};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let gateway = gateway_from_config(&config.ai);
    let session = Arc::new(ScoringSession::new(gateway));

    let app = with_scoring_routes(session)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, ai_configured = config.ai.is_configured(), "lead scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
