use crate::cli::ServeArgs;
use crate::infra::{load_configured_dataset, load_policy, AppState};
use crate::routes::attrition_routes;
use attrition_insight::config::AppConfig;
use attrition_insight::error::AppError;
use attrition_insight::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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
    if let Some(path) = args.csv.take() {
        config.analysis.dataset_path = Some(path);
    }
    if let Some(path) = args.policy.take() {
        config.analysis.policy_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let dataset = load_configured_dataset(&config.analysis)?;
    let policy = load_policy(config.analysis.policy_path.as_deref())?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        dataset: Arc::new(dataset),
        policy: Arc::new(policy),
    };

    let app = attrition_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "attrition insight service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
