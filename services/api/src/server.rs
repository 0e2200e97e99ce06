use crate::cli::ServeArgs;
use crate::infra::{load_dataset, AppState, InMemoryAssessmentRepository};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use investor_profile::config::AppConfig;
use investor_profile::error::AppError;
use investor_profile::quiz::AssessmentService;
use investor_profile::telemetry;
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
    if let Some(dataset) = args.dataset.take() {
        config.dataset.path = Some(dataset);
    }

    telemetry::init(&config.telemetry)?;

    let dataset = Arc::new(load_dataset(config.dataset.path.as_deref())?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let assessment_service = Arc::new(AssessmentService::new(dataset.clone(), repository));

    let app = with_assessment_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(Extension(dataset.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        dataset_version = dataset.version(),
        "investor profile service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
