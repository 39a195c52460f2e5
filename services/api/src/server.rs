use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState};
use crate::routes::with_compat_routes;
use crate::service::CompatService;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use birthday_compat::compat::TracingStatementLog;
use birthday_compat::config::AppConfig;
use birthday_compat::error::AppError;
use birthday_compat::telemetry;
use birthday_compat::upstream::{ChartFetcher, UpstreamGateway};
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

    let gateway = Arc::new(UpstreamGateway::new(&config.upstream)?);
    let charts = ChartFetcher::new(gateway.clone());
    let engine = build_engine(&config.profile, Arc::new(TracingStatementLog));
    let service = Arc::new(CompatService::new(engine, charts, config.profile.birth));

    let app = with_compat_routes(service, gateway)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        profile = %config.profile.name,
        allowed = ?config.upstream.allowed_prefixes,
        "birthday compatibility service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
