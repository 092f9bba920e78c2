use crate::cli::ServeArgs;
use crate::infra::{seed_demo_identities, AppState, InMemoryComplaintRepository, StaticTokenVerifier};
use crate::routes::with_complaint_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use civic_report::complaints::{ComplaintService, OpenAiChatClient, PriorityScorer};
use civic_report::config::{AppConfig, AppEnvironment};
use civic_report::error::AppError;
use civic_report::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    let repository = Arc::new(InMemoryComplaintRepository::default());
    let sessions = Arc::new(StaticTokenVerifier::default());
    if config.environment != AppEnvironment::Production {
        seed_demo_identities(&repository, &sessions);
        info!("seeded demo citizen and admin identities");
    }

    if config.scoring.api_key.is_none() {
        warn!("no scoring credential configured; new complaints will use the fallback priority");
    }

    let scoring_client = Arc::new(OpenAiChatClient::from_config(&config.scoring)?);
    let scorer = PriorityScorer::new(scoring_client, config.scoring.model.clone());
    let service = Arc::new(ComplaintService::new(repository, scorer));

    let app = with_complaint_routes(service, sessions)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "complaint triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
