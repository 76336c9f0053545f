use crate::cli::ServeArgs;
use crate::infra::{seed_directory, AppState, Collaborators};
use crate::routes::with_donation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use food_donation::config::AppConfig;
use food_donation::donations::{DonationServiceError, LogMailer, QueuedNotifier};
use food_donation::error::AppError;
use food_donation::telemetry;
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

    let collaborators = Collaborators::default();
    if config.seed_demo_data {
        seed_directory(&collaborators.directory).map_err(DonationServiceError::from)?;
        info!("seeded demo donors and NGOs");
    }

    let (notifier, _mail_worker) =
        QueuedNotifier::spawn(LogMailer::new(config.notifications.mail_from.clone()));
    let manager = Arc::new(collaborators.manager(Arc::new(notifier)));

    let app = with_donation_routes(manager)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "food donation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
