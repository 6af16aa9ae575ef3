use anyhow::Context;
use bontho::application::{BatchInviteWorkflow, DemoCallService, ResponseHandler};
use bontho::config::Config;
use bontho::domain::dispatch::{CallDispatcher, CallbackUrls};
use bontho::domain::invitation::{InvitationRepository, PhoneHasher};
use bontho::domain::numbering::NumberNormalizer;
use bontho::domain::shared::value_objects::Region;
use bontho::infrastructure::content::{HttpContentConfig, HttpContentSource};
use bontho::infrastructure::persistence::InMemoryInvitationRepository;
use bontho::infrastructure::telephony::{TwilioCallProvider, TwilioConfig};
use bontho::interface::api::{build_router, init_metrics, AppState};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "postgres")]
use bontho::infrastructure::persistence::{create_pool, run_migrations, PgInvitationRepository, PoolConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Bontho invitation service");

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;
    info!("Configuration loaded: {:?}", config);

    let prometheus_handle = init_metrics().context("failed to install metrics recorder")?;
    info!("Prometheus metrics exporter initialized");

    let repository = build_repository(&config).await?;

    let region = Region::parse(&config.numbering.region)?;
    info!("Numbering region: {}", region);
    let normalizer = NumberNormalizer::new(region);
    let callbacks = CallbackUrls::new(&config.callbacks.base_url)?;

    let provider = TwilioCallProvider::new(TwilioConfig {
        account_sid: config.telephony.account_sid.clone(),
        auth_token: config.telephony.auth_token.clone(),
        api_base_url: config.telephony.api_base_url.clone(),
        request_timeout: Duration::from_secs(config.telephony.request_timeout_secs),
    })?;
    if config.telephony.from_number.is_empty() {
        warn!("telephony.from_number is not set; the provider will reject calls");
    }
    let dispatcher = Arc::new(CallDispatcher::new(
        Arc::new(provider),
        config.telephony.from_number.clone(),
    ));

    let content = HttpContentSource::new(HttpContentConfig {
        content_url: config.content.content_url.clone(),
        neural_net_url: config.content.neural_net_url.clone(),
        request_timeout: Duration::from_secs(config.content.request_timeout_secs),
    })?;

    let state = AppState {
        invite_workflow: Arc::new(BatchInviteWorkflow::new(
            normalizer.clone(),
            dispatcher.clone(),
            callbacks.clone(),
            repository.clone(),
            PhoneHasher::new(config.invitations.phone_hash_cost),
        )),
        response_handler: Arc::new(ResponseHandler::new(repository)),
        demo_calls: Arc::new(DemoCallService::new(
            normalizer,
            dispatcher,
            callbacks,
            Arc::new(content),
        )),
        api_key: Arc::from(config.auth.api_key.as_str()),
    };

    let app = build_router(state, prometheus_handle);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down Bontho invitation service");
    Ok(())
}

#[cfg(feature = "postgres")]
async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn InvitationRepository>> {
    if config.database.url.is_empty() {
        warn!("No database configured, invitations are kept in memory only");
        return Ok(Arc::new(InMemoryInvitationRepository::new()));
    }

    info!("Initializing database connection...");
    let pool = create_pool(&PoolConfig::from(&config.database)).await?;
    info!("Database connection pool created");

    info!("Running database migrations...");
    run_migrations(&pool).await?;
    info!("Database migrations completed");

    Ok(Arc::new(PgInvitationRepository::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn build_repository(_config: &Config) -> anyhow::Result<Arc<dyn InvitationRepository>> {
    warn!("Built without postgres support, invitations are kept in memory only");
    Ok(Arc::new(InMemoryInvitationRepository::new()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
