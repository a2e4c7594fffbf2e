use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use anyhow::Context;
use roombook_api::{app, AppState};
use roombook_core::BookingRepository;
use roombook_store::app_config::{Backend, Config};
use roombook_store::{DbClient, InMemoryBookingRepository, MongoBookingRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roombook_api=debug,roombook_store=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Roombook API on port {}", config.server.port);

    let bookings = connect_store(&config).await?;
    let app_state = AppState::new(bookings, config.server.store_timeout());

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn BookingRepository>> {
    let database = &config.database;

    match database.backend {
        Backend::Mongo => {
            let url = database.url.as_deref().context("DATABASE_URL is not set")?;
            let name = database.name.as_deref().context("DATABASE_NAME is not set")?;

            let db = DbClient::connect(url, name)
                .await
                .context("Failed to connect to document store")?;

            Ok(Arc::new(MongoBookingRepository::new(&db, &database.collection)))
        }
        Backend::Memory => {
            tracing::warn!("Using in-memory booking store; data is lost on exit");
            Ok(Arc::new(InMemoryBookingRepository::new()))
        }
    }
}
