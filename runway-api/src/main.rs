use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use runway_api::{app, AppState};
use runway_pass::{AssetStore, BoardingPassService, Compositor, FontPainter, StyleRegistry};
use runway_store::{Config, DbClient, PostgresBookingRepository, PostgresStyleConfigRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runway_api=debug,runway_pass=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Runway API on port {}", config.server.port);

    let db = DbClient::new(&config.database)
        .await
        .context("Failed to connect to Postgres")?;
    db.migrate().await.context("Failed to run migrations")?;

    let font_file = config.boarding.font_file();
    let painter = FontPainter::from_file(&font_file)
        .with_context(|| format!("Failed to load font {}", font_file.display()))?;
    let registry = StyleRegistry::builtin()
        .with_aliases(&config.boarding.aliases)
        .context("Invalid boarding style aliases")?;
    tracing::info!(styles = ?registry.names(), assets = %config.boarding.assets_dir.display(), "Boarding styles loaded");

    let passes = BoardingPassService::new(
        Arc::new(PostgresBookingRepository::new(db.pool.clone())),
        Arc::new(PostgresStyleConfigRepository::new(db.pool.clone())),
        Arc::new(registry),
        Arc::new(Compositor::new(
            AssetStore::new(&config.boarding.assets_dir),
            Arc::new(painter),
        )),
    );

    let app = app(AppState {
        passes: Arc::new(passes),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
