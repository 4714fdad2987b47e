use std::sync::Arc;

use backend::{AppState, auth::TokenService, config::Config, create_router, database::Database};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=info,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let tokens = TokenService::new(
        config.signing_secret().as_bytes(),
        chrono::Duration::days(config.token_ttl_days),
    );

    let state = AppState {
        db: Arc::new(db),
        tokens: Arc::new(tokens),
    };
    let app = create_router(state);

    tracing::info!("starting backend on http://{}", config.bind);
    tracing::info!("API endpoints:");
    tracing::info!("  POST /api/signup - Register a user");
    tracing::info!("  POST /api/login - Obtain a session token");
    tracing::info!("  POST /api/route - Shortest and eco routes (token required)");
    tracing::info!("  GET /api/areas - Area catalog");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
