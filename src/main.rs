//! Entry point: load config, wire dependencies, and run the server.

use std::sync::Arc;

use keyring::auth::TokenIssuer;
use keyring::config::Config;
use keyring::db::{self, PgUserStore};
use keyring::{create_app, AppState, UserService};
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let tokens = TokenIssuer::new(&config.jwt_secret)?;
    let db_pool = db::create_pool(&config.database_url).await?;
    let store = PgUserStore::new(db_pool).await?;
    let user_service = UserService::new(Arc::new(store), tokens);

    let app = create_app(AppState::new(user_service))
        .layer(TimeoutLayer::new(config.request_timeout));

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
