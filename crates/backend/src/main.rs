pub mod api;
pub mod dashboards;
pub mod data_schemes;
pub mod domain;
pub mod routes;
pub mod shared;
pub mod system;

use axum::http::{header, Method};
use axum::middleware;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::data_schemes::ds02_facts::trial_source;
use crate::shared::cache::ResponseCache;
use crate::shared::config;
use crate::shared::data::{db, migration_runner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let cfg = config::load_config()?;
    let db_path = config::get_database_path(&cfg)?;

    db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;
    migration_runner::run_migrations(&cfg).await?;

    // Schema is final now; decide once whether lead facts are available
    trial_source::initialize(db::get_connection()).await?;
    system::auth::jwt::initialize(&cfg.auth.jwt_secret);

    let cache = ResponseCache::new(Duration::from_secs(cfg.cache.ttl_seconds));
    tracing::info!("Response cache TTL: {}s", cache.ttl().as_secs());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = routes::configure_routes(cache)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.server.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Academy analytics listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
