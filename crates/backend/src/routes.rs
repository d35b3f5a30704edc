use axum::{
    middleware,
    routing::{delete, get},
    Router,
};

use crate::api::handlers;
use crate::shared::cache::{cache_layer, ResponseCache};
use crate::system::auth::middleware::{optional_auth, require_admin};

/// All application routes.
///
/// Analytics GETs go through the response cache; identity is resolved first
/// so the cache can key by user.
pub fn configure_routes(cache: ResponseCache) -> Router {
    let analytics = Router::new()
        // DS01 dimensions
        .route("/centres", get(handlers::ds01_dimensions::list_centres))
        .route("/players", get(handlers::ds01_dimensions::list_players))
        // DS02 facts
        .route("/sessions", get(handlers::ds02_facts::list_sessions))
        .route("/attendance", get(handlers::ds02_facts::list_attendance))
        .route("/payments", get(handlers::ds02_facts::list_payments))
        .route("/trials", get(handlers::ds02_facts::list_trials))
        .route("/matches", get(handlers::ds02_facts::list_matches))
        .route("/coach-load", get(handlers::ds02_facts::list_coach_load))
        // D400 / D401 rollups
        .route(
            "/centre-metrics",
            get(handlers::d400_centre_metrics::get_centre_metrics),
        )
        .route(
            "/global-metrics",
            get(handlers::d401_global_metrics::get_global_metrics),
        )
        // Maintenance
        .route(
            "/cache",
            delete(handlers::cache::clear_cache).layer(middleware::from_fn(require_admin)),
        )
        .with_state(cache.clone())
        .layer(middleware::from_fn_with_state(cache, cache_layer))
        .layer(middleware::from_fn(optional_auth));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api/analytics", analytics)
}
