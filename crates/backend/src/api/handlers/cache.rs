use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::shared::cache::ResponseCache;

/// DELETE /api/analytics/cache
pub async fn clear_cache(State(cache): State<ResponseCache>) -> Json<Value> {
    let cleared = cache.clear().await;
    tracing::info!("Response cache cleared ({} entries)", cleared);
    Json(json!({ "cleared": cleared }))
}
