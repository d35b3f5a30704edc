use axum::{extract::Query, http::StatusCode, Json};
use contracts::data_schemes::ds01_dimensions::{DimCentre, DimPlayer};
use contracts::shared::filters::AnalyticsQuery;

use crate::data_schemes::ds01_dimensions::service;
use crate::shared::data::db::get_connection;

/// GET /api/analytics/centres?centre_id=1
pub async fn list_centres(
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<DimCentre>>, StatusCode> {
    match service::list_dim_centres(get_connection(), &query.to_dimension_filter()).await {
        Ok(centres) => {
            tracing::info!("DS01: Returning {} centres", centres.len());
            Ok(Json(centres))
        }
        Err(e) => {
            tracing::error!("DS01: Failed to list centres: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/analytics/players?centre_id=1&program_type=U12
pub async fn list_players(
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<DimPlayer>>, StatusCode> {
    let today = chrono::Local::now().date_naive();
    match service::list_dim_players(get_connection(), &query.to_dimension_filter(), today).await {
        Ok(players) => {
            tracing::info!("DS01: Returning {} players", players.len());
            Ok(Json(players))
        }
        Err(e) => {
            tracing::error!("DS01: Failed to list players: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
