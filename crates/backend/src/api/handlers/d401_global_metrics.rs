use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d401_global_metrics::{GlobalMetrics, GlobalMetricsRequest};

use crate::dashboards::d401_global_metrics::service;
use crate::data_schemes::ds02_facts::trial_source::get_trial_source;
use crate::shared::data::db::get_connection;

/// GET /api/analytics/global-metrics?date_from=2024-01-01&date_to=2024-01-31
pub async fn get_global_metrics(
    Query(request): Query<GlobalMetricsRequest>,
) -> Result<Json<GlobalMetrics>, StatusCode> {
    let trials = get_trial_source();
    match service::get_global_metrics(get_connection(), trials.as_ref(), request.date_range()).await
    {
        Ok(metrics) => {
            tracing::info!(
                "D401: Global metrics over {} centres, revenue {:.2}",
                metrics.centre_count,
                metrics.total_revenue
            );
            Ok(Json(metrics))
        }
        Err(e) => {
            tracing::error!("D401: Failed to compute global metrics: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
