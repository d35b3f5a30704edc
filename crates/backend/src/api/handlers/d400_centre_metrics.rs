use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d400_centre_metrics::{CentreMetrics, CentreMetricsRequest};

use crate::dashboards::d400_centre_metrics::service;
use crate::data_schemes::ds02_facts::trial_source::get_trial_source;
use crate::shared::data::db::get_connection;

/// GET /api/analytics/centre-metrics?centre_id=1&date_from=2024-01-01&date_to=2024-01-31
pub async fn get_centre_metrics(
    Query(request): Query<CentreMetricsRequest>,
) -> Result<Json<CentreMetrics>, StatusCode> {
    tracing::info!(
        "D400: Centre {} metrics for {}..{}",
        request.centre_id,
        request.date_from,
        request.date_to
    );

    let trials = get_trial_source();
    match service::get_centre_metrics(
        get_connection(),
        trials.as_ref(),
        request.centre_id,
        request.date_range(),
    )
    .await
    {
        Ok(metrics) => Ok(Json(metrics)),
        Err(e) => {
            tracing::error!("D400: Failed to compute centre {} metrics: {}", request.centre_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
