use axum::{extract::Query, http::StatusCode, Json};
use contracts::data_schemes::ds02_facts::{
    FactAttendance, FactCoachLoad, FactMatch, FactPayment, FactSession, FactTrial,
};
use contracts::shared::filters::AnalyticsQuery;

use crate::data_schemes::ds02_facts::{coach_load, service, trial_source};
use crate::shared::data::db::get_connection;

fn respond<T>(what: &str, result: anyhow::Result<Vec<T>>) -> Result<Json<Vec<T>>, StatusCode> {
    match result {
        Ok(rows) => {
            tracing::info!("DS02: Returning {} {} rows", rows.len(), what);
            Ok(Json(rows))
        }
        Err(e) => {
            tracing::error!("DS02: Failed to list {}: {}", what, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/analytics/sessions?centre_id=1&date_from=2024-01-01&date_to=2024-01-31
pub async fn list_sessions(
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<FactSession>>, StatusCode> {
    let result = service::list_fact_sessions(get_connection(), &query.to_fact_filter()).await;
    respond("session", result)
}

/// GET /api/analytics/attendance
pub async fn list_attendance(
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<FactAttendance>>, StatusCode> {
    let result = service::list_fact_attendance(get_connection(), &query.to_fact_filter()).await;
    respond("attendance", result)
}

/// GET /api/analytics/payments
pub async fn list_payments(
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<FactPayment>>, StatusCode> {
    let result = service::list_fact_payments(get_connection(), &query.to_fact_filter()).await;
    respond("payment", result)
}

/// GET /api/analytics/trials
pub async fn list_trials(
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<FactTrial>>, StatusCode> {
    let source = trial_source::get_trial_source();
    let result =
        trial_source::list_fact_trials(get_connection(), source.as_ref(), &query.to_fact_filter())
            .await;
    respond("trial", result)
}

/// GET /api/analytics/matches
pub async fn list_matches(
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<FactMatch>>, StatusCode> {
    let result = service::list_fact_matches(get_connection(), &query.to_fact_filter()).await;
    respond("match", result)
}

/// GET /api/analytics/coach-load
pub async fn list_coach_load(
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Vec<FactCoachLoad>>, StatusCode> {
    let result = coach_load::list_fact_coach_load(get_connection(), &query.to_fact_filter()).await;
    respond("coach load", result)
}
