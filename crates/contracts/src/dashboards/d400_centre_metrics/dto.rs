use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::filters::DateRange;

/// Request for centre metrics: `?centre_id=1&date_from=2024-01-01&date_to=2024-01-31`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentreMetricsRequest {
    pub centre_id: i32,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl CentreMetricsRequest {
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.date_from, self.date_to)
    }
}

/// Metrics bundle for one centre over one date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentreMetrics {
    pub centre_id: i32,
    pub date_range: DateRange,
    pub active_players: i64,
    pub new_players: i64,
    pub dropped_players: i64,
    pub total_sessions: i64,
    /// Percent, 0..=100
    pub attendance_rate: f64,
    pub revenue: f64,
    pub expected_revenue: f64,
    pub outstanding_dues: f64,
    pub total_trials: i64,
    pub converted_trials: i64,
    /// Percent, 0..=100
    pub trial_conversion_rate: f64,
    pub sessions_per_player: f64,
    pub matches_played: i64,
    pub program_breakdown: Vec<ProgramMetrics>,
}

/// Slice of `CentreMetrics` for one program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramMetrics {
    pub program_type: String,
    pub active_players: i64,
    pub sessions: i64,
    pub attendance_rate: f64,
    pub revenue: f64,
}
