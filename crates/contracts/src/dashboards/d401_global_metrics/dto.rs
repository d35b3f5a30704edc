use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dashboards::d400_centre_metrics::CentreMetrics;
use crate::shared::filters::DateRange;

/// Request for club-wide metrics: `?date_from=2024-01-01&date_to=2024-01-31`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalMetricsRequest {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl GlobalMetricsRequest {
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.date_from, self.date_to)
    }
}

/// Club-wide totals across every active centre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMetrics {
    pub date_range: DateRange,
    pub centre_count: i64,
    pub total_active_players: i64,
    pub total_sessions: i64,
    pub total_revenue: f64,
    pub total_trials: i64,
    /// Unweighted mean of the centres' attendance rates
    pub average_attendance_rate: f64,
    pub centres: Vec<CentreMetrics>,
}
