use anyhow::Result;
use contracts::dashboards::d400_centre_metrics::CentreMetrics;
use contracts::dashboards::d401_global_metrics::GlobalMetrics;
use contracts::shared::filters::{DateRange, DimensionFilter};
use futures::future::try_join_all;
use sea_orm::DatabaseConnection;

use crate::dashboards::d400_centre_metrics::service::get_centre_metrics;
use crate::data_schemes::ds01_dimensions::service::list_dim_centres;
use crate::data_schemes::ds02_facts::trial_source::TrialSource;

/// Club-wide rollup over every active centre.
///
/// Centre rollups run concurrently; any failure fails the whole request.
pub async fn get_global_metrics(
    db: &DatabaseConnection,
    trials: &dyn TrialSource,
    range: DateRange,
) -> Result<GlobalMetrics> {
    let centres = list_dim_centres(db, &DimensionFilter::default()).await?;
    tracing::debug!("Global rollup over {} centres", centres.len());

    let per_centre = try_join_all(
        centres
            .iter()
            .map(|c| get_centre_metrics(db, trials, c.centre_id, range)),
    )
    .await?;

    Ok(combine(range, per_centre))
}

/// Sum centre totals; attendance is the plain mean of centre rates
pub fn combine(range: DateRange, centres: Vec<CentreMetrics>) -> GlobalMetrics {
    let centre_count = centres.len();
    let average_attendance_rate = if centre_count == 0 {
        0.0
    } else {
        centres.iter().map(|c| c.attendance_rate).sum::<f64>() / centre_count as f64
    };

    GlobalMetrics {
        date_range: range,
        centre_count: centre_count as i64,
        total_active_players: centres.iter().map(|c| c.active_players).sum(),
        total_sessions: centres.iter().map(|c| c.total_sessions).sum(),
        total_revenue: centres.iter().map(|c| c.revenue).sum(),
        total_trials: centres.iter().map(|c| c.total_trials).sum(),
        average_attendance_rate,
        centres,
    }
}
