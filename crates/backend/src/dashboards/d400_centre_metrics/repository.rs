use anyhow::Result;
use chrono::NaiveDate;
use contracts::data_schemes::ds01_dimensions::DimPlayer;
use contracts::data_schemes::ds02_facts::{
    FactAttendance, FactMatch, FactPayment, FactSession, FactTrial,
};
use contracts::shared::filters::{DateRange, DimensionFilter, FactFilter};
use sea_orm::DatabaseConnection;

use crate::data_schemes::ds01_dimensions::service as dimensions;
use crate::data_schemes::ds02_facts::service as facts;
use crate::data_schemes::ds02_facts::trial_source::TrialSource;

/// Everything one centre's metrics are computed from
#[derive(Debug, Clone, Default)]
pub struct CentreFacts {
    pub sessions: Vec<FactSession>,
    pub players: Vec<DimPlayer>,
    pub payments: Vec<FactPayment>,
    pub attendance: Vec<FactAttendance>,
    pub trials: Vec<FactTrial>,
    pub matches: Vec<FactMatch>,
}

/// Issue the six reads for a centre concurrently.
///
/// Players are read for the whole centre (no date filter); every other read is
/// restricted to `range`. The first failing read fails the whole burst.
pub async fn fetch_centre_facts(
    db: &DatabaseConnection,
    trials: &dyn TrialSource,
    centre_id: i32,
    range: DateRange,
    today: NaiveDate,
) -> Result<CentreFacts> {
    let fact_filter = FactFilter::for_centre(centre_id, range);
    let dimension_filter = DimensionFilter::for_centre(centre_id);

    let (sessions, players, payments, attendance, trials, matches) = tokio::try_join!(
        facts::list_fact_sessions(db, &fact_filter),
        dimensions::list_dim_players(db, &dimension_filter, today),
        facts::list_fact_payments(db, &fact_filter),
        facts::list_fact_attendance(db, &fact_filter),
        trials.list_trials(db, &fact_filter),
        facts::list_fact_matches(db, &fact_filter),
    )?;

    Ok(CentreFacts {
        sessions,
        players,
        payments,
        attendance,
        trials,
        matches,
    })
}
