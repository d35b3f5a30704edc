use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d400_centre_metrics::{CentreMetrics, ProgramMetrics};
use contracts::enums::attendance_status::AttendanceStatus;
use contracts::enums::player_status::PlayerStatus;
use contracts::shared::filters::DateRange;
use sea_orm::DatabaseConnection;
use std::collections::{BTreeMap, HashSet};

use super::repository::{self, CentreFacts};
use crate::data_schemes::ds02_facts::trial_source::TrialSource;
use crate::shared::dates::parse_date;

/// Monthly fee assumed per active player when estimating expected revenue.
/// Fees are not tracked as a flat field, so this stands in for them.
pub const PLACEHOLDER_MONTHLY_FEE: f64 = 3000.0;

/// Group key for rows without a program
pub const UNKNOWN_PROGRAM: &str = "Unknown";

/// Fetch and roll up the metrics of one centre
pub async fn get_centre_metrics(
    db: &DatabaseConnection,
    trials: &dyn TrialSource,
    centre_id: i32,
    range: DateRange,
) -> Result<CentreMetrics> {
    let today = chrono::Local::now().date_naive();
    let facts = repository::fetch_centre_facts(db, trials, centre_id, range, today).await?;
    Ok(compute_centre_metrics(centre_id, range, &facts))
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

/// `part / total * 100`, 0 when `total` is 0
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Share of PRESENT marks among the given statuses
pub fn attendance_rate<'a>(statuses: impl IntoIterator<Item = &'a str>) -> f64 {
    let mut total = 0;
    let mut present = 0;
    for status in statuses {
        total += 1;
        if AttendanceStatus::is_present_code(status) {
            present += 1;
        }
    }
    percentage(present, total)
}

/// Share of leads that became players
pub fn trial_conversion_rate(converted: usize, total: usize) -> f64 {
    percentage(converted, total)
}

/// `ceil(range_days / 30)`. An approximation, not calendar months.
pub fn months_in_range(range: &DateRange) -> i64 {
    (range.span_days() as f64 / 30.0).ceil() as i64
}

pub fn expected_revenue(active_players: i64, months: i64) -> f64 {
    active_players as f64 * PLACEHOLDER_MONTHLY_FEE * months as f64
}

/// Never negative
pub fn outstanding_dues(expected: f64, collected: f64) -> f64 {
    (expected - collected).max(0.0)
}

// ---------------------------------------------------------------------------
// Rollup
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ProgramAccumulator {
    active_players: i64,
    sessions: HashSet<i32>,
    statuses: Vec<String>,
    revenue: f64,
}

fn program_key(program: Option<&str>) -> String {
    program
        .filter(|p| !p.is_empty())
        .unwrap_or(UNKNOWN_PROGRAM)
        .to_string()
}

fn is_status(status: &str, wanted: PlayerStatus) -> bool {
    PlayerStatus::from_code(status) == Some(wanted)
}

fn joined(joining_date: &str) -> Option<NaiveDate> {
    parse_date(joining_date)
}

/// Reduce already fetched facts into the metrics bundle. No I/O.
pub fn compute_centre_metrics(centre_id: i32, range: DateRange, facts: &CentreFacts) -> CentreMetrics {
    let active_players = facts
        .players
        .iter()
        .filter(|p| is_status(&p.status, PlayerStatus::Active))
        .count() as i64;
    let new_players = facts
        .players
        .iter()
        .filter(|p| joined(&p.joining_date).is_some_and(|d| range.contains(d)))
        .count() as i64;
    // Heuristic: inactive players who had joined before the end of the range
    let dropped_players = facts
        .players
        .iter()
        .filter(|p| is_status(&p.status, PlayerStatus::Inactive))
        .filter(|p| joined(&p.joining_date).is_some_and(|d| d < range.to))
        .count() as i64;

    let attendance_rate = attendance_rate(facts.attendance.iter().map(|a| a.status.as_str()));

    let revenue: f64 = facts.payments.iter().map(|p| p.amount).sum();
    let expected_revenue = expected_revenue(active_players, months_in_range(&range));
    let outstanding_dues = outstanding_dues(expected_revenue, revenue);

    let total_trials = facts.trials.len();
    let converted_trials = facts
        .trials
        .iter()
        .filter(|t| t.converted_player_id.is_some())
        .count();

    let total_sessions = facts.sessions.len() as i64;
    let sessions_per_player = if active_players == 0 {
        0.0
    } else {
        total_sessions as f64 / active_players as f64
    };

    CentreMetrics {
        centre_id,
        date_range: range,
        active_players,
        new_players,
        dropped_players,
        total_sessions,
        attendance_rate,
        revenue,
        expected_revenue,
        outstanding_dues,
        total_trials: total_trials as i64,
        converted_trials: converted_trials as i64,
        trial_conversion_rate: trial_conversion_rate(converted_trials, total_trials),
        sessions_per_player,
        matches_played: facts.matches.len() as i64,
        program_breakdown: program_breakdown(facts),
    }
}

/// Per-program slice, ordered by program name
pub fn program_breakdown(facts: &CentreFacts) -> Vec<ProgramMetrics> {
    let mut programs: BTreeMap<String, ProgramAccumulator> = BTreeMap::new();

    for player in &facts.players {
        let acc = programs
            .entry(program_key(player.program_type.as_deref()))
            .or_default();
        if is_status(&player.status, PlayerStatus::Active) {
            acc.active_players += 1;
        }
    }

    for mark in &facts.attendance {
        let acc = programs
            .entry(program_key(mark.program_type.as_deref()))
            .or_default();
        acc.sessions.insert(mark.session_id);
        acc.statuses.push(mark.status.clone());
    }

    for payment in &facts.payments {
        programs
            .entry(program_key(payment.program_type.as_deref()))
            .or_default()
            .revenue += payment.amount;
    }

    programs
        .into_iter()
        .map(|(program_type, acc)| ProgramMetrics {
            program_type,
            active_players: acc.active_players,
            sessions: acc.sessions.len() as i64,
            attendance_rate: attendance_rate(acc.statuses.iter().map(String::as_str)),
            revenue: acc.revenue,
        })
        .collect()
}
