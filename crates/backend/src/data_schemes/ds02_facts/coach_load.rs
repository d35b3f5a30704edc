use anyhow::Result;
use contracts::data_schemes::ds02_facts::FactCoachLoad;
use contracts::enums::attendance_status::AttendanceStatus;
use contracts::shared::filters::FactFilter;
use sea_orm::DatabaseConnection;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::service::{duration_minutes, load_sessions_with_marks};
use crate::domain::{a003_session, a004_attendance};
use crate::shared::dates::date_key;

#[derive(Debug, Default)]
struct CoachDay {
    total_sessions: i64,
    total_minutes: i64,
    players: HashSet<i32>,
}

/// Coach workload per calendar day, derived from the session read
pub async fn list_fact_coach_load(
    db: &DatabaseConnection,
    filter: &FactFilter,
) -> Result<Vec<FactCoachLoad>> {
    let (sessions, marks) = load_sessions_with_marks(db, filter).await?;
    Ok(build_coach_load(&sessions, &marks))
}

/// Group sessions by `(coach, session date)`.
///
/// The bucket date is the session's stored calendar date. A player present at
/// several sessions of the same coach on one day is counted once.
pub fn build_coach_load(
    sessions: &[a003_session::repository::Model],
    marks: &[a004_attendance::repository::Model],
) -> Vec<FactCoachLoad> {
    let mut present_by_session: HashMap<i32, Vec<i32>> = HashMap::new();
    for mark in marks {
        if AttendanceStatus::is_present_code(&mark.status) {
            present_by_session
                .entry(mark.session_id)
                .or_default()
                .push(mark.student_id);
        }
    }

    let mut days: BTreeMap<(String, Option<i32>), CoachDay> = BTreeMap::new();
    for session in sessions {
        let day = days
            .entry((date_key(&session.session_date), session.coach_id))
            .or_default();
        day.total_sessions += 1;
        day.total_minutes +=
            duration_minutes(&session.start_time, &session.end_time).unwrap_or(0);
        if let Some(players) = present_by_session.get(&session.id) {
            day.players.extend(players.iter().copied());
        }
    }

    days.into_iter()
        .map(|((date, coach_id), day)| FactCoachLoad {
            coach_id,
            date,
            total_sessions: day.total_sessions,
            total_minutes: day.total_minutes,
            unique_players_coached: day.players.len() as i64,
        })
        .collect()
}
