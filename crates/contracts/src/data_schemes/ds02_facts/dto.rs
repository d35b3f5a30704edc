use serde::{Deserialize, Serialize};

/// Literal status of every payment row; no failure state exists upstream
pub const PAYMENT_STATUS_PAID: &str = "PAID";

/// Session fact.
///
/// `scheduled_player_count`, `is_cancelled` and `session_type` are not tracked
/// by the record store and are always `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSession {
    pub session_id: i32,
    pub centre_id: i32,
    pub coach_id: Option<i32>,
    pub session_date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: Option<i64>,
    pub scheduled_player_count: Option<i64>,
    pub actual_player_count: i64,
    pub is_cancelled: Option<bool>,
    pub session_type: Option<String>,
}

/// One attendance mark joined with its session and player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactAttendance {
    pub attendance_id: i32,
    pub session_id: i32,
    pub player_id: i32,
    pub centre_id: i32,
    pub coach_id: Option<i32>,
    pub session_date: String,
    pub status: String,
    pub program_type: Option<String>,
    /// Not tracked upstream
    pub check_in_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactPayment {
    pub payment_id: i32,
    pub player_id: i32,
    pub centre_id: Option<i32>,
    pub payment_date: String,
    pub amount: f64,
    pub payment_mode: Option<String>,
    pub program_type: Option<String>,
    pub status: String,
    /// Not tracked upstream
    pub invoice_id: Option<String>,
}

/// Trial / website lead fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactTrial {
    pub trial_id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub centre_id: Option<i32>,
    pub program_type: Option<String>,
    pub created_date: String,
    pub status: String,
    pub converted_player_id: Option<i32>,
}

/// Fixture fact. Results and scores are not tracked upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactMatch {
    pub match_id: i32,
    pub centre_id: i32,
    pub coach_id: Option<i32>,
    pub opponent: String,
    pub match_date: String,
    pub match_type: Option<String>,
    pub result: Option<String>,
    pub goals_for: Option<i32>,
    pub goals_against: Option<i32>,
}

/// Per (coach, calendar date) workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCoachLoad {
    pub coach_id: Option<i32>,
    pub date: String,
    pub total_sessions: i64,
    pub total_minutes: i64,
    pub unique_players_coached: i64,
}
