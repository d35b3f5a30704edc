use anyhow::Result;
use contracts::data_schemes::ds02_facts::{
    FactAttendance, FactMatch, FactPayment, FactSession, PAYMENT_STATUS_PAID,
};
use contracts::enums::attendance_status::AttendanceStatus;
use contracts::shared::filters::FactFilter;
use sea_orm::DatabaseConnection;
use std::collections::{BTreeSet, HashMap};

use crate::domain::{a002_student, a003_session, a004_attendance, a005_payment, a007_fixture};
use crate::shared::dates::{date_key, parse_wall_clock};

type SessionModel = a003_session::repository::Model;
type AttendanceModel = a004_attendance::repository::Model;
type StudentModel = a002_student::repository::Model;
type PaymentModel = a005_payment::repository::Model;
type FixtureModel = a007_fixture::repository::Model;

/// Minutes between two same-day wall-clock strings.
/// `None` when either side does not parse or the end precedes the start.
pub fn duration_minutes(start_time: &str, end_time: &str) -> Option<i64> {
    let start = parse_wall_clock(start_time)?;
    let end = parse_wall_clock(end_time)?;
    let minutes = (end - start).num_minutes();
    (minutes >= 0).then_some(minutes)
}

/// Sessions in scope together with their attendance marks
pub(crate) async fn load_sessions_with_marks(
    db: &DatabaseConnection,
    filter: &FactFilter,
) -> Result<(Vec<SessionModel>, Vec<AttendanceModel>)> {
    let sessions =
        a003_session::repository::list(db, filter.centre_id, filter.date_range.as_ref()).await?;
    let session_ids: Vec<i32> = sessions.iter().map(|s| s.id).collect();
    let marks = a004_attendance::repository::list_by_sessions(db, session_ids).await?;
    Ok((sessions, marks))
}

async fn load_students(db: &DatabaseConnection, ids: BTreeSet<i32>) -> Result<Vec<StudentModel>> {
    a002_student::repository::list_by_ids(db, ids.into_iter().collect()).await
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

pub async fn list_fact_sessions(
    db: &DatabaseConnection,
    filter: &FactFilter,
) -> Result<Vec<FactSession>> {
    let (sessions, marks) = load_sessions_with_marks(db, filter).await?;
    Ok(project_sessions(sessions, &marks))
}

pub fn project_sessions(sessions: Vec<SessionModel>, marks: &[AttendanceModel]) -> Vec<FactSession> {
    let mut present: HashMap<i32, i64> = HashMap::new();
    for mark in marks {
        if AttendanceStatus::is_present_code(&mark.status) {
            *present.entry(mark.session_id).or_insert(0) += 1;
        }
    }

    sessions
        .into_iter()
        .map(|s| FactSession {
            session_id: s.id,
            centre_id: s.centre_id,
            coach_id: s.coach_id,
            session_date: date_key(&s.session_date),
            duration_minutes: duration_minutes(&s.start_time, &s.end_time),
            start_time: s.start_time,
            end_time: s.end_time,
            scheduled_player_count: None,
            actual_player_count: present.get(&s.id).copied().unwrap_or(0),
            is_cancelled: None,
            session_type: None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

pub async fn list_fact_attendance(
    db: &DatabaseConnection,
    filter: &FactFilter,
) -> Result<Vec<FactAttendance>> {
    let (sessions, marks) = load_sessions_with_marks(db, filter).await?;
    let students = load_students(db, marks.iter().map(|m| m.student_id).collect()).await?;
    Ok(project_attendance(
        &sessions,
        marks,
        &students,
        filter.program_type.as_deref(),
    ))
}

pub fn project_attendance(
    sessions: &[SessionModel],
    marks: Vec<AttendanceModel>,
    students: &[StudentModel],
    program_filter: Option<&str>,
) -> Vec<FactAttendance> {
    let sessions_by_id: HashMap<i32, &SessionModel> = sessions.iter().map(|s| (s.id, s)).collect();
    let students_by_id: HashMap<i32, &StudentModel> = students.iter().map(|s| (s.id, s)).collect();

    marks
        .into_iter()
        .filter_map(|mark| {
            let session = sessions_by_id.get(&mark.session_id)?;
            let program_type = students_by_id
                .get(&mark.student_id)
                .and_then(|s| s.program_type.clone());

            if let Some(wanted) = program_filter {
                if program_type.as_deref() != Some(wanted) {
                    return None;
                }
            }

            Some(FactAttendance {
                attendance_id: mark.id,
                session_id: mark.session_id,
                player_id: mark.student_id,
                centre_id: session.centre_id,
                coach_id: session.coach_id,
                session_date: date_key(&session.session_date),
                status: mark.status,
                program_type,
                check_in_time: None,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

pub async fn list_fact_payments(
    db: &DatabaseConnection,
    filter: &FactFilter,
) -> Result<Vec<FactPayment>> {
    let payments =
        a005_payment::repository::list(db, filter.centre_id, filter.date_range.as_ref()).await?;
    let students = load_students(db, payments.iter().map(|p| p.student_id).collect()).await?;
    Ok(project_payments(
        payments,
        &students,
        filter.centre_id,
        filter.program_type.as_deref(),
    ))
}

/// A payment without a recorded centre is attributed to its student's centre.
pub fn project_payments(
    payments: Vec<PaymentModel>,
    students: &[StudentModel],
    centre_filter: Option<i32>,
    program_filter: Option<&str>,
) -> Vec<FactPayment> {
    let students_by_id: HashMap<i32, &StudentModel> = students.iter().map(|s| (s.id, s)).collect();

    payments
        .into_iter()
        .filter_map(|p| {
            let student = students_by_id.get(&p.student_id);
            let centre_id = p.centre_id.or_else(|| student.and_then(|s| s.centre_id));
            let program_type = student.and_then(|s| s.program_type.clone());

            if centre_filter.is_some() && centre_id != centre_filter {
                return None;
            }
            if let Some(wanted) = program_filter {
                if program_type.as_deref() != Some(wanted) {
                    return None;
                }
            }

            Some(FactPayment {
                payment_id: p.id,
                player_id: p.student_id,
                centre_id,
                payment_date: date_key(&p.payment_date),
                amount: p.amount,
                payment_mode: p.payment_mode,
                program_type,
                status: PAYMENT_STATUS_PAID.to_string(),
                invoice_id: None,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

pub async fn list_fact_matches(
    db: &DatabaseConnection,
    filter: &FactFilter,
) -> Result<Vec<FactMatch>> {
    let fixtures =
        a007_fixture::repository::list(db, filter.centre_id, filter.date_range.as_ref()).await?;
    Ok(fixtures.into_iter().map(project_match).collect())
}

fn project_match(m: FixtureModel) -> FactMatch {
    FactMatch {
        match_id: m.id,
        centre_id: m.centre_id,
        coach_id: m.coach_id,
        opponent: m.opponent,
        match_date: date_key(&m.match_date),
        match_type: m.match_type,
        result: None,
        goals_for: None,
        goals_against: None,
    }
}
