//! In-memory record store for tests

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

const CORE_TABLES: &str = include_str!("../../../../../migrations/0001_core_tables.sql");
const WEBSITE_LEADS: &str = include_str!("../../../../../migrations/0002_website_leads.sql");

/// Fresh single-connection in-memory database with the core schema applied.
/// `with_leads` also applies the website lead migration.
pub async fn memory_db(with_leads: bool) -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();

    exec_script(&db, CORE_TABLES).await;
    if with_leads {
        exec_script(&db, WEBSITE_LEADS).await;
    }
    db
}

/// Run a `;`-separated script one statement at a time
pub async fn exec_script(db: &DatabaseConnection, script: &str) {
    for statement in script.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        db.execute_unprepared(statement).await.unwrap();
    }
}

/// Two centres, a handful of students and one month of activity at centre 1.
pub const ACADEMY_FIXTURE: &str = r#"
INSERT INTO a001_centre (id, name, short_name, city, is_active, display_order) VALUES
    (1, 'North Field', 'NF', 'Pune', 1, 2),
    (2, 'Lakeside', 'LS', 'Pune', 1, 1),
    (3, 'Old Ground', 'OG', 'Pune', 0, 0);

INSERT INTO a002_student (id, full_name, date_of_birth, centre_id, program_type, joining_date, status) VALUES
    (1, 'Asha Rao', '2008-03-15', 1, 'U17', '2023-06-01', 'ACTIVE'),
    (2, 'Dev Nair', '2012-11-02', 1, 'U12', '2024-01-10', 'ACTIVE'),
    (3, 'Kiran Shah', NULL, 1, NULL, '2023-09-01', 'INACTIVE'),
    (4, 'Meera Iyer', '2010-05-20', 2, 'U14', '2023-02-01', 'ACTIVE'),
    (5, 'Rohan Das', '2011-01-01', 1, 'U12', '2024-02-15', 'TRIAL');

INSERT INTO a003_session (id, centre_id, coach_id, session_date, start_time, end_time) VALUES
    (1, 1, 10, '2024-01-05', '16:00', '17:30'),
    (2, 1, 10, '2024-01-05', '18:00', '19:00'),
    (3, 1, 11, '2024-01-12', '16:00', '17:00'),
    (4, 2, 12, '2024-01-05', '07:00', '08:00'),
    (5, 1, 10, '2024-02-02', '16:00', '17:00');

INSERT INTO a004_attendance (id, session_id, student_id, status) VALUES
    (1, 1, 1, 'PRESENT'),
    (2, 1, 2, 'PRESENT'),
    (3, 2, 1, 'PRESENT'),
    (4, 2, 2, 'ABSENT'),
    (5, 3, 2, 'PRESENT'),
    (6, 3, 3, 'ABSENT'),
    (7, 4, 4, 'PRESENT'),
    (8, 5, 1, 'PRESENT');

INSERT INTO a005_payment (id, student_id, centre_id, payment_date, amount, payment_mode) VALUES
    (1, 1, 1, '2024-01-03', 3000, 'UPI'),
    (2, 2, 1, '2024-01-20', 2000, NULL),
    (3, 4, 2, '2024-01-04', 2500, 'CASH'),
    (4, 1, 1, '2024-02-03', 3000, 'UPI');

INSERT INTO a007_fixture (id, centre_id, coach_id, opponent, match_date, match_type) VALUES
    (1, 1, 10, 'City FC', '2024-01-20', 'LEAGUE'),
    (2, 2, 12, 'Harbour XI', '2024-01-21', NULL)
"#;

pub const LEAD_FIXTURE: &str = r#"
INSERT INTO a006_website_lead (id, name, phone, centre_id, program_type, created_at, status, converted_student_id) VALUES
    (1, 'Parent One', '9000000001', 1, 'U12', '2024-01-08', 'CONVERTED', 2),
    (2, 'Parent Two', '9000000002', 1, 'U12', '2024-01-09', 'NEW', NULL),
    (3, 'Parent Three', NULL, 1, 'U17', '2024-01-25', 'CONTACTED', NULL),
    (4, 'Parent Four', NULL, 2, 'U14', '2024-01-11', 'NEW', NULL)
"#;

/// Core schema plus the academy fixture, optionally with leads
pub async fn seeded_db(with_leads: bool) -> DatabaseConnection {
    let db = memory_db(with_leads).await;
    exec_script(&db, ACADEMY_FIXTURE).await;
    if with_leads {
        exec_script(&db, LEAD_FIXTURE).await;
    }
    db
}
