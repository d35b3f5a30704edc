use serde::{Deserialize, Serialize};

/// Attendance mark for one player in one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Absent => "ABSENT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "PRESENT" => Some(AttendanceStatus::Present),
            "ABSENT" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    /// True only for a stored "PRESENT" mark
    pub fn is_present_code(code: &str) -> bool {
        matches!(Self::from_code(code), Some(AttendanceStatus::Present))
    }
}
