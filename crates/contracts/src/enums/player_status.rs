use serde::{Deserialize, Serialize};

/// Enrolment status of a student as stored upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerStatus {
    Active,
    Trial,
    Inactive,
}

impl PlayerStatus {
    /// Stored code, e.g. "ACTIVE"
    pub fn code(&self) -> &'static str {
        match self {
            PlayerStatus::Active => "ACTIVE",
            PlayerStatus::Trial => "TRIAL",
            PlayerStatus::Inactive => "INACTIVE",
        }
    }

    /// Parse a stored code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Some(PlayerStatus::Active),
            "TRIAL" => Some(PlayerStatus::Trial),
            "INACTIVE" => Some(PlayerStatus::Inactive),
            _ => None,
        }
    }
}
