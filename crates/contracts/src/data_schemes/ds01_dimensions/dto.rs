use serde::{Deserialize, Serialize};

/// Centre dimension row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimCentre {
    pub centre_id: i32,
    pub centre_name: String,
    pub short_name: Option<String>,
    pub locality: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

/// Player (student) dimension row. `age` is derived at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimPlayer {
    pub player_id: i32,
    pub full_name: String,
    /// "YYYY-MM-DD"
    pub date_of_birth: Option<String>,
    pub age: Option<i32>,
    pub centre_id: Option<i32>,
    pub program_type: Option<String>,
    /// "YYYY-MM-DD"
    pub joining_date: String,
    pub status: String,
    pub monthly_fee: Option<f64>,
}
