pub mod attendance_status;
pub mod player_status;
