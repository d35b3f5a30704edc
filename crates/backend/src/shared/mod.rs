pub mod cache;
pub mod config;
pub mod data;
pub mod dates;
pub mod format;
