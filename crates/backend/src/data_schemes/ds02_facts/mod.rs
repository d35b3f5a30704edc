pub mod coach_load;
pub mod service;
pub mod trial_source;
