//! Metrics dashboards
//!
//! d400 rolls the fact readers up for one centre, d401 fans d400 out over
//! every active centre.

pub mod d400_centre_metrics;
pub mod d401_global_metrics;
