pub mod d400_centre_metrics;
pub mod d401_global_metrics;
