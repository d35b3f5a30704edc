// Read-only analytics handlers
pub mod cache;
pub mod d400_centre_metrics;
pub mod d401_global_metrics;
pub mod ds01_dimensions;
pub mod ds02_facts;
