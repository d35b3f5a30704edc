//! Flat reporting rows
//!
//! Dimension and fact records keep warehouse-style snake_case field names.

pub mod ds01_dimensions;
pub mod ds02_facts;
