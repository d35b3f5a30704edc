//! Reporting readers
//!
//! Each scheme projects record store rows into flat dimension or fact records.

pub mod ds01_dimensions;
pub mod ds02_facts;
