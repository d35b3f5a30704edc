pub mod dashboards;
pub mod data_schemes;
pub mod enums;
pub mod shared;
pub mod system;
