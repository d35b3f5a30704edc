//! Record store tables
//!
//! The admin application owns these tables; analytics only reads them.

pub mod a001_centre;
pub mod a002_student;
pub mod a003_session;
pub mod a004_attendance;
pub mod a005_payment;
pub mod a006_website_lead;
pub mod a007_fixture;
