pub mod admin;
pub mod dashboard;
