pub mod actor;
pub mod types;
