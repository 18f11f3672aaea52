pub mod cache;
pub mod config;
pub mod security;
pub mod telemetry;
pub mod time;
