pub mod backend;
pub mod errors;
