pub mod cache;
pub mod gamma_api;
pub mod types;
