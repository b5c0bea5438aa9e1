pub mod aggregate;
pub mod api;
pub mod assembler;
pub mod config;
pub mod daily;
pub mod errors;
pub mod extrapolate;
pub mod location;
pub mod logging;
pub mod manager_openweather;
pub mod marine;
pub mod models;
