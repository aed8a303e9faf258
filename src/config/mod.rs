//! Configuration module
//!
//! Application settings (`config.toml`), database connection parameters
//! (`.env` / environment) and the first-run setup wizard.

#[allow(clippy::module_inception)]
pub mod config;
pub mod db_config;
pub mod setup;
