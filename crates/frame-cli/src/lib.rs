//! CLI library components for `framectl`.

pub mod config;
pub mod logging;
pub mod summary;
