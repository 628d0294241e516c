//! Configuration for the vitrine catalog service.
//!
//! Settings come from layered TOML files under `./config` plus
//! `VITRINE__*` environment variable overrides; see [`load_from`] for
//! the merge order.

mod app_config;
mod loader;

pub use app_config::{
    AppConfig, AppMetadata, DatabaseConfig, ObservabilityConfig, RedisConfig, ServerConfig,
};
pub use loader::{load, load_from};
