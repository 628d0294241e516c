//! Layered configuration loading.

use crate::AppConfig;
use config::{Config, Environment, File};
use tracing::{debug, info};
use vitrine_core::{VitrineError, VitrineResult};

/// Loads configuration from the conventional `./config` directory.
pub fn load() -> VitrineResult<AppConfig> {
    load_from("./config")
}

/// Loads configuration from `config_dir`.
///
/// Sources are merged in order, later ones winning: `default.toml`, the
/// `VITRINE_ENVIRONMENT` TOML (`development` by default), `local.toml`
/// for uncommitted overrides, and finally `VITRINE__*` environment
/// variables. All files are optional.
pub fn load_from(config_dir: &str) -> VitrineResult<AppConfig> {
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let environment =
        std::env::var("VITRINE_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    info!("Loading configuration for environment: {}", environment);

    let mut builder = Config::builder();
    for name in ["default", environment.as_str(), "local"] {
        let path = format!("{config_dir}/{name}");
        builder = builder.add_source(File::with_name(&path).required(false));
    }
    builder = builder.add_source(
        Environment::with_prefix("VITRINE")
            .separator("__")
            .try_parsing(true),
    );

    let config: AppConfig = builder
        .build()
        .and_then(Config::try_deserialize)
        .map_err(|e| VitrineError::Configuration(e.to_string()))?;

    validate(&config)?;
    Ok(config)
}

/// Rejects configurations that cannot possibly start the service.
fn validate(config: &AppConfig) -> VitrineResult<()> {
    if config.database.url.is_empty() {
        return Err(VitrineError::Configuration(
            "database.url must not be empty".to_string(),
        ));
    }
    if config.redis.enabled && config.redis.url.is_empty() {
        return Err(VitrineError::Configuration(
            "redis.url must not be empty while redis.enabled is true".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_database_url_is_rejected() {
        let mut config = AppConfig::default();
        config.database.url.clear();
        let err = validate(&config).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn empty_redis_url_is_rejected_only_when_enabled() {
        let mut config = AppConfig::default();
        config.redis.url.clear();
        assert!(validate(&config).is_err());

        config.redis.enabled = false;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn missing_config_dir_falls_back_to_defaults() {
        let config = load_from("./does-not-exist").unwrap();
        assert_eq!(config.server.port, 8080);
    }
}
