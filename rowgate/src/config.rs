use config::{Config, Environment, File};
use serde::Deserialize;
use std::{env, path::Path};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: LoggingFormat,
    pub filter: String,
    pub file: Option<LoggingFileConfig>,
    pub buffer_limit: usize,
    pub lossy: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingFileConfig {
    pub format: LoggingFormat,
    pub directory: String,
    pub filename: String,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum LoggingFormat {
    Json,
    Pretty,
    Full,
    Compact,
}

impl AppConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let run_mode = env::var("APP_ENV").unwrap_or_else(|_| "".into());
        Self::load_with_options(path, Some(run_mode), None)
    }

    pub fn load_with_options<P: AsRef<Path>>(
        path: P,
        run_mode: Option<String>,
        overrides: Option<std::collections::HashMap<String, String>>,
    ) -> crate::Result<Self> {
        let run_mode = run_mode.unwrap_or_else(|| "".into());
        let mut builder = Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name(&format!(
                "{}/default",
                path.as_ref().to_string_lossy()
            )))
            // Add in the current environment file
            // Note that this file is _optional_
            .add_source(
                File::with_name(&format!(
                    "{}/{}",
                    path.as_ref().to_string_lossy(),
                    run_mode
                ))
                .required(false),
            )
            // Add in a local configuration file
            // This file should not be committed to git
            .add_source(
                File::with_name(&format!(
                    "{}/local",
                    path.as_ref().to_string_lossy()
                ))
                .required(false),
            )
            // Add in Config from the environment (with a prefix of ROWGATE)
            .add_source(Environment::with_prefix("ROWGATE").separator("_"));

        // Add explicit overrides if provided
        if let Some(overrides) = overrides {
            for (key, value) in overrides {
                builder = builder
                    .set_override(key, value)
                    .map_err(|e| crate::Error::Config(anyhow::anyhow!(e)))?;
            }
        }

        let s = builder
            .build()
            .map_err(|e| crate::Error::Config(anyhow::anyhow!(e)))?;

        // You can deserialize the entire configuration as a struct
        s.try_deserialize()
            .map_err(|e| crate::Error::Config(anyhow::anyhow!(e)))
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf};

    use crate::util::workspace_dir;

    use super::*;

    fn test_config_dir() -> PathBuf {
        workspace_dir().join("configs")
    }

    #[test]
    fn test_load_config() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "database.url".to_string(),
            "postgres://injected_override".to_string(),
        );

        let config = AppConfig::load_with_options(
            &test_config_dir(),
            Some("test".to_string()),
            Some(overrides),
        )
        .expect("Failed to load Config");

        println!("Config: {:#?}", config);
        assert_eq!(config.database.url, "postgres://injected_override");
    }

    #[test]
    fn test_layered_override() {
        // 1. Default load
        let config =
            AppConfig::load_with_options(&test_config_dir(), None, None)
                .expect("Failed to load Config");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.filter, "info");

        // 2. Test environment override (single connection, debug filter)
        let config = AppConfig::load_with_options(
            &test_config_dir(),
            Some("test".to_string()),
            None,
        )
        .expect("Failed to load Config");
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.logging.filter, "debug");

        // 3. Explicit override (simulating env var priority)
        let mut overrides = HashMap::new();
        overrides
            .insert("database.max_connections".to_string(), "9".to_string());

        let config = AppConfig::load_with_options(
            &test_config_dir(),
            None,
            Some(overrides),
        )
        .expect("Failed to load Config");
        assert_eq!(config.database.max_connections, 9);
    }
}
