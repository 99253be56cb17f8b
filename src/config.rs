use std::{
    env,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer (got {value:?})")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool_size: u32,
    pub workers: usize,
    pub allowed_origins: Vec<String>,
}

/// Loads `./.env` into the process environment, returning its path if one was read.
///
/// Runs before the logger is initialised so a `RUST_LOG` in the file takes effect.
pub fn load_dotenv() -> Option<PathBuf> {
    let path = env::current_dir().ok()?.join(".env");
    load_dotenv_from(&path).then_some(path)
}

pub fn load_dotenv_from(path: &Path) -> bool {
    dotenvy::from_path(path).is_ok()
}

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173,http://localhost:8080";

impl Config {
    /// Reads the process environment; call [`load_dotenv`] first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let allowed_origins = get("CORS_ALLOWED_ORIGINS", DEFAULT_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Config {
            database_url: get("DATABASE_URL", "chat.db"),
            host: get("SERVER_HOST", "127.0.0.1"),
            port: positive("SERVER_PORT", get("SERVER_PORT", "8080"))?,
            pool_size: positive("DATABASE_POOL_SIZE", get("DATABASE_POOL_SIZE", "8"))?,
            workers: positive("SERVER_WORKERS", get("SERVER_WORKERS", "2"))?,
            allowed_origins,
        })
    }
}

fn positive<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn dotenv_file_is_loaded_into_the_environment() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(".env");
        std::fs::write(&path, "CHAT_DIRECTORY_TEST_FILTER=debug\n").unwrap();

        assert!(load_dotenv_from(&path));
        assert_eq!(env::var("CHAT_DIRECTORY_TEST_FILTER").as_deref(), Ok("debug"));
        assert!(!load_dotenv_from(&dir.path().join("missing.env")));
    }

    #[test]
    fn defaults() {
        let config = config_with(&[]).unwrap();

        assert_eq!(config.database_url, "chat.db");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.pool_size, 8);
        assert_eq!(config.workers, 2);
        assert_eq!(config.allowed_origins.len(), 3);
    }

    #[test]
    fn overrides() {
        let config = config_with(&[
            ("DATABASE_URL", "/tmp/rooms.db"),
            ("SERVER_PORT", "9000"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();

        assert_eq!(config.database_url, "/tmp/rooms.db");
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert_eq!(
            config_with(&[("DATABASE_POOL_SIZE", "0")]),
            Err(ConfigError::Invalid {
                key: "DATABASE_POOL_SIZE",
                value: "0".to_string()
            })
        );
        assert!(config_with(&[("SERVER_PORT", "http")]).is_err());
        assert!(config_with(&[("SERVER_WORKERS", "-1")]).is_err());
    }
}
