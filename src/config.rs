use std::env;

pub const DEFAULT_DB_PATH: &str = "./drivealert.db";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database path (`DRIVEALERT_DB`).
    pub db_path: String,
    /// `env_logger` filter directive (`DRIVEALERT_LOG`).
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; blank values fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            db_path: get("DRIVEALERT_DB", DEFAULT_DB_PATH),
            log_filter: get("DRIVEALERT_LOG", DEFAULT_LOG_FILTER),
        }
    }
}
