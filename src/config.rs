use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DATA_FILE_ENV_VAR: &str = "PANTRY_DATA_FILE";
pub const FEEDBACK_DELAY_ENV_VAR: &str = "PANTRY_FEEDBACK_DELAY_MS";
pub const LOG_ENV_VAR: &str = "PANTRY_LOG";

const DEFAULT_DATA_FILE: &str = "pantry.json";
const DEFAULT_FEEDBACK_DELAY_MS: u64 = 500;
const DEFAULT_LOG_FILTER: &str = "pantry_planner=info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_file: PathBuf,
    /// How long a bought staple stays visibly checked before it leaves the list.
    pub feedback_delay: Duration,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            feedback_delay: Duration::from_millis(DEFAULT_FEEDBACK_DELAY_MS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = lookup(DATA_FILE_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_file = PathBuf::from(path);
        }
        if let Some(raw) = lookup(FEEDBACK_DELAY_ENV_VAR) {
            let ms: u64 = raw.trim().parse().with_context(|| {
                format!(
                    "{} must be a whole number of milliseconds, got '{}'",
                    FEEDBACK_DELAY_ENV_VAR, raw
                )
            })?;
            config.feedback_delay = Duration::from_millis(ms);
        }
        if let Some(filter) = lookup(LOG_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (DATA_FILE_ENV_VAR, "/tmp/house.json"),
            (FEEDBACK_DELAY_ENV_VAR, " 0 "),
            (LOG_ENV_VAR, "pantry_planner=debug"),
        ]))
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/house.json"));
        assert_eq!(config.feedback_delay, Duration::ZERO);
        assert_eq!(config.log_filter, "pantry_planner=debug");
    }

    #[test]
    fn test_invalid_delay_is_an_error() {
        let err =
            Config::from_lookup(lookup_from(&[(FEEDBACK_DELAY_ENV_VAR, "soon")])).unwrap_err();
        assert!(err.to_string().contains(FEEDBACK_DELAY_ENV_VAR));
    }
}
