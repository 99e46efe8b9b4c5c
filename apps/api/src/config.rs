use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::engine::{AtsRubric, DEFAULT_SUGGESTION_LIMIT};

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset values take the documented defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory for the file-backed store. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub skill_suggest_delay: Duration,
    pub suggestion_limit: usize,
    pub ats_rubric_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            data_dir: None,
            skill_suggest_delay: Duration::from_millis(800),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            ats_rubric_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT")?.unwrap_or(defaults.port),
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            data_dir: optional_env("DATA_DIR").map(PathBuf::from),
            skill_suggest_delay: parse_env::<u64>("SKILL_SUGGEST_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.skill_suggest_delay),
            suggestion_limit: parse_env("SUGGESTION_LIMIT")?.unwrap_or(defaults.suggestion_limit),
            ats_rubric_path: optional_env("ATS_RUBRIC_PATH").map(PathBuf::from),
        })
    }

    /// Reads the rubric override file, or the built-in rubric when none is set.
    pub fn load_rubric(&self) -> Result<AtsRubric> {
        let Some(path) = &self.ats_rubric_path else {
            return Ok(AtsRubric::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ATS rubric at {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("ATS rubric at {} is not valid JSON", path.display()))
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_rubric_when_no_path() {
        let rubric = Config::default().load_rubric().unwrap();
        assert_eq!(rubric, AtsRubric::default());
    }

    #[test]
    fn test_rubric_file_overrides_weights() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"weights":{{"phone":20}},"min_skill_count":3}}"#).unwrap();
        let config = Config {
            ats_rubric_path: Some(file.path().to_path_buf()),
            ..Config::default()
        };
        let rubric = config.load_rubric().unwrap();
        assert_eq!(rubric.weights.phone, 20);
        assert_eq!(rubric.weights.name, 10);
        assert_eq!(rubric.min_skill_count, 3);
    }

    #[test]
    fn test_unreadable_rubric_is_an_error() {
        let config = Config {
            ats_rubric_path: Some(PathBuf::from("/nonexistent/rubric.json")),
            ..Config::default()
        };
        assert!(config.load_rubric().is_err());
    }
}
