use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which analysis backend the service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerBackend {
    /// PDF text extraction + keyword skill overlap.
    Keyword,
    /// Fixed delay, constant report.
    Sample,
}

impl FromStr for AnalyzerBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(AnalyzerBackend::Keyword),
            "sample" | "mock" => Ok(AnalyzerBackend::Sample),
            other => bail!("unknown analyzer backend '{other}' (expected 'keyword' or 'sample')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every setting has a default; a value that is present but malformed fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub analyzer: AnalyzerBackend,
    pub analysis_delay: Duration,
    pub catalog_path: Option<PathBuf>,
    pub session_ttl: Duration,
    pub session_sweep_interval: Duration,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            analyzer: AnalyzerBackend::Keyword,
            analysis_delay: Duration::from_millis(2000),
            catalog_path: None,
            session_ttl: Duration::from_secs(3600),
            session_sweep_interval: Duration::from_secs(60),
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            analyzer: parse_or(&lookup, "ANALYZER", defaults.analyzer)?,
            analysis_delay: Duration::from_millis(parse_or(
                &lookup,
                "ANALYSIS_DELAY_MS",
                defaults.analysis_delay.as_millis() as u64,
            )?),
            catalog_path: lookup("CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            session_ttl: Duration::from_secs(parse_or(
                &lookup,
                "SESSION_TTL_SECS",
                defaults.session_ttl.as_secs(),
            )?),
            session_sweep_interval: Duration::from_secs(
                parse_or(
                    &lookup,
                    "SESSION_SWEEP_SECS",
                    defaults.session_sweep_interval.as_secs(),
                )?
                .max(1),
            ),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.analyzer, AnalyzerBackend::Keyword);
        assert_eq!(config.analysis_delay, Duration::from_millis(2000));
        assert!(config.catalog_path.is_none());
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("ANALYZER", "Sample"),
            ("ANALYSIS_DELAY_MS", "150"),
            ("CATALOG_PATH", "/etc/skillmatch/catalog.json"),
            ("SESSION_TTL_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.analyzer, AnalyzerBackend::Sample);
        assert_eq!(config.analysis_delay, Duration::from_millis(150));
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/skillmatch/catalog.json"))
        );
        assert_eq!(config.session_ttl, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_port_fails_with_key_in_message() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(format!("{err:#}").contains("PORT"));
    }

    #[test]
    fn test_unknown_analyzer_fails() {
        assert!(Config::from_lookup(lookup_from(&[("ANALYZER", "llm")])).is_err());
    }

    #[test]
    fn test_sweep_interval_never_zero() {
        let config = Config::from_lookup(lookup_from(&[("SESSION_SWEEP_SECS", "0")])).unwrap();
        assert_eq!(config.session_sweep_interval, Duration::from_secs(1));
    }
}
