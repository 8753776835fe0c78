use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::criteria::store::DEFAULT_MAX_SESSIONS;
use crate::documents::DEFAULT_EXTRACTION_TIMEOUT;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Deadline for one LLM completion, covering every retry attempt.
    pub llm_timeout: Duration,
    /// Deadline for parsing one uploaded PDF or DOCX.
    pub extraction_timeout: Duration,
    /// Resumes scored in parallel within one request.
    pub scoring_concurrency: usize,
    pub max_upload_bytes: usize,
    /// Named sessions kept in the criteria store before the least recently set is evicted.
    pub max_sessions: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 60u64)?),
            extraction_timeout: Duration::from_secs(parse_env(
                "EXTRACTION_TIMEOUT_SECS",
                DEFAULT_EXTRACTION_TIMEOUT.as_secs(),
            )?),
            scoring_concurrency: parse_env("SCORING_CONCURRENCY", 4usize)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            max_sessions: parse_env("MAX_SESSIONS", DEFAULT_MAX_SESSIONS)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(!self.llm_timeout.is_zero(), "LLM_TIMEOUT_SECS must be at least 1");
        ensure!(
            !self.extraction_timeout.is_zero(),
            "EXTRACTION_TIMEOUT_SECS must be at least 1"
        );
        ensure!(
            self.scoring_concurrency > 0,
            "SCORING_CONCURRENCY must be at least 1"
        );
        ensure!(self.max_sessions > 0, "MAX_SESSIONS must be at least 1");
        Ok(())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
