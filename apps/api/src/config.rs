use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::render::templates;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub pdf_service_url: String,
    pub pdf_service_token: Option<String>,
    /// Template used whenever a stored or requested key is not registered.
    pub default_template: String,
    pub draft_sync_quiet: Duration,
    pub max_photo_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_template =
            std::env::var("DEFAULT_TEMPLATE").unwrap_or_else(|_| "classic".to_string());
        if templates::lookup(&default_template).is_none() {
            bail!("DEFAULT_TEMPLATE '{default_template}' is not a registered template");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            pdf_service_url: require_env("PDF_SERVICE_URL")?,
            pdf_service_token: std::env::var("PDF_SERVICE_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            default_template,
            draft_sync_quiet: Duration::from_millis(parse_env("DRAFT_SYNC_QUIET_MS", 1500)?),
            max_photo_bytes: parse_env("MAX_PHOTO_BYTES", 5 * 1024 * 1024)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
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
            .with_context(|| format!("{key} must be a valid number")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by handler tests; no variable is read from the environment.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/vitae_test".to_string(),
            s3_bucket: "vitae-test".to_string(),
            s3_endpoint: "http://localhost:9000".to_string(),
            aws_access_key_id: "test".to_string(),
            aws_secret_access_key: "test".to_string(),
            pdf_service_url: "http://localhost:3000/pdf".to_string(),
            pdf_service_token: None,
            default_template: "classic".to_string(),
            draft_sync_quiet: Duration::from_millis(1500),
            max_photo_bytes: 1024,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
