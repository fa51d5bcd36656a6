use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use tracing::Level;

use crate::view::Locale;

/// Origin baked in at build time (`HRM_API_ORIGIN=... cargo build`), else local dev.
pub const DEFAULT_API_ORIGIN: &str = match option_env!("HRM_API_ORIGIN") {
    Some(origin) => origin,
    None => "http://127.0.0.1:8000",
};

#[derive(Clone, Debug)]
pub struct Config {
    pub api_origin: String,
    pub api_prefix: String,
    pub locale: Locale,

    // Logging
    pub log_dir: String,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_origin(DEFAULT_API_ORIGIN)
    }
}

impl Config {
    pub fn with_origin(origin: &str) -> Self {
        Self {
            api_origin: origin.to_string(),
            api_prefix: "/api".to_string(),
            locale: Locale::default(),
            log_dir: "logs".to_string(),
            log_level: Level::DEBUG,
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(origin) = lookup("HRM_API_ORIGIN") {
            config.api_origin = origin;
        }
        if let Some(prefix) = lookup("HRM_API_PREFIX") {
            config.api_prefix = prefix;
        }
        if let Some(tag) = lookup("HRM_LOCALE") {
            config.locale = Locale::from_str(&tag)
                .with_context(|| format!("HRM_LOCALE has unsupported value {tag:?}"))?;
        }
        if let Some(dir) = lookup("HRM_LOG_DIR") {
            config.log_dir = dir;
        }
        if let Some(level) = lookup("HRM_LOG_LEVEL") {
            config.log_level = Level::from_str(&level)
                .with_context(|| format!("HRM_LOG_LEVEL has invalid value {level:?}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.api_origin.starts_with("http://") || self.api_origin.starts_with("https://")) {
            bail!("API origin must start with http:// or https://, got {:?}", self.api_origin);
        }
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            bail!("API prefix must start with '/', got {:?}", self.api_prefix);
        }
        Ok(())
    }

    /// `{origin}{prefix}`, e.g. `http://127.0.0.1:8000/api`.
    pub fn api_base_url(&self) -> String {
        format!(
            "{}{}",
            self.api_origin.trim_end_matches('/'),
            self.api_prefix.trim_end_matches('/')
        )
    }

    pub fn set_api_origin(&mut self, origin: String) -> Result<()> {
        self.api_origin = origin;
        self.validate()
    }
}
