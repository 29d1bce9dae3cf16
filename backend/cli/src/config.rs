use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use persocr_core::OcrError;
use persocr_understanding::ExtractorConfig;

/// persocr runtime configuration.
#[derive(Clone)]
pub struct Config {
    /// Bearer token for the extraction service
    pub api_key: Option<String>,
    /// Chat-completion endpoint
    pub api_url: String,
    /// Vision model identifier
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Log level
    pub log_level: String,
    /// Directory for rolling JSON log files
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: ExtractorConfig::DEFAULT_API_URL.to_string(),
            model: ExtractorConfig::DEFAULT_MODEL.to_string(),
            timeout_secs: ExtractorConfig::DEFAULT_TIMEOUT.as_secs(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (useful for testing).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            api_key: get("OPENROUTER_API_KEY"),
            api_url: get("PERSOCR_API_URL").unwrap_or(defaults.api_url),
            model: get("PERSOCR_MODEL").unwrap_or(defaults.model),
            timeout_secs: get("PERSOCR_TIMEOUT_SECS")
                .and_then(|t| t.trim().parse().ok())
                .unwrap_or(defaults.timeout_secs),
            log_level: get("RUST_LOG").unwrap_or(defaults.log_level),
            log_dir: get("PERSOCR_LOG_DIR").map(PathBuf::from),
        }
    }

    /// Build the extractor settings; fails when no credential is configured.
    pub fn extractor_config(&self) -> Result<ExtractorConfig, OcrError> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            OcrError::Config("OPENROUTER_API_KEY is not set".to_string())
        })?;
        Ok(ExtractorConfig::new(api_key)
            .with_api_url(&self.api_url)
            .with_model(&self.model)
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}
