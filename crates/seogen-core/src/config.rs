//! Configuration: optional TOML file under the XDG config dir, plus the
//! process environment resolved once into [`Settings`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::{BackoffPolicy, RetryPolicy};

/// Environment variable holding the bearer credential (mandatory).
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable holding the public site URL used in the sitemap.
pub const ENV_SITE_BASE_URL: &str = "SITE_BASE_URL";
/// Environment variable holding the company name used in prompts.
pub const ENV_COMPANY_NAME: &str = "COMPANY_NAME";

pub const DEFAULT_SITE_BASE_URL: &str = "https://iberrywifi.com";
pub const DEFAULT_COMPANY_NAME: &str = "IberryWifi";

/// Upper bound accepted for `pause_secs`.
pub const MAX_PAUSE_SECS: f64 = 3600.0;
/// Upper bound accepted for `[retry] max_delay_secs`.
pub const MAX_DELAY_SECS: u64 = 86_400;

/// Chat-completion request parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Chat-completion endpoint URL.
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Timeout for a single HTTP call.
    pub request_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1200,
            temperature: 0.2,
            request_timeout_secs: 60,
        }
    }
}

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Exponent base in seconds for backoff (delay = base^attempt + jitter).
    pub base_secs: f64,
    /// Cap on a single backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_secs: 2.0,
            max_delay_secs: 60,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            backoff: BackoffPolicy {
                base_secs: self.base_secs,
                max_delay: Duration::from_secs(self.max_delay_secs),
            },
        }
    }
}

/// Global configuration loaded from `~/.config/seogen/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeogenConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Pause after each task, in seconds.
    #[serde(default = "default_pause_secs")]
    pub pause_secs: f64,
    /// Directory receiving one `.html` file per generated post.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Where the sitemap is written.
    #[serde(default = "default_sitemap_path")]
    pub sitemap_path: PathBuf,
    /// Topics to generate when none are given on the command line.
    #[serde(default)]
    pub topics: Option<Vec<String>>,
}

fn default_pause_secs() -> f64 {
    2.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_sitemap_path() -> PathBuf {
    PathBuf::from("sitemap.xml")
}

impl Default for SeogenConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            retry: None,
            pause_secs: default_pause_secs(),
            output_dir: default_output_dir(),
            sitemap_path: default_sitemap_path(),
            topics: None,
        }
    }
}

impl SeogenConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }

    /// Inter-task pause; negative or non-finite values collapse to zero and
    /// anything above [`MAX_PAUSE_SECS`] is clamped.
    pub fn pause(&self) -> Duration {
        if self.pause_secs.is_finite() && self.pause_secs > 0.0 {
            Duration::from_secs_f64(self.pause_secs.min(MAX_PAUSE_SECS))
        } else {
            Duration::ZERO
        }
    }

    /// Reject values that cannot be turned into sane durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pause_secs.is_finite() || self.pause_secs > MAX_PAUSE_SECS {
            return Err(ConfigError::OutOfRange {
                field: "pause_secs",
                value: self.pause_secs.to_string(),
            });
        }
        if let Some(retry) = &self.retry {
            if !retry.base_secs.is_finite() || retry.base_secs <= 0.0 {
                return Err(ConfigError::OutOfRange {
                    field: "retry.base_secs",
                    value: retry.base_secs.to_string(),
                });
            }
            if retry.max_delay_secs > MAX_DELAY_SECS {
                return Err(ConfigError::OutOfRange {
                    field: "retry.max_delay_secs",
                    value: retry.max_delay_secs.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("seogen")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SeogenConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<SeogenConfig> {
    if !path.exists() {
        let default_cfg = SeogenConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SeogenConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Errors resolving the process environment into [`Settings`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} missing in env")]
    MissingCredential(&'static str),
    #[error("invalid site base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

/// Everything a run needs, resolved once at start and passed down by reference.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    /// Site root without trailing slash.
    pub site_base_url: String,
    pub company_name: String,
    pub config: SeogenConfig,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("site_base_url", &self.site_base_url)
            .field("company_name", &self.company_name)
            .field("config", &self.config)
            .finish()
    }
}

impl Settings {
    /// Resolve from the real process environment.
    pub fn from_env(config: SeogenConfig) -> Result<Self, ConfigError> {
        Self::from_lookup(config, |k| std::env::var(k).ok())
    }

    /// Resolve using `lookup` for environment variables (tests inject fakes).
    /// Empty values count as unset. The config is validated first.
    pub fn from_lookup<F>(config: SeogenConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        config.validate()?;
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::MissingCredential(ENV_API_KEY))?;
        let base = get(ENV_SITE_BASE_URL).unwrap_or_else(|| DEFAULT_SITE_BASE_URL.to_string());
        let site_base_url = normalize_base_url(&base)?;
        let company_name =
            get(ENV_COMPANY_NAME).unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string());

        Ok(Self {
            api_key,
            site_base_url,
            company_name,
            config,
        })
    }
}

/// Validate an http(s) base URL and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = url::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
