//! Configuration management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Account tier; selects the base endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Pro,
}

impl Tier {
    pub fn base_url(&self) -> &'static str {
        match self {
            Tier::Free => "https://api-free.deepl.com/v2",
            Tier::Pro => "https://api.deepl.com/v2",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Free => write!(f, "free"),
            Tier::Pro => write!(f, "pro"),
        }
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "pro" => Ok(Tier::Pro),
            other => Err(anyhow::anyhow!("unknown tier: {}", other)),
        }
    }
}

/// Default directory translated documents are written to
pub const DEFAULT_OUTPUT_DIR: &str = "deepl";

/// Configuration for the client
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub auth_key: String,
    pub tier: Tier,
    /// Overrides the tier's endpoint when set
    pub base_url: Option<String>,
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub output_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_key: std::env::var("DEEPL_AUTH_KEY").unwrap_or_default(),
            tier: Tier::Free,
            base_url: None,
            timeout_ms: 30000,
            poll_interval_ms: 1000,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("auth_key", &"<redacted>")
            .field("tier", &self.tier)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(auth_key: impl Into<String>, tier: Tier) -> Self {
        Self {
            auth_key: auth_key.into(),
            tier,
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let auth_key = std::env::var("DEEPL_AUTH_KEY")
            .map_err(|_| anyhow::anyhow!("DEEPL_AUTH_KEY environment variable is required"))?;

        let tier = std::env::var("DEEPL_TIER")
            .unwrap_or_else(|_| "free".to_string())
            .parse::<Tier>()?;

        let base_url = std::env::var("DEEPL_API_URL").ok().filter(|u| !u.is_empty());

        let timeout_ms = std::env::var("DEEPL_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse::<u64>()?;

        let poll_interval_ms = std::env::var("DEEPL_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u64>()?;

        let output_dir = std::env::var("DEEPL_OUTPUT_DIR")
            .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string());

        info!("Loaded {} tier configuration from environment", tier);

        Ok(Self {
            auth_key,
            tier,
            base_url,
            timeout_ms,
            poll_interval_ms,
            output_dir: PathBuf::from(output_dir),
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth_key.trim().is_empty() {
            return Err(anyhow::anyhow!("API key is required"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        if self.poll_interval_ms == 0 {
            return Err(anyhow::anyhow!("poll_interval_ms must be greater than 0"));
        }

        if let Some(url) = &self.base_url {
            if url.trim().is_empty() {
                return Err(anyhow::anyhow!("base_url must not be empty when set"));
            }
        }

        Ok(())
    }

    /// Endpoint base without trailing slash
    pub fn endpoint(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.tier.base_url())
            .trim_end_matches('/')
    }
}
