//! Run configuration loaded from command-line flags and environment variables.
//!
//! Every flag can also be supplied through the environment, including a
//! `.env` file loaded by the binary at startup.

use clap::Parser;
use std::fmt;
use std::time::Duration;

/// Default delay between API calls, in milliseconds.
const DEFAULT_DELAY_MS: u64 = 500;

/// Default number of records requested per page.
const DEFAULT_PAGE_SIZE: u32 = 50;

/// Grace period before a live run starts deleting.
const STARTUP_GRACE_SECS: u64 = 5;

/// Command-line interface.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "looker-user-cleanup",
    about = "Delete Looker users who do not own any scheduled plan (dry run by default)"
)]
pub struct Cli {
    /// Looker instance URL, e.g. https://example.cloud.looker.com
    #[arg(long, env = "LOOKER_BASE_URL")]
    pub base_url: Option<String>,

    /// API3 client ID
    #[arg(long, env = "LOOKER_CLIENT_ID")]
    pub client_id: Option<String>,

    /// API3 client secret
    #[arg(long, env = "LOOKER_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Delay between API calls in milliseconds
    #[arg(long, env = "CLEANUP_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Number of records to request per page
    #[arg(long, env = "CLEANUP_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Actually delete users. Without this flag the run only reports.
    #[arg(long, env = "CLEANUP_FORCE_APPLY")]
    pub force_apply: bool,
}

/// Run configuration, built once at startup and passed by reference.
#[derive(Clone)]
pub struct Config {
    /// Looker instance URL without trailing slash
    pub base_url: String,
    /// API3 client ID
    pub client_id: String,
    /// API3 client secret
    pub client_secret: String,
    /// Rate-limit courtesy delay between API calls
    pub call_delay: Duration,
    /// When true no delete requests are issued
    pub dry_run: bool,
    /// Page size for scheduled plan listing
    pub plan_page_size: u32,
    /// Page size for user listing
    pub user_page_size: u32,
    /// Wait before a live run starts, giving the operator a chance to abort
    pub startup_grace: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("call_delay", &self.call_delay)
            .field("dry_run", &self.dry_run)
            .field("plan_page_size", &self.plan_page_size)
            .field("user_page_size", &self.user_page_size)
            .field("startup_grace", &self.startup_grace)
            .finish()
    }
}

impl Config {
    /// Load configuration from the environment and the command line.
    ///
    /// Expects `.env` to have been loaded already, so logging set up before
    /// this call sees the same environment.
    pub fn load() -> crate::error::Result<Self> {
        Ok(Self::from_cli(Cli::parse())?)
    }

    /// Validate parsed flags and build the configuration.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let base_url = required(cli.base_url, "LOOKER_BASE_URL")?;
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                name: "LOOKER_BASE_URL",
                value: base_url,
            });
        }

        if cli.page_size == 0 {
            return Err(ConfigError::Invalid {
                name: "CLEANUP_PAGE_SIZE",
                value: cli.page_size.to_string(),
            });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: required(cli.client_id, "LOOKER_CLIENT_ID")?,
            client_secret: required(cli.client_secret, "LOOKER_CLIENT_SECRET")?,
            call_delay: Duration::from_millis(cli.delay_ms),
            dry_run: !cli.force_apply,
            plan_page_size: cli.page_size,
            user_page_size: cli.page_size,
            startup_grace: Duration::from_secs(STARTUP_GRACE_SECS),
        })
    }

    /// Configuration for tests: dry run, no delays.
    pub fn test_default(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: "test_client_id".to_string(),
            client_secret: "test_secret".to_string(),
            call_delay: Duration::ZERO,
            dry_run: true,
            plan_page_size: DEFAULT_PAGE_SIZE,
            user_page_size: DEFAULT_PAGE_SIZE,
            startup_grace: Duration::ZERO,
        }
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
