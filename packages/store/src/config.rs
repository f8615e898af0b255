//! # Client configuration — `client.toml`
//!
//! Where the backend lives and how notifications look.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//! timeout_secs = 30
//!
//! [notify.failure]
//! color = "negative"
//! position = "top"
//! timeout_ms = 5000
//! ```
//!
//! [`ClientConfig::load`] layers three sources, later ones winning:
//!
//! 1. built-in defaults (every key has one, so partial files are fine),
//! 2. `client.toml` in the working directory, if present,
//! 3. `CLIENT_*` environment variables with `__` between sections, e.g.
//!    `CLIENT_API__BASE_URL`. A `.env` file is read first.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use api::{ApiError, HttpTransport};

use crate::notify::{NotifyConfig, NotifyKind};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Ignored in the browser.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at the given backend, default styling.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                ..ApiConfig::default()
            },
            notify: NotifyConfig::default(),
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "client.toml"
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let fallback = NotifyConfig::default();
        let mut builder = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?;
        for kind in [
            NotifyKind::Failure,
            NotifyKind::Success,
            NotifyKind::Info,
            NotifyKind::Warning,
        ] {
            let style = fallback.style(kind);
            builder = builder
                .set_default(format!("notify.{kind}.color"), style.color.as_str())?
                .set_default(format!("notify.{kind}.position"), style.position.as_str())?
                .set_default(format!("notify.{kind}.timeout_ms"), style.timeout_ms as i64)?;
        }
        Ok(builder)
    }

    /// Parse a TOML document on top of the defaults.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(s, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Load defaults, then `client.toml`, then `CLIENT_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::defaults()?
            .add_source(
                File::with_name(Self::filename())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// `CLIENT_*` variables, `__` between nested keys.
    fn environment() -> Environment {
        Environment::with_prefix("CLIENT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// An HTTP transport for the configured backend.
    pub fn transport(&self) -> Result<HttpTransport, ApiError> {
        HttpTransport::with_timeout(
            self.api.base_url.clone(),
            std::time::Duration::from_secs(self.api.timeout_secs),
        )
    }
}
