//! Application settings loaded from the environment.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::DEFAULT_CAPTION;

/// Settings shared by the orchestrator and the command layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoSettings {
    /// Base URL of the fallback maker API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Caption attached to images produced by the primary renderer.
    #[serde(default)]
    pub caption: Option<String>,

    /// Endpoint of the primary rendering service, if one is deployed.
    #[serde(default)]
    pub render_url: Option<String>,

    /// Command prefix for bot commands.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Upper bound for each network tier, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Whether total failures are reported back to the chat.
    #[serde(default = "default_report_failures")]
    pub report_failures: bool,

    /// Optional path to a style catalog JSON file.
    #[serde(default)]
    pub styles_path: Option<PathBuf>,
}

fn default_api_base() -> String {
    "https://default-api.com".to_owned()
}

fn default_command_prefix() -> String {
    ".".to_owned()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_report_failures() -> bool {
    true
}

impl Default for LogoSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            caption: None,
            render_url: None,
            command_prefix: default_command_prefix(),
            request_timeout_secs: default_request_timeout(),
            report_failures: default_report_failures(),
            styles_path: None,
        }
    }
}

impl LogoSettings {
    /// Creates settings from environment variables, using defaults for
    /// anything unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates settings from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base = get("LOGO_API_BASE").unwrap_or_else(default_api_base);
        validate_url("LOGO_API_BASE", &api_base)?;

        let render_url = get("LOGO_RENDER_URL");
        if let Some(url) = &render_url {
            validate_url("LOGO_RENDER_URL", url)?;
        }

        let request_timeout_secs = match get("LOGO_REQUEST_TIMEOUT") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .ok_or(ConfigError::InvalidNumber {
                    var: "LOGO_REQUEST_TIMEOUT",
                    value: raw,
                })?,
            None => default_request_timeout(),
        };

        let report_failures = match get("LOGO_REPORT_FAILURES") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidBool {
                var: "LOGO_REPORT_FAILURES",
                value: raw,
            })?,
            None => default_report_failures(),
        };

        Ok(Self {
            api_base,
            caption: get("LOGO_CAPTION"),
            render_url,
            command_prefix: get("LOGO_COMMAND_PREFIX").unwrap_or_else(default_command_prefix),
            request_timeout_secs,
            report_failures,
            styles_path: get("LOGO_STYLES_PATH").map(PathBuf::from),
        })
    }

    /// Returns the caption for primary deliveries.
    #[must_use]
    pub fn caption(&self) -> &str {
        self.caption
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CAPTION)
    }

    /// Returns the fallback API base without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Returns the per-tier network timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn validate_url(var: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl {
            var,
            value: value.to_owned(),
            reason: e.to_string(),
        })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL in {var} ({value}): {reason}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid number in {var}: {value} (must be a positive integer)")]
    InvalidNumber { var: &'static str, value: String },

    #[error("Invalid boolean in {var}: {value}")]
    InvalidBool { var: &'static str, value: String },
}
