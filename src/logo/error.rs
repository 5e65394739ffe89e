//! Error types for the logo generation tiers.

use std::time::Duration;

use thiserror::Error;

/// Failure of the primary rendering tier.
#[derive(Debug, Error)]
pub enum PrimaryError {
    #[error("no text to render")]
    MissingText,

    #[error("renderer is not configured")]
    NotConfigured,

    #[error("renderer failed: {0}")]
    Render(String),

    #[error("renderer returned no image")]
    MissingImage,

    #[error("renderer timed out after {0:?}")]
    TimedOut(Duration),
}

impl From<reqwest::Error> for PrimaryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Render(err.to_string())
    }
}

/// Failure of the fallback maker API tier.
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("HTTP Error: {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("invalid response: {body}")]
    Validation {
        /// Raw response body, for the report.
        body: String,
        /// Image reference seen despite the failed validation.
        img: Option<String>,
    },

    #[error("request timed out after {0:?}")]
    TimedOut(Duration),
}

impl FallbackError {
    /// Returns an image URL the failed response still carried, if any.
    #[must_use]
    pub fn recovered_image(&self) -> Option<&str> {
        match self {
            Self::Validation { img, .. } => img.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FallbackError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Failure of the messaging collaborator itself.
///
/// Never recovered by the orchestrator.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to send message to {jid}: {reason}")]
    Send { jid: String, reason: String },

    #[error("chat transport closed")]
    Closed,
}

impl DeliveryError {
    /// Creates a send failure for a chat.
    pub fn send(jid: &str, reason: impl Into<String>) -> Self {
        Self::Send {
            jid: jid.to_owned(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        assert_eq!(FallbackError::Status(502).to_string(), "HTTP Error: 502");
    }

    #[test]
    fn test_recovered_image_only_from_validation() {
        let err = FallbackError::Validation {
            body: "{}".to_owned(),
            img: Some("http://img/x.png".to_owned()),
        };
        assert_eq!(err.recovered_image(), Some("http://img/x.png"));
        assert_eq!(FallbackError::Status(404).recovered_image(), None);
    }

    #[test]
    fn test_delivery_error_message() {
        let err = DeliveryError::send("123@chat", "socket closed");
        assert_eq!(
            err.to_string(),
            "failed to send message to 123@chat: socket closed"
        );
    }
}
