//! Request and result types for a single logo generation.

use std::fmt;

use super::error::{FallbackError, PrimaryError};
use super::variant::{ServiceEndpoint, ServiceVariant};

/// Second text used when a command does not supply one.
pub const DEFAULT_SECONDARY_TEXT: &str = "ser";

/// One logo generation request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoRequest {
    pub primary_text: String,
    pub secondary_text: String,
    pub style_template_id: String,
    pub service_variant: ServiceVariant,
}

impl LogoRequest {
    /// Creates a request with the default second text.
    #[must_use]
    pub fn new(
        primary_text: impl Into<String>,
        style_template_id: impl Into<String>,
        service_variant: ServiceVariant,
    ) -> Self {
        Self {
            primary_text: primary_text.into(),
            secondary_text: DEFAULT_SECONDARY_TEXT.to_owned(),
            style_template_id: style_template_id.into(),
            service_variant,
        }
    }

    /// Replaces the second text.
    #[must_use]
    pub fn with_secondary(mut self, secondary_text: impl Into<String>) -> Self {
        self.secondary_text = secondary_text.into();
        self
    }

    /// Resolves the template page this request targets.
    #[must_use]
    pub fn endpoint(&self) -> ServiceEndpoint {
        ServiceEndpoint::resolve(self.service_variant, &self.style_template_id)
    }
}

/// Which tier produced the delivered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceAttempt {
    Primary,
    Fallback,
    None,
}

impl fmt::Display for SourceAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Whether a total failure is reported back to the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureReporting {
    #[default]
    Report,
    Silent,
}

impl From<bool> for FailureReporting {
    fn from(report: bool) -> Self {
        if report { Self::Report } else { Self::Silent }
    }
}

/// Why both tiers failed.
#[derive(Debug)]
pub struct TierFailures {
    pub primary: PrimaryError,
    pub fallback: FallbackError,
}

impl TierFailures {
    /// Returns the image URL a failed fallback response still carried.
    #[must_use]
    pub fn recovered_image(&self) -> Option<&str> {
        self.fallback.recovered_image().filter(|url| !url.is_empty())
    }

    /// Builds the composite diagnostic sent to the chat.
    #[must_use]
    pub fn report_message(&self) -> String {
        format!(
            "Primary Error: {}\n\nAPI Error: {}",
            self.primary, self.fallback
        )
    }

    /// Builds the trailing note of the report.
    #[must_use]
    pub fn report_extra(&self) -> String {
        self.recovered_image().map_or_else(
            || "Failed to generate logo.".to_owned(),
            |url| format!("Generated image: {url}"),
        )
    }
}

/// Outcome of one orchestrated generation.
#[derive(Debug)]
pub struct GenerationResult {
    /// The delivered image, if any.
    pub image_url: Option<String>,
    pub succeeded: bool,
    pub source_attempt: SourceAttempt,
    /// Failure details when both tiers failed.
    pub failure: Option<TierFailures>,
}

impl GenerationResult {
    /// Creates a result for an image delivered from the primary tier.
    #[must_use]
    pub fn from_primary(image_url: String) -> Self {
        Self {
            image_url: Some(image_url),
            succeeded: true,
            source_attempt: SourceAttempt::Primary,
            failure: None,
        }
    }

    /// Creates a result for an image delivered from the fallback tier.
    #[must_use]
    pub fn from_fallback(image_url: String) -> Self {
        Self {
            image_url: Some(image_url),
            succeeded: true,
            source_attempt: SourceAttempt::Fallback,
            failure: None,
        }
    }

    /// Creates a result for a request where both tiers failed.
    #[must_use]
    pub fn failed(failures: TierFailures) -> Self {
        Self {
            image_url: None,
            succeeded: false,
            source_attempt: SourceAttempt::None,
            failure: Some(failures),
        }
    }
}
