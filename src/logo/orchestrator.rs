//! Logo request orchestration: primary tier, fallback tier, delivery.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::error::{DeliveryError, FallbackError, PrimaryError};
use super::fallback::{validate_response, FallbackApi, MakerQuery};
use super::renderer::LogoRenderer;
use super::request::{FailureReporting, GenerationResult, LogoRequest, TierFailures};
use super::variant::ServiceEndpoint;
use crate::chat::{IncomingMessage, Messenger, OutgoingImage};
use crate::config::LogoSettings;

/// Title of the header block attached to primary deliveries.
const CONTEXT_TITLE: &str = "Text to Logo";

/// Runs one logo request through the primary and fallback tiers and
/// delivers exactly one outcome to the chat.
pub struct LogoOrchestrator {
    renderer: Arc<dyn LogoRenderer>,
    fallback: Arc<dyn FallbackApi>,
    messenger: Arc<dyn Messenger>,
    caption: String,
    timeout: Duration,
}

impl LogoOrchestrator {
    /// Creates an orchestrator from settings and collaborators.
    #[must_use]
    pub fn new(
        settings: &LogoSettings,
        renderer: Arc<dyn LogoRenderer>,
        fallback: Arc<dyn FallbackApi>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            renderer,
            fallback,
            messenger,
            caption: settings.caption().to_owned(),
            timeout: settings.request_timeout(),
        }
    }

    /// Overrides the per-tier timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the messenger deliveries go through.
    #[must_use]
    pub fn messenger(&self) -> &Arc<dyn Messenger> {
        &self.messenger
    }

    /// Generates a logo for `request` and delivers the result to the chat
    /// `message` came from.
    ///
    /// Tier failures never surface as errors; only a failing messenger does.
    pub async fn generate(
        &self,
        message: &IncomingMessage,
        request: &LogoRequest,
        reporting: FailureReporting,
    ) -> Result<GenerationResult, DeliveryError> {
        let endpoint = request.endpoint();
        debug!(
            "Generating logo from {} ({})",
            endpoint, request.service_variant
        );

        let primary = match self.try_primary(&endpoint, request).await {
            Ok(image_url) => {
                let context = self.messenger.context_info(
                    CONTEXT_TITLE,
                    &format!("Hello {}", message.sender_name),
                );
                let image = OutgoingImage::new(image_url.clone())
                    .with_caption(self.caption.clone())
                    .with_context(context);
                self.deliver(message, image).await?;
                info!("Delivered logo from primary renderer to {}", message.jid);
                return Ok(GenerationResult::from_primary(image_url));
            }
            Err(e) => {
                warn!("Primary renderer failed for {}: {}", endpoint, e);
                e
            }
        };

        let fallback = match self.try_fallback(&endpoint, request).await {
            Ok(image_url) => {
                self.deliver(message, OutgoingImage::new(image_url.clone()))
                    .await?;
                info!("Delivered logo from fallback API to {}", message.jid);
                return Ok(GenerationResult::from_fallback(image_url));
            }
            Err(e) => {
                warn!("Fallback API failed for {}: {}", endpoint, e);
                e
            }
        };

        let failures = TierFailures { primary, fallback };
        match reporting {
            FailureReporting::Report => {
                self.messenger
                    .report_error(
                        &message.jid,
                        &failures.report_message(),
                        &failures.primary.to_string(),
                        Some(&failures.report_extra()),
                    )
                    .await?;
            }
            FailureReporting::Silent => {
                debug!("Both tiers failed; reporting disabled for {}", message.jid);
            }
        }

        Ok(GenerationResult::failed(failures))
    }

    async fn try_primary(
        &self,
        endpoint: &ServiceEndpoint,
        request: &LogoRequest,
    ) -> Result<String, PrimaryError> {
        if request.primary_text.is_empty() {
            return Err(PrimaryError::MissingText);
        }

        let render = self.renderer.render(
            endpoint.as_str(),
            [request.primary_text.as_str(), request.secondary_text.as_str()],
        );
        let logo = tokio::time::timeout(self.timeout, render)
            .await
            .map_err(|_| PrimaryError::TimedOut(self.timeout))??;

        logo.image
            .filter(|url| !url.is_empty())
            .ok_or(PrimaryError::MissingImage)
    }

    async fn try_fallback(
        &self,
        endpoint: &ServiceEndpoint,
        request: &LogoRequest,
    ) -> Result<String, FallbackError> {
        let query = MakerQuery {
            text1: &request.primary_text,
            text2: &request.secondary_text,
            url: endpoint.as_str(),
        };
        let body = tokio::time::timeout(self.timeout, self.fallback.make(query))
            .await
            .map_err(|_| FallbackError::TimedOut(self.timeout))??;

        validate_response(&body)
    }

    async fn deliver(
        &self,
        message: &IncomingMessage,
        image: OutgoingImage,
    ) -> Result<(), DeliveryError> {
        let message_id = self.messenger.message_id();
        self.messenger
            .send_image(&message.jid, image, &message_id)
            .await
    }
}

impl std::fmt::Debug for LogoOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogoOrchestrator")
            .field("caption", &self.caption)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
