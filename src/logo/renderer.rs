//! Primary rendering tier.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::PrimaryError;

/// Image produced by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenderedLogo {
    /// URL of the rendered image. May be missing on a malformed response.
    #[serde(default)]
    pub image: Option<String>,
}

/// A service that renders text onto a style template page.
#[async_trait]
pub trait LogoRenderer: Send + Sync {
    /// Renders `texts` onto the template at `template_url`.
    async fn render(
        &self,
        template_url: &str,
        texts: [&str; 2],
    ) -> Result<RenderedLogo, PrimaryError>;
}

#[derive(Serialize)]
struct RenderPayload<'a> {
    url: &'a str,
    texts: [&'a str; 2],
}

/// Renderer backed by a rendering service reachable over HTTP.
///
/// The service accepts `POST {url, texts}` and answers `{image}`. Without an
/// endpoint every call fails, which sends all requests to the fallback tier.
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: reqwest::Client,
    endpoint: Option<Url>,
}

impl HttpRenderer {
    /// Creates a renderer for the given service endpoint.
    #[must_use]
    pub fn new(client: reqwest::Client, endpoint: Option<Url>) -> Self {
        Self { client, endpoint }
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }
}

#[async_trait]
impl LogoRenderer for HttpRenderer {
    async fn render(
        &self,
        template_url: &str,
        texts: [&str; 2],
    ) -> Result<RenderedLogo, PrimaryError> {
        let endpoint = self.endpoint.clone().ok_or(PrimaryError::NotConfigured)?;
        debug!("Rendering {} via {}", template_url, endpoint);

        let response = self
            .client
            .post(endpoint)
            .json(&RenderPayload {
                url: template_url,
                texts,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<RenderedLogo>().await?)
    }
}
