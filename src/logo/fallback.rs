//! Fallback tier: the maker HTTP API.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;
use urlencoding::encode;

use super::error::FallbackError;

/// Query sent to the maker API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MakerQuery<'a> {
    pub text1: &'a str,
    pub text2: &'a str,
    /// Resolved template page URL.
    pub url: &'a str,
}

/// A secondary service proxying the same style templates.
#[async_trait]
pub trait FallbackApi: Send + Sync {
    /// Requests a logo and returns the parsed response body.
    async fn make(&self, query: MakerQuery<'_>) -> Result<Value, FallbackError>;
}

/// Builds `{api_base}/api/maker?text1=&text2=&url=` with every value
/// encoded as a URI component (a space becomes `%20`, never `+`).
pub fn maker_url(api_base: &str, query: MakerQuery<'_>) -> Result<Url, FallbackError> {
    let url = format!(
        "{}/api/maker?text1={}&text2={}&url={}",
        api_base.trim_end_matches('/'),
        encode(query.text1),
        encode(query.text2),
        encode(query.url),
    );
    Url::parse(&url)
        .map_err(|e| FallbackError::Transport(format!("invalid API base {api_base}: {e}")))
}

/// Extracts the image from a maker response.
///
/// The response must carry a truthy `status` and a non-empty string `img`.
pub fn validate_response(body: &Value) -> Result<String, FallbackError> {
    let img = body
        .get("img")
        .and_then(Value::as_str)
        .filter(|img| !img.is_empty());
    let status = body.get("status").is_some_and(is_truthy);

    match img {
        Some(img) if status => Ok(img.to_owned()),
        _ => Err(FallbackError::Validation {
            body: body.to_string(),
            img: img.map(str::to_owned),
        }),
    }
}

/// Loose truthiness, the way the maker API's clients read its flags.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// HTTP client for the maker API.
#[derive(Debug, Clone)]
pub struct MakerApiClient {
    client: reqwest::Client,
    api_base: String,
}

impl MakerApiClient {
    /// Creates a client for the API rooted at `api_base`.
    #[must_use]
    pub fn new(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl FallbackApi for MakerApiClient {
    async fn make(&self, query: MakerQuery<'_>) -> Result<Value, FallbackError> {
        let url = maker_url(&self.api_base, query)?;
        debug!("Requesting fallback logo from {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FallbackError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| FallbackError::Parse(e.to_string()))
    }
}
