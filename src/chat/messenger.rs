//! Messaging collaborator contract and message types.

use async_trait::async_trait;
use serde::Serialize;

use crate::logo::DeliveryError;

/// A chat message addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Chat the message came from; replies go back here.
    pub jid: String,
    /// Display name of the sender.
    pub sender_name: String,
    /// Raw message text.
    pub text: String,
}

impl IncomingMessage {
    #[must_use]
    pub fn new(
        jid: impl Into<String>,
        sender_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            jid: jid.into(),
            sender_name: sender_name.into(),
            text: text.into(),
        }
    }
}

/// Header block shown above a delivered image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextInfo {
    pub title: String,
    pub body: String,
}

/// An image to deliver to a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextInfo>,
}

impl OutgoingImage {
    /// Creates an image without caption or context.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
            context: None,
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: ContextInfo) -> Self {
        self.context = Some(context);
        self
    }
}

/// Chat delivery API used by the orchestrator and the command layer.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends an image to a chat, tagged with `message_id`.
    async fn send_image(
        &self,
        jid: &str,
        image: OutgoingImage,
        message_id: &str,
    ) -> Result<(), DeliveryError>;

    /// Replies with plain text.
    async fn reply(&self, jid: &str, text: &str) -> Result<(), DeliveryError>;

    /// Reports an error to the chat.
    async fn report_error(
        &self,
        jid: &str,
        message: &str,
        cause: &str,
        extra: Option<&str>,
    ) -> Result<(), DeliveryError>;

    /// Builds the header block for a delivery.
    fn context_info(&self, title: &str, body: &str) -> ContextInfo {
        ContextInfo {
            title: title.to_owned(),
            body: body.to_owned(),
        }
    }

    /// Generates a fresh outbound message id.
    fn message_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string().to_uppercase()
    }
}
