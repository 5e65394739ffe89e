//! Terminal chat transport used by the `logo_bot` binary.

use async_trait::async_trait;
use tracing::{debug, error};

use super::{Messenger, OutgoingImage};
use crate::logo::DeliveryError;

/// Messenger that prints every delivery to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMessenger;

impl ConsoleMessenger {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send_image(
        &self,
        jid: &str,
        image: OutgoingImage,
        message_id: &str,
    ) -> Result<(), DeliveryError> {
        debug!("Delivering image {} to {}", message_id, jid);
        println!("{}", format_image(jid, &image));
        Ok(())
    }

    async fn reply(&self, jid: &str, text: &str) -> Result<(), DeliveryError> {
        println!("[{jid}] {text}");
        Ok(())
    }

    async fn report_error(
        &self,
        jid: &str,
        message: &str,
        cause: &str,
        extra: Option<&str>,
    ) -> Result<(), DeliveryError> {
        error!("Reporting failure to {}: {}", jid, cause);
        println!("{}", format_error(jid, message, extra));
        Ok(())
    }
}

fn format_image(jid: &str, image: &OutgoingImage) -> String {
    let mut lines = Vec::new();
    if let Some(context) = &image.context {
        lines.push(format!("[{jid}] » {} | {}", context.title, context.body));
    }
    lines.push(format!("[{jid}] 🖼 {}", image.url));
    if let Some(caption) = &image.caption {
        lines.push(format!("[{jid}] {caption}"));
    }
    lines.join("\n")
}

fn format_error(jid: &str, message: &str, extra: Option<&str>) -> String {
    let mut text = format!("[{jid}] ✗ {message}");
    if let Some(extra) = extra {
        text.push_str("\n\n");
        text.push_str(extra);
    }
    text
}
