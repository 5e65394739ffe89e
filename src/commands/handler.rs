//! Command handler implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::types::{split_texts, usage_hint, BotCommand, CommandResult};
use crate::chat::IncomingMessage;
use crate::config::StyleCatalog;
use crate::logo::{DeliveryError, FailureReporting, LogoOrchestrator, LogoRequest};

/// Routes chat messages to logo commands.
pub struct CommandHandler {
    /// Command prefix (e.g., "`.`").
    prefix: String,

    /// Registered logo styles.
    catalog: Arc<StyleCatalog>,

    /// Runs logo requests and owns the messenger.
    orchestrator: Arc<LogoOrchestrator>,

    /// Whether total generation failures are reported to the chat.
    reporting: FailureReporting,
}

impl CommandHandler {
    /// Creates a new command handler.
    #[must_use]
    pub fn new(
        prefix: String,
        catalog: Arc<StyleCatalog>,
        orchestrator: Arc<LogoOrchestrator>,
        reporting: FailureReporting,
    ) -> Self {
        Self {
            prefix,
            catalog,
            orchestrator,
            reporting,
        }
    }

    /// Tries to parse and execute a command from a message.
    ///
    /// Returns `Ok(None)` if the message is not a command. Errors only when
    /// the chat could not be reached at all.
    pub async fn try_handle(
        &self,
        message: &IncomingMessage,
    ) -> Result<Option<CommandResult>, DeliveryError> {
        let Some(command) = BotCommand::parse(&message.text, &self.prefix, &self.catalog) else {
            return Ok(None);
        };

        debug!("Handling command: {}", command);
        let result = self.execute(message, &command).await?;
        info!(
            "Command {} result: success={}, source={:?}",
            command.name(),
            result.success,
            result.source
        );

        Ok(Some(result))
    }

    /// Executes a parsed command.
    async fn execute(
        &self,
        message: &IncomingMessage,
        command: &BotCommand,
    ) -> Result<CommandResult, DeliveryError> {
        match command {
            BotCommand::Menu => self.handle_menu(message).await,
            BotCommand::Logo { name, args } => self.handle_logo(message, name, args).await,
        }
    }

    async fn handle_menu(&self, message: &IncomingMessage) -> Result<CommandResult, DeliveryError> {
        let menu = self.menu_text();
        self.orchestrator
            .messenger()
            .reply(&message.jid, &menu)
            .await?;
        Ok(CommandResult::success(format!(
            "Listed {} logo commands",
            self.catalog.len()
        )))
    }

    async fn handle_logo(
        &self,
        message: &IncomingMessage,
        name: &str,
        args: &str,
    ) -> Result<CommandResult, DeliveryError> {
        let messenger = self.orchestrator.messenger();

        let Some(style) = self.catalog.find(name) else {
            return Ok(CommandResult::error(format!("Unknown logo command: {name}")));
        };

        let Some(texts) = split_texts(&style.input, args) else {
            let hint = usage_hint(&self.prefix, &style.name, &style.input);
            messenger.reply(&message.jid, &hint).await?;
            return Ok(CommandResult::error(format!("Missing text for {name}")));
        };

        let request = LogoRequest::new(texts.primary, style.template.clone(), style.variant())
            .with_secondary(texts.secondary);

        match self
            .orchestrator
            .generate(message, &request, self.reporting)
            .await
        {
            Ok(generation) if generation.succeeded => Ok(CommandResult::success(format!(
                "Generated {name} logo"
            ))
            .with_source(generation.source_attempt)),
            Ok(generation) => Ok(CommandResult::error(format!("Could not generate {name} logo"))
                .with_source(generation.source_attempt)),
            Err(e) => {
                warn!("Delivery failed for {}: {}", name, e);
                messenger
                    .report_error(
                        &message.jid,
                        &format!("{e}\n\ncmdName: {name}"),
                        &e.to_string(),
                        None,
                    )
                    .await?;
                Ok(CommandResult::error(format!("Delivery failed for {name}")))
            }
        }
    }

    /// Builds the menu listing every registered logo command.
    fn menu_text(&self) -> String {
        let mut lines = vec!["Logo commands:".to_owned()];

        for style in &self.catalog.styles {
            lines.push(format!(
                "{}{} {} ({}, {})",
                self.prefix,
                style.name,
                style.input.placeholder(),
                style.kind,
                style.variant()
            ));
            lines.push(format!("    {}", style.info));
        }

        lines.join("\n")
    }
}

impl std::fmt::Debug for CommandHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHandler")
            .field("prefix", &self.prefix)
            .field("styles", &self.catalog.len())
            .field("reporting", &self.reporting)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::chat::Messenger;
    use crate::config::LogoSettings;
    use crate::logo::{FallbackApi, LogoRenderer, SourceAttempt};
    use crate::testing::{Delivery, RecordingMessenger, StubFallback, StubRenderer};

    struct Harness {
        renderer: Arc<StubRenderer>,
        fallback: Arc<StubFallback>,
        messenger: Arc<RecordingMessenger>,
        handler: CommandHandler,
    }

    fn harness(
        renderer: StubRenderer,
        fallback: StubFallback,
        messenger: RecordingMessenger,
        reporting: FailureReporting,
    ) -> Harness {
        let renderer = Arc::new(renderer);
        let fallback = Arc::new(fallback);
        let messenger = Arc::new(messenger);
        let orchestrator = LogoOrchestrator::new(
            &LogoSettings::default(),
            Arc::clone(&renderer) as Arc<dyn LogoRenderer>,
            Arc::clone(&fallback) as Arc<dyn FallbackApi>,
            Arc::clone(&messenger) as Arc<dyn Messenger>,
        );
        let handler = CommandHandler::new(
            ".".to_owned(),
            Arc::new(StyleCatalog::builtin()),
            Arc::new(orchestrator),
            reporting,
        );
        Harness {
            renderer,
            fallback,
            messenger,
            handler,
        }
    }

    fn ok_harness() -> Harness {
        harness(
            StubRenderer::image("http://img/1.png"),
            StubFallback::body(json!({ "status": true, "img": "X" })),
            RecordingMessenger::new(),
            FailureReporting::Report,
        )
    }

    fn msg(text: &str) -> IncomingMessage {
        IncomingMessage::new("123@chat", "Ana", text)
    }

    #[tokio::test]
    async fn test_non_command_is_ignored() {
        let h = ok_harness();
        let result = h.handler.try_handle(&msg("hello there")).await.unwrap();
        assert!(result.is_none());
        assert!(h.messenger.deliveries().is_empty());
    }

    #[tokio::test]
    async fn test_pair_command_renders_both_texts() {
        let h = ok_harness();
        let result = h
            .handler
            .try_handle(&msg(".logo8 Hello;World"))
            .await
            .unwrap()
            .unwrap();

        assert!(result.success);
        assert_eq!(result.source, Some(SourceAttempt::Primary));
        assert_eq!(
            h.renderer.calls(),
            vec![(
                "https://ephoto360.com/tao-logo-gradient-3d-truc-tuyen-501.html".to_owned(),
                ["Hello".to_owned(), "World".to_owned()]
            )]
        );
        assert_eq!(h.messenger.deliveries().len(), 1);
    }

    #[tokio::test]
    async fn test_single_command_uses_fixed_secondary() {
        let h = ok_harness();
        h.handler.try_handle(&msg(".logo2 Neon")).await.unwrap();

        let calls = h.renderer.calls();
        assert_eq!(calls[0].1, ["Neon".to_owned(), "WASI".to_owned()]);
    }

    #[tokio::test]
    async fn test_pair_optional_uses_default() {
        let h = ok_harness();
        h.handler.try_handle(&msg(".logo7 Cover")).await.unwrap();

        let calls = h.renderer.calls();
        assert_eq!(calls[0].1, ["Cover".to_owned(), "ser".to_owned()]);
    }

    #[tokio::test]
    async fn test_logo6_targets_textpro() {
        let h = ok_harness();
        h.handler.try_handle(&msg(".logo6 a;b")).await.unwrap();

        let calls = h.renderer.calls();
        assert_eq!(
            calls[0].0,
            "https://textpro.me/tao-hieu-ung-chu-graffiti-sieu-ngau-online-794.html"
        );
    }

    #[tokio::test]
    async fn test_missing_secondary_replies_with_usage() {
        let h = ok_harness();
        let result = h
            .handler
            .try_handle(&msg(".logo11 Hello"))
            .await
            .unwrap()
            .unwrap();

        assert!(!result.success);
        assert!(result.source.is_none());
        assert!(h.renderer.calls().is_empty());
        assert!(h.fallback.queries().is_empty());
        assert_eq!(
            h.messenger.deliveries(),
            vec![Delivery::Reply {
                jid: "123@chat".to_owned(),
                text: "*_Example : .logo11 text1;text2_*".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_text_replies_with_usage() {
        let h = ok_harness();
        h.handler.try_handle(&msg(".logo1")).await.unwrap();

        assert!(h.renderer.calls().is_empty());
        assert_eq!(
            h.messenger.deliveries(),
            vec![Delivery::Reply {
                jid: "123@chat".to_owned(),
                text: "*_Example : .logo1 WASI_*".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn test_total_failure_is_reported_once() {
        let h = harness(
            StubRenderer::failing("net down"),
            StubFallback::body(json!({ "status": false })),
            RecordingMessenger::new(),
            FailureReporting::Report,
        );

        let result = h
            .handler
            .try_handle(&msg(".logo9 Hello;World"))
            .await
            .unwrap()
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.source, Some(SourceAttempt::None));
        let deliveries = h.messenger.deliveries();
        assert_eq!(deliveries.len(), 1);
        assert!(matches!(&deliveries[0], Delivery::Error { .. }));
    }

    #[tokio::test]
    async fn test_silent_failure_sends_nothing() {
        let h = harness(
            StubRenderer::failing("net down"),
            StubFallback::body(json!({ "status": false })),
            RecordingMessenger::new(),
            FailureReporting::Silent,
        );

        h.handler.try_handle(&msg(".logo9 Hello;World")).await.unwrap();
        assert!(h.messenger.deliveries().is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_reported_with_command_name() {
        let h = harness(
            StubRenderer::image("http://img/1.png"),
            StubFallback::body(json!({})),
            RecordingMessenger::failing_images(),
            FailureReporting::Report,
        );

        let result = h
            .handler
            .try_handle(&msg(".logo3 Pixel"))
            .await
            .unwrap()
            .unwrap();

        assert!(!result.success);
        let deliveries = h.messenger.deliveries();
        assert!(matches!(
            &deliveries[..],
            [Delivery::Error { message, .. }] if message.ends_with("cmdName: logo3")
        ));
    }

    #[tokio::test]
    async fn test_unreachable_chat_surfaces_error() {
        let h = harness(
            StubRenderer::image("http://img/1.png"),
            StubFallback::body(json!({})),
            RecordingMessenger::failing_all(),
            FailureReporting::Report,
        );

        let result = h.handler.try_handle(&msg(".logo3 Pixel")).await;
        assert!(matches!(result, Err(DeliveryError::Closed)));
    }

    #[tokio::test]
    async fn test_menu_lists_all_styles() {
        let h = ok_harness();
        let result = h.handler.try_handle(&msg(".logomenu")).await.unwrap().unwrap();
        assert!(result.success);

        let deliveries = h.messenger.deliveries();
        let [Delivery::Reply { text, .. }] = &deliveries[..] else {
            panic!("expected a menu reply, got {deliveries:?}");
        };
        assert!(text.starts_with("Logo commands:"));
        assert!(text.contains(".logo1 WASI (logo, ephoto)"));
        assert!(text.contains(".logo6 text1;text2 (logo, textpro)"));
        assert!(text.contains(".logo12 text1;text2"));
    }
}
