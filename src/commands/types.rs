//! Command types and argument parsing.

use std::fmt;

use crate::config::{InputForm, StyleCatalog, RESERVED_COMMANDS};
use crate::logo::SourceAttempt;

/// Available bot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// List every registered logo command.
    Menu,

    /// Render a logo with a registered style.
    Logo {
        /// Catalog name of the style, as registered.
        name: String,
        /// Everything after the command name, trimmed.
        args: String,
    },
}

impl BotCommand {
    /// Parses a command from a message text.
    ///
    /// Returns `None` if the message is not addressed to a known command.
    #[must_use]
    pub fn parse(text: &str, prefix: &str, catalog: &StyleCatalog) -> Option<Self> {
        let text = text.trim();

        let after_prefix = text.strip_prefix(prefix)?.trim_start();

        let (cmd, args) = match after_prefix.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd.to_lowercase(), args.trim()),
            None => (after_prefix.to_lowercase(), ""),
        };

        if RESERVED_COMMANDS.contains(&cmd.as_str()) {
            return Some(Self::Menu);
        }

        catalog.find(&cmd).map(|style| Self::Logo {
            name: style.name.clone(),
            args: args.to_owned(),
        })
    }

    /// Returns the command name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Menu => RESERVED_COMMANDS[0],
            Self::Logo { name, .. } => name,
        }
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logo { name, args } if !args.is_empty() => write!(f, "{name} {args}"),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// The two texts a logo command renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoTexts {
    pub primary: String,
    pub secondary: String,
}

/// Splits command arguments according to the style's input form.
///
/// Returns `None` when a required text is missing.
#[must_use]
pub fn split_texts(input: &InputForm, args: &str) -> Option<LogoTexts> {
    let args = args.trim();

    match input {
        InputForm::Single { secondary } => (!args.is_empty()).then(|| LogoTexts {
            primary: args.to_owned(),
            secondary: secondary.clone(),
        }),
        InputForm::Pair => {
            let (primary, secondary) = split_pair(args);
            (!primary.is_empty() && !secondary.is_empty()).then(|| LogoTexts {
                primary: primary.to_owned(),
                secondary: secondary.to_owned(),
            })
        }
        InputForm::PairOptional { secondary: default } => {
            let (primary, secondary) = split_pair(args);
            (!primary.is_empty()).then(|| LogoTexts {
                primary: primary.to_owned(),
                secondary: if secondary.is_empty() {
                    default.clone()
                } else {
                    secondary.to_owned()
                },
            })
        }
    }
}

/// First and second `;`-separated segments; later segments are ignored.
fn split_pair(args: &str) -> (&str, &str) {
    let mut parts = args.split(';');
    let first = parts.next().unwrap_or_default().trim();
    let second = parts.next().unwrap_or_default().trim();
    (first, second)
}

/// Builds the usage hint for a logo command.
#[must_use]
pub fn usage_hint(prefix: &str, name: &str, input: &InputForm) -> String {
    format!("*_Example : {prefix}{name} {}_*", input.placeholder())
}

/// Result of command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command was successful.
    pub success: bool,

    /// Summary of what happened, for logs.
    pub message: String,

    /// Tier that produced the logo, for logo commands that reached the
    /// orchestrator.
    pub source: Option<SourceAttempt>,
}

impl CommandResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the tier that handled the request.
    #[must_use]
    pub fn with_source(mut self, source: SourceAttempt) -> Self {
        self.source = Some(source);
        self
    }
}
