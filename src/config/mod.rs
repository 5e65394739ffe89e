//! Configuration module for the logo bot.
//!
//! Handles loading settings from the environment and managing the
//! catalog of registered logo styles.

mod settings;
mod styles;

pub use settings::{ConfigError, LogoSettings};
pub use styles::{CatalogError, InputForm, LogoStyle, StyleCatalog};

/// Caption used for primary deliveries when none is configured.
pub const DEFAULT_CAPTION: &str = "Here is your generated logo!";

/// Command names handled by the bot itself rather than a logo style.
pub const RESERVED_COMMANDS: [&str; 2] = ["logomenu", "logos"];
