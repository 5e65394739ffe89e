//! Chat messaging module.
//!
//! Defines the contract the bot uses to talk back to a chat, plus a
//! console transport for running the bot in a terminal.

mod console;
mod messenger;

pub use console::ConsoleMessenger;
pub use messenger::{ContextInfo, IncomingMessage, Messenger, OutgoingImage};
