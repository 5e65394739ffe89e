//! Command handling module.
//!
//! Turns chat messages such as `.logo8 Hello;World` into logo requests.
//! Each registered style is one command; `logomenu` lists them all.

mod handler;
mod types;

pub use handler::CommandHandler;
pub use types::{split_texts, usage_hint, BotCommand, CommandResult, LogoTexts};
