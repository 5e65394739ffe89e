//! Logo Maker Bot Library
//!
//! Chat bot commands that turn text into stylized logo images.
//!
//! This crate provides the core functionality for:
//! - Registering logo styles and loading them from JSON
//! - Resolving style templates to logo service URLs
//! - Rendering through a primary service with a fallback maker API
//! - Handling user commands via chat messages

pub mod chat;
pub mod commands;
pub mod config;
pub mod logo;

#[cfg(test)]
mod testing;
