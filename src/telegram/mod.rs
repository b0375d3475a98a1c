//! Telegram Bot API transport on top of teloxide.

pub mod client;
pub mod convert;

pub use client::TelegramClient;
