//! Conversation handling: classifies chat events and produces responses.

pub mod controller;
pub mod event;
pub mod keyboard;

pub use controller::ConversationController;
pub use event::{Callback, ChatId, IncomingEvent, MessageId, SendCommand, TextMessage};
pub use keyboard::{InlineButton, Keyboard};
