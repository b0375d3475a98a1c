//! Events exchanged with the chat transport.

use super::keyboard::Keyboard;

pub type ChatId = i64;
pub type MessageId = i32;

/// A user message. `text` is absent for stickers, photos and other non-text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub text: Option<String>,
}

/// A press on an inline keyboard button.
///
/// `chat_id` is absent when the originating message is no longer available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callback {
    pub id: String,
    pub chat_id: Option<ChatId>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingEvent {
    Message(TextMessage),
    Callback(Callback),
}

/// Instruction for the transport to deliver one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCommand {
    pub chat_id: ChatId,
    pub text: String,
    pub reply_to_message_id: Option<MessageId>,
    pub keyboard: Option<Keyboard>,
}

impl SendCommand {
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_to_message_id: None,
            keyboard: None,
        }
    }

    pub fn reply_to(mut self, message_id: MessageId) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}
