//! Mapping between teloxide types and bot events.

use crate::bot::{Callback, IncomingEvent, InlineButton, Keyboard, TextMessage};
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup,
    Update, UpdateKind,
};

/// Converts an update into a bot event. Other update kinds yield `None`.
pub fn into_event(update: Update) -> Option<IncomingEvent> {
    match update.kind {
        UpdateKind::Message(message) => Some(IncomingEvent::Message(TextMessage {
            chat_id: message.chat.id.0,
            message_id: message.id.0,
            text: message.text().map(str::to_string),
        })),
        UpdateKind::CallbackQuery(query) => Some(IncomingEvent::Callback(Callback {
            chat_id: query.message.as_ref().map(|message| message.chat().id.0),
            id: query.id,
            data: query.data,
        })),
        _ => None,
    }
}

pub fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Menu => {
            let rows = Keyboard::menu_rows().map(|row| {
                row.iter()
                    .map(|label| KeyboardButton::new(*label))
                    .collect::<Vec<_>>()
            });
            ReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard())
        }
        Keyboard::Inline(rows) => ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(
            rows.iter()
                .map(|row| row.iter().map(inline_button).collect::<Vec<_>>()),
        )),
    }
}

fn inline_button(button: &InlineButton) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(button.label.clone(), button.callback_data.clone())
}
