use super::ui::{self, StyleType};
use crate::bot::{
    Callback, ChatId, ConversationController, IncomingEvent, Keyboard, MessageId, SendCommand,
    TextMessage,
};
use crate::core::provider::RateProvider;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const LOCAL_CHAT: ChatId = 0;

/// A terminal conversation with the bot.
///
/// Typing the label of a button from the last inline keyboard presses that button.
#[derive(Default)]
pub struct ChatSession {
    last_keyboard: Option<Keyboard>,
    next_message_id: MessageId,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn to_event(&mut self, line: &str) -> IncomingEvent {
        let pressed = self
            .last_keyboard
            .as_ref()
            .and_then(|keyboard| keyboard.button(line));

        if let Some(button) = pressed {
            return IncomingEvent::Callback(Callback {
                id: format!("local-{}", self.next_message_id),
                chat_id: Some(LOCAL_CHAT),
                data: Some(button.callback_data.clone()),
            });
        }

        self.next_message_id += 1;
        IncomingEvent::Message(TextMessage {
            chat_id: LOCAL_CHAT,
            message_id: self.next_message_id,
            text: Some(line.to_string()),
        })
    }

    pub async fn submit<P: RateProvider>(
        &mut self,
        controller: &ConversationController<P>,
        line: &str,
    ) -> Vec<SendCommand> {
        let event = self.to_event(line);
        let replies = controller.handle(&event).await;

        if let Some(inline) = replies
            .iter()
            .filter_map(|reply| reply.keyboard.as_ref())
            .find(|keyboard| matches!(keyboard, Keyboard::Inline(_)))
        {
            self.last_keyboard = Some(inline.clone());
        }
        replies
    }
}

/// Reads lines from `input` until EOF and prints every bot response.
pub async fn chat<P, R>(controller: &ConversationController<P>, input: R) -> Result<()>
where
    P: RateProvider,
    R: AsyncBufRead + Unpin,
{
    println!("{}", ui::style_text("Currency rates chat", StyleType::Title));
    println!(
        "{}",
        ui::style_text(
            "Type a command or a date like 01.01.2024. Ctrl-D to quit.",
            StyleType::Subtle
        )
    );
    println!("{}", ui::format_keyboard(&Keyboard::Menu));

    let mut session = ChatSession::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        if line.is_empty() {
            continue;
        }
        let replies = session.submit(controller, &line).await;
        if replies.is_empty() {
            println!("{}", ui::style_text("(no response)", StyleType::Error));
        }
        for reply in &replies {
            println!("{}", ui::format_response(reply));
        }
        ui::print_separator();
    }
    Ok(())
}
