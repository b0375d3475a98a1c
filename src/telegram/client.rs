use super::convert::reply_markup;
use crate::bot::SendCommand;
use anyhow::{Context, Result};
use std::time::Duration;
use teloxide::Bot;
use teloxide::payloads::{GetUpdatesSetters, SendMessageSetters};
use teloxide::requests::Requester;
use teloxide::types::{AllowedUpdate, ChatId, Me, MessageId, ReplyParameters, Update};
use tracing::debug;

/// Extra time on top of the long-poll timeout before the HTTP request gives up.
const POLL_GRACE: Duration = Duration::from_secs(10);

pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(base_url: &str, token: &str, poll_timeout_secs: u32) -> Result<Self> {
        let api_url = reqwest::Url::parse(base_url)
            .with_context(|| format!("Invalid Telegram API URL: {base_url}"))?;
        let client = teloxide::net::default_reqwest_settings()
            .timeout(Duration::from_secs(poll_timeout_secs.into()) + POLL_GRACE)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            bot: Bot::with_client(token, client).set_api_url(api_url),
        })
    }

    pub async fn get_me(&self) -> Result<Me> {
        self.bot.get_me().await.context("Failed to call getMe")
    }

    /// Long-polls for message and callback updates with `update_id >= offset`.
    pub async fn get_updates(&self, offset: i32, timeout_secs: u32) -> Result<Vec<Update>> {
        debug!(offset, "Polling for updates");
        self.bot
            .get_updates()
            .offset(offset)
            .timeout(timeout_secs)
            .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery])
            .await
            .context("Failed to poll updates")
    }

    pub async fn send(&self, command: &SendCommand) -> Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(command.chat_id), command.text.as_str());
        if let Some(message_id) = command.reply_to_message_id {
            request = request.reply_parameters(ReplyParameters::new(MessageId(message_id)));
        }
        if let Some(keyboard) = &command.keyboard {
            request = request.reply_markup(reply_markup(keyboard));
        }

        request
            .await
            .with_context(|| format!("Failed to send message to chat {}", command.chat_id))?;
        Ok(())
    }

    /// Stops the loading indicator on the pressed button.
    pub async fn answer_callback(&self, callback_query_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(callback_query_id)
            .await
            .context("Failed to answer callback query")?;
        Ok(())
    }
}
