pub mod bot;
pub mod cli;
pub mod core;
pub mod providers;
pub mod telegram;

use crate::bot::ConversationController;
use crate::core::SnapshotCache;
use crate::core::config::AppConfig;
use crate::providers::PrivatBankProvider;
use crate::telegram::TelegramClient;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    /// Answer Telegram updates until interrupted.
    Serve,
    /// Talk to the bot from the terminal.
    Chat,
    /// Print the rates of one date.
    Rates {
        date: Option<String>,
        currency: Option<String>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Rate bot starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(providers = ?config.providers, "Loaded config");

    let provider = PrivatBankProvider::new(config.providers.privatbank_url())?;

    match command {
        AppCommand::Serve => {
            let token = config.telegram_token()?;
            let poll_timeout_secs = config.telegram.poll_timeout_secs;
            let client =
                TelegramClient::new(&config.telegram.base_url, &token, poll_timeout_secs)?;
            let controller = ConversationController::new(provider, SnapshotCache::new());
            cli::serve::serve(&client, &controller, poll_timeout_secs).await
        }
        AppCommand::Chat => {
            let controller = ConversationController::new(provider, SnapshotCache::new());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            cli::chat::chat(&controller, stdin).await
        }
        AppCommand::Rates { date, currency } => {
            let text = cli::rates::rates(&provider, date.as_deref(), currency.as_deref()).await?;
            println!("{text}");
            Ok(())
        }
    }
}
