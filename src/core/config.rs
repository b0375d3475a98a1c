use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const TOKEN_ENV_VAR: &str = "RATEBOT_TELEGRAM_TOKEN";

const DEFAULT_PRIVATBANK_URL: &str = "https://api.privatbank.ua/p24api/exchange_rates?json&date=";
const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrivatBankProviderConfig {
    /// Request URL without the trailing `dd.MM.yyyy` date.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub privatbank: Option<PrivatBankProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            privatbank: Some(PrivatBankProviderConfig {
                base_url: DEFAULT_PRIVATBANK_URL.to_string(),
            }),
        }
    }
}

impl ProvidersConfig {
    pub fn privatbank_url(&self) -> &str {
        self.privatbank
            .as_ref()
            .map_or(DEFAULT_PRIVATBANK_URL, |p| &p.base_url)
    }
}

fn default_telegram_url() -> String {
    DEFAULT_TELEGRAM_URL.to_string()
}

fn default_poll_timeout() -> u32 {
    30
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    pub token: Option<String>,
    #[serde(default = "default_telegram_url")]
    pub base_url: String,
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u32,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        TelegramConfig {
            token: None,
            base_url: default_telegram_url(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when it is absent.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("ua", "ratebot", "ratebot")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Bot token from the environment, or from the config file.
    pub fn telegram_token(&self) -> Result<String> {
        Self::resolve_token(std::env::var(TOKEN_ENV_VAR).ok(), &self.telegram)
    }

    fn resolve_token(from_env: Option<String>, telegram: &TelegramConfig) -> Result<String> {
        from_env
            .filter(|token| !token.is_empty())
            .or_else(|| telegram.token.clone().filter(|token| !token.is_empty()))
            .ok_or_else(|| {
                anyhow!(
                    "Telegram bot token is not configured. Set {TOKEN_ENV_VAR} or telegram.token"
                )
            })
    }
}
