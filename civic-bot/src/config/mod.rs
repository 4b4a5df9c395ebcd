//! Bot configuration: Telegram connection plus log, report store and photo paths. Loaded from env.

use anyhow::Result;
use civic_telegram::TelegramConfig;
use std::env;
use std::path::{Path, PathBuf};


pub const DEFAULT_LOG_FILE: &str = "logs/civic-bot.log";
pub const DEFAULT_REPORTS_FILE: &str = "reports.csv";
pub const DEFAULT_PHOTO_DIR: &str = "photos";

/// Full bot config. Use [`BotConfig::load`] then [`BotConfig::validate`].
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    /// LOG_FILE
    pub log_file: String,
    /// REPORTS_FILE
    pub reports_file: PathBuf,
    /// PHOTO_DIR
    pub photo_dir: PathBuf,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        Ok(Self {
            telegram,
            log_file,
            reports_file: reports_file_from_env(),
            photo_dir: env::var("PHOTO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PHOTO_DIR)),
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        if self.reports_file.as_os_str().is_empty() {
            anyhow::bail!("REPORTS_FILE is empty");
        }
        if self.photo_dir.as_os_str().is_empty() {
            anyhow::bail!("PHOTO_DIR is empty");
        }
        Ok(())
    }

    pub fn bot_token(&self) -> &str {
        &self.telegram.bot_token
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.telegram.telegram_api_url.as_deref()
    }
    pub fn log_file(&self) -> &str {
        &self.log_file
    }
    pub fn reports_file(&self) -> &Path {
        &self.reports_file
    }
    pub fn photo_dir(&self) -> &Path {
        &self.photo_dir
    }
}

/// REPORTS_FILE or the default; shared with the `show` command, which needs no token.
pub fn reports_file_from_env() -> PathBuf {
    env::var("REPORTS_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_REPORTS_FILE))
}
