//! Wraps teloxide::Bot and implements [`civic_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use std::path::Path;

use async_trait::async_trait;
use civic_core::{Bot as CoreBot, Chat, CivicError, ReplyKeyboard, Result};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ButtonRequest, ChatId, FileId, KeyboardButton, KeyboardMarkup};
use tracing::{debug, instrument};

/// Thin wrapper around teloxide::Bot that implements civic-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn bot_error(e: impl std::fmt::Display) -> CivicError {
    CivicError::Bot(e.to_string())
}

/// Builds a one-time, resized reply keyboard.
fn keyboard_markup(keyboard: &ReplyKeyboard) -> KeyboardMarkup {
    let markup = match keyboard {
        ReplyKeyboard::Options(options) => KeyboardMarkup::new(
            options
                .iter()
                .map(|option| vec![KeyboardButton::new(option.clone())]),
        ),
        ReplyKeyboard::RequestLocation(label) => KeyboardMarkup::new(vec![vec![
            KeyboardButton::new(label.clone()).request(ButtonRequest::Location),
        ]]),
    };
    markup.one_time_keyboard().resize_keyboard()
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &ReplyKeyboard,
    ) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(keyboard_markup(keyboard))
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn download_file(&self, file_id: &str, destination: &Path) -> Result<()> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(bot_error)?;

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut dst = tokio::fs::File::create(destination).await?;
        self.bot
            .download_file(&file.path, &mut dst)
            .await
            .map_err(bot_error)?;

        debug!(size = file.meta.size, path = %destination.display(), "File downloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_new() {
        let adapter = TelegramBotAdapter::new(teloxide::Bot::new("dummy_token"));
        assert_eq!(adapter.inner().token(), "dummy_token");
    }

    #[test]
    fn test_options_keyboard_one_option_per_row() {
        let markup = keyboard_markup(&ReplyKeyboard::Options(vec![
            "Pothole".to_string(),
            "Trash".to_string(),
        ]));

        assert_eq!(markup.keyboard.len(), 2);
        assert_eq!(markup.keyboard[0][0].text, "Pothole");
        assert_eq!(markup.keyboard[1][0].text, "Trash");
    }

    #[test]
    fn test_location_keyboard_requests_location() {
        let markup = keyboard_markup(&ReplyKeyboard::RequestLocation("Send Location".to_string()));

        assert_eq!(markup.keyboard.len(), 1);
        assert_eq!(markup.keyboard[0][0].text, "Send Location");
        assert_eq!(markup.keyboard[0][0].request, Some(ButtonRequest::Location));
    }
}
