//! Bot abstraction for replying to users and fetching their attachments.
//!
//! [`Bot`] is transport-agnostic; civic-telegram implements it via teloxide and tests substitute a mock.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;
use std::path::Path;

/// Quick-reply keyboard attached to an outgoing message. Always shown once and then hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyKeyboard {
    /// One button per option, one option per row.
    Options(Vec<String>),
    /// A single button that shares the user's current location when pressed.
    RequestLocation(String),
}

/// Abstraction for sending replies and downloading files. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a text message together with a one-time reply keyboard.
    async fn send_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &ReplyKeyboard,
    ) -> Result<()>;

    /// Downloads the file identified by `file_id` to `destination`, creating or truncating it.
    async fn download_file(&self, file_id: &str, destination: &Path) -> Result<()>;

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
