//! Mock implementation of [`civic_core::Bot`] for integration tests.
//!
//! Records every outgoing message (with its keyboard, if any) and serves downloads from
//! bytes registered per file id, so tests never hit Telegram.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use civic_core::{Bot, Chat, CivicError, ReplyKeyboard, Result};

/// One recorded outgoing message.
#[derive(Debug, Clone, PartialEq)]
pub struct SentRecord {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Option<ReplyKeyboard>,
}

/// Mock Bot that records sends and writes preset bytes on download.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<SentRecord>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the bytes returned when `file_id` is downloaded.
    pub fn add_file(&self, file_id: &str, bytes: Vec<u8>) {
        self.files
            .lock()
            .unwrap()
            .insert(file_id.to_string(), bytes);
    }

    pub fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|r| r.text.clone())
    }

    pub fn last_keyboard(&self) -> Option<ReplyKeyboard> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .and_then(|r| r.keyboard.clone())
    }

    fn record(&self, chat: &Chat, text: &str, keyboard: Option<ReplyKeyboard>) {
        self.sent.lock().unwrap().push(SentRecord {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard,
        });
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(chat, text, None);
        Ok(())
    }

    async fn send_with_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &ReplyKeyboard,
    ) -> Result<()> {
        self.record(chat, text, Some(keyboard.clone()));
        Ok(())
    }

    async fn download_file(&self, file_id: &str, destination: &Path) -> Result<()> {
        let bytes = self
            .files
            .lock()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| CivicError::Bot(format!("unknown file id {}", file_id)))?;
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(destination, bytes)?;
        Ok(())
    }
}
