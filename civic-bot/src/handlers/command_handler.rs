//! Stateless commands: `/start` and `/my_status <report_id>`.

use std::sync::Arc;

use async_trait::async_trait;
use civic_core::{Bot, CivicError, Handler, HandlerResponse, Message, Result};
use report_store::ReportStore;
use tracing::{info, instrument, warn};

use crate::command::BotCommand;
use crate::replies;

/// Answers `/start` and `/my_status`. Other messages are ignored.
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    store: Arc<dyn ReportStore>,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn Bot>, store: Arc<dyn ReportStore>) -> Self {
        Self { bot, store }
    }

    /// Looks up a report the sender owns. Exactly one argument is accepted.
    async fn status_reply(&self, message: &Message, args: &[String]) -> Result<String> {
        let [raw_id] = args else {
            return Ok(replies::STATUS_USAGE.to_string());
        };

        let Ok(report_id) = raw_id.parse::<u64>() else {
            warn!(user_id = message.user.id, raw_id = %raw_id, "Non-numeric report id");
            return Ok(replies::report_not_found(raw_id));
        };

        let user = message.user.display_name();
        let found = self
            .store
            .find_by_id_and_user(report_id, &user)
            .await
            .map_err(|e| CivicError::Storage(e.to_string()))?;

        Ok(match found {
            Some(report) => replies::report_status(&report),
            None => replies::report_not_found(raw_id),
        })
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = message.text().and_then(BotCommand::parse) else {
            return Ok(HandlerResponse::Ignore);
        };

        let reply = match command {
            BotCommand::Start => replies::WELCOME.to_string(),
            BotCommand::MyStatus(args) => self.status_reply(message, &args).await?,
            BotCommand::Report | BotCommand::Unknown(_) => return Ok(HandlerResponse::Ignore),
        };

        info!(user_id = message.user.id, "Answering command");
        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
