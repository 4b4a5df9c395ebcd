//! Logs each inbound message and the chain's final response.

use async_trait::async_trait;
use civic_core::{Handler, HandlerError, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the response in after().
///
/// Messages without a sender (user id 0) fail with [`HandlerError::NoSender`]; reports are
/// filed per user, so nothing downstream can serve them.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if message.user.id == 0 {
            return Err(HandlerError::NoSender.into());
        }
        info!(
            user_id = message.user.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            kind = message.content.kind(),
            text = ?message.text(),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = %message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}
