//! The `/report` conversation: type -> photo -> (location) -> persisted report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use civic_core::{
    Bot, CivicError, Handler, HandlerResponse, Message, MessageContent, ReplyKeyboard, Result,
};
use photo_gps::{extract_gps, Coordinates};
use report_store::{IssueType, NewReport, Priority, ReportStore};
use tracing::{debug, info, instrument, warn};

use crate::command::BotCommand;
use crate::replies;
use crate::session::{ConversationState, SessionStore};

/// Drives each user through the report conversation and persists the finished report.
pub struct ReportFlowHandler {
    bot: Arc<dyn Bot>,
    store: Arc<dyn ReportStore>,
    sessions: SessionStore,
    photo_dir: PathBuf,
}

impl ReportFlowHandler {
    pub fn new(bot: Arc<dyn Bot>, store: Arc<dyn ReportStore>, photo_dir: impl Into<PathBuf>) -> Self {
        Self {
            bot,
            store,
            sessions: SessionStore::new(),
            photo_dir: photo_dir.into(),
        }
    }

    /// Conversation states, exposed for inspection.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Where a photo from `user` is stored: `<photo_dir>/<user>_<file_id>.jpg`.
    pub fn photo_path(&self, user: &str, file_id: &str) -> PathBuf {
        self.photo_dir
            .join(format!("{}_{}.jpg", sanitize(user), sanitize(file_id)))
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn reply_with_keyboard(
        &self,
        message: &Message,
        text: &str,
        keyboard: ReplyKeyboard,
    ) -> Result<HandlerResponse> {
        self.bot
            .send_with_keyboard(&message.chat, text, &keyboard)
            .await?;
        Ok(HandlerResponse::Reply(text.to_string()))
    }

    async fn start_report(&self, message: &Message) -> Result<HandlerResponse> {
        self.sessions
            .set(message.user.id, ConversationState::AwaitingType);
        info!(user_id = message.user.id, state = "awaiting_type", "Report started");
        self.reply_with_keyboard(
            message,
            replies::SELECT_TYPE,
            ReplyKeyboard::Options(replies::issue_type_options()),
        )
        .await
    }

    async fn on_text(
        &self,
        message: &Message,
        state: ConversationState,
        text: &str,
    ) -> Result<HandlerResponse> {
        match state {
            ConversationState::Idle => Ok(HandlerResponse::Ignore),
            ConversationState::AwaitingType => match text.trim().parse::<IssueType>() {
                Ok(issue_type) => {
                    let priority = issue_type.priority();
                    self.sessions.set(
                        message.user.id,
                        ConversationState::AwaitingPhoto {
                            issue_type,
                            priority,
                        },
                    );
                    info!(
                        user_id = message.user.id,
                        issue_type = %issue_type,
                        priority = %priority,
                        state = "awaiting_photo",
                        "Issue type selected"
                    );
                    self.reply(message, replies::SEND_PHOTO.to_string()).await
                }
                Err(_) => {
                    debug!(user_id = message.user.id, text = %text, "Unrecognized issue type");
                    self.reply_with_keyboard(
                        message,
                        replies::SELECT_TYPE_AGAIN,
                        ReplyKeyboard::Options(replies::issue_type_options()),
                    )
                    .await
                }
            },
            ConversationState::AwaitingPhoto { .. } => {
                self.reply(message, replies::STILL_AWAITING_PHOTO.to_string())
                    .await
            }
            ConversationState::AwaitingLocation { .. } => {
                self.reply_with_keyboard(
                    message,
                    replies::STILL_AWAITING_LOCATION,
                    location_keyboard(),
                )
                .await
            }
        }
    }

    #[instrument(skip(self, message, state), fields(user_id = message.user.id))]
    async fn on_photo(
        &self,
        message: &Message,
        state: ConversationState,
        file_id: &str,
    ) -> Result<HandlerResponse> {
        let Some((issue_type, priority)) = state.selection() else {
            return self
                .reply(message, replies::NO_REPORT_IN_PROGRESS.to_string())
                .await;
        };

        let user = message.user.display_name();
        let image_path = self.photo_path(&user, file_id);
        self.bot.download_file(file_id, &image_path).await?;
        info!(path = %image_path.display(), "Photo saved");

        match read_gps(&image_path).await? {
            Some(coords) => {
                self.submit(
                    message,
                    issue_type,
                    priority,
                    &image_path,
                    coords.latitude,
                    coords.longitude,
                )
                .await
            }
            None => {
                self.sessions.set(
                    message.user.id,
                    ConversationState::AwaitingLocation {
                        issue_type,
                        priority,
                        image_path,
                    },
                );
                info!(state = "awaiting_location", "No GPS in photo");
                self.reply_with_keyboard(
                    message,
                    replies::NO_GPS_SHARE_LOCATION,
                    location_keyboard(),
                )
                .await
            }
        }
    }

    async fn on_location(
        &self,
        message: &Message,
        state: ConversationState,
        latitude: f64,
        longitude: f64,
    ) -> Result<HandlerResponse> {
        match state {
            ConversationState::AwaitingLocation {
                issue_type,
                priority,
                image_path,
            } => {
                self.submit(message, issue_type, priority, &image_path, latitude, longitude)
                    .await
            }
            other => {
                warn!(
                    user_id = message.user.id,
                    state = %other,
                    "Location without a pending report"
                );
                self.reply(message, replies::NO_REPORT_IN_PROGRESS.to_string())
                    .await
            }
        }
    }

    /// Persists the report, resets the user to Idle and sends the confirmation.
    async fn submit(
        &self,
        message: &Message,
        issue_type: IssueType,
        priority: Priority,
        image_path: &Path,
        latitude: f64,
        longitude: f64,
    ) -> Result<HandlerResponse> {
        let new_report = NewReport::new(
            message.user.display_name(),
            image_path.display().to_string(),
            Some(latitude),
            Some(longitude),
            issue_type,
        )
        .with_priority(priority);

        let report = self
            .store
            .append(new_report)
            .await
            .map_err(|e| CivicError::Storage(e.to_string()))?;
        self.sessions.reset(message.user.id);

        info!(
            user_id = message.user.id,
            report_id = report.report_id,
            issue_type = %report.issue_type,
            "Report submitted"
        );
        self.reply(message, replies::report_submitted(&report)).await
    }
}

#[async_trait]
impl Handler for ReportFlowHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        // One update per user at a time; held until the state transition is written back.
        let _turn = self.sessions.lock_user(message.user.id).await;
        let state = self.sessions.get(message.user.id);

        match &message.content {
            MessageContent::Text(text) => match BotCommand::parse(text) {
                Some(BotCommand::Report) => self.start_report(message).await,
                Some(_) => Ok(HandlerResponse::Ignore),
                None => self.on_text(message, state, text).await,
            },
            MessageContent::Photo { file_id } => self.on_photo(message, state, file_id).await,
            MessageContent::Location {
                latitude,
                longitude,
            } => {
                self.on_location(message, state, *latitude, *longitude)
                    .await
            }
            MessageContent::Unsupported => Ok(HandlerResponse::Ignore),
        }
    }
}

fn location_keyboard() -> ReplyKeyboard {
    ReplyKeyboard::RequestLocation(replies::SEND_LOCATION_BUTTON.to_string())
}

/// Reads GPS tags off the async runtime.
async fn read_gps(path: &Path) -> Result<Option<Coordinates>> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || extract_gps(&path))
        .await
        .map_err(|e| CivicError::Metadata(e.to_string()))?
        .map_err(|e| CivicError::Metadata(e.to_string()))
}

/// Keeps file names to ASCII letters, digits, `-` and `_`.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
