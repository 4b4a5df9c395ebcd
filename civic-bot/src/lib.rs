//! CivicWatch bot: users report civic issues (potholes, streetlights, trash) with a photo and a
//! location, and later check a report's status.
//!
//! ## Modules
//!
//! - [`config`] – BotConfig loaded from env
//! - [`command`] – slash-command parsing
//! - [`session`] – per-user conversation state
//! - [`handlers`] – logging, command and report-flow handlers
//! - [`replies`] – user-facing texts
//! - [`runner`] – handler chain assembly and `run_bot`
//! - [`cli`] – clap CLI

pub mod cli;
pub mod command;
pub mod config;
pub mod handlers;
pub mod replies;
pub mod runner;
pub mod session;

pub use cli::{load_config, show_report, Cli, Commands};
pub use command::BotCommand;
pub use config::BotConfig;
pub use handlers::{CommandHandler, LoggingHandler, ReportFlowHandler};
pub use runner::{build_handler_chain, run_bot};
pub use session::{ConversationState, SessionStore};
