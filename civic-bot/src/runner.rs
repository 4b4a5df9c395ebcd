//! Wires config, store, handlers and the Telegram REPL together.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use civic_core::{init_tracing, Bot};
use civic_telegram::{run_repl, TelegramBotAdapter};
use handler_chain::HandlerChain;
use report_store::{CsvReportStore, ReportStore};
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::handlers::{CommandHandler, LoggingHandler, ReportFlowHandler};

/// Builds the chain: logging, then stateless commands, then the report conversation.
pub fn build_handler_chain(
    bot: Arc<dyn Bot>,
    store: Arc<dyn ReportStore>,
    photo_dir: impl Into<PathBuf>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(CommandHandler::new(bot.clone(), store.clone())))
        .add_handler(Arc::new(ReportFlowHandler::new(bot, store, photo_dir)))
}

/// Main entry: validate config, init logging, open the report store, then run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        reports_file = %config.reports_file().display(),
        photo_dir = %config.photo_dir().display(),
        api_url = ?config.telegram_api_url(),
        "Initializing bot"
    );

    let store = CsvReportStore::open(config.reports_file()).with_context(|| {
        format!(
            "Failed to open report store at {}",
            config.reports_file().display()
        )
    })?;
    let store: Arc<dyn ReportStore> = Arc::new(store);

    let teloxide_bot = config.telegram.build_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let handler_chain = build_handler_chain(bot, store, config.photo_dir());

    info!("Bot started successfully");
    run_repl(teloxide_bot, handler_chain).await
}
