//! CLI parser, config loading and the operator `show` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use report_store::{CsvReportStore, ReportStore};

use crate::config::{reports_file_from_env, BotConfig};
use crate::replies;

#[derive(Parser)]
#[command(name = "civic-bot")]
#[command(about = "CivicWatch Telegram bot: run, show", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print one report, looked up by id and the user who filed it.
    Show {
        id: u64,
        #[arg(short, long)]
        user: String,
        /// Defaults to REPORTS_FILE, then reports.csv.
        #[arg(long)]
        reports_file: Option<PathBuf>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Looks up a report with the same owner scoping the bot applies and prints it.
pub async fn show_report(id: u64, user: &str, reports_file: Option<PathBuf>) -> Result<()> {
    let path = reports_file.unwrap_or_else(reports_file_from_env);
    let store = CsvReportStore::open(&path)
        .with_context(|| format!("Failed to open report store at {}", path.display()))?;

    match store.find_by_id_and_user(id, user).await? {
        Some(report) => {
            println!("{}", replies::report_status(&report));
            println!("User: {}", report.user);
            println!("Image: {}", report.image_file);
            match (report.latitude, report.longitude) {
                (Some(lat), Some(lon)) => println!("Location: {:.6}, {:.6}", lat, lon),
                _ => println!("Location: unknown"),
            }
        }
        None => println!("{}", replies::report_not_found(&id.to_string())),
    }
    Ok(())
}
