//! Binary for the CivicWatch bot.

use anyhow::Result;
use civic_bot::{load_config, run_bot, show_report, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Show {
            id,
            user,
            reports_file,
        } => show_report(id, &user, reports_file).await,
    }
}
