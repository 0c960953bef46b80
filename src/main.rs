use anyhow::Result;
use chrono::Local;
use clap::Parser;
use colored::*;
use log::{info, warn};

use orders_toolkit::cli::{Cli, Commands, ExportArgs, GenerateArgs};
use orders_toolkit::commands::{export_command, generate_command, run_menu};
use orders_toolkit::config::Config;
use orders_toolkit::config::db::Connector;
use orders_toolkit::orders::OrderRepository;
use orders_toolkit::ui::prompts::default_prompter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("orders-toolkit.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    info!("Starting orders-toolkit");

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let connector = Connector::new(config.database.clone());
            if let Err(err) = connector.migrate().await {
                warn!("Schema migration failed: {:#}", err);
                println!("{} Could not prepare database: {:#}", "[WARNING]".yellow().bold(), err);
            }

            let repo = OrderRepository::new(connector);
            let mut prompter = default_prompter();
            run_menu(&repo, prompter.as_mut(), config.menu.pacing()).await?;
        }
        Commands::Export(ExportArgs { output }) => {
            if let Some(output) = output {
                config.export.output_file = output;
            }
            export_command(&config).await?;
        }
        Commands::Generate(GenerateArgs { rows, seed, output, anchor_date }) => {
            if let Some(rows) = rows {
                config.generator.rows = rows;
            }
            if let Some(seed) = seed {
                config.generator.seed = seed;
            }
            if let Some(output) = output {
                config.generator.output_file = output;
            }
            let anchor = anchor_date.unwrap_or_else(|| Local::now().date_naive());
            generate_command(&config.generator, anchor)?;
        }
    }

    Ok(())
}
