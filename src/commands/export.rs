use anyhow::Result;
use colored::*;
use log::{error, info};

use crate::config::Config;
use crate::config::db::Connector;
use crate::export::{self, ExportOutcome};

/// Fetch the whole orders table and write it to the configured workbook.
/// A write failure is reported once and returned as
/// [`ExportOutcome::Failed`], not as an error.
pub async fn export_command(config: &Config) -> Result<ExportOutcome> {
    info!("Starting export to {}", config.export.output_file.display());
    let connector = Connector::new(config.database.clone());

    println!("{} Attempting to connect to the database...", "[INFO]".blue().bold());
    let table = export::fetch_all(&connector).await;
    println!(
        "{} Fetched {} records from the orders table.",
        "[INFO]".blue().bold(),
        table.len()
    );

    let outcome = match export::export_to_file(&table, &config.export) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("Export failed: {:#}", err);
            ExportOutcome::Failed {
                path: config.export.output_file.clone(),
                reason: format!("{:#}", err),
            }
        }
    };

    match &outcome {
        ExportOutcome::SkippedEmpty => println!(
            "{} Cannot export. Table is empty.",
            "[WARNING]".yellow().bold()
        ),
        ExportOutcome::Failed { reason, .. } => {
            println!("{} Failed to write to Excel file: {}", "[ERROR]".red().bold(), reason)
        }
        ExportOutcome::Written { path, rows } => {
            println!("{}", "-".repeat(50));
            println!("Successfully exported data to: {}", path.display().to_string().bold());
            println!("Total rows exported: {}", rows);
            println!("{}", "-".repeat(50));
        }
    }

    Ok(outcome)
}
