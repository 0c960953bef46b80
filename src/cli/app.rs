use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orders-toolkit")]
#[command(about = "Administrative toolkit for the e-commerce orders table")]
pub struct Cli {
    /// Alternate configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive create/read/update/delete menu (default)
    Menu,
    /// Export the orders table to a spreadsheet
    Export(ExportArgs),
    /// Generate a CSV of deliberately dirty order records
    Generate(GenerateArgs),
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output workbook path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of records to generate
    #[arg(short, long)]
    pub rows: Option<u32>,
    /// Random seed
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Output CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Date that "the past year" counts back from (YYYY-MM-DD, default today)
    #[arg(long)]
    pub anchor_date: Option<NaiveDate>,
}
