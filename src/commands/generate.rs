use anyhow::Result;
use chrono::NaiveDate;
use colored::*;
use log::info;

use crate::config::GeneratorConfig;
use crate::generator::{self, Generation, Generator};

/// Generate the dirty dataset, write it as CSV and print a sample
pub fn generate_command(config: &GeneratorConfig, anchor: NaiveDate) -> Result<Generation> {
    info!(
        "Generating {} records (seed {}, anchor {})",
        config.rows, config.seed, anchor
    );

    let generation = Generator::new(config, anchor).generate();
    generator::write_csv(&config.output_file, &generation.records)?;

    println!(
        "Successfully generated and saved {} messy records to {}",
        generation.records.len(),
        config.output_file.display().to_string().bold()
    );

    println!("\n{}", "Injected defects:".bold());
    for (label, count) in generation.summary.entries() {
        println!("  {:<28} {}", label, count);
    }

    if config.sample_rows > 0 {
        println!("\n{}", "Sample of generated messy data:".bold());
        println!("{}", generator::render_sample(&generation.records, config.sample_rows));
    }

    Ok(generation)
}
