//! Orders table to spreadsheet export

use anyhow::{Context, Result};
use log::{error, info, warn};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

use crate::config::db::Connector;
use crate::config::{ExportConfig, ORDERS_TABLE};
use crate::orders::error::OrderError;

pub mod table;

pub use table::{CellValue, OrderTable};

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// Nothing was written because the table had no rows
    SkippedEmpty,
    Written { path: PathBuf, rows: usize },
    /// The workbook could not be written; the reason was already reported
    Failed { path: PathBuf, reason: String },
}

/// Read the whole orders table, newest Order_Date first.
///
/// Any database failure is logged and yields [`OrderTable::empty`].
pub async fn fetch_all(connector: &Connector) -> OrderTable {
    info!("Attempting to connect to the database...");
    let mut session = match connector.connect().await {
        Ok(session) => session,
        Err(err) => {
            error!("Database error occurred: {}", err);
            return OrderTable::empty();
        }
    };

    let sql = format!("SELECT * FROM {} ORDER BY Order_Date DESC", ORDERS_TABLE);
    info!("Executing query: {}", sql);

    let result = match session.connection() {
        Ok(conn) => sqlx::query(&sql)
            .fetch_all(conn)
            .await
            .map_err(OrderError::from)
            .and_then(|rows| OrderTable::from_rows(&rows).map_err(OrderError::from)),
        Err(err) => Err(err),
    };
    session.close().await;
    info!("Database connection closed.");

    match result {
        Ok(table) => {
            info!("Fetched {} records from '{}' table", table.len(), ORDERS_TABLE);
            table
        }
        Err(err) => {
            error!("Database error occurred: {}", err);
            OrderTable::empty()
        }
    }
}

/// Write the table to a single-sheet workbook. An empty table is skipped
/// with a warning and no file is created.
pub fn export_to_file(table: &OrderTable, config: &ExportConfig) -> Result<ExportOutcome> {
    if table.is_empty() {
        warn!("Cannot export, table is empty");
        return Ok(ExportOutcome::SkippedEmpty);
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(&config.sheet_name)?;

    let header_format = Format::new().set_bold();
    for (col, name) in table.columns().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (index, cells) in table.rows().iter().enumerate() {
        let row = (index + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Null => {}
                CellValue::Integer(value) => {
                    sheet.write_number(row, col, *value as f64)?;
                }
                CellValue::Real(value) if value.is_finite() => {
                    sheet.write_number(row, col, *value)?;
                }
                CellValue::Real(value) => {
                    sheet.write_string(row, col, value.to_string())?;
                }
                CellValue::Text(value) => {
                    sheet.write_string(row, col, value)?;
                }
            }
        }
    }

    sheet.autofit();

    save_workbook(&mut workbook, &config.output_file)?;
    info!("Exported {} rows to {}", table.len(), config.output_file.display());

    Ok(ExportOutcome::Written {
        path: config.output_file.clone(),
        rows: table.len(),
    })
}

fn save_workbook(workbook: &mut Workbook, path: &Path) -> Result<()> {
    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            output_file: dir.path().join("report.xlsx"),
            ..ExportConfig::default()
        };

        let outcome = export_to_file(&OrderTable::empty(), &config).unwrap();
        assert_eq!(outcome, ExportOutcome::SkippedEmpty);
        assert!(!config.output_file.exists());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            output_file: dir.path().join("missing").join("report.xlsx"),
            ..ExportConfig::default()
        };
        let table = OrderTable::new(
            vec!["Order_ID".to_string()],
            vec![vec![CellValue::Integer(1001)]],
        );

        assert!(export_to_file(&table, &config).is_err());
    }
}
