//! In-memory tabular result of a bulk read

use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::fmt;

/// A single cell, typed after the SQLite storage class of the value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(value) => write!(f, "{}", value),
            CellValue::Real(value) => write!(f, "{}", value),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// Column names plus every row, held fully in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl OrderTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// The explicit "nothing to export" table
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: &[SqliteRow]) -> Result<Self, sqlx::Error> {
        let Some(first) = rows.first() else {
            return Ok(Self::empty());
        };

        let columns = first
            .columns()
            .iter()
            .map(|column| column.name().to_string())
            .collect::<Vec<_>>();

        let mut table_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let cells = (0..columns.len())
                .map(|index| decode_cell(row, index))
                .collect::<Result<Vec<_>, _>>()?;
            table_rows.push(cells);
        }

        Ok(Self::new(columns, table_rows))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn decode_cell(row: &SqliteRow, index: usize) -> Result<CellValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(CellValue::Null);
    }

    let storage_class = raw.type_info().name().to_ascii_uppercase();
    let cell = match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => CellValue::Integer(row.try_get(index)?),
        "REAL" => CellValue::Real(row.try_get(index)?),
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get(index)?;
            CellValue::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => CellValue::Text(row.try_get(index)?),
    };

    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Connection, SqliteConnection};

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Integer(7).to_string(), "7");
        assert_eq!(CellValue::Real(12.5).to_string(), "12.5");
        assert_eq!(CellValue::Text("UPI".into()).to_string(), "UPI");
    }

    #[tokio::test]
    async fn test_rows_decode_by_storage_class() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        let rows = sqlx::query("SELECT 1 AS a, 2.5 AS b, 'x' AS c, NULL AS d")
            .fetch_all(&mut conn)
            .await
            .unwrap();

        let table = OrderTable::from_rows(&rows).unwrap();
        assert_eq!(table.columns(), ["a", "b", "c", "d"]);
        assert_eq!(
            table.rows()[0],
            vec![
                CellValue::Integer(1),
                CellValue::Real(2.5),
                CellValue::Text("x".into()),
                CellValue::Null,
            ]
        );
    }

    #[test]
    fn test_no_rows_is_empty_table() {
        let table = OrderTable::from_rows(&[]).unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }
}
