//! Dirty-data generator output

use chrono::NaiveDate;
use orders_toolkit::config::GeneratorConfig;
use orders_toolkit::generator::{Generator, Messy, rules, write_csv};

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
}

fn reference_records() -> Vec<orders_toolkit::generator::RawOrder> {
    Generator::new(&GeneratorConfig::default(), anchor()).generate().records
}

#[test]
fn test_two_runs_produce_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    write_csv(&first, &Generator::new(&GeneratorConfig::default(), anchor()).generate().records).unwrap();
    write_csv(&second, &Generator::new(&GeneratorConfig::default(), anchor()).generate().records).unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn test_csv_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.csv");
    let records = reference_records();
    write_csv(&path, &records).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec!["Order_ID", "Order_Date", "Customer_ID", "Region", "Payment_Method", "Revenue", "Quantity", "Email"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 160);

    // index 10: null customer written as an empty field
    assert_eq!(&rows[9][2], "");
    // index 30: revenue placeholder
    assert!(rules::REVENUE_PLACEHOLDERS.iter().any(|text| *text == &rows[29][5]));
    // index 40: quantity placeholder
    assert!(rules::QUANTITY_PLACEHOLDERS.iter().any(|text| *text == &rows[39][6]));
    // index 25: MM/DD/YYYY
    assert!(NaiveDate::parse_from_str(&rows[24][1], "%m/%d/%Y").is_ok());
    assert!(NaiveDate::parse_from_str(&rows[0][1], "%Y-%m-%d").is_ok());
}

#[test]
fn test_reference_scenarios() {
    let records = reference_records();

    // index 20 carries a duplicate of one of the first 15 IDs
    let duplicate = records[19].order_id;
    assert!((1001..=1015).contains(&duplicate));
    assert!(records[..15].iter().any(|record| record.order_id == duplicate));

    assert_eq!(records[9].customer_id, None);
    assert!(records[29].revenue.is_placeholder());
    assert_eq!(records[14].region, "NULL");
    assert!(!records[21].email.contains('.'));
    assert!(records[21].email.contains("_at_"));
}

#[test]
fn test_reference_rates() {
    let records = reference_records();

    let duplicated = records
        .iter()
        .enumerate()
        .filter(|(offset, record)| record.order_id != 1000 + *offset as i64 + 1)
        .count();
    assert_eq!(duplicated, 8);

    let null_customers = records.iter().filter(|record| record.customer_id.is_none()).count();
    assert_eq!(null_customers, 16);

    let text_quantities = records
        .iter()
        .filter(|record| matches!(record.quantity, Messy::Placeholder(_)))
        .count();
    assert_eq!(text_quantities, 3);
}
