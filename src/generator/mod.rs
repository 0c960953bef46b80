//! Synthetic dirty-data generator
//!
//! Produces a batch of order rows from a seeded RNG, then corrupts a fixed
//! subset of them according to [`rules`]. For a given seed, row count, ID base
//! and anchor date the output is byte-for-byte reproducible.
//!
//! Per record the RNG is consumed in this order: date offset, customer
//! number, region, payment method, revenue, quantity, email parts, then the
//! duplicate ID and the numeric placeholder when those rules fire.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::orders::ORDER_FIELDS;

pub mod record;
pub mod rules;

pub use record::{Messy, RawOrder};
use rules::{DateFormat, NumericDefect, PaymentStyle};

const FIRST_NAMES: [&str; 12] = [
    "james", "mary", "robert", "patricia", "john", "jennifer",
    "michael", "linda", "david", "elizabeth", "priya", "arjun",
];

const LAST_NAMES: [&str; 12] = [
    "smith", "johnson", "williams", "brown", "jones", "garcia",
    "miller", "davis", "sharma", "patel", "wilson", "moore",
];

const EMAIL_DOMAINS: [&str; 3] = ["example.com", "example.org", "example.net"];

const DATE_WINDOW_DAYS: i64 = 365;

/// How many records each rule touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorruptionSummary {
    pub duplicated_ids: usize,
    pub null_customer_ids: usize,
    pub null_regions: usize,
    pub month_day_year_dates: usize,
    pub day_month_short_year_dates: usize,
    pub lowercased_payments: usize,
    pub dotted_payments: usize,
    pub text_revenues: usize,
    pub text_quantities: usize,
    pub malformed_emails: usize,
}

impl CorruptionSummary {
    pub fn entries(&self) -> [(&'static str, usize); 10] {
        [
            ("Duplicated Order_ID", self.duplicated_ids),
            ("Null Customer_ID", self.null_customer_ids),
            ("'NULL' Region", self.null_regions),
            ("MM/DD/YYYY dates", self.month_day_year_dates),
            ("DD-MM-YY dates", self.day_month_short_year_dates),
            ("Lowercased payment methods", self.lowercased_payments),
            ("Dotted payment methods", self.dotted_payments),
            ("Text Revenue", self.text_revenues),
            ("Text Quantity", self.text_quantities),
            ("Malformed emails", self.malformed_emails),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Generation {
    pub records: Vec<RawOrder>,
    pub summary: CorruptionSummary,
}

#[derive(Debug, Clone)]
pub struct Generator {
    rows: u32,
    seed: u64,
    id_base: i64,
    anchor: NaiveDate,
}

impl Generator {
    /// `anchor` is the "today" that random dates count back from
    pub fn new(config: &GeneratorConfig, anchor: NaiveDate) -> Self {
        Self {
            rows: config.rows,
            seed: config.seed,
            id_base: config.id_base,
            anchor,
        }
    }

    pub fn generate(&self) -> Generation {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut summary = CorruptionSummary::default();
        let mut records = Vec::with_capacity(self.rows as usize);

        for index in 1..=self.rows {
            records.push(self.record(&mut rng, index, &mut summary));
        }

        debug!("Generated {} records with {:?}", records.len(), summary);
        Generation { records, summary }
    }

    fn record(&self, rng: &mut StdRng, index: u32, summary: &mut CorruptionSummary) -> RawOrder {
        let mut order_id = self.id_base + i64::from(index);
        let date = self.anchor - chrono::Duration::days(rng.gen_range(0..=DATE_WINDOW_DAYS));
        let mut customer_id = Some(format!("CUST-{}", rng.gen_range(10..=99)));
        let mut region = pick(rng, &rules::REGIONS).to_string();
        let payment_method = pick(rng, &rules::PAYMENT_METHODS);
        let revenue: f64 = round_cents(rng.gen_range(10.0..=500.0));
        let quantity: i64 = rng.gen_range(1..=10);
        let mut email = synthetic_email(rng);

        if rules::duplicates_order_id(index) {
            order_id = self.id_base + rng.gen_range(1..=rules::DUPLICATE_ID_POOL);
            summary.duplicated_ids += 1;
        }

        if rules::nulls_customer_id(index) {
            customer_id = None;
            summary.null_customer_ids += 1;
        }

        if rules::nulls_region(index) {
            region = rules::NULL_REGION.to_string();
            summary.null_regions += 1;
        }

        let date_format = DateFormat::for_index(index);
        match date_format {
            DateFormat::MonthDayYear => summary.month_day_year_dates += 1,
            DateFormat::DayMonthShortYear => summary.day_month_short_year_dates += 1,
            DateFormat::Iso => {}
        }

        let payment_style = PaymentStyle::for_index(index);
        match payment_style {
            PaymentStyle::Lowercase => summary.lowercased_payments += 1,
            PaymentStyle::Dotted => summary.dotted_payments += 1,
            PaymentStyle::AsIs => {}
        }

        let (revenue, quantity) = match NumericDefect::for_index(index) {
            NumericDefect::Revenue => {
                summary.text_revenues += 1;
                (
                    Messy::Placeholder(pick(rng, &rules::REVENUE_PLACEHOLDERS)),
                    Messy::Value(quantity),
                )
            }
            NumericDefect::Quantity => {
                summary.text_quantities += 1;
                (
                    Messy::Value(revenue),
                    Messy::Placeholder(pick(rng, &rules::QUANTITY_PLACEHOLDERS)),
                )
            }
            NumericDefect::None => (Messy::Value(revenue), Messy::Value(quantity)),
        };

        if rules::malforms_email(index) {
            email = rules::malform_email(&email);
            summary.malformed_emails += 1;
        }

        RawOrder {
            order_id,
            order_date: date_format.format(date),
            customer_id,
            region,
            payment_method: payment_style.apply(payment_method),
            revenue,
            quantity,
            email,
        }
    }
}

fn pick(rng: &mut StdRng, items: &[&'static str]) -> &'static str {
    items[rng.gen_range(0..items.len())]
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn synthetic_email(rng: &mut StdRng) -> String {
    let first = pick(rng, &FIRST_NAMES);
    let last = pick(rng, &LAST_NAMES);
    let domain = pick(rng, &EMAIL_DOMAINS);

    match rng.gen_range(0..3) {
        0 => format!("{}.{}@{}", first, last, domain),
        1 => format!("{}{}{}@{}", first, last, rng.gen_range(1..=99), domain),
        _ => format!("{}{}@{}", &first[..1], last, domain),
    }
}

/// Write every record as CSV with a header row
pub fn write_csv(path: &Path, records: &[RawOrder]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write order {}", record.order_id))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {}", path.display()))?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Render the first `limit` records as a pipe table for inspection
pub fn render_sample(records: &[RawOrder], limit: usize) -> String {
    let rows: Vec<[String; 8]> = records.iter().take(limit).map(RawOrder::cells).collect();

    let mut widths = ORDER_FIELDS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!(" {:<width$} ", cell, width = width))
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let header: Vec<String> = ORDER_FIELDS.iter().map(|name| name.to_string()).collect();
    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();

    let mut lines = vec![format_line(&header[..]), format_line(&separator[..])];
    lines.extend(rows.iter().map(|row| format_line(&row[..])));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(rows: u32) -> Generator {
        let config = GeneratorConfig {
            rows,
            ..GeneratorConfig::default()
        };
        Generator::new(&config, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap())
    }

    #[test]
    fn test_same_seed_same_records() {
        assert_eq!(generator(160).generate().records, generator(160).generate().records);
    }

    #[test]
    fn test_different_seed_different_records() {
        let config = GeneratorConfig {
            seed: 7,
            ..GeneratorConfig::default()
        };
        let other = Generator::new(&config, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_ne!(generator(160).generate().records, other.generate().records);
    }

    #[test]
    fn test_summary_counts_for_reference_batch() {
        let summary = generator(160).generate().summary;
        assert_eq!(summary.duplicated_ids, 8);
        assert_eq!(summary.null_customer_ids, 16);
        assert_eq!(summary.null_regions, 10);
        assert_eq!(summary.month_day_year_dates, 6);
        assert_eq!(summary.day_month_short_year_dates, 0);
        assert_eq!(summary.lowercased_payments, 22);
        // multiples of 13 except 91, which is lowercased instead
        assert_eq!(summary.dotted_payments, 11);
        assert_eq!(summary.text_revenues, 5);
        // 40 and 80 and 160; 120 goes to revenue
        assert_eq!(summary.text_quantities, 3);
        assert_eq!(summary.malformed_emails, 7);
    }

    #[test]
    fn test_base_values_stay_in_range() {
        let anchor = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        for (offset, record) in generator(160).generate().records.iter().enumerate() {
            let index = offset as u32 + 1;
            if let Messy::Value(revenue) = record.revenue {
                assert!((10.0..=500.0).contains(&revenue));
                assert_eq!(round_cents(revenue), revenue);
            }
            if let Messy::Value(quantity) = record.quantity {
                assert!((1..=10).contains(&quantity));
            }
            if DateFormat::for_index(index) == DateFormat::Iso {
                let date = NaiveDate::parse_from_str(&record.order_date, "%Y-%m-%d").unwrap();
                assert!(date <= anchor && date >= anchor - chrono::Duration::days(DATE_WINDOW_DAYS));
            }
            if !rules::duplicates_order_id(index) {
                assert_eq!(record.order_id, 1000 + i64::from(index));
            }
        }
    }

    #[test]
    fn test_render_sample_limits_rows() {
        let records = generator(30).generate().records;
        let sample = render_sample(&records, 10);
        let lines: Vec<&str> = sample.lines().collect();

        assert_eq!(lines.len(), 12);
        assert!(lines[0].contains("Order_ID"));
        assert!(lines[0].contains("Email"));
        assert!(lines[2].contains("1001"));
        assert!(lines[11].contains("1010"));
        assert!(lines[11].contains("None"));
    }
}
