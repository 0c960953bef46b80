//! Index-driven corruption rules
//!
//! Every rule is a pure function of the 1-based record index, so the defect
//! layout of a batch depends only on its size.

use chrono::NaiveDate;

pub const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];

pub const PAYMENT_METHODS: [&str; 5] = [
    "UPI",
    "Credit Card",
    "Cash on Delivery",
    "NetBanking",
    "Debit Card",
];

pub const REVENUE_PLACEHOLDERS: [&str; 3] = ["ZERO", "thirty-five", "NA"];

pub const QUANTITY_PLACEHOLDERS: [&str; 3] = ["one", "two", "100+"];

/// Literal written into Region instead of a real null
pub const NULL_REGION: &str = "NULL";

/// Duplicated IDs are drawn from the first this-many IDs of the batch
pub const DUPLICATE_ID_POOL: i64 = 15;

pub fn duplicates_order_id(index: u32) -> bool {
    index % 20 == 0
}

pub fn nulls_customer_id(index: u32) -> bool {
    index % 10 == 0
}

pub fn nulls_region(index: u32) -> bool {
    index % 15 == 0
}

pub fn malforms_email(index: u32) -> bool {
    index % 22 == 0
}

/// Replace every "." with "_at_", e.g. `a.b@c.com` -> `a_at_b@c_at_com`
pub fn malform_email(email: &str) -> String {
    email.replace('.', "_at_")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// YYYY-MM-DD
    Iso,
    /// MM/DD/YYYY
    MonthDayYear,
    /// DD-MM-YY
    DayMonthShortYear,
}

impl DateFormat {
    /// The %25 check runs first, so the %50 branch can never be taken
    pub fn for_index(index: u32) -> Self {
        if index % 25 == 0 {
            DateFormat::MonthDayYear
        } else if index % 50 == 0 {
            DateFormat::DayMonthShortYear
        } else {
            DateFormat::Iso
        }
    }

    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::DayMonthShortYear => "%d-%m-%y",
        }
    }

    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStyle {
    AsIs,
    Lowercase,
    /// Spaces become periods: "Cash.on.Delivery"
    Dotted,
}

impl PaymentStyle {
    pub fn for_index(index: u32) -> Self {
        if index % 7 == 0 {
            PaymentStyle::Lowercase
        } else if index % 13 == 0 {
            PaymentStyle::Dotted
        } else {
            PaymentStyle::AsIs
        }
    }

    pub fn apply(self, method: &str) -> String {
        match self {
            PaymentStyle::AsIs => method.to_string(),
            PaymentStyle::Lowercase => method.to_lowercase(),
            PaymentStyle::Dotted => method.replace(' ', "."),
        }
    }
}

/// Which numeric column, if any, gets a text placeholder. Revenue wins when
/// both conditions hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericDefect {
    None,
    Revenue,
    Quantity,
}

impl NumericDefect {
    pub fn for_index(index: u32) -> Self {
        if index % 30 == 0 {
            NumericDefect::Revenue
        } else if index % 40 == 0 {
            NumericDefect::Quantity
        } else {
            NumericDefect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_formats() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert_eq!(DateFormat::for_index(1).format(date), "2025-07-04");
        assert_eq!(DateFormat::for_index(25).format(date), "07/04/2025");
        assert_eq!(DateFormat::DayMonthShortYear.format(date), "04-07-25");
    }

    #[test]
    fn test_short_year_branch_is_shadowed_by_month_day_year() {
        assert!((1..=1000).all(|i| DateFormat::for_index(i) != DateFormat::DayMonthShortYear));
        assert_eq!(DateFormat::for_index(50), DateFormat::MonthDayYear);
    }

    #[test]
    fn test_payment_styles() {
        assert_eq!(PaymentStyle::for_index(7).apply("Credit Card"), "credit card");
        assert_eq!(PaymentStyle::for_index(13).apply("Cash on Delivery"), "Cash.on.Delivery");
        // 91 is a multiple of both; lowercase takes precedence
        assert_eq!(PaymentStyle::for_index(91), PaymentStyle::Lowercase);
        assert_eq!(PaymentStyle::for_index(1).apply("UPI"), "UPI");
    }

    #[test]
    fn test_revenue_defect_wins_over_quantity() {
        assert_eq!(NumericDefect::for_index(30), NumericDefect::Revenue);
        assert_eq!(NumericDefect::for_index(40), NumericDefect::Quantity);
        assert_eq!(NumericDefect::for_index(120), NumericDefect::Revenue);
        assert_eq!(NumericDefect::for_index(41), NumericDefect::None);
    }

    #[test]
    fn test_malform_email() {
        assert_eq!(malform_email("jane.doe@example.com"), "jane_at_doe@example_at_com");
    }
}
