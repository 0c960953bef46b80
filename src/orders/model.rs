//! Order record types

use chrono::NaiveDate;
use super::error::{OrderError, OrderResult};

/// Column names of the orders table, in table order
pub const ORDER_FIELDS: [&str; 8] = [
    "Order_ID",
    "Order_Date",
    "Customer_ID",
    "Region",
    "Payment_Method",
    "Revenue",
    "Quantity",
    "Email",
];

/// Text form of Order_Date as written by this crate
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d";

/// A row of the orders table
///
/// `order_date` is kept as the stored text so rows written by other tools
/// in a different date layout still load.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OrderRecord {
    #[sqlx(rename = "Order_ID")]
    pub order_id: i64,
    #[sqlx(rename = "Order_Date")]
    pub order_date: String,
    #[sqlx(rename = "Customer_ID")]
    pub customer_id: Option<String>,
    #[sqlx(rename = "Region")]
    pub region: String,
    #[sqlx(rename = "Payment_Method")]
    pub payment_method: String,
    #[sqlx(rename = "Revenue")]
    pub revenue: f64,
    #[sqlx(rename = "Quantity")]
    pub quantity: i64,
    #[sqlx(rename = "Email")]
    pub email: String,
}

impl OrderRecord {
    /// Field name / display value pairs, in table order
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            (ORDER_FIELDS[0], self.order_id.to_string()),
            (ORDER_FIELDS[1], self.order_date.clone()),
            (
                ORDER_FIELDS[2],
                self.customer_id.clone().unwrap_or_else(|| "None".to_string()),
            ),
            (ORDER_FIELDS[3], self.region.clone()),
            (ORDER_FIELDS[4], self.payment_method.clone()),
            (ORDER_FIELDS[5], self.revenue.to_string()),
            (ORDER_FIELDS[6], self.quantity.to_string()),
            (ORDER_FIELDS[7], self.email.clone()),
        ]
    }
}

/// Order input collected before insertion. Every field is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    pub order_id: Option<i64>,
    pub order_date: Option<NaiveDate>,
    pub customer_id: Option<String>,
    pub region: Option<String>,
    pub payment_method: Option<String>,
    pub revenue: Option<f64>,
    pub quantity: Option<i64>,
    pub email: Option<String>,
}

impl OrderDraft {
    /// Names of the required fields that are absent
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.order_id.is_some(),
            self.order_date.is_some(),
            self.customer_id.is_some(),
            self.region.is_some(),
            self.payment_method.is_some(),
            self.revenue.is_some(),
            self.quantity.is_some(),
            self.email.is_some(),
        ];

        ORDER_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, is_present)| !is_present)
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn validate(self) -> OrderResult<OrderRecord> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(OrderError::MissingFields(missing));
        }

        match self {
            OrderDraft {
                order_id: Some(order_id),
                order_date: Some(order_date),
                customer_id: Some(customer_id),
                region: Some(region),
                payment_method: Some(payment_method),
                revenue: Some(revenue),
                quantity: Some(quantity),
                email: Some(email),
            } => Ok(OrderRecord {
                order_id,
                order_date: order_date.format(ORDER_DATE_FORMAT).to_string(),
                customer_id: Some(customer_id),
                region,
                payment_method,
                revenue,
                quantity,
                email,
            }),
            _ => Err(OrderError::MissingFields(Vec::new())),
        }
    }
}

impl From<OrderRecord> for OrderDraft {
    fn from(record: OrderRecord) -> Self {
        Self {
            order_id: Some(record.order_id),
            order_date: NaiveDate::parse_from_str(&record.order_date, ORDER_DATE_FORMAT).ok(),
            customer_id: record.customer_id,
            region: Some(record.region),
            payment_method: Some(record.payment_method),
            revenue: Some(record.revenue),
            quantity: Some(record.quantity),
            email: Some(record.email),
        }
    }
}
