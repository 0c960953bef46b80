//! Generated (possibly corrupted) order rows

use serde::{Serialize, Serializer};
use std::fmt;

/// A value that is either well-typed or a non-numeric placeholder string
#[derive(Debug, Clone, PartialEq)]
pub enum Messy<T> {
    Value(T),
    Placeholder(&'static str),
}

impl<T> Messy<T> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Messy::Placeholder(_))
    }
}

impl<T: Serialize> Serialize for Messy<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Messy::Value(value) => value.serialize(serializer),
            Messy::Placeholder(text) => serializer.serialize_str(text),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Messy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Messy::Value(value) => write!(f, "{}", value),
            Messy::Placeholder(text) => f.write_str(text),
        }
    }
}

/// One generated row. Field order is the column order of the output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawOrder {
    #[serde(rename = "Order_ID")]
    pub order_id: i64,
    #[serde(rename = "Order_Date")]
    pub order_date: String,
    #[serde(rename = "Customer_ID")]
    pub customer_id: Option<String>,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Payment_Method")]
    pub payment_method: String,
    #[serde(rename = "Revenue")]
    pub revenue: Messy<f64>,
    #[serde(rename = "Quantity")]
    pub quantity: Messy<i64>,
    #[serde(rename = "Email")]
    pub email: String,
}

impl RawOrder {
    /// Display values in column order; a null customer renders as "None"
    pub fn cells(&self) -> [String; 8] {
        [
            self.order_id.to_string(),
            self.order_date.clone(),
            self.customer_id.clone().unwrap_or_else(|| "None".to_string()),
            self.region.clone(),
            self.payment_method.clone(),
            self.revenue.to_string(),
            self.quantity.to_string(),
            self.email.clone(),
        ]
    }
}
