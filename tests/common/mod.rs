#![allow(dead_code)]

use chrono::NaiveDate;
use orders_toolkit::config::DatabaseConfig;
use orders_toolkit::config::db::Connector;
use orders_toolkit::orders::{OrderDraft, OrderRepository};
use tempfile::TempDir;

/// A migrated database in its own temp directory
pub struct TestDb {
    pub dir: TempDir,
    pub repo: OrderRepository,
}

impl TestDb {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let connector = Connector::new(DatabaseConfig::at(dir.path().join("orders.db")));
        connector.migrate().await.expect("migrations");
        Self {
            repo: OrderRepository::new(connector),
            dir,
        }
    }

    pub fn config(&self) -> DatabaseConfig {
        self.repo.connector().config().clone()
    }
}

pub fn order(order_id: i64, date: (i32, u32, u32)) -> OrderDraft {
    OrderDraft {
        order_id: Some(order_id),
        order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        customer_id: Some(format!("CUST-{}", order_id % 90 + 10)),
        region: Some("West".to_string()),
        payment_method: Some("Credit Card".to_string()),
        revenue: Some(315.75),
        quantity: Some(4),
        email: Some("alex.kim@example.com".to_string()),
    }
}
