//! Repository for order CRUD operations
//!
//! Each operation opens its own session, runs one statement and closes the
//! session on every exit path. Writes run inside a transaction that is rolled
//! back when the statement fails.

use log::{debug, error, info, warn};
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::query::Query;
use sqlx::{Connection, SqliteConnection};

use super::error::{OrderError, OrderResult};
use super::model::{OrderDraft, OrderRecord};
use crate::config::ORDERS_TABLE;
use crate::config::db::Connector;

/// Returned by [`OrderRepository::max_order_id`] when the table is empty or
/// the query fails
pub const FALLBACK_MAX_ORDER_ID: i64 = 100_000;

#[derive(Debug, Clone)]
pub struct OrderRepository {
    connector: Connector,
}

impl OrderRepository {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    /// Fetch a single order by its Order_ID
    pub async fn fetch_by_id(&self, order_id: i64) -> OrderResult<Option<OrderRecord>> {
        let mut session = self.connector.connect().await?;

        let sql = format!("SELECT * FROM {} WHERE Order_ID = ?", ORDERS_TABLE);
        let result = match session.connection() {
            Ok(conn) => sqlx::query_as::<_, OrderRecord>(&sql)
                .bind(order_id)
                .fetch_optional(conn)
                .await
                .map_err(OrderError::from),
            Err(err) => Err(err),
        };
        session.close().await;

        match &result {
            Ok(Some(_)) => debug!("Fetched order {}", order_id),
            Ok(None) => debug!("Order {} not found", order_id),
            Err(err) => error!("Failed to fetch order {}: {}", order_id, err),
        }
        result
    }

    /// Insert a new order. A draft with missing fields is rejected before any
    /// connection is opened.
    pub async fn create(&self, draft: OrderDraft) -> OrderResult<()> {
        let record = match draft.validate() {
            Ok(record) => record,
            Err(err) => {
                error!("Rejected order: {}", err);
                return Err(err);
            }
        };

        let sql = format!(
            "INSERT INTO {} (Order_ID, Order_Date, Customer_ID, Region, Payment_Method, Revenue, Quantity, Email) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            ORDERS_TABLE
        );
        let query = sqlx::query(&sql)
            .bind(record.order_id)
            .bind(&record.order_date)
            .bind(&record.customer_id)
            .bind(&record.region)
            .bind(&record.payment_method)
            .bind(record.revenue)
            .bind(record.quantity)
            .bind(&record.email);

        self.write(query).await?;
        info!("Created order {}", record.order_id);
        Ok(())
    }

    /// Set the Revenue of an order, returning the number of rows affected
    /// (0 when the order does not exist)
    pub async fn update_revenue(&self, order_id: i64, new_revenue: f64) -> OrderResult<u64> {
        let sql = format!("UPDATE {} SET Revenue = ? WHERE Order_ID = ?", ORDERS_TABLE);
        let query = sqlx::query(&sql).bind(new_revenue).bind(order_id);

        let affected = self.write(query).await?;
        info!("Updated revenue of order {} ({} row(s))", order_id, affected);
        Ok(affected)
    }

    /// Delete an order, returning the number of rows affected (0 when the
    /// order does not exist)
    pub async fn delete(&self, order_id: i64) -> OrderResult<u64> {
        let sql = format!("DELETE FROM {} WHERE Order_ID = ?", ORDERS_TABLE);
        let query = sqlx::query(&sql).bind(order_id);

        let affected = self.write(query).await?;
        info!("Deleted order {} ({} row(s))", order_id, affected);
        Ok(affected)
    }

    /// Highest Order_ID in the table, or [`FALLBACK_MAX_ORDER_ID`] when the
    /// table is empty or cannot be queried
    pub async fn max_order_id(&self) -> i64 {
        let mut session = match self.connector.connect().await {
            Ok(session) => session,
            Err(err) => {
                warn!("Using fallback max Order_ID: {}", err);
                return FALLBACK_MAX_ORDER_ID;
            }
        };

        let sql = format!("SELECT MAX(Order_ID) FROM {}", ORDERS_TABLE);
        let result = match session.connection() {
            Ok(conn) => sqlx::query_scalar::<_, Option<i64>>(&sql)
                .fetch_one(conn)
                .await
                .map_err(OrderError::from),
            Err(err) => Err(err),
        };
        session.close().await;

        match result {
            Ok(Some(max_id)) if max_id != 0 => max_id,
            Ok(_) => FALLBACK_MAX_ORDER_ID,
            Err(err) => {
                warn!("Using fallback max Order_ID: {}", err);
                FALLBACK_MAX_ORDER_ID
            }
        }
    }

    async fn write<'q>(&self, query: Query<'q, Sqlite, SqliteArguments<'q>>) -> OrderResult<u64> {
        let mut session = self.connector.connect().await?;

        let result = match session.connection() {
            Ok(conn) => execute_in_transaction(conn, query).await,
            Err(err) => Err(err),
        };
        session.close().await;

        if let Err(err) = &result {
            error!("Database query error: {}", err);
        }
        result
    }
}

async fn execute_in_transaction<'q>(
    conn: &mut SqliteConnection,
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
) -> OrderResult<u64> {
    let mut tx = conn.begin().await?;

    match query.execute(&mut *tx).await {
        Ok(done) => {
            tx.commit().await?;
            Ok(done.rows_affected())
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback failed: {}", rollback_err);
            }
            Err(err.into())
        }
    }
}
