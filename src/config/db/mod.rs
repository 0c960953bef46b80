//! Database connection management
//!
//! Every repository call opens its own connection through [`Connector`] and
//! releases it before returning. There is no pool: a [`Session`] lives exactly
//! as long as one operation.

use anyhow::{Context, Result};
use log::{debug, error, warn};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};

use crate::config::DatabaseConfig;
use crate::config::migrations;
use crate::orders::error::{OrderError, OrderResult};

/// Opens connections from an injected [`DatabaseConfig`]
#[derive(Debug, Clone)]
pub struct Connector {
    config: DatabaseConfig,
}

impl Connector {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    fn options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.config.path)
            .create_if_missing(self.config.create_if_missing)
            .busy_timeout(self.config.busy_timeout())
            .foreign_keys(true)
            .log_statements(log::LevelFilter::Debug)
    }

    /// Open a fresh connection. Failures are logged and returned as
    /// [`OrderError::Connection`]; no handle is produced.
    pub async fn connect(&self) -> OrderResult<Session> {
        match self.options().connect().await {
            Ok(conn) => {
                debug!("Database connection opened: {}", self.config.path.display());
                Ok(Session { conn: Some(conn) })
            }
            Err(err) => {
                error!("Error connecting to database {}: {}", self.config.path.display(), err);
                Err(OrderError::Connection(err))
            }
        }
    }

    /// Bring the orders schema up to date
    pub async fn migrate(&self) -> Result<usize> {
        let mut session = self
            .connect()
            .await
            .with_context(|| format!("Failed to open database {}", self.config.path.display()))?;

        let result = match session.connection() {
            Ok(conn) => migrations::migrate_up(conn).await,
            Err(err) => Err(err.into()),
        };
        session.close().await;

        result
    }
}

/// A single open connection scoped to one operation
///
/// `close` is idempotent. A session dropped without `close` still releases
/// its handle when the inner connection is dropped.
pub struct Session {
    conn: Option<SqliteConnection>,
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    pub fn connection(&mut self) -> OrderResult<&mut SqliteConnection> {
        self.conn.as_mut().ok_or(OrderError::ConnectionClosed)
    }

    pub async fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(err) = conn.close().await {
                warn!("Error while closing database connection: {}", err);
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.conn.is_some() {
            debug!("Session dropped without explicit close, releasing connection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let connector = Connector::new(DatabaseConfig::at(dir.path().join("orders.db")));

        let mut session = connector.connect().await.unwrap();
        assert!(session.is_open());

        session.close().await;
        assert!(!session.is_open());
        assert!(matches!(session.connection(), Err(OrderError::ConnectionClosed)));

        session.close().await;
        assert!(!session.is_open());
    }

    #[tokio::test]
    async fn test_connect_failure_yields_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = DatabaseConfig::at(dir.path().join("missing").join("orders.db"));
        config.create_if_missing = false;

        let err = Connector::new(config).connect().await.err().unwrap();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn test_migrate_creates_orders_table() {
        let dir = tempfile::tempdir().unwrap();
        let connector = Connector::new(DatabaseConfig::at(dir.path().join("orders.db")));

        assert_eq!(connector.migrate().await.unwrap(), 2);
        assert_eq!(connector.migrate().await.unwrap(), 0);
    }
}
