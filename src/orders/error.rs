//! Error kinds surfaced by the order repository

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    /// The database could not be reached or opened
    #[error("failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement failed; any write was rolled back
    #[error("database query error: {0}")]
    Query(#[from] sqlx::Error),

    /// The session was already released
    #[error("database connection already closed")]
    ConnectionClosed,

    /// Rejected locally before touching the database
    #[error("input data is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl OrderError {
    pub fn is_connection(&self) -> bool {
        matches!(self, OrderError::Connection(_))
    }
}

pub type OrderResult<T> = std::result::Result<T, OrderError>;
