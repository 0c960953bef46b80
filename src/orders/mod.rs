//! The orders table: record types, errors and the CRUD repository

pub mod error;
pub mod model;
pub mod repository;

pub use error::{OrderError, OrderResult};
pub use model::{ORDER_DATE_FORMAT, ORDER_FIELDS, OrderDraft, OrderRecord};
pub use repository::{FALLBACK_MAX_ORDER_ID, OrderRepository};
