//! Services module for dashboard-data.

pub mod aggregate;
pub mod database;
pub mod fetch_client;
pub mod metrics;

pub use database::Database;
pub use fetch_client::{FetchClient, Resource};
pub use metrics::{get_metrics, init_metrics};
