//! Dashboard data layer: invoices, customers and revenue for the dashboard
//! views, read from a JSON data source and from PostgreSQL.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

pub use dashboard::Dashboard;
pub use error::{DashboardError, ErrorKind, Operation};
