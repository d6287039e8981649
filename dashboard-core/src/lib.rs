//! dashboard-core: Shared infrastructure for the dashboard data layer.
pub mod config;
pub mod error;
pub mod observability;
