pub mod auth;
pub mod dashboard_data;
pub mod error;
pub mod models;
pub mod ui;

pub use error::{DashboardError, Result};
