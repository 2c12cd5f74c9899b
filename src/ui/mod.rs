//! Terminal rendering of the dashboard: cards, charts, sidebar, header and the shell composing them.

pub mod app;
pub mod chart_card;
pub mod charts;
pub mod components;
pub mod events;
pub mod header;
pub mod layout;
pub mod main_layout;
pub mod sidebar;
pub mod view;

pub use app::{run_app, DashboardApp};
