use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::DashboardError;

/// Glyph drawn next to a navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Dashboard,
    Students,
    Courses,
    Reports,
    Calendar,
    Settings,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Dashboard => "▦",
            Icon::Students => "☺",
            Icon::Courses => "≡",
            Icon::Reports => "◔",
            Icon::Calendar => "▣",
            Icon::Settings => "⚙",
        }
    }
}

/// A sidebar link. Paths are unique and compared by exact equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub title: String,
    pub path: String,
    pub icon: Icon,
}

impl NavigationItem {
    pub fn new(title: &str, path: &str, icon: Icon) -> Self {
        Self {
            title: title.to_string(),
            path: path.to_string(),
            icon,
        }
    }
}

/// Static navigation shown in the sidebar
pub fn default_navigation() -> Vec<NavigationItem> {
    vec![
        NavigationItem::new("Dashboard", "/", Icon::Dashboard),
        NavigationItem::new("Students", "/students", Icon::Students),
        NavigationItem::new("Courses", "/courses", Icon::Courses),
        NavigationItem::new("Schedule", "/schedule", Icon::Calendar),
        NavigationItem::new("Reports", "/reports", Icon::Reports),
        NavigationItem::new("Settings", "/settings", Icon::Settings),
    ]
}

/// One row of chart data: a category name plus any number of fields.
///
/// Records are passed through untouched; a field that is absent or not a number reads as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    pub name: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl DataRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: f64) -> Self {
        self.values.insert(field.to_string(), Value::from(value));
        self
    }

    pub fn value(&self, field: &str) -> f64 {
        self.values
            .get(field)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}

/// Which field to plot, in which color, under which legend name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub field: String,
    pub color: String,
    pub name: String,
}

impl SeriesConfig {
    pub fn new(field: &str, color: &str, name: &str) -> Self {
        Self {
            field: field.to_string(),
            color: color.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartSpec {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tooltip: Option<String>,
    pub data: Vec<DataRecord>,
    pub series: Vec<SeriesConfig>,
    #[serde(default)]
    pub stacked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartSpec {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tooltip: Option<String>,
    pub data: Vec<DataRecord>,
    pub series: Vec<SeriesConfig>,
}

fn default_value_field() -> String {
    "value".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChartSpec {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tooltip: Option<String>,
    pub data: Vec<DataRecord>,
    #[serde(default = "default_value_field", rename = "dataKey")]
    pub value_field: String,
    #[serde(default)]
    pub colors: Vec<String>,
}

/// A chart placed on a page, tagged by `kind` in the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar(BarChartSpec),
    Line(LineChartSpec),
    Pie(PieChartSpec),
}

/// Content for one routed page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Everything the dashboard renders besides the static navigation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

impl DashboardData {
    pub fn page(&self, path: &str) -> Option<&PageSpec> {
        self.pages.iter().find(|page| page.path == path)
    }
}

/// The signed-in user as exposed by the authentication context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "academyName")]
    pub academy_name: Option<String>,
}

impl User {
    pub fn new(name: &str, academy_name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            academy_name: Some(academy_name.to_string()),
        }
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: Option<PathBuf>,
    pub session_path: PathBuf,
    pub log_file: PathBuf,
    pub tick_rate_ms: u64,
    pub start_collapsed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            session_path: PathBuf::from("session.json"),
            log_file: PathBuf::from("academy-dashboard.log"),
            tick_rate_ms: 100,
            start_collapsed: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, DashboardError> {
        dotenvy::dotenv().ok(); // Load .env file if it exists
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DashboardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let tick_rate_ms = match lookup("DASHBOARD_TICK_RATE_MS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|ms| *ms > 0).ok_or_else(|| {
                DashboardError::Config(format!(
                    "DASHBOARD_TICK_RATE_MS must be a positive integer, got {:?}",
                    raw
                ))
            })?,
            None => defaults.tick_rate_ms,
        };

        let start_collapsed = match lookup("DASHBOARD_START_COLLAPSED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                DashboardError::Config(format!(
                    "DASHBOARD_START_COLLAPSED must be true or false, got {:?}",
                    raw
                ))
            })?,
            None => defaults.start_collapsed,
        };

        Ok(Config {
            data_path: lookup("DASHBOARD_DATA_PATH").map(PathBuf::from),
            session_path: lookup("DASHBOARD_SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_path),
            log_file: lookup("DASHBOARD_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            tick_rate_ms,
            start_collapsed,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
