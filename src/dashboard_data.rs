//! Loading of page and chart content for the dashboard.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{DashboardError, Result};
use crate::models::{
    BarChartSpec, ChartSpec, DashboardData, DataRecord, LineChartSpec, Notification, PageSpec,
    PieChartSpec, SeriesConfig,
};

/// Read dashboard content from a JSON file
pub fn load(path: &Path) -> Result<DashboardData> {
    let raw = std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let data: DashboardData =
        serde_json::from_str(&raw).map_err(|source| DashboardError::DataFile {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        "Loaded {} pages and {} notifications from {}",
        data.pages.len(),
        data.notifications.len(),
        path.display()
    );
    Ok(data)
}

/// Read the configured data file, or fall back to the built-in sample
pub fn load_or_sample(path: Option<&Path>) -> Result<DashboardData> {
    match path {
        Some(path) => load(path),
        None => {
            debug!("No data file configured, using sample dashboard");
            Ok(sample())
        }
    }
}

/// Built-in content shown when no data file is configured
pub fn sample() -> DashboardData {
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
    let enrolled = [42.0, 55.0, 61.0, 58.0, 73.0, 80.0];
    let graduated = [5.0, 8.0, 6.0, 12.0, 9.0, 14.0];
    let attendance = [91.0, 88.0, 93.0, 95.0, 90.0, 94.0];

    let monthly: Vec<DataRecord> = months
        .iter()
        .enumerate()
        .map(|(i, month)| {
            DataRecord::new(month)
                .with("enrolled", enrolled[i])
                .with("graduated", graduated[i])
                .with("attendance", attendance[i])
        })
        .collect();

    let courses = vec![
        DataRecord::new("Mathematics").with("value", 30.0),
        DataRecord::new("Languages").with("value", 25.0),
        DataRecord::new("Science").with("value", 20.0),
        DataRecord::new("Arts").with("value", 15.0),
        DataRecord::new("Sports").with("value", 10.0),
    ];

    let dashboard = PageSpec {
        path: "/".to_string(),
        title: "Dashboard".to_string(),
        subtitle: Some("Academy overview for the current term".to_string()),
        header_image: Some("assets/campus.jpg".to_string()),
        charts: vec![
            ChartSpec::Bar(BarChartSpec {
                title: "Enrollment".to_string(),
                description: Some("New and graduating students per month".to_string()),
                tooltip: Some("Counts are taken on the last day of each month".to_string()),
                data: monthly.clone(),
                series: vec![
                    SeriesConfig::new("enrolled", "#8884d8", "Enrolled"),
                    SeriesConfig::new("graduated", "#82ca9d", "Graduated"),
                ],
                stacked: true,
            }),
            ChartSpec::Line(LineChartSpec {
                title: "Attendance".to_string(),
                description: Some("Average daily attendance (%)".to_string()),
                tooltip: None,
                data: monthly.clone(),
                series: vec![SeriesConfig::new("attendance", "#ffc658", "Attendance")],
            }),
            ChartSpec::Pie(PieChartSpec {
                title: "Students by course".to_string(),
                description: None,
                tooltip: Some("Share of active students per course family".to_string()),
                data: courses,
                value_field: "value".to_string(),
                colors: vec![
                    "#0088FE".to_string(),
                    "#00C49F".to_string(),
                    "#FFBB28".to_string(),
                    "#FF8042".to_string(),
                    "#A28CF0".to_string(),
                ],
            }),
        ],
    };

    let reports = PageSpec {
        path: "/reports".to_string(),
        title: "Reports".to_string(),
        subtitle: Some("Term-over-term comparison".to_string()),
        header_image: None,
        charts: vec![ChartSpec::Bar(BarChartSpec {
            title: "Graduations vs enrollment".to_string(),
            description: None,
            tooltip: None,
            data: monthly,
            series: vec![
                SeriesConfig::new("enrolled", "#8884d8", "Enrolled"),
                SeriesConfig::new("graduated", "#82ca9d", "Graduated"),
            ],
            stacked: false,
        })],
    };

    DashboardData {
        notifications: vec![
            Notification {
                message: "Three new enrollment requests".to_string(),
                created_at: None,
            },
            Notification {
                message: "Monthly report is ready".to_string(),
                created_at: None,
            },
        ],
        pages: vec![dashboard, reports],
    }
}
