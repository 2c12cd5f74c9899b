use std::io::Write;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use test_log::test;

use academy_dashboard::dashboard_data::{load, load_or_sample};
use academy_dashboard::models::ChartSpec;
use academy_dashboard::DashboardError;

use crate::common::logging::{init_test_logging, log_test_step};

const DOCUMENT: &str = r##"{
  "notifications": [
    { "message": "Exam schedule published", "createdAt": "2024-03-01T09:30:00Z" }
  ],
  "pages": [
    {
      "path": "/",
      "title": "Overview",
      "headerImage": "assets/hall.png",
      "charts": [
        {
          "kind": "bar",
          "title": "Enrollment",
          "stacked": true,
          "data": [{ "name": "Jan", "new": 4, "returning": 10 }],
          "series": [
            { "field": "new", "color": "#8884d8", "name": "New" },
            { "field": "returning", "color": "green", "name": "Returning" }
          ]
        },
        {
          "kind": "line",
          "title": "Attendance",
          "data": [{ "name": "Mon", "rate": 92.5 }],
          "series": [{ "field": "rate", "color": "#ffc658", "name": "Rate" }]
        },
        {
          "kind": "pie",
          "title": "Split",
          "tooltip": "By course",
          "data": [{ "name": "A", "value": 30 }, { "name": "B", "value": 70 }],
          "colors": ["#0088FE", "#00C49F"]
        }
      ]
    }
  ]
}"##;

#[test]
fn test_load_full_document() {
    init_test_logging();
    log_test_step("Loading a document with every chart kind");

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DOCUMENT.as_bytes()).unwrap();

    let data = load(file.path()).unwrap();
    assert_eq!(data.notifications.len(), 1);
    assert!(data.notifications[0].created_at.is_some());

    let page = data.page("/").unwrap();
    assert_eq!(page.header_image.as_deref(), Some("assets/hall.png"));
    assert_eq!(page.subtitle, None);
    assert_eq!(page.charts.len(), 3);

    assert_matches!(&page.charts[0], ChartSpec::Bar(bar) if bar.stacked && bar.series.len() == 2);
    assert_matches!(&page.charts[1], ChartSpec::Line(line) if line.data[0].value("rate") == 92.5);
    assert_matches!(&page.charts[2], ChartSpec::Pie(pie) => {
        assert_eq!(pie.value_field, "value");
        assert_eq!(pie.tooltip.as_deref(), Some("By course"));
        assert_eq!(pie.data[1].value("value"), 70.0);
    });
}

#[test]
fn test_missing_and_malformed_files() {
    init_test_logging();

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    assert_matches!(load(&missing), Err(DashboardError::Io { path, .. }) if path == missing);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "pages": [ { "path": "/" } ] }"#).unwrap();
    assert_matches!(load(file.path()), Err(DashboardError::DataFile { .. }));
}

#[test]
fn test_sample_used_without_path() {
    let data = load_or_sample(None).unwrap();
    assert!(data.page("/").is_some());
    assert!(!data.notifications.is_empty());
}

#[test]
fn test_records_with_text_fields_still_load() {
    init_test_logging();
    log_test_step("Loading records that carry a string label next to their values");

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br##"{
          "pages": [{
            "path": "/",
            "title": "Overview",
            "charts": [{
              "kind": "pie",
              "title": "Split",
              "data": [
                { "name": "Jan", "month": "2024-01", "value": 3 },
                { "name": "Feb", "month": "2024-02", "value": 7, "note": null }
              ]
            }]
          }]
        }"##,
    )
    .unwrap();

    let data = load(file.path()).unwrap();
    let page = data.page("/").unwrap();
    assert_matches!(&page.charts[0], ChartSpec::Pie(pie) => {
        assert_eq!(pie.data[0].value("value"), 3.0);
        assert_eq!(pie.data[1].value("value"), 7.0);
        assert_eq!(pie.data[0].value("month"), 0.0);
    });
}
