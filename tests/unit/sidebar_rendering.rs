use pretty_assertions::assert_eq;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use test_log::test;

use academy_dashboard::models::default_navigation;
use academy_dashboard::ui::components::Interaction;
use academy_dashboard::ui::sidebar::{active_index, Sidebar, COLLAPSED_WIDTH, EXPANDED_WIDTH};

use crate::common::fixtures::{region_text, render, screen_text};
use crate::common::logging::{init_test_logging, log_test_step};

const HEIGHT: u16 = 20;

#[test]
fn test_active_index_matches_each_route_exactly() {
    let items = default_navigation();
    for (index, item) in items.iter().enumerate() {
        assert_eq!(active_index(&items, &item.path), Some(index));
    }
    assert_eq!(active_index(&items, "/reports/2024"), None);
    assert_eq!(active_index(&items, "/Reports"), None);
}

#[test]
fn test_active_item_is_highlighted() {
    let items = default_navigation();
    let area = Rect::new(0, 0, EXPANDED_WIDTH, HEIGHT);
    let sidebar = Sidebar::new(&items, "/courses", false);
    let rows = sidebar.item_areas(area);

    let buffer = render(40, HEIGHT, |f| sidebar.render(f, area, &Interaction::default()));
    for (index, row) in rows.iter().enumerate() {
        let highlighted = buffer[(row.x + 1, row.y)].bg == Color::Blue;
        assert_eq!(highlighted, items[index].path == "/courses", "row {}", index);
    }
}

#[test]
fn test_no_item_highlighted_on_nested_route() {
    let items = default_navigation();
    let area = Rect::new(0, 0, EXPANDED_WIDTH, HEIGHT);
    let sidebar = Sidebar::new(&items, "/students/42", false);
    let rows = sidebar.item_areas(area);

    let buffer = render(40, HEIGHT, |f| sidebar.render(f, area, &Interaction::default()));
    assert!(rows.iter().all(|row| buffer[(row.x + 1, row.y)].bg != Color::Blue));
}

#[test]
fn test_expanded_shows_every_label() {
    let items = default_navigation();
    let area = Rect::new(0, 0, EXPANDED_WIDTH, HEIGHT);
    let buffer = render(40, HEIGHT, |f| {
        Sidebar::new(&items, "/", false).render(f, area, &Interaction::default())
    });

    let text = region_text(&buffer, area);
    for item in &items {
        assert!(text.contains(&item.title), "missing {}", item.title);
        assert!(text.contains(item.icon.glyph()));
    }
}

#[test]
fn test_collapsed_hides_labels_and_shows_tooltip_for_every_item() {
    init_test_logging();
    log_test_step("Hovering each collapsed item");

    let items = default_navigation();
    let area = Rect::new(0, 0, COLLAPSED_WIDTH, HEIGHT);
    let sidebar = Sidebar::new(&items, "/", true);

    let idle = render(40, HEIGHT, |f| sidebar.render(f, area, &Interaction::default()));
    let text = screen_text(&idle);
    for item in &items {
        assert!(!text.contains(&item.title), "label {} visible", item.title);
        assert!(text.contains(item.icon.glyph()));
    }

    for (index, row) in sidebar.item_areas(area).iter().enumerate() {
        let pointer = Interaction::new(Some(Position::new(row.x + 2, row.y)));
        let hovered = render(40, HEIGHT, |f| sidebar.render(f, area, &pointer));
        let text = screen_text(&hovered);
        assert!(text.contains(&items[index].title), "no tooltip for {}", items[index].title);
        for (other, item) in items.iter().enumerate() {
            if other != index {
                assert!(!text.contains(&item.title));
            }
        }
    }
}

#[test]
fn test_keyboard_selection_shows_tooltip_when_focused() {
    let items = default_navigation();
    let area = Rect::new(0, 0, COLLAPSED_WIDTH, HEIGHT);
    let sidebar = Sidebar::new(&items, "/", true).selected(Some(2));

    let unfocused = render(40, HEIGHT, |f| sidebar.render(f, area, &Interaction::default()));
    assert!(!screen_text(&unfocused).contains("Courses"));

    let focused = render(40, HEIGHT, |f| {
        sidebar.render(f, area, &Interaction::default().with_focus(true))
    });
    assert!(screen_text(&focused).contains("Courses"));
}
