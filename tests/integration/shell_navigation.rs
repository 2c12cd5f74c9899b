use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use test_log::test;

use academy_dashboard::ui::events::{Action, InputMode};
use academy_dashboard::ui::header::{HeaderAreas, HEADER_HEIGHT};
use academy_dashboard::ui::sidebar::{COLLAPSED_WIDTH, EXPANDED_WIDTH};
use academy_dashboard::DashboardError;

use crate::common::fixtures::{
    draw_app, maria, region_text, sample_app, screen_text, static_auth, terminal, HEIGHT, WIDTH,
};
use crate::common::logging::{init_test_logging, log_test_step};

/// Sidebar row of navigation entry `index`
fn item_row(index: u16) -> u16 {
    3 + index * 2
}

fn header_areas(sidebar_width: u16) -> HeaderAreas {
    HeaderAreas::new(Rect::new(sidebar_width, 0, WIDTH - sidebar_width, HEADER_HEIGHT))
}

#[test(tokio::test)]
async fn test_clicking_an_item_navigates_and_moves_highlight() {
    init_test_logging();
    log_test_step("Click Students in the sidebar");

    let mut app = sample_app(static_auth(Some(maria())));
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);

    let buffer = terminal.backend().buffer().clone();
    assert_eq!(buffer[(1, item_row(0))].bg, Color::Blue);

    app.handle_action(Action::Click(Position::new(3, item_row(1)))).await;
    assert_eq!(app.current_path(), "/students");
    assert_eq!(app.status(), "Opened /students");

    draw_app(&mut terminal, &mut app);
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(1, item_row(1))].bg, Color::Blue);
    assert_ne!(buffer[(1, item_row(0))].bg, Color::Blue);
    assert!(screen_text(buffer).contains("Students has no content yet"));
}

#[test(tokio::test)]
async fn test_collapse_and_expand_keep_every_item() {
    init_test_logging();

    let mut app = sample_app(static_auth(Some(maria())));
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);

    log_test_step("Collapse through the toggle button");
    app.handle_action(Action::Click(Position::new(2, 1))).await;
    assert!(app.layout().is_collapsed());
    while app.tick() {}
    assert_eq!(app.layout().sidebar_width(), COLLAPSED_WIDTH);

    draw_app(&mut terminal, &mut app);
    let sidebar = Rect::new(0, 0, COLLAPSED_WIDTH, HEIGHT);
    let text = region_text(terminal.backend().buffer(), sidebar);
    assert!(!text.contains("Students"));
    assert!(!text.contains("Settings"));

    // tooltip opens to the right of the hovered row
    let tooltip = Rect::new(COLLAPSED_WIDTH - 1, item_row(1), 14, 3);
    assert!(!region_text(terminal.backend().buffer(), tooltip).contains("Students"));

    app.handle_action(Action::PointerMoved(Position::new(2, item_row(1)))).await;
    draw_app(&mut terminal, &mut app);
    assert!(region_text(terminal.backend().buffer(), tooltip).contains("Students"));

    log_test_step("Expand from the keyboard");
    app.handle_action(Action::ToggleSidebar).await;
    while app.tick() {}
    assert_eq!(app.layout().sidebar_width(), EXPANDED_WIDTH);

    draw_app(&mut terminal, &mut app);
    let sidebar = Rect::new(0, 0, EXPANDED_WIDTH, HEIGHT);
    let text = region_text(terminal.backend().buffer(), sidebar);
    for title in ["Dashboard", "Students", "Courses", "Schedule", "Reports", "Settings"] {
        assert!(text.contains(title), "missing {}", title);
    }
}

#[test(tokio::test)]
async fn test_keyboard_navigation_and_page_chrome() {
    let mut app = sample_app(static_auth(None));
    let mut terminal = terminal();

    draw_app(&mut terminal, &mut app);
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("▨ assets/campus.jpg"));
    assert!(text.contains("Academy overview for the current term"));

    for _ in 0..4 {
        app.handle_action(Action::SelectNext).await;
    }
    app.handle_action(Action::OpenSelected).await;
    assert_eq!(app.current_path(), "/reports");

    draw_app(&mut terminal, &mut app);
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Term-over-term comparison"));
    assert!(!text.contains("▨"));
    assert!(text.contains("Graduations vs enrollment"));
}

#[test(tokio::test)]
async fn test_search_lists_matches_and_jumps() {
    let mut app = sample_app(static_auth(None));
    let mut terminal = terminal();

    app.handle_action(Action::BeginSearch).await;
    assert_eq!(app.input_mode(), InputMode::Search);
    for c in "cour".chars() {
        app.handle_action(Action::SearchInput(c)).await;
    }

    draw_app(&mut terminal, &mut app);
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Go to"));
    assert!(text.contains("/courses"));

    app.handle_action(Action::SubmitSearch).await;
    assert_eq!(app.current_path(), "/courses");
}

#[test]
fn test_unknown_route_keeps_current_page() {
    let mut app = sample_app(static_auth(None));
    app.navigate("/reports").unwrap();

    assert_matches!(app.navigate("/missing"), Err(DashboardError::UnknownRoute(path)) if path == "/missing");
    assert_eq!(app.current_path(), "/reports");
}

#[test(tokio::test)]
async fn test_notification_button_opens_list() {
    let mut app = sample_app(static_auth(Some(maria())));
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);

    let bell = header_areas(EXPANDED_WIDTH).notifications;
    let badge = region_text(terminal.backend().buffer(), bell);
    assert!(badge.contains('2'));

    app.handle_action(Action::Click(Position::new(bell.x + 2, bell.y + 1))).await;
    assert!(app.notifications_open());
    assert_eq!(app.unread(), 0);

    draw_app(&mut terminal, &mut app);
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Notifications"));
    assert!(text.contains("Three new enrollment requests"));
}

#[test(tokio::test)]
async fn test_focused_card_reveals_its_tooltip() {
    let mut app = sample_app(static_auth(None));
    let mut terminal = terminal();

    draw_app(&mut terminal, &mut app);
    let tooltip = "Counts are taken on the last day of each month";
    assert!(!screen_text(terminal.backend().buffer()).contains(tooltip));

    app.handle_action(Action::FocusNextCard).await;
    assert_eq!(app.focused_card(), Some(0));
    draw_app(&mut terminal, &mut app);
    assert!(screen_text(terminal.backend().buffer()).contains(tooltip));
}
