use pretty_assertions::assert_eq;
use ratatui::layout::{Position, Rect};
use test_log::test;

use academy_dashboard::models::User;
use academy_dashboard::ui::events::{Action, InputMode};
use academy_dashboard::ui::header::{HeaderAreas, HEADER_HEIGHT};
use academy_dashboard::ui::sidebar::EXPANDED_WIDTH;

use crate::common::fixtures::{
    draw_app, failing_auth, find_symbol, maria, region_text, sample_app, screen_text,
    signed_in_auth, static_auth, terminal, WIDTH,
};
use crate::common::logging::{init_test_logging, log_test_step};

fn avatar_area() -> Rect {
    HeaderAreas::new(Rect::new(EXPANDED_WIDTH, 0, WIDTH - EXPANDED_WIDTH, HEADER_HEIGHT)).avatar
}

#[test(tokio::test)]
async fn test_logout_from_keyboard_signs_out() {
    init_test_logging();
    log_test_step("Open the user menu and log out");

    let mut app = sample_app(signed_in_auth(maria()));
    let mut terminal = terminal();
    draw_app(&mut terminal, &mut app);
    assert!(region_text(terminal.backend().buffer(), avatar_area()).contains(" M "));

    app.handle_action(Action::ToggleUserMenu).await;
    assert_eq!(app.input_mode(), InputMode::UserMenu);
    draw_app(&mut terminal, &mut app);
    let text = screen_text(terminal.backend().buffer());
    assert!(text.contains("Maria"));
    assert!(text.contains("Northside Academy"));
    assert!(text.contains("Log out"));

    app.handle_action(Action::Logout).await;
    assert_eq!(app.user(), None);
    assert_eq!(app.status(), "Signed out");
    assert!(!app.user_menu_open());
    assert!(!app.should_quit());

    draw_app(&mut terminal, &mut app);
    assert!(region_text(terminal.backend().buffer(), avatar_area()).contains(" U "));
}

#[test(tokio::test)]
async fn test_clicking_logout_entry() {
    let mut app = sample_app(signed_in_auth(maria()));
    let mut terminal = terminal();

    app.handle_action(Action::ToggleUserMenu).await;
    draw_app(&mut terminal, &mut app);
    let entry = find_symbol(terminal.backend().buffer(), "⏻").expect("logout entry drawn");

    app.handle_action(Action::Click(Position::new(entry.x + 2, entry.y))).await;
    assert_eq!(app.user(), None);
    assert_eq!(app.status(), "Signed out");
}

#[test(tokio::test)]
async fn test_failed_logout_is_reported_not_fatal() {
    let mut app = sample_app(failing_auth(maria()));

    app.handle_action(Action::ToggleUserMenu).await;
    app.handle_action(Action::Logout).await;

    assert!(app.status().starts_with("Logout failed"));
    assert_eq!(app.user(), Some(maria()));
    assert!(!app.should_quit());
}

#[test(tokio::test)]
async fn test_nameless_user_shows_fallbacks() {
    let nameless = User {
        name: None,
        academy_name: Some("Northside Academy".to_string()),
    };
    let mut app = sample_app(static_auth(Some(nameless)));
    let mut terminal = terminal();

    app.handle_action(Action::ToggleUserMenu).await;
    draw_app(&mut terminal, &mut app);

    let buffer = terminal.backend().buffer();
    assert!(region_text(buffer, avatar_area()).contains(" U "));
    assert!(screen_text(buffer).contains("Guest"));
}
