//! Shared data, a mocked auth context and buffer helpers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use ratatui::{
    backend::TestBackend,
    buffer::Buffer,
    layout::{Position, Rect},
    Frame, Terminal,
};

use academy_dashboard::auth::AuthContext;
use academy_dashboard::models::User;
use academy_dashboard::ui::DashboardApp;
use academy_dashboard::{dashboard_data, DashboardError};

pub const WIDTH: u16 = 100;
pub const HEIGHT: u16 = 30;

mock! {
    pub Auth {}

    #[async_trait]
    impl AuthContext for Auth {
        fn user(&self) -> Option<User>;
        async fn logout(&mut self) -> academy_dashboard::Result<()>;
    }
}

pub fn maria() -> User {
    User::new("Maria", "Northside Academy")
}

/// Auth that never expects a logout
pub fn static_auth(user: Option<User>) -> MockAuth {
    let mut auth = MockAuth::new();
    auth.expect_user().returning(move || user.clone());
    auth
}

/// Auth whose user disappears once logout has been awaited
pub fn signed_in_auth(user: User) -> MockAuth {
    let logged_out = Arc::new(AtomicBool::new(false));
    let mut auth = MockAuth::new();

    let flag = logged_out.clone();
    auth.expect_user()
        .returning(move || (!flag.load(Ordering::SeqCst)).then(|| user.clone()));
    auth.expect_logout().times(1).returning(move || {
        logged_out.store(true, Ordering::SeqCst);
        Ok(())
    });
    auth
}

/// Auth whose logout always fails
pub fn failing_auth(user: User) -> MockAuth {
    let mut auth = MockAuth::new();
    auth.expect_user().returning(move || Some(user.clone()));
    auth.expect_logout().returning(|| {
        Err(DashboardError::Io {
            path: "session.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    });
    auth
}

pub fn sample_app(auth: MockAuth) -> DashboardApp {
    DashboardApp::new(Box::new(auth), dashboard_data::sample(), false)
}

pub fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(WIDTH, HEIGHT)).expect("test terminal")
}

pub fn draw_app(terminal: &mut Terminal<TestBackend>, app: &mut DashboardApp) {
    terminal.draw(|f| app.draw(f)).expect("draw");
}

/// Render a closure once and hand back the buffer
pub fn render<F>(width: u16, height: u16, draw: F) -> Buffer
where
    F: FnOnce(&mut Frame),
{
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal.draw(draw).expect("draw");
    terminal.backend().buffer().clone()
}

/// Text of the cells inside `area`, one line per row
pub fn region_text(buffer: &Buffer, area: Rect) -> String {
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

pub fn screen_text(buffer: &Buffer) -> String {
    region_text(buffer, buffer.area)
}

/// First cell whose symbol equals `symbol`
pub fn find_symbol(buffer: &Buffer, symbol: &str) -> Option<Position> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .flat_map(|y| (area.left()..area.right()).map(move |x| Position::new(x, y)))
        .find(|p| buffer[(p.x, p.y)].symbol() == symbol)
}
