use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::header::HEADER_HEIGHT;

/// Centralized layout of the application shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub sidebar: Rect,
    pub header: Rect,
    pub banner: Rect,
    pub content: Rect,
    pub status_bar: Rect,
}

impl ShellLayout {
    /// Split `area` into a fixed sidebar on the left and header, banner, content and status on the right
    pub fn new(area: Rect, sidebar_width: u16, banner_height: u16) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT), // Header
                Constraint::Length(banner_height), // Hero banner or subtitle
                Constraint::Min(0),                // Content
                Constraint::Length(1),             // Status bar
            ])
            .split(columns[1]);

        Self {
            sidebar: columns[0],
            header: rows[0],
            banner: rows[1],
            content: rows[2],
            status_bar: rows[3],
        }
    }

    /// Render the key hints and the current status message
    pub fn render_status_bar(&self, f: &mut Frame, status_text: &str) {
        let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let hint = Style::default().fg(Color::Gray);

        let line = Line::from(vec![
            Span::styled(" b", key),
            Span::styled(" sidebar • ", hint),
            Span::styled("↑↓ ⏎", key),
            Span::styled(" navigate • ", hint),
            Span::styled("Tab", key),
            Span::styled(" cards • ", hint),
            Span::styled("/", key),
            Span::styled(" search • ", hint),
            Span::styled("q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(" quit  ", hint),
            Span::styled(status_text, Style::default().fg(Color::Cyan)),
        ]);

        f.render_widget(Paragraph::new(line), self.status_bar);
    }
}
