use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};

use super::components::{render_dropdown, Interaction};
use crate::models::{NavigationItem, Notification, User};

pub const HEADER_HEIGHT: u16 = 3;
const SEARCH_WIDTH: u16 = 30;
const BELL_WIDTH: u16 = 8;
const AVATAR_WIDTH: u16 = 6;

/// Avatar letter: the first character of the display name, `U` without one
pub fn avatar_initial(user: Option<&User>) -> char {
    user.and_then(|u| u.name.as_deref())
        .and_then(|name| name.trim().chars().next())
        .unwrap_or('U')
}

/// Text typed into the header search box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub active: bool,
}

impl SearchState {
    pub fn begin(&mut self) {
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.query.clear();
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop(&mut self) {
        self.query.pop();
    }

    /// Navigation entries whose titles fuzzy-match the query, best first
    pub fn matches(&self, items: &[NavigationItem]) -> Vec<usize> {
        let query = self.query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default().ignore_case();
        let mut scored: Vec<(i64, usize)> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| matcher.fuzzy_match(&item.title, query).map(|s| (s, i)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, i)| i).collect()
    }

    pub fn best_match(&self, items: &[NavigationItem]) -> Option<usize> {
        self.matches(items).into_iter().next()
    }
}

/// Where each header control sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderAreas {
    pub title: Rect,
    pub search: Rect,
    pub notifications: Rect,
    pub avatar: Rect,
}

impl HeaderAreas {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(SEARCH_WIDTH),
                Constraint::Length(BELL_WIDTH),
                Constraint::Length(AVATAR_WIDTH),
            ])
            .split(area);

        Self {
            title: chunks[0],
            search: chunks[1],
            notifications: chunks[2],
            avatar: chunks[3],
        }
    }
}

/// Top bar: page title, search box, notification button and user-menu trigger
pub struct Header<'a> {
    title: &'a str,
    search: &'a SearchState,
    unread: usize,
    user: Option<&'a User>,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, search: &'a SearchState, unread: usize, user: Option<&'a User>) -> Self {
        Self {
            title,
            search,
            unread,
            user,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, interaction: &Interaction) {
        let areas = HeaderAreas::new(area);

        let title = Paragraph::new(Line::from(Span::styled(
            format!(" {}", self.title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().padding(Padding::top(1)));
        f.render_widget(title, areas.title);

        let search_style = if self.search.active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let search_text = if self.search.query.is_empty() && !self.search.active {
            Line::from(Span::styled("Search… (/)", Style::default().fg(Color::DarkGray)))
        } else {
            let cursor = if self.search.active { "▏" } else { "" };
            Line::from(format!("{}{}", self.search.query, cursor))
        };
        let search = Paragraph::new(search_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(search_style),
        );
        f.render_widget(search, areas.search);

        let bell_style = if interaction.hovers(areas.notifications) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut bell = vec![Span::styled("🔔", bell_style)];
        if self.unread > 0 {
            bell.push(Span::styled(
                format!(" {}", self.unread),
                Style::default().fg(Color::White).bg(Color::Red),
            ));
        }
        f.render_widget(
            Paragraph::new(Line::from(bell)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            areas.notifications,
        );

        let avatar = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", avatar_initial(self.user)),
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(avatar, areas.avatar);
    }
}

/// Dropdown of navigation entries matching the search query
pub fn render_search_results(f: &mut Frame, search_area: Rect, items: &[NavigationItem], matches: &[usize]) {
    if matches.is_empty() {
        return;
    }
    let lines: Vec<Line> = matches
        .iter()
        .enumerate()
        .map(|(rank, &i)| {
            let item = &items[i];
            let style = if rank == 0 {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::styled(format!("{} {}  {}", item.icon.glyph(), item.title, item.path), style)
        })
        .collect();
    render_dropdown(f, search_area, "Go to", lines);
}

pub fn render_notifications(f: &mut Frame, bell_area: Rect, notifications: &[Notification]) -> Rect {
    let lines: Vec<Line> = if notifications.is_empty() {
        vec![Line::styled("No notifications", Style::default().fg(Color::DarkGray))]
    } else {
        notifications
            .iter()
            .map(|n| {
                let mut spans = vec![Span::raw(format!("• {}", n.message))];
                if let Some(at) = n.created_at {
                    spans.push(Span::styled(
                        format!("  {}", at.format("%b %d %H:%M")),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                Line::from(spans)
            })
            .collect()
    };
    render_dropdown(f, bell_area, "Notifications", lines)
}

/// Row of the logout entry inside a rendered user menu
pub const LOGOUT_ROW: u16 = 3;

/// User menu with name, academy and the logout action; returns the menu area
pub fn render_user_menu(f: &mut Frame, avatar_area: Rect, user: Option<&User>) -> Rect {
    let name = user
        .and_then(|u| u.name.clone())
        .unwrap_or_else(|| "Guest".to_string());
    let academy = user
        .and_then(|u| u.academy_name.clone())
        .unwrap_or_default();

    let lines = vec![
        Line::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(academy, Style::default().fg(Color::Gray)),
        Line::from(""),
        Line::styled("⏻ Log out (l)", Style::default().fg(Color::Red)),
    ];
    render_dropdown(f, avatar_area, "Account", lines)
}

/// The clickable logout line of a menu drawn at `menu_area`
pub fn logout_area(menu_area: Rect) -> Rect {
    Rect::new(menu_area.x + 1, menu_area.y + 1 + LOGOUT_ROW, menu_area.width.saturating_sub(2), 1)
}
