//! Collapsible navigation sidebar.
//!
//! The active entry is the one whose path equals the current route exactly;
//! `/students` is not active on `/students/42`. When collapsed only icons are
//! drawn and titles move into tooltips shown on hover or keyboard selection.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::components::{render_tooltip, Interaction};
use crate::models::NavigationItem;

pub const EXPANDED_WIDTH: u16 = 24;
pub const COLLAPSED_WIDTH: u16 = 7;

const ITEMS_TOP: u16 = 3;
const ITEM_SPACING: u16 = 2;

pub fn is_active(item: &NavigationItem, current_path: &str) -> bool {
    item.path == current_path
}

/// Index of the entry matching `current_path`, if any
pub fn active_index(items: &[NavigationItem], current_path: &str) -> Option<usize> {
    items.iter().position(|item| is_active(item, current_path))
}

pub struct Sidebar<'a> {
    items: &'a [NavigationItem],
    current_path: &'a str,
    collapsed: bool,
    selected: Option<usize>,
}

impl<'a> Sidebar<'a> {
    pub fn new(items: &'a [NavigationItem], current_path: &'a str, collapsed: bool) -> Self {
        Self {
            items,
            current_path,
            collapsed,
            selected: None,
        }
    }

    /// Keyboard cursor, drawn and tooltipped like a hover
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// The collapse toggle button on the first row
    pub fn toggle_area(area: Rect) -> Rect {
        let width = area.width.saturating_sub(1);
        Rect::new(area.x, area.y + 1, width, 1u16.min(area.height.saturating_sub(1)))
    }

    /// One row per item, spaced out below the toggle; rows past the bottom are dropped
    pub fn item_areas(&self, area: Rect) -> Vec<Rect> {
        let width = area.width.saturating_sub(1);
        (0..self.items.len() as u16)
            .map(|i| Rect::new(area.x, area.y + ITEMS_TOP + i * ITEM_SPACING, width, 1))
            .take_while(|rect| rect.y < area.bottom())
            .collect()
    }

    pub fn item_at(&self, area: Rect, position: Position) -> Option<usize> {
        self.item_areas(area)
            .iter()
            .position(|rect| rect.contains(position))
    }

    fn item_line(&self, index: usize, hovered: bool) -> Line<'a> {
        let item = &self.items[index];
        let active = is_active(item, self.current_path);

        let style = if active {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else if hovered || self.selected == Some(index) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let marker = if self.selected == Some(index) { "▸" } else { " " };
        if self.collapsed {
            Line::from(vec![
                Span::raw(marker),
                Span::styled(format!(" {} ", item.icon.glyph()), style),
            ])
        } else {
            Line::from(vec![
                Span::raw(marker),
                Span::styled(format!(" {}  {:<16}", item.icon.glyph(), item.title), style),
            ])
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, interaction: &Interaction) {
        if let Some((anchor, title)) = self.render_body(f, area, interaction) {
            render_tooltip(f, anchor, &[title]);
        }
    }

    /// Draw everything but the tooltip, which is returned so callers can layer it last
    pub fn render_body(
        &self,
        f: &mut Frame,
        area: Rect,
        interaction: &Interaction,
    ) -> Option<(Rect, String)> {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(block, area);

        let toggle = Sidebar::toggle_area(area);
        let toggle_style = if interaction.hovers(toggle) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let toggle_line = if self.collapsed {
            Line::from(Span::styled("  »", toggle_style))
        } else {
            Line::from(vec![
                Span::styled(
                    " ◆ Academy",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled("    «", toggle_style),
            ])
        };
        f.render_widget(Paragraph::new(toggle_line), toggle);

        let areas = self.item_areas(area);
        let mut tooltip = None;
        for (index, rect) in areas.iter().enumerate() {
            let hovered = interaction.hovers(*rect);
            f.render_widget(Paragraph::new(self.item_line(index, hovered)), *rect);

            if self.collapsed && (hovered || (interaction.focused && self.selected == Some(index))) {
                tooltip = Some((*rect, self.items[index].title.clone()));
            }
        }

        tooltip
    }
}
