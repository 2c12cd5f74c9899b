//! Titled card that frames a chart or any other content.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::components::{render_tooltip, Interaction};

pub const INFO_ICON: &str = "ⓘ";

/// Card with a title, an optional description line and an optional info tooltip
#[derive(Debug, Clone, Copy)]
pub struct ChartCard<'a> {
    title: &'a str,
    description: Option<&'a str>,
    tooltip: Option<&'a str>,
}

impl<'a> ChartCard<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            description: None,
            tooltip: None,
        }
    }

    pub fn description(mut self, description: Option<&'a str>) -> Self {
        self.description = description;
        self
    }

    pub fn tooltip(mut self, tooltip: Option<&'a str>) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Cells occupied by the info icon on the top border, when a tooltip is set
    pub fn info_icon_area(&self, area: Rect) -> Option<Rect> {
        self.tooltip?;
        if area.width < 6 || area.height == 0 {
            return None;
        }
        Some(Rect::new(area.right() - 4, area.y, 3, 1))
    }

    /// Region left for the card's content once border and description are drawn
    pub fn content_area(&self, area: Rect) -> Rect {
        let inner = self.block(false).inner(area);
        match self.description {
            Some(_) if inner.height > 1 => Rect {
                y: inner.y + 1,
                height: inner.height - 1,
                ..inner
            },
            _ => inner,
        }
    }

    fn block(&self, focused: bool) -> Block<'a> {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_top(Line::styled(
                format!(" {} ", self.title),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));

        if self.tooltip.is_some() {
            block = block.title_top(
                Line::styled(format!(" {} ", INFO_ICON), Style::default().fg(Color::Cyan))
                    .right_aligned(),
            );
        }
        block
    }

    /// Draw the card and hand its content region to `content`
    pub fn render<F>(&self, f: &mut Frame, area: Rect, interaction: &Interaction, content: F)
    where
        F: FnOnce(&mut Frame, Rect),
    {
        let block = self.block(interaction.focused);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let content_area = match self.description {
            Some(description) if inner.height > 1 => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(inner);
                let line = Paragraph::new(description).style(
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::ITALIC),
                );
                f.render_widget(line, rows[0]);
                rows[1]
            }
            _ => inner,
        };

        content(f, content_area);

        if let (Some(tooltip), Some(icon)) = (self.tooltip, self.info_icon_area(area)) {
            if interaction.focused || interaction.hovers(icon) {
                render_tooltip(f, icon, &[tooltip.to_string()]);
            }
        }
    }
}
