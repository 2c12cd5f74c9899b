/// Shared UI helpers: pointer/focus state, colors, tooltips and number formatting
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Fallback colors for series and slices without an explicit color
pub const PALETTE: [Color; 6] = [
    Color::Rgb(136, 132, 216),
    Color::Rgb(130, 202, 157),
    Color::Rgb(255, 198, 88),
    Color::Rgb(255, 128, 66),
    Color::Rgb(0, 136, 254),
    Color::Rgb(162, 140, 240),
];

/// Pointer position and keyboard focus handed to a component for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub pointer: Option<Position>,
    pub focused: bool,
}

impl Interaction {
    pub fn new(pointer: Option<Position>) -> Self {
        Self {
            pointer,
            focused: false,
        }
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Whether the pointer rests inside `area`
    pub fn hovers(&self, area: Rect) -> bool {
        self.pointer.is_some_and(|p| area.contains(p))
    }
}

pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Parse `#rrggbb` or a named color, falling back to the palette slot
pub fn parse_color(spec: &str, index: usize) -> Color {
    spec.trim().parse::<Color>().unwrap_or_else(|_| palette_color(index))
}

/// Place a tooltip next to `anchor`, preferring the right side, kept inside `bounds`
pub fn tooltip_area(anchor: Rect, bounds: Rect, lines: &[String]) -> Rect {
    let text_width = lines
        .iter()
        .map(|l| Line::from(l.as_str()).width())
        .max()
        .unwrap_or(0) as u16;
    let width = (text_width + 4).min(bounds.width);
    let height = (lines.len() as u16 + 2).min(bounds.height);

    let right = anchor.right();
    let x = if right + width <= bounds.right() {
        right
    } else if anchor.x >= bounds.x + width {
        anchor.x - width
    } else {
        bounds.right().saturating_sub(width).max(bounds.x)
    };

    let y = anchor
        .y
        .min(bounds.bottom().saturating_sub(height))
        .max(bounds.y);

    Rect::new(x, y, width, height)
}

/// Draw a bordered tooltip popup next to `anchor`
pub fn render_tooltip(f: &mut Frame, anchor: Rect, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let area = tooltip_area(anchor, f.area(), lines);
    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.clone())).collect();

    let popup = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 46)));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

/// Draw a dropdown panel anchored under `anchor`, right-aligned to it
pub fn render_dropdown(f: &mut Frame, anchor: Rect, title: &str, lines: Vec<Line>) -> Rect {
    let bounds = f.area();
    let content_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let title_width = Line::from(title).width() as u16;
    let width = (content_width.max(title_width) + 4).min(bounds.width);
    let height = cell_count(lines.len())
        .saturating_add(2)
        .min(bounds.height.saturating_sub(anchor.bottom()));
    let x = anchor.right().saturating_sub(width).max(bounds.x);
    let area = Rect::new(x, anchor.bottom(), width, height);

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::styled(
                format!(" {} ", title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(Clear, area);
    f.render_widget(panel, area);
    area
}

/// Format a data value without a trailing `.0` for whole numbers
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Format large numbers with unit suffixes for axis labels
pub fn format_large_number(value: f64) -> String {
    if value >= 1_000_000_000_000.0 {
        format!("{:.1}T", value / 1_000_000_000_000.0)
    } else if value >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// Clamp a count to the cell range of a terminal dimension
pub fn cell_count(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}
