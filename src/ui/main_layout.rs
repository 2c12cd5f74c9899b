use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::components::{render_tooltip, Interaction};
use super::header::Header;
use super::layout::ShellLayout;
use super::sidebar::{Sidebar, COLLAPSED_WIDTH, EXPANDED_WIDTH};

pub const HERO_HEIGHT: u16 = 6;
const TRANSITION_STEP: u16 = 4;

/// Per-page text shown around the content
#[derive(Debug, Clone, Copy, Default)]
pub struct PageChrome<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub header_image: Option<&'a str>,
}

impl PageChrome<'_> {
    fn banner_height(&self) -> u16 {
        match (self.header_image, self.subtitle) {
            (Some(_), _) => HERO_HEIGHT,
            (None, Some(_)) => 1,
            (None, None) => 0,
        }
    }
}

/// Application shell: owns the collapsed flag and animates the sidebar width toward it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainLayout {
    collapsed: bool,
    sidebar_width: u16,
}

impl MainLayout {
    pub fn new(collapsed: bool) -> Self {
        Self {
            collapsed,
            sidebar_width: target_width(collapsed),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn sidebar_width(&self) -> u16 {
        self.sidebar_width
    }

    pub fn is_animating(&self) -> bool {
        self.sidebar_width != target_width(self.collapsed)
    }

    /// Advance the width transition one step; returns whether anything moved
    pub fn tick(&mut self) -> bool {
        let target = target_width(self.collapsed);
        if self.sidebar_width < target {
            self.sidebar_width = (self.sidebar_width + TRANSITION_STEP).min(target);
            true
        } else if self.sidebar_width > target {
            self.sidebar_width = self.sidebar_width.saturating_sub(TRANSITION_STEP).max(target);
            true
        } else {
            false
        }
    }

    pub fn areas(&self, area: Rect, chrome: &PageChrome) -> ShellLayout {
        ShellLayout::new(area, self.sidebar_width, chrome.banner_height())
    }

    /// Draw header, banner, sidebar and content; the sidebar tooltip is layered over the content
    #[allow(clippy::too_many_arguments)]
    pub fn render<F>(
        &self,
        f: &mut Frame,
        area: Rect,
        chrome: &PageChrome,
        sidebar: &Sidebar,
        header: &Header,
        pointer: &Interaction,
        sidebar_focused: bool,
        content: F,
    ) -> ShellLayout
    where
        F: FnOnce(&mut Frame, Rect),
    {
        let layout = self.areas(area, chrome);

        header.render(f, layout.header, pointer);

        match (chrome.header_image, chrome.subtitle) {
            (Some(image), subtitle) => render_hero(f, layout.banner, chrome.title, subtitle, image),
            (None, Some(subtitle)) => {
                let line = Paragraph::new(Line::from(Span::styled(
                    format!(" {}", subtitle),
                    Style::default().fg(Color::Gray),
                )));
                f.render_widget(line, layout.banner);
            }
            (None, None) => {}
        }

        let tooltip = sidebar.render_body(f, layout.sidebar, &pointer.with_focus(sidebar_focused));
        content(f, layout.content);
        if let Some((anchor, title)) = tooltip {
            render_tooltip(f, anchor, &[title]);
        }
        layout
    }
}

fn target_width(collapsed: bool) -> u16 {
    if collapsed {
        COLLAPSED_WIDTH
    } else {
        EXPANDED_WIDTH
    }
}

/// Banner standing in for the header image, with title and subtitle overlaid
fn render_hero(f: &mut Frame, area: Rect, title: &str, subtitle: Option<&str>, image: &str) {
    if area.height == 0 {
        return;
    }

    let background = Block::default().style(Style::default().bg(Color::Rgb(25, 55, 95)));
    f.render_widget(background, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("▨ {}", image),
            Style::default().fg(Color::Rgb(120, 150, 190)),
        ))
        .alignment(Alignment::Right),
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    ];
    if let Some(subtitle) = subtitle {
        lines.push(
            Line::from(Span::styled(
                subtitle.to_string(),
                Style::default().fg(Color::Rgb(200, 215, 235)),
            ))
            .alignment(Alignment::Center),
        );
    }

    f.render_widget(Paragraph::new(lines), area);
}
