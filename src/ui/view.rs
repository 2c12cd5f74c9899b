use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::{debug, warn};

use super::charts::render_chart;
use super::components::Interaction;
use crate::error::{DashboardError, Result};
use crate::models::{DashboardData, NavigationItem, PageSpec};

/// What a view needs from the app for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewInteraction {
    pub pointer: Option<Position>,
    pub focused_card: Option<usize>,
}

/// View contract for every routed page
pub trait View {
    /// Route this view answers to
    fn path(&self) -> &str;

    fn title(&self) -> &str;

    fn subtitle(&self) -> Option<&str> {
        None
    }

    fn header_image(&self) -> Option<&str> {
        None
    }

    /// Number of cards reachable with Tab
    fn focusable_count(&self) -> usize {
        0
    }

    fn render(&self, f: &mut Frame, area: Rect, interaction: &ViewInteraction);
}

/// Routes paths to views
pub struct ViewManager {
    views: Vec<Box<dyn View>>,
    current: usize,
}

impl Default for ViewManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewManager {
    pub fn new() -> Self {
        Self {
            views: Vec::new(),
            current: 0,
        }
    }

    /// Register a view; a later view with the same path replaces the earlier one
    pub fn add_view(&mut self, view: Box<dyn View>) {
        match self.views.iter().position(|v| v.path() == view.path()) {
            Some(existing) => {
                debug!("Replacing view for {}", view.path());
                self.views[existing] = view;
            }
            None => self.views.push(view),
        }
    }

    pub fn current_view(&self) -> Option<&dyn View> {
        self.views.get(self.current).map(|v| v.as_ref())
    }

    pub fn current_path(&self) -> &str {
        self.current_view().map(|v| v.path()).unwrap_or("/")
    }

    /// Switch to the view registered for `path`; an unknown path leaves the route unchanged
    pub fn navigate(&mut self, path: &str) -> Result<()> {
        match self.views.iter().position(|v| v.path() == path) {
            Some(index) => {
                debug!("Navigating {} -> {}", self.current_path(), path);
                self.current = index;
                Ok(())
            }
            None => {
                warn!("No view registered for {}", path);
                Err(DashboardError::UnknownRoute(path.to_string()))
            }
        }
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn render_current_view(&self, f: &mut Frame, area: Rect, interaction: &ViewInteraction) {
        if let Some(view) = self.current_view() {
            view.render(f, area, interaction);
        }
    }
}

/// Card slots for `count` charts, two per row; an odd last chart spans the row
pub fn grid_areas(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }

    let rows = count.div_ceil(2);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    let mut areas = Vec::with_capacity(count);
    for (row, row_area) in row_areas.iter().enumerate() {
        if count - row * 2 >= 2 {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(*row_area);
            areas.extend(halves.iter().copied());
        } else {
            areas.push(*row_area);
        }
    }
    areas
}

/// A page of chart cards laid out in a grid
pub struct ChartsView {
    page: PageSpec,
}

impl ChartsView {
    pub fn new(page: PageSpec) -> Self {
        Self { page }
    }
}

impl View for ChartsView {
    fn path(&self) -> &str {
        &self.page.path
    }

    fn title(&self) -> &str {
        &self.page.title
    }

    fn subtitle(&self) -> Option<&str> {
        self.page.subtitle.as_deref()
    }

    fn header_image(&self) -> Option<&str> {
        self.page.header_image.as_deref()
    }

    fn focusable_count(&self) -> usize {
        self.page.charts.len()
    }

    fn render(&self, f: &mut Frame, area: Rect, interaction: &ViewInteraction) {
        if self.page.charts.is_empty() {
            render_empty(f, area, "No charts configured for this page");
            return;
        }

        let areas = grid_areas(area, self.page.charts.len());
        let interaction_for = |index: usize, rect: Rect| {
            let pointer = interaction.pointer.filter(|p| rect.contains(*p));
            Interaction::new(pointer).with_focus(interaction.focused_card == Some(index))
        };

        // The card showing a tooltip is drawn last so neighbours do not paint over it
        let raised = areas.iter().enumerate().position(|(i, rect)| {
            let card = interaction_for(i, *rect);
            card.focused || card.pointer.is_some()
        });

        for (index, (spec, rect)) in self.page.charts.iter().zip(&areas).enumerate() {
            if Some(index) != raised {
                render_chart(f, *rect, spec, &interaction_for(index, *rect));
            }
        }
        if let Some(index) = raised {
            let rect = areas[index];
            render_chart(f, rect, &self.page.charts[index], &interaction_for(index, rect));
        }
    }
}

/// Stand-in for a navigation entry with no content
pub struct PlaceholderView {
    path: String,
    title: String,
}

impl PlaceholderView {
    pub fn new(item: &NavigationItem) -> Self {
        Self {
            path: item.path.clone(),
            title: item.title.clone(),
        }
    }
}

impl View for PlaceholderView {
    fn path(&self) -> &str {
        &self.path
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, f: &mut Frame, area: Rect, _interaction: &ViewInteraction) {
        render_empty(f, area, &format!("{} has no content yet", self.title));
    }
}

fn render_empty(f: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(message.to_string())])
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(paragraph, area);
}

/// Builds the routed views for a dashboard
pub struct ViewFactory;

impl ViewFactory {
    /// One view per navigation entry, plus any extra pages the data defines
    pub fn from_data(navigation: &[NavigationItem], data: &DashboardData) -> ViewManager {
        let mut manager = ViewManager::new();

        for item in navigation {
            let view: Box<dyn View> = match data.page(&item.path) {
                Some(page) => Box::new(ChartsView::new(page.clone())),
                None => Box::new(PlaceholderView::new(item)),
            };
            manager.add_view(view);
        }

        for page in &data.pages {
            if !navigation.iter().any(|item| item.path == page.path) {
                manager.add_view(Box::new(ChartsView::new(page.clone())));
            }
        }

        debug!("Registered {} views", manager.view_count());
        manager
    }
}
