//! Chart wrappers: each renders inside a [`ChartCard`](super::chart_card::ChartCard) and hands drawing to ratatui.

pub mod bar;
pub mod line;
pub mod pie;

pub use bar::BarChart;
pub use line::LineChart;
pub use pie::PieChart;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    Frame,
};

use super::components::{parse_color, Interaction};
use crate::models::{ChartSpec, SeriesConfig};

/// Render whichever chart `spec` describes
pub fn render_chart(f: &mut Frame, area: Rect, spec: &ChartSpec, interaction: &Interaction) {
    match spec {
        ChartSpec::Bar(spec) => BarChart::new(spec).render(f, area, interaction),
        ChartSpec::Line(spec) => LineChart::new(spec).render(f, area, interaction),
        ChartSpec::Pie(spec) => PieChart::new(spec).render(f, area, interaction),
    }
}

/// One legend row listing each series in its color
pub(crate) fn series_legend(series: &[SeriesConfig]) -> Line<'static> {
    let mut spans = Vec::with_capacity(series.len() * 2);
    for (i, s) in series.iter().enumerate() {
        spans.push(Span::styled("■ ", Style::default().fg(parse_color(&s.color, i))));
        spans.push(Span::raw(format!("{}  ", s.name)));
    }
    Line::from(spans)
}
