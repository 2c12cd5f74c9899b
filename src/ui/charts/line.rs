use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, LegendPosition},
    Frame,
};

use super::bar::record_tooltip;
use crate::models::{DataRecord, LineChartSpec, SeriesConfig};
use crate::ui::chart_card::ChartCard;
use crate::ui::components::{format_large_number, parse_color, render_tooltip, Interaction};

/// One line per series across the records, x = record position
pub struct LineChart<'a> {
    spec: &'a LineChartSpec,
}

/// Points for one series: (record index, value)
pub fn series_points(data: &[DataRecord], series: &SeriesConfig) -> Vec<(f64, f64)> {
    data.iter()
        .enumerate()
        .map(|(i, record)| (i as f64, record.value(&series.field)))
        .collect()
}

/// Zero-based y range covering every plotted value with a little headroom
pub fn y_bounds(data: &[DataRecord], series: &[SeriesConfig]) -> [f64; 2] {
    let (min, max) = data
        .iter()
        .flat_map(|record| series.iter().map(move |s| record.value(&s.field)))
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if max <= min {
        [min, min + 1.0]
    } else {
        [min, max * 1.1]
    }
}

/// Region `Chart` plots into once the y labels, the axis lines and the x labels are laid out
pub fn graph_area(area: Rect, y_labels: &[Span], first_x_label: Option<&Span>) -> Rect {
    let label_width = y_labels.iter().map(Span::width).max().unwrap_or(0) as u16;
    // a left-aligned first x label may hang past the y axis
    let overhang = first_x_label.map_or(0, |label| (label.width() as u16).saturating_sub(1));
    let left = label_width.max(overhang).min(area.width / 3) + 1;

    let x = area.x.saturating_add(left).min(area.right());
    Rect::new(x, area.y, area.right() - x, area.height.saturating_sub(2))
}

/// Record whose point lies closest to column `x` of the graph
pub fn nearest_record(graph: Rect, count: usize, x: u16) -> Option<usize> {
    if count == 0 || x < graph.x || x >= graph.right() {
        return None;
    }
    let span = graph.width.saturating_sub(1).max(1) as f64;
    let position = (x - graph.x) as f64 / span * (count - 1) as f64;
    Some((position.round() as usize).min(count - 1))
}

impl<'a> LineChart<'a> {
    pub fn new(spec: &'a LineChartSpec) -> Self {
        Self { spec }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, interaction: &Interaction) {
        let card = ChartCard::new(&self.spec.title)
            .description(self.spec.description.as_deref())
            .tooltip(self.spec.tooltip.as_deref());

        card.render(f, area, interaction, |f, content| {
            self.render_body(f, content, interaction)
        });
    }

    fn render_body(&self, f: &mut Frame, area: Rect, interaction: &Interaction) {
        if area.height < 3 || area.width < 8 || self.spec.data.is_empty() {
            return;
        }

        let points: Vec<Vec<(f64, f64)>> = self
            .spec
            .series
            .iter()
            .map(|s| series_points(&self.spec.data, s))
            .collect();

        let datasets: Vec<Dataset> = self
            .spec
            .series
            .iter()
            .zip(&points)
            .enumerate()
            .map(|(i, (s, data))| {
                Dataset::default()
                    .name(s.name.clone())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(parse_color(&s.color, i)))
                    .data(data)
            })
            .collect();

        let last = self.spec.data.len() - 1;
        let x_max = last.max(1) as f64;
        let mut x_labels = vec![Span::raw(self.spec.data[0].name.clone())];
        if last >= 2 {
            x_labels.push(Span::raw(self.spec.data[last / 2].name.clone()));
        }
        if last >= 1 {
            x_labels.push(Span::raw(self.spec.data[last].name.clone()));
        }

        let [y_min, y_max] = y_bounds(&self.spec.data, &self.spec.series);
        let y_labels = vec![
            Span::raw(format_large_number(y_min)),
            Span::raw(format_large_number((y_min + y_max) / 2.0)),
            Span::raw(format_large_number(y_max)),
        ];

        let graph = graph_area(area, &y_labels, x_labels.first());
        let axis_style = Style::default().fg(Color::Gray);
        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .bounds([0.0, x_max])
                    .labels(x_labels)
                    .style(axis_style),
            )
            .y_axis(
                Axis::default()
                    .bounds([y_min, y_max])
                    .labels(y_labels)
                    .style(axis_style),
            )
            .legend_position(Some(LegendPosition::TopRight));

        f.render_widget(chart, area);

        if let Some(pointer) = interaction.pointer.filter(|_| interaction.hovers(graph)) {
            if let Some(index) = nearest_record(graph, self.spec.data.len(), pointer.x) {
                render_tooltip(
                    f,
                    Rect::new(pointer.x, pointer.y, 1, 1),
                    &record_tooltip(&self.spec.data[index], &self.spec.series),
                );
            }
        }
    }
}
