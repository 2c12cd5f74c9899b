use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart as BarWidget, BarGroup, Paragraph, Widget},
    Frame,
};

use super::series_legend;
use crate::models::{BarChartSpec, DataRecord, SeriesConfig};
use crate::ui::chart_card::ChartCard;
use crate::ui::components::{cell_count, format_value, parse_color, render_tooltip, Interaction};

const GROUP_GAP: u16 = 1;

/// Bars per record, either grouped side by side or stacked into one column
pub struct BarChart<'a> {
    spec: &'a BarChartSpec,
}

/// The span of one series inside a stacked column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub series: usize,
    pub lower: f64,
    pub upper: f64,
}

/// Cumulative segments per record, bottom-up in series order. Negative values stack as zero.
pub fn stack_segments(data: &[DataRecord], series: &[SeriesConfig]) -> Vec<Vec<Segment>> {
    data.iter()
        .map(|record| {
            let mut lower = 0.0;
            series
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let upper = lower + record.value(&s.field).max(0.0);
                    let segment = Segment {
                        series: i,
                        lower,
                        upper,
                    };
                    lower = upper;
                    segment
                })
                .collect()
        })
        .collect()
}

/// Tooltip lines for one record: its name, then each series value
pub fn record_tooltip(record: &DataRecord, series: &[SeriesConfig]) -> Vec<String> {
    let mut lines = vec![record.name.clone()];
    lines.extend(
        series
            .iter()
            .map(|s| format!("{}: {}", s.name, format_value(record.value(&s.field)))),
    );
    lines
}

/// Width of each bar in a grouped chart, one bar per series per record
pub fn grouped_bar_width(width: u16, groups: usize, per_group: usize) -> u16 {
    let groups = cell_count(groups.max(1));
    let per_group = cell_count(per_group.max(1));
    let gaps = GROUP_GAP.saturating_mul(groups - 1);
    (width.saturating_sub(gaps) / groups.saturating_mul(per_group)).clamp(1, 9)
}

/// Record under column `x` of a grouped chart; a group owns the gap to its right
pub fn grouped_column_at(area: Rect, groups: usize, per_group: usize, x: u16) -> Option<usize> {
    if groups == 0 || x < area.x || x >= area.right() {
        return None;
    }
    let bar_width = grouped_bar_width(area.width, groups, per_group);
    let stride = bar_width
        .saturating_mul(cell_count(per_group.max(1)))
        .saturating_add(GROUP_GAP);
    let index = ((x - area.x) / stride) as usize;
    (index < groups).then_some(index)
}

/// Width of each record's slot in a stacked chart
pub fn stacked_slot_width(width: u16, count: usize) -> u16 {
    (width / cell_count(count.max(1))).max(1)
}

/// Record under column `x` of a stacked chart; leftover columns past the last slot hit nothing
pub fn stacked_column_at(area: Rect, count: usize, x: u16) -> Option<usize> {
    if count == 0 || x < area.x || x >= area.right() {
        return None;
    }
    let index = ((x - area.x) / stacked_slot_width(area.width, count)) as usize;
    (index < count).then_some(index)
}

impl<'a> BarChart<'a> {
    pub fn new(spec: &'a BarChartSpec) -> Self {
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
        if area.height < 3 || area.width < 4 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        let plot = rows[0];

        f.render_widget(Paragraph::new(series_legend(&self.spec.series)), rows[1]);

        let colors: Vec<Color> = self
            .spec
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| parse_color(&s.color, i))
            .collect();

        if self.spec.stacked {
            f.render_widget(
                StackedBars {
                    data: &self.spec.data,
                    segments: stack_segments(&self.spec.data, &self.spec.series),
                    colors,
                },
                plot,
            );
        } else {
            f.render_widget(self.grouped(plot.width, &colors), plot);
        }

        if let Some(pointer) = interaction.pointer.filter(|_| interaction.hovers(plot)) {
            let count = self.spec.data.len();
            let column = if self.spec.stacked {
                stacked_column_at(plot, count, pointer.x)
            } else {
                grouped_column_at(plot, count, self.spec.series.len(), pointer.x)
            };
            if let Some(index) = column {
                let record = &self.spec.data[index];
                render_tooltip(
                    f,
                    Rect::new(pointer.x, pointer.y, 1, 1),
                    &record_tooltip(record, &self.spec.series),
                );
            }
        }
    }

    fn grouped(&self, width: u16, colors: &[Color]) -> BarWidget<'a> {
        let bar_width = grouped_bar_width(width, self.spec.data.len(), self.spec.series.len());

        let mut chart = BarWidget::default()
            .direction(Direction::Vertical)
            .bar_width(bar_width)
            .bar_gap(0)
            .group_gap(GROUP_GAP);

        for record in &self.spec.data {
            let bars: Vec<Bar> = self
                .spec
                .series
                .iter()
                .zip(colors)
                .map(|(s, color)| {
                    let value = record.value(&s.field);
                    Bar::default()
                        .value(value.max(0.0).round() as u64)
                        .text_value(format_value(value))
                        .style(Style::default().fg(*color))
                        .value_style(Style::default().fg(Color::Black).bg(*color))
                })
                .collect();

            chart = chart.data(
                BarGroup::default()
                    .label(Line::from(record.name.clone()))
                    .bars(&bars),
            );
        }
        chart
    }
}

struct StackedBars<'a> {
    data: &'a [DataRecord],
    segments: Vec<Vec<Segment>>,
    colors: Vec<Color>,
}

impl Widget for StackedBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let count = self.data.len();
        if count == 0 || area.height < 2 {
            return;
        }

        let plot_height = area.height - 1;
        let label_y = area.bottom() - 1;
        let slot_width = stacked_slot_width(area.width, count);
        let bar_width = (slot_width * 2 / 3).max(1);

        let max_total = self
            .segments
            .iter()
            .filter_map(|column| column.last().map(|s| s.upper))
            .fold(0.0_f64, f64::max);
        let scale = if max_total > 0.0 { max_total } else { 1.0 };

        for (i, (record, column)) in self.data.iter().zip(&self.segments).enumerate() {
            let slot_x = area.x.saturating_add(cell_count(i).saturating_mul(slot_width));
            if slot_x >= area.right() || slot_x.saturating_add(slot_width) > area.right() {
                break;
            }
            let bar_x = slot_x + (slot_width - bar_width) / 2;

            for row in 0..plot_height {
                let level = (row as f64 + 0.5) / plot_height as f64 * scale;
                let filled = column
                    .iter()
                    .find(|s| s.upper > s.lower && level >= s.lower && level < s.upper);
                if let Some(segment) = filled {
                    let color = self.colors.get(segment.series).copied().unwrap_or(Color::Gray);
                    buf.set_string(
                        bar_x,
                        label_y - 1 - row,
                        "█".repeat(bar_width as usize),
                        Style::default().fg(color),
                    );
                }
            }

            let label: String = record.name.chars().take(slot_width as usize).collect();
            let label_x = slot_x + (slot_width.saturating_sub(label.chars().count() as u16)) / 2;
            buf.set_string(label_x, label_y, label, Style::default().fg(Color::Gray));
        }
    }
}
