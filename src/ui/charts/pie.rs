use std::f64::consts::TAU;

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Paragraph,
    },
    Frame,
};

use crate::models::PieChartSpec;
use crate::ui::chart_card::ChartCard;
use crate::ui::components::{format_value, parse_color, palette_color, render_tooltip, Interaction};

/// Radial chart: one slice per record, sized by its share of the total
pub struct PieChart<'a> {
    spec: &'a PieChartSpec,
}

/// Each value as a percentage of the sum. An all-zero data set yields zeros.
pub fn slice_percentages(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v * 100.0 / total).collect()
}

/// Slice label, whole percent: `A 30%`
pub fn slice_label(name: &str, percentage: f64) -> String {
    format!("{} {:.0}%", name, percentage)
}

/// Slice tooltip, value plus one-decimal percent: `30 (30.0%)`
pub fn slice_tooltip(value: f64, percentage: f64) -> String {
    format!("{} ({:.1}%)", format_value(value), percentage)
}

/// Fraction of a full turn, clockwise from twelve o'clock, for a point relative to the center
pub fn turn_fraction(dx: f64, dy: f64) -> f64 {
    (dx.atan2(dy) / TAU).rem_euclid(1.0)
}

/// The slice covering `fraction` of the turn
pub fn slice_at(percentages: &[f64], fraction: f64) -> Option<usize> {
    let target = fraction * 100.0;
    let mut upper = 0.0;
    for (i, pct) in percentages.iter().enumerate() {
        upper += pct;
        if *pct > 0.0 && target < upper {
            return Some(i);
        }
    }
    None
}

/// Largest area with a 2:1 cell ratio, centered, so the pie draws round
fn pie_area(area: Rect) -> Rect {
    let width = area.width.min(area.height * 2);
    let height = (width / 2).max(1).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Map a terminal cell inside `pie` to unit-circle coordinates
fn unit_coordinates(pie: Rect, pointer: Position) -> (f64, f64) {
    let dx = ((pointer.x - pie.x) as f64 + 0.5) / pie.width as f64 * 2.0 - 1.0;
    let dy = 1.0 - ((pointer.y - pie.y) as f64 + 0.5) / pie.height as f64 * 2.0;
    (dx, dy)
}

impl<'a> PieChart<'a> {
    pub fn new(spec: &'a PieChartSpec) -> Self {
        Self { spec }
    }

    fn values(&self) -> Vec<f64> {
        self.spec
            .data
            .iter()
            .map(|record| record.value(&self.spec.value_field))
            .collect()
    }

    fn color(&self, index: usize) -> Color {
        match self.spec.colors.get(index % self.spec.colors.len().max(1)) {
            Some(color) => parse_color(color, index),
            None => palette_color(index),
        }
    }

    /// Tooltip lines for slice `index`
    pub fn tooltip_lines(&self, index: usize) -> Vec<String> {
        let values = self.values();
        let percentages = slice_percentages(&values);
        vec![
            self.spec.data[index].name.clone(),
            slice_tooltip(values[index], percentages[index]),
        ]
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
        if self.spec.data.is_empty() || area.height < 2 || area.width < 6 {
            return;
        }

        let values = self.values();
        let percentages = slice_percentages(&values);

        let legend: Vec<Line> = self
            .spec
            .data
            .iter()
            .zip(&percentages)
            .enumerate()
            .map(|(i, (record, pct))| {
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(self.color(i))),
                    Span::raw(slice_label(&record.name, *pct)),
                ])
            })
            .collect();
        let legend_width = legend.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 2;

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(legend_width)])
            .split(area);
        let pie = pie_area(columns[0]);
        let legend_area = columns[1];

        let slices = self.slice_points(pie, &percentages);
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0])
            .paint(|ctx| {
                for (i, coords) in slices.iter().enumerate() {
                    ctx.draw(&Points {
                        coords: coords.as_slice(),
                        color: self.color(i),
                    });
                }
            });
        f.render_widget(canvas, pie);
        f.render_widget(Paragraph::new(legend), legend_area);

        let Some(pointer) = interaction.pointer else {
            return;
        };

        let hovered = if pie.contains(pointer) {
            let (dx, dy) = unit_coordinates(pie, pointer);
            if dx * dx + dy * dy <= 1.0 {
                slice_at(&percentages, turn_fraction(dx, dy))
            } else {
                None
            }
        } else if legend_area.contains(pointer) {
            let row = (pointer.y - legend_area.y) as usize;
            (row < self.spec.data.len()).then_some(row)
        } else {
            None
        };

        if let Some(index) = hovered {
            render_tooltip(f, Rect::new(pointer.x, pointer.y, 1, 1), &self.tooltip_lines(index));
        }
    }

    /// Braille dot coordinates for every slice at the resolution of `pie`
    fn slice_points(&self, pie: Rect, percentages: &[f64]) -> Vec<Vec<(f64, f64)>> {
        let mut slices = vec![Vec::new(); percentages.len()];
        let dots_x = pie.width as usize * 2;
        let dots_y = pie.height as usize * 4;

        for j in 0..dots_y {
            let y = 1.0 - (j as f64 + 0.5) / dots_y as f64 * 2.0;
            for i in 0..dots_x {
                let x = (i as f64 + 0.5) / dots_x as f64 * 2.0 - 1.0;
                if x * x + y * y > 1.0 {
                    continue;
                }
                if let Some(slice) = slice_at(percentages, turn_fraction(x, y)) {
                    slices[slice].push((x, y));
                }
            }
        }
        slices
    }
}
