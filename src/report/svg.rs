use crate::core::{Chart, ChartKind, format_amount};

use super::escape_html;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 70.0;
const GRID_LINES: usize = 4;

/// Vertical value range covering every point and zero.
fn value_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(0.0_f64, f64::min);
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max - min < f64::EPSILON {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

struct Plot {
    min: f64,
    max: f64,
}

impl Plot {
    fn chart_width(&self) -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn chart_height(&self) -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn y(&self, value: f64) -> f64 {
        MARGIN_TOP + (self.max - value) / (self.max - self.min) * self.chart_height()
    }
}

/// Renders a chart as a self-contained SVG fragment.
pub fn render_chart_svg(chart: &Chart) -> String {
    let (min, max) = value_range(&chart.values);
    let plot = Plot { min, max };
    let slot = plot.chart_width() / chart.values.len().max(1) as f64;
    let baseline = MARGIN_TOP + plot.chart_height();

    let mut grid = String::new();
    for step in 0..=GRID_LINES {
        let value = min + (max - min) * step as f64 / GRID_LINES as f64;
        let y = plot.y(value);
        grid.push_str(&format!(
            r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="#e5e7eb" stroke-width="1"/><text x="{tx}" y="{ty:.1}" text-anchor="end" font-size="11" fill="#6b7280">{label}</text>"##,
            x2 = WIDTH - MARGIN_RIGHT,
            tx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
            label = format_amount(value),
        ));
    }

    let mut marks = String::new();
    match chart.kind {
        ChartKind::Bar => {
            let zero = plot.y(0.0);
            for (idx, value) in chart.values.iter().enumerate() {
                let x = MARGIN_LEFT + idx as f64 * slot + slot * 0.15;
                let y = plot.y(*value);
                let (top, height) = if y <= zero { (y, zero - y) } else { (zero, y - zero) };
                marks.push_str(&format!(
                    r##"<rect x="{x:.1}" y="{top:.1}" width="{w:.1}" height="{height:.1}" fill="{color}" opacity="0.85"><title>{tip}</title></rect>"##,
                    w = slot * 0.7,
                    color = chart.color,
                    tip = format_amount(*value),
                ));
            }
        }
        ChartKind::Line => {
            let points = chart
                .values
                .iter()
                .enumerate()
                .map(|(idx, value)| {
                    (
                        MARGIN_LEFT + idx as f64 * slot + slot / 2.0,
                        plot.y(*value),
                    )
                })
                .collect::<Vec<_>>();
            let path = points
                .iter()
                .map(|(x, y)| format!("{x:.1},{y:.1}"))
                .collect::<Vec<_>>()
                .join(" ");
            marks.push_str(&format!(
                r##"<polyline points="{path}" fill="none" stroke="{color}" stroke-width="2"/>"##,
                color = chart.color,
            ));
            for ((x, y), value) in points.iter().zip(&chart.values) {
                marks.push_str(&format!(
                    r##"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="{color}"><title>{tip}</title></circle>"##,
                    color = chart.color,
                    tip = format_amount(*value),
                ));
            }
        }
    }

    let mut x_labels = String::new();
    for (idx, label) in chart.labels.iter().enumerate() {
        x_labels.push_str(&format!(
            r##"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-size="11" fill="#374151">{text}</text>"##,
            x = MARGIN_LEFT + idx as f64 * slot + slot / 2.0,
            y = baseline + 18.0,
            text = escape_html(label),
        ));
    }

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" class="chart" data-chart="{id}" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" style="background:white; border-radius:8px">
  <text x="{cx}" y="24" text-anchor="middle" font-size="15" font-weight="600" fill="#111827">{title}</text>
  {grid}
  <line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{baseline:.1}" stroke="#9ca3af" stroke-width="1"/>
  {marks}
  {x_labels}
  <text x="{cx}" y="{xly}" text-anchor="middle" font-size="12" fill="#6b7280">{x_label}</text>
  <text x="16" y="{cy}" text-anchor="middle" font-size="12" fill="#6b7280" transform="rotate(-90, 16, {cy})">{y_label}</text>
</svg>"##,
        id = chart.id,
        cx = WIDTH / 2.0,
        cy = HEIGHT / 2.0,
        xly = HEIGHT - 16.0,
        title = escape_html(chart.title),
        x_label = escape_html(chart.x_label),
        y_label = escape_html(chart.y_label),
    )
}
