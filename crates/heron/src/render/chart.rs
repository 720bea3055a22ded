//! Terminal rendition of chart descriptors.

use crate::models::chart::{ChartDescriptor, ChartPoint};

/// Widest bar drawn for the largest value in a bar chart.
const BAR_WIDTH: usize = 24;

/// Render a chart descriptor to text, or nothing for a type this client
/// does not recognize.
pub fn render_chart(chart: &ChartDescriptor) -> Option<String> {
    match chart {
        ChartDescriptor::Bar { data } => Some(render_bar(data)),
        ChartDescriptor::Pie { data } => Some(render_pie(data)),
        ChartDescriptor::Unrecognized => None,
    }
}

/// Horizontal bars scaled against the largest value.
fn render_bar(data: &[ChartPoint]) -> String {
    let max = data.iter().map(|p| p.value).fold(0.0, f64::max);
    let label_width = label_width(data);

    data.iter()
        .map(|point| {
            let filled = if max > 0.0 {
                ((point.value / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            format!(
                "{:>width$} │{:<bar$} {}",
                point.name,
                "█".repeat(filled),
                point.value,
                width = label_width,
                bar = BAR_WIDTH
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Share breakdown with integer percentages, one line per slice.
fn render_pie(data: &[ChartPoint]) -> String {
    let total: f64 = data.iter().map(|p| p.value).sum();
    let label_width = label_width(data);

    data.iter()
        .map(|point| {
            let percent = if total > 0.0 {
                point.value / total * 100.0
            } else {
                0.0
            };
            format!(
                "{:>width$} {:>3.0}%",
                point.name,
                percent,
                width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn label_width(data: &[ChartPoint]) -> usize {
    data.iter().map(|p| p.name.chars().count()).max().unwrap_or(0)
}
