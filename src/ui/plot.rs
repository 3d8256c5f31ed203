use std::ops::RangeInclusive;

use eframe::egui::{Color32, Frame, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::chart::{BarLayout, ChartSpec};
use crate::color::{PANEL_BACKGROUND, to_color32};
use crate::state::ChartResult;

// ---------------------------------------------------------------------------
// Bar charts (central panel)
// ---------------------------------------------------------------------------

const CHART_HEIGHT: f32 = 320.0;
/// Share of a category slot covered by its bars.
const SLOT_FILL: f64 = 0.8;

/// Render one chart region: subheader, then the bars or the error message.
pub fn chart_section(ui: &mut Ui, id: &str, chart: &ChartResult) {
    let spec = match chart {
        Ok(spec) => spec,
        Err(msg) => {
            ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
            return;
        }
    };

    ui.heading(&spec.title);
    if spec.is_empty() {
        ui.label("Nothing selected.");
    }
    bar_plot(ui, id, spec);
}

/// Draw a [`ChartSpec`] with categories at x = 0, 1, 2, …
pub fn bar_plot(ui: &mut Ui, id: &str, spec: &ChartSpec) {
    let labels = spec.categories.clone();
    let charts = bar_charts(spec);

    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(spec.x_label.as_str())
        .y_axis_label(spec.y_label.as_str())
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_y(0.0);
    if spec.show_legend() {
        plot = plot.legend(Legend::default());
    }

    let frame = Frame::default().fill(PANEL_BACKGROUND);
    frame.show(ui, |ui: &mut Ui| {
        plot.show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
    });
}

/// One `BarChart` per series, offset side by side for grouped layouts.
fn bar_charts(spec: &ChartSpec) -> Vec<BarChart> {
    let n_series = spec.series.len().max(1);
    let (width, offsets): (f64, Vec<f64>) = match spec.layout {
        BarLayout::Single => (SLOT_FILL, vec![0.0; n_series]),
        BarLayout::Grouped => {
            let width = SLOT_FILL / n_series as f64;
            let offsets = (0..n_series)
                .map(|i| (i as f64 + 0.5) * width - SLOT_FILL / 2.0)
                .collect();
            (width, offsets)
        }
    };

    spec.series
        .iter()
        .zip(offsets)
        .map(|(series, offset)| {
            let color = to_color32(series.color);
            let bars = series
                .values
                .iter()
                .zip(&spec.categories)
                .enumerate()
                .filter_map(|(i, (value, category))| {
                    let value = (*value)?;
                    Some(
                        Bar::new(i as f64 + offset, value)
                            .width(width)
                            .fill(color)
                            .name(category),
                    )
                })
                .collect();
            BarChart::new(bars).name(&series.name).color(color)
        })
        .collect()
}

/// Axis text for a grid mark: the category at integer positions, nothing
/// between them.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_only_at_category_positions() {
        let labels = vec!["China".to_string(), "India".to_string()];
        assert_eq!(category_label(&labels, 0.0), "China");
        assert_eq!(category_label(&labels, 1.0000001), "India");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 2.0), "");
    }
}
