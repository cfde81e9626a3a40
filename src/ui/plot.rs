use eframe::egui::{Color32, Ui};
use egui_plot::{Plot, Points};

use crate::selection::ScaleMode;
use crate::view::graph::{AxisSpec, GraphView, SeriesPoint};

// ---------------------------------------------------------------------------
// Scatter comparison (central panel)
// ---------------------------------------------------------------------------

/// Rest-of-world marker colour.
const REST_COLOR: Color32 = Color32::from_rgb(0x08, 0x78, 0xdb);
/// Highlighted-country marker colour.
const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(0xdb, 0x08, 0x08);

const MARKER_RADIUS: f32 = 6.0;

/// Render the scatter comparison. The rest series is drawn first so
/// highlighted markers sit on top; no legend is shown.
pub fn scatter_plot(ui: &mut Ui, graph: &GraphView) {
    Plot::new("indicator_scatter")
        .x_axis_label(axis_label(&graph.x_axis))
        .y_axis_label(axis_label(&graph.y_axis))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            draw_series(plot_ui, &graph.rest, graph, REST_COLOR);
            draw_series(plot_ui, &graph.highlighted, graph, HIGHLIGHT_COLOR);
        });
}

fn draw_series(
    plot_ui: &mut egui_plot::PlotUi,
    points: &[SeriesPoint],
    graph: &GraphView,
    color: Color32,
) {
    for point in points {
        let (Some(x), Some(y)) = (point.x, point.y) else {
            continue;
        };
        let (Some(x), Some(y)) = (
            scaled(x, graph.x_axis.scale),
            scaled(y, graph.y_axis.scale),
        ) else {
            continue;
        };

        // One element per marker so hovering shows its country label.
        let mut marker = Points::new(vec![[x, y]])
            .color(color)
            .radius(MARKER_RADIUS)
            .filled(true);
        if let Some(country) = &point.country {
            marker = marker.name(country);
        }
        plot_ui.points(marker);
    }
}

/// Map a value onto the axis. Log axes plot log10 of the value; non-positive
/// values have no log-scale position and are skipped.
fn scaled(value: f64, mode: ScaleMode) -> Option<f64> {
    if value.is_nan() {
        return None;
    }
    match mode {
        ScaleMode::Linear => Some(value),
        ScaleMode::Log => (value > 0.0).then(|| value.log10()),
    }
}

fn axis_label(axis: &AxisSpec) -> String {
    match axis.scale {
        ScaleMode::Linear => axis.title.clone(),
        ScaleMode::Log if axis.title.is_empty() => String::new(),
        ScaleMode::Log => format!("log10({})", axis.title),
    }
}
