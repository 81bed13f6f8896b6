use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use trace_panda::plot::{X_AXIS_LABEL, Y_AXIS_LABEL};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Trace plot (central panel)
// ---------------------------------------------------------------------------

/// Render every visible trace as a line over its sample index.
pub fn trace_plot(ui: &mut Ui, state: &AppState) {
    if state.traces.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No traces to show  (File → Open folder…)");
        });
        return;
    }

    let color_map = &state.color_map;

    Plot::new("trace_plot")
        .legend(Legend::default())
        .x_axis_label(X_AXIS_LABEL)
        .y_axis_label(Y_AXIS_LABEL)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for &idx in &state.visible_indices {
                let tr = &state.traces[idx];

                let color = color_map
                    .as_ref()
                    .map(|cm| cm.color_for(&tr.key.field(cm.dimension)))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let points: PlotPoints = if state.minmax_scaling {
                    scaled_points(tr.trace.samples()).into()
                } else {
                    tr.points().into()
                };

                let line = Line::new(points)
                    .name(&tr.label)
                    .color(color)
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}

/// Min-max scale samples into [0, 1]; a flat trace maps to 0.
fn scaled_points(samples: &[f64]) -> Vec<[f64; 2]> {
    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    samples
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let scaled = if range.abs() < f64::EPSILON {
                0.0
            } else {
                (y - min) / range
            };
            [i as f64, scaled]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_maps_to_unit_range() {
        let points = scaled_points(&[-90.0, -80.0, -85.0]);
        assert_eq!(points, vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.5]]);
    }

    #[test]
    fn flat_trace_scales_to_zero() {
        let points = scaled_points(&[-70.0, -70.0]);
        assert_eq!(points, vec![[0.0, 0.0], [1.0, 0.0]]);
    }
}
