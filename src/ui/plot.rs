use eframe::egui::{Align2, Ui};
use egui_plot::{Bar, BarChart, Legend, MarkerShape, Plot, PlotPoint, Points, Text};
use microcar_compare::ResultSet;

use crate::color::{self, car_label};
use crate::state::AppState;

const BAR_WIDTH: f64 = 0.3;

// ---------------------------------------------------------------------------
// Central panel: distance bars above two position scatters
// ---------------------------------------------------------------------------

/// Render the comparison charts in the central panel.
pub fn comparison_plots(ui: &mut Ui, state: &AppState) {
    let results = match &state.results {
        Some(rs) => rs,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a batch manifest to compare cars  (File → Open manifest…)");
            });
            return;
        }
    };

    let half = ui.available_height() * 0.5;
    distance_chart(ui, results, half);

    let bounds = PositionBounds::from_results(results);
    ui.columns(2, |cols: &mut [Ui]| {
        position_plot(
            &mut cols[0],
            state,
            "Expected Final Position",
            &results.expected_positions(),
            MarkerShape::Circle,
            bounds,
        );
        position_plot(
            &mut cols[1],
            state,
            "Actual Final Position",
            &results.actual_positions(),
            MarkerShape::Diamond,
            bounds,
        );
    });
}

/// Expected and actual distance per car, side by side.
fn distance_chart(ui: &mut Ui, results: &ResultSet, height: f32) {
    let bars = |values: &[f64], offset: f64| -> Vec<Bar> {
        values
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                Bar::new(i as f64 + offset, d)
                    .width(BAR_WIDTH)
                    .name(car_label(i))
            })
            .collect()
    };

    let expected = BarChart::new(bars(results.expected_distance(), -BAR_WIDTH / 2.0))
        .name("Expected")
        .color(color::EXPECTED);
    let actual = BarChart::new(bars(results.actual_distance(), BAR_WIDTH / 2.0))
        .name("Actual")
        .color(color::ACTUAL);

    Plot::new("distance_chart")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Car")
        .y_axis_label("Distance (m)")
        .include_y(0.0)
        .include_y(distance_ceiling(results))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(expected);
            plot_ui.bar_chart(actual);

            for (values, offset, tint) in [
                (results.expected_distance(), -BAR_WIDTH / 2.0, color::EXPECTED),
                (results.actual_distance(), BAR_WIDTH / 2.0, color::ACTUAL),
            ] {
                for (i, &d) in values.iter().enumerate() {
                    plot_ui.text(
                        Text::new(PlotPoint::new(i as f64 + offset, d), format!("{d:.2}"))
                            .anchor(Align2::CENTER_BOTTOM)
                            .color(tint),
                    );
                }
            }
        });
}

/// Top of the distance axis: headroom of a quarter above the tallest bar.
pub fn distance_ceiling(results: &ResultSet) -> f64 {
    let (_, hi) = min_max(results.expected_distance());
    let (_, hi_actual) = min_max(results.actual_distance());
    1.25 * hi.max(hi_actual).max(0.0)
}

/// One marker per car at its final `[h, v]` position.
fn position_plot(
    ui: &mut Ui,
    state: &AppState,
    title: &str,
    positions: &[[f64; 2]],
    shape: MarkerShape,
    bounds: PositionBounds,
) {
    ui.strong(title);
    Plot::new(title)
        .legend(Legend::default())
        .data_aspect(1.0)
        .x_axis_label("X (m)")
        .y_axis_label("Y (m)")
        .include_x(bounds.left)
        .include_x(bounds.right)
        .include_y(bounds.bottom)
        .include_y(bounds.top)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for (i, &point) in positions.iter().enumerate() {
                plot_ui.points(
                    Points::new(vec![point])
                        .name(car_label(i))
                        .shape(shape)
                        .filled(true)
                        .radius(5.0)
                        .color(state.car_color(i)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Shared square viewport
// ---------------------------------------------------------------------------

/// Square region shared by both position plots so they are comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl PositionBounds {
    /// Centre on the midpoint of both position clouds with a half-width of
    /// 1.2× the widest spread.
    pub fn from_results(results: &ResultSet) -> Self {
        let spread = |v: &[f64]| {
            let (lo, hi) = min_max(v);
            (hi - lo).abs()
        };
        let mid = |v: &[f64]| {
            let (lo, hi) = min_max(v);
            (lo + hi) / 2.0
        };

        let radius = (1.2
            * [
                spread(results.actual_horizontal()),
                spread(results.actual_vertical()),
                spread(results.expected_horizontal()),
                spread(results.expected_vertical()),
            ]
            .into_iter()
            .fold(0.0, f64::max))
        .floor()
        .max(1.0);

        let centre_v = ((mid(results.actual_vertical()) + mid(results.expected_vertical())) / 2.0).floor();
        let centre_h =
            ((mid(results.actual_horizontal()) + mid(results.expected_horizontal())) / 2.0).floor();

        let top = centre_v + radius;
        let right = centre_h + radius;
        Self {
            left: right - 2.0 * radius,
            right,
            bottom: top - 2.0 * radius,
            top,
        }
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
