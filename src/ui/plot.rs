use eframe::egui::{Color32, PointerButton, Stroke, Ui};
use egui_plot::{Line, LineStyle, Plot, PlotPoints, Polygon};

use linemarker::data::codec;
use linemarker::Spectrum;

use crate::state::{AppState, DragSelection};

/// Spectrum line colour.
const SPECTRUM_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
/// Drags shorter than this (screen points) are ignored.
const MIN_DRAG_SPAN: f32 = 5.0;

// ---------------------------------------------------------------------------
// Spectral plot (central panel)
// ---------------------------------------------------------------------------

/// Render the spectrum, the selected windows and the baseline, and turn
/// primary/secondary drags into select/deselect gestures.
pub fn spectral_plot(ui: &mut Ui, state: &mut AppState) {
    let spectrum = match &state.spectrum {
        Some(sp) => sp,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a spectrum to mark line-free channels  (File → Open spectrum…)");
            });
            return;
        }
    };

    let (y_lo, y_hi) = padded_intensity_range(spectrum);
    let shade = Color32::from_rgba_unmultiplied(128, 128, 128, 100);

    let plot_response = Plot::new("spectral_plot")
        .x_axis_label("Frequency (MHz)")
        .y_axis_label("Intensity")
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .allow_scroll(false)
        .allow_zoom(true)
        .allow_double_click_reset(true)
        .show(ui, |plot_ui| {
            let points: PlotPoints = spectrum
                .frequencies()
                .iter()
                .zip(spectrum.intensities())
                .map(|(&x, &y)| [x, y])
                .collect();
            plot_ui.line(Line::new(points).name("spectrum").color(SPECTRUM_COLOR).width(1.5));

            if let Some(mask) = state.history.current() {
                for iv in codec::intervals(mask, spectrum) {
                    plot_ui.polygon(
                        Polygon::new(band(iv.start_freq, iv.end_freq, y_lo, y_hi))
                            .fill_color(shade)
                            .stroke(Stroke::NONE),
                    );
                }
            }

            if let Some(baseline) = &state.baseline {
                let points: PlotPoints = spectrum
                    .frequencies()
                    .iter()
                    .zip(baseline.curve.iter())
                    .map(|(&x, &y)| [x, y])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(format!("baseline (order {})", baseline.order))
                        .color(Color32::from_rgba_unmultiplied(255, 0, 0, 90))
                        .style(LineStyle::dashed_loose())
                        .width(1.5),
                );
            }

            if let (Some(drag), Some(pointer)) = (&state.drag, plot_ui.pointer_coordinate()) {
                let tint = if drag.additive {
                    Color32::from_rgba_unmultiplied(60, 160, 60, 60)
                } else {
                    Color32::from_rgba_unmultiplied(200, 60, 60, 60)
                };
                plot_ui.polygon(Polygon::new(band(drag.start, pointer.x, y_lo, y_hi)).fill_color(tint));
            }
        });

    // ---- Gestures ----
    let response = &plot_response.response;
    let transform = &plot_response.transform;

    for (button, additive) in [(PointerButton::Primary, true), (PointerButton::Secondary, false)] {
        if response.drag_started_by(button) {
            if let Some(pos) = response.interact_pointer_pos() {
                state.drag = Some(DragSelection {
                    start: transform.value_from_position(pos).x,
                    start_screen: pos.x,
                    additive,
                });
            }
        }
    }

    if response.drag_stopped() {
        let release = response
            .interact_pointer_pos()
            .or_else(|| ui.input(|i| i.pointer.latest_pos()));
        if let (Some(drag), Some(pos)) = (state.drag.take(), release) {
            if (pos.x - drag.start_screen).abs() >= MIN_DRAG_SPAN {
                let end = transform.value_from_position(pos).x;
                state.select_range(drag.start, end, drag.additive);
            }
        }
    }
}

/// Intensity range with 2% head-room on both sides.
fn padded_intensity_range(spectrum: &Spectrum) -> (f64, f64) {
    let (lo, hi) = spectrum.intensity_range();
    let pad = ((hi - lo) * 0.02).max(f64::EPSILON);
    (lo - pad, hi + pad)
}

/// Corners of a full-height band between two frequencies.
fn band(x0: f64, x1: f64, y_lo: f64, y_hi: f64) -> Vec<[f64; 2]> {
    vec![[x0, y_lo], [x1, y_lo], [x1, y_hi], [x0, y_hi]]
}
