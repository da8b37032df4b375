use std::path::PathBuf;

use eframe::egui::{self, Color32, Context, RichText, ScrollArea, Ui};

use linemarker::config::SaveMode;

use crate::state::{AppState, Confirm, Navigate};
use crate::ui::toggle::toggle_switch;

// ---------------------------------------------------------------------------
// Left side panel – windows, fit and navigator
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Line-free frequency ranges");
    ui.separator();

    if state.spectrum.is_none() {
        ui.label("No spectrum loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Interval text ----
            ui.add(
                egui::TextEdit::multiline(&mut state.interval_text)
                    .code_editor()
                    .desired_rows(8)
                    .desired_width(f32::INFINITY),
            );
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("Apply text").clicked() {
                    let text = state.interval_text.clone();
                    if let Err(e) = state.apply_interval_text(&text) {
                        state.status_message = Some(format!("Error: {e}"));
                    }
                }
                if ui.small_button("Copy").clicked() {
                    ui.ctx().copy_text(state.current_interval_text());
                }
                if let Some(mask) = state.current_mask() {
                    ui.label(format!("{} channels selected", mask.count_selected()));
                }
            });
            ui.separator();

            // ---- Fit order ----
            ui.strong("Fit order");
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.fit_order_text)
                    .hint_text("off")
                    .desired_width(80.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                let text = state.fit_order_text.clone();
                state.set_fit_order_text(&text);
            }
            if let Some(reason) = &state.fit_status {
                ui.label(RichText::new(reason.to_string()).color(Color32::DARK_RED));
            }
            ui.separator();

            // ---- Navigator ----
            ui.strong("Freq windows navigator");
            ui.horizontal(|ui: &mut Ui| {
                for (label, direction) in [
                    ("<<", Navigate::First),
                    ("<", Navigate::Previous),
                    (">", Navigate::Next),
                    (">>", Navigate::Last),
                ] {
                    if ui.button(label).clicked() {
                        state.navigate(direction);
                    }
                }
            });
            if let Some(cursor) = state.history.cursor() {
                ui.label(format!("step {} of {}", cursor + 1, state.history.len()));
            }
            if ui.button("Delete all").clicked() && state.current_mask().is_some() {
                state.confirm = Some(Confirm::DeleteAll);
            }
            ui.separator();

            // ---- Save mode ----
            ui.horizontal(|ui: &mut Ui| {
                let mut strict = state.save_mode == SaveMode::Strict;
                if toggle_switch(ui, &mut strict).changed() {
                    state.save_mode = if strict {
                        SaveMode::Strict
                    } else {
                        SaveMode::Loose
                    };
                }
                ui.label(if strict { "strict case" } else { "loose case" });
            });
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Save as…").clicked() {
                    save_as_dialog(state);
                }
                if ui.button("Save default").clicked() {
                    save_default(state);
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open spectrum…").clicked() {
                open_spectrum_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open freq ranges…").clicked() {
                open_intervals_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Save as…").clicked() {
                save_as_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save default").clicked() {
                save_default(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(sp) = &state.spectrum {
            let (lo, hi) = sp.frequency_range();
            ui.label(format!("{} channels, {lo:.4} – {hi:.4}", sp.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Confirmation windows
// ---------------------------------------------------------------------------

/// Show the pending yes/no question, if any.
pub fn confirm_window(ctx: &Context, state: &mut AppState) {
    let Some(confirm) = state.confirm.clone() else {
        return;
    };
    let question = match &confirm {
        Confirm::DeleteAll => "Delete all windows irrevocably?".to_string(),
        Confirm::Overwrite(path) => format!("File '{}' exists, overwrite it?", path.display()),
    };

    let mut answer = None;
    egui::Window::new("Warning")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(question);
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Yes").clicked() {
                    answer = Some(true);
                }
                if ui.button("No").clicked() {
                    answer = Some(false);
                }
            });
        });

    match answer {
        Some(true) => {
            state.confirm = None;
            match confirm {
                Confirm::DeleteAll => state.delete_all(),
                Confirm::Overwrite(path) => save_to(state, path),
            }
        }
        Some(false) => state.confirm = None,
        None => {}
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn dialog(state: &AppState, title: &str) -> rfd::FileDialog {
    let dialog = rfd::FileDialog::new().set_title(title);
    match &state.default_dir {
        Some(dir) => dialog.set_directory(dir),
        None => dialog,
    }
}

pub fn open_spectrum_dialog(state: &mut AppState) {
    let file = dialog(state, "Open a spectrum file")
        .add_filter("Spectra", &["tsv", "csv", "txt", "dat"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open_spectrum(&path) {
            state.report(e);
        }
    }
}

pub fn open_intervals_dialog(state: &mut AppState) {
    let file = dialog(state, "Open freq ranges file")
        .add_filter("Text files", &["txt"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open_intervals(&path) {
            state.report(e);
        }
    }
}

pub fn save_as_dialog(state: &mut AppState) {
    if state.current_mask().is_none() {
        return;
    }
    let file = dialog(state, "Save freq ranges")
        .add_filter("Text files", &["txt"])
        .set_file_name(
            state
                .default_save_path()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .unwrap_or_else(|| "winstr.txt".to_string()),
        )
        .save_file();

    if let Some(path) = file {
        save_to(state, path);
    }
}

/// Save next to the spectrum, asking before overwriting.
pub fn save_default(state: &mut AppState) {
    if state.current_mask().is_none() {
        return;
    }
    let Some(path) = state.default_save_path() else {
        return;
    };
    if path.exists() {
        state.confirm = Some(Confirm::Overwrite(path));
    } else {
        save_to(state, path);
    }
}

fn save_to(state: &mut AppState, path: PathBuf) {
    match state.save_to(&path) {
        Ok(true) => {
            state.status_message = Some(format!("Windows saved to '{}'", path.display()));
        }
        Ok(false) => {}
        Err(e) => state.report(e),
    }
}
