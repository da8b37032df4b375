use eframe::egui;

use crate::snapshot::save_snapshot;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LinemarkerApp {
    pub state: AppState,
    /// A screenshot command is in flight.
    snapshot_requested: bool,
}

impl LinemarkerApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            snapshot_requested: false,
        }
    }

    /// Write the snapshot queued by the last save once egui delivers the
    /// screenshot; request one if none is in flight.
    fn handle_snapshot(&mut self, ctx: &egui::Context) {
        let Some(path) = self.state.pending_snapshot.clone() else {
            return;
        };

        let shot = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });

        match shot {
            Some(image) => {
                self.state.pending_snapshot = None;
                self.snapshot_requested = false;
                match save_snapshot(&path, &image) {
                    Ok(()) => log::info!("Snapshot saved to {}", path.display()),
                    Err(e) => self.state.report(e),
                }
            }
            None if !self.snapshot_requested => {
                self.snapshot_requested = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
                ctx.request_repaint();
            }
            None => {}
        }
    }
}

impl eframe::App for LinemarkerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: windows, fit, navigator ----
        egui::SidePanel::left("control_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::spectral_plot(ui, &mut self.state);
        });

        panels::confirm_window(ctx, &mut self.state);
        self.handle_snapshot(ctx);
    }
}
