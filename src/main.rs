mod app;
mod snapshot;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use app::LinemarkerApp;
use clap::Parser;
use eframe::egui;
use linemarker::config::Settings;
use state::AppState;

/// Settings file picked up from the working directory when `--config` is
/// not given.
const DEFAULT_CONFIG: &str = "linemarker.json";

#[derive(Parser, Debug)]
#[command(name = "linemarker", version, about = "Mark line-free channels of a spectrum")]
struct Cli {
    /// Spectrum to open at startup (two columns: frequency, intensity).
    spectrum: Option<PathBuf>,

    /// Frequency ranges file applied to the startup spectrum.
    #[arg(short, long)]
    windows: Option<PathBuf>,

    /// Settings file (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_or_default(path),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Settings::load_or_default(Path::new(DEFAULT_CONFIG))
        }
        None => Settings::default(),
    };
    let state = initial_state(settings, &cli);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 700.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Line Marker",
        options,
        Box::new(|_cc| Ok(Box::new(LinemarkerApp::new(state)))),
    )
}

/// Open the files named on the command line.  Failures land in the status
/// bar instead of aborting start-up.
fn initial_state(settings: Settings, cli: &Cli) -> AppState {
    let mut state = AppState::new(settings);
    if let Some(path) = &cli.spectrum {
        if let Err(e) = state.open_spectrum(path) {
            state.report(e);
            return state;
        }
        if let Some(windows) = &cli.windows {
            if let Err(e) = state.open_intervals(windows) {
                state.report(e);
            }
        }
    }
    state
}
