use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use linemarker::config::{SaveMode, Settings};
use linemarker::data::{codec, loader};
use linemarker::{
    fit_baseline, Baseline, EditHistory, FitError, FitOrder, Mask, ParseError, Spectrum, Step,
};

// ---------------------------------------------------------------------------
// Navigator and pending UI interactions
// ---------------------------------------------------------------------------

/// Buttons of the history navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigate {
    Previous,
    Next,
    First,
    Last,
}

/// A question waiting for a yes/no answer in a modal window.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirm {
    DeleteAll,
    Overwrite(PathBuf),
}

/// A drag on the plot that has started but not yet been released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSelection {
    /// Plot x (frequency) where the drag started.
    pub start: f64,
    /// Screen x where the drag started, for the minimum span check.
    pub start_screen: f32,
    /// Select (primary button) or deselect (secondary button).
    pub additive: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Loaded spectrum (None until user loads a file).
    pub spectrum: Option<Spectrum>,

    /// Mask snapshots; the current mask is the history's cursor entry.
    pub history: EditHistory,

    pub fit_order: FitOrder,
    /// Text buffer behind the order box.
    pub fit_order_text: String,

    /// Baseline for the current mask, or why there is none.
    pub baseline: Option<Baseline>,
    pub fit_status: Option<FitError>,

    /// Text buffer behind the interval box.
    pub interval_text: String,

    pub save_mode: SaveMode,

    /// Directory and stem of the loaded spectrum, for "save default".
    pub default_dir: Option<PathBuf>,
    pub file_stem: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Snapshot image to write once the next screenshot arrives.
    pub pending_snapshot: Option<PathBuf>,

    pub confirm: Option<Confirm>,
    pub drag: Option<DragSelection>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let fit_order = FitOrder::from_option(settings.fit_order);
        Self {
            history: EditHistory::with_capacity(settings.history_capacity),
            fit_order,
            fit_order_text: fit_order.as_option().map(|n| n.to_string()).unwrap_or_default(),
            save_mode: settings.save_mode,
            settings,
            spectrum: None,
            baseline: None,
            fit_status: None,
            interval_text: String::new(),
            default_dir: None,
            file_stem: None,
            status_message: None,
            pending_snapshot: None,
            confirm: None,
            drag: None,
        }
    }

    pub fn current_mask(&self) -> Option<&Mask> {
        self.history.current()
    }

    /// Ingest a newly loaded spectrum.  Masks of the previous spectrum are
    /// meaningless against it, so the history is dropped.
    pub fn set_spectrum(&mut self, spectrum: Spectrum, source: Option<&Path>) {
        self.history.clear();
        self.spectrum = Some(spectrum);
        self.default_dir = source.and_then(Path::parent).map(Path::to_path_buf);
        self.file_stem = source
            .and_then(Path::file_stem)
            .and_then(|s| s.to_str())
            .map(str::to_string);
        self.status_message = None;
        self.drag = None;
        self.refresh();
    }

    /// Load a spectrum file, keeping the current session if it fails.
    pub fn open_spectrum(&mut self, path: &Path) -> Result<()> {
        let spectrum = loader::load_file(path, self.settings.frequency_scale)?;
        log::info!("Loaded {} channels from {}", spectrum.len(), path.display());
        self.set_spectrum(spectrum, Some(path));
        Ok(())
    }

    /// Apply one select (`additive`) or deselect gesture over `lo..hi`.
    /// Returns false when there is no spectrum to select on.
    pub fn select_range(&mut self, lo: f64, hi: f64, additive: bool) -> bool {
        let Some(spectrum) = &self.spectrum else {
            log::debug!("selection ignored, no spectrum loaded");
            return false;
        };
        let base = self
            .history
            .current()
            .cloned()
            .unwrap_or_else(|| Mask::empty(spectrum.len()));
        let next = base.apply_selection(spectrum, lo, hi, additive);
        self.history.push(next);
        self.refresh();
        true
    }

    pub fn navigate(&mut self, direction: Navigate) -> Step {
        let step = match direction {
            Navigate::Previous => self.history.undo(),
            Navigate::Next => self.history.redo(),
            Navigate::First => self.history.first(),
            Navigate::Last => self.history.last(),
        };
        if step == Step::Unchanged {
            log::debug!("{direction:?} has no effect");
        } else {
            self.refresh();
        }
        step
    }

    /// Forget every selection.  Callers confirm with the user first.
    pub fn delete_all(&mut self) {
        self.history.clear();
        self.refresh();
        log::info!("All windows deleted");
    }

    /// Parse interval text and push it as a new edit.  On error nothing
    /// changes.  Without a spectrum the text is ignored.
    pub fn apply_interval_text(&mut self, text: &str) -> Result<bool, ParseError> {
        let Some(spectrum) = &self.spectrum else {
            return Ok(false);
        };
        let mask = codec::decode(text, spectrum)?;
        self.history.push(mask);
        self.refresh();
        Ok(true)
    }

    /// Read an interval file and apply it.
    pub fn open_intervals(&mut self, path: &Path) -> Result<()> {
        if self.spectrum.is_none() {
            bail!("load a spectrum before opening frequency ranges");
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        self.apply_interval_text(&text)
            .with_context(|| format!("can not parse window file {}", path.display()))?;
        log::info!("Applied windows from {}", path.display());
        Ok(())
    }

    /// Parse the order box.  Unrecognised text keeps the previous order.
    pub fn set_fit_order_text(&mut self, text: &str) -> bool {
        match text.parse::<FitOrder>() {
            Ok(order) => {
                self.fit_order = order;
                self.refresh_fit();
                true
            }
            Err(e) => {
                log::debug!("{e}");
                false
            }
        }
    }

    /// Interval text of the current mask ("" without one).
    pub fn current_interval_text(&self) -> String {
        match (&self.spectrum, self.history.current()) {
            (Some(spectrum), Some(mask)) => codec::encode(mask, spectrum),
            _ => String::new(),
        }
    }

    /// Recompute everything derived from the current mask.
    pub fn refresh(&mut self) {
        self.interval_text = self.current_interval_text();
        self.refresh_fit();
    }

    pub fn refresh_fit(&mut self) {
        self.baseline = None;
        self.fit_status = None;
        let (Some(spectrum), Some(mask)) = (&self.spectrum, self.history.current()) else {
            return;
        };
        match fit_baseline(spectrum, mask, self.fit_order) {
            Ok(baseline) => self.baseline = Some(baseline),
            Err(FitError::Disabled) => {}
            Err(e) => {
                log::info!("No baseline: {e}");
                self.fit_status = Some(e);
            }
        }
    }

    /// `<dir>/<stem><suffix>` for the loaded spectrum and current mode.
    pub fn default_save_path(&self) -> Option<PathBuf> {
        let stem = self.file_stem.as_ref()?;
        let file = format!("{stem}{}", self.settings.suffix(self.save_mode));
        Some(match &self.default_dir {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        })
    }

    /// Write the interval text to `path` and queue a snapshot image beside
    /// it.  Returns false if there is nothing to save yet.
    pub fn save_to(&mut self, path: &Path) -> Result<bool> {
        let (Some(spectrum), Some(mask)) = (&self.spectrum, self.history.current()) else {
            return Ok(false);
        };
        let text = codec::encode(mask, spectrum);
        std::fs::write(path, &text).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Saved windows to {}", path.display());

        self.pending_snapshot = Some(path.with_extension(&self.settings.snapshot_extension));
        Ok(true)
    }

    /// Report a failed action in the status bar.
    pub fn report(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.status_message = Some(format!("Error: {err:#}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        let sp = Spectrum::load(
            vec![100.0, 101.0, 102.0, 103.0, 104.0],
            vec![1.0, 2.0, 3.0, 2.0, 1.0],
        )
        .unwrap();
        state.set_spectrum(sp, Some(Path::new("/data/spw0.tsv")));
        state
    }

    #[test]
    fn actions_without_spectrum_are_ignored() {
        let mut state = AppState::default();
        assert!(!state.select_range(0.0, 1.0, true));
        assert_eq!(state.apply_interval_text("1~2"), Ok(false));
        assert_eq!(state.navigate(Navigate::Previous), Step::Unchanged);
        assert!(!state.save_to(Path::new("unused.txt")).unwrap());
        assert!(state.open_intervals(Path::new("unused.txt")).is_err());
    }

    #[test]
    fn gestures_build_history_and_text() {
        let mut state = loaded();
        assert!(state.select_range(99.5, 101.5, true));
        assert_eq!(state.interval_text, "100.0000~101.0000");
        assert!(state.select_range(102.5, 105.0, true));
        assert_eq!(state.interval_text, "100.0000~101.0000;103.0000~104.0000");
        assert!(state.select_range(103.5, 104.5, false));
        assert_eq!(state.interval_text, "100.0000~101.0000;103.0000~103.0000");
        assert_eq!(state.history.len(), 3);

        assert_eq!(state.navigate(Navigate::First), Step::Moved(0));
        assert_eq!(state.interval_text, "100.0000~101.0000");
        assert_eq!(state.navigate(Navigate::Last), Step::Moved(2));
    }

    #[test]
    fn bad_interval_text_leaves_mask_unchanged() {
        let mut state = loaded();
        state.apply_interval_text("100~101").unwrap();
        let before = state.current_mask().cloned();
        assert!(state.apply_interval_text("100~").is_err());
        assert_eq!(state.current_mask().cloned(), before);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn new_spectrum_discards_history() {
        let mut state = loaded();
        state.select_range(99.0, 105.0, true);
        let sp = Spectrum::load(vec![1.0, 2.0], vec![0.0, 0.0]).unwrap();
        state.set_spectrum(sp, None);
        assert!(state.current_mask().is_none());
        assert_eq!(state.interval_text, "");
        assert!(state.file_stem.is_none());
        assert!(state.default_dir.is_none());
        assert!(state.default_save_path().is_none());
    }

    #[test]
    fn fit_follows_order_and_mask() {
        let mut state = loaded();
        assert!(state.set_fit_order_text("1"));
        assert!(state.baseline.is_none());

        state.apply_interval_text("100~100").unwrap();
        assert_eq!(
            state.fit_status,
            Some(FitError::NotEnoughChannels { selected: 1, order: 1 })
        );

        state.apply_interval_text("100~100;104~104").unwrap();
        let baseline = state.baseline.as_ref().unwrap();
        assert_eq!(baseline.curve.len(), 5);
        assert!(state.fit_status.is_none());

        assert!(!state.set_fit_order_text("x"));
        assert_eq!(state.fit_order, FitOrder::Order(1));
        assert!(state.set_fit_order_text("-1"));
        assert!(state.baseline.is_none());
        assert!(state.fit_status.is_none());
    }

    #[test]
    fn delete_all_clears_selection_and_fit() {
        let mut state = loaded();
        state.set_fit_order_text("0");
        state.select_range(99.0, 105.0, true);
        assert!(state.baseline.is_some());
        state.delete_all();
        assert!(state.current_mask().is_none());
        assert!(state.baseline.is_none());
        assert_eq!(state.interval_text, "");
    }

    #[test]
    fn default_save_path_uses_mode_suffix() {
        let mut state = loaded();
        assert_eq!(
            state.default_save_path(),
            Some(PathBuf::from("/data/spw0_strict_winstr.txt"))
        );
        state.save_mode = SaveMode::Loose;
        assert_eq!(
            state.default_save_path(),
            Some(PathBuf::from("/data/spw0_loose_winstr.txt"))
        );
    }

    #[test]
    fn save_writes_text_and_queues_snapshot() {
        let mut state = loaded();
        state.apply_interval_text("101~102").unwrap();
        let path = std::env::temp_dir().join(format!("linemarker-save-{}.txt", std::process::id()));
        assert!(state.save_to(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "101.0000~102.0000");
        assert_eq!(state.pending_snapshot, Some(path.with_extension("png")));

        let mut reloaded = loaded();
        reloaded.open_intervals(&path).unwrap();
        assert_eq!(reloaded.current_mask(), state.current_mask());
        std::fs::remove_file(&path).ok();
    }
}
