use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::history::DEFAULT_CAPACITY;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Which naming the "save default" action uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    /// Conservative line-free selection.
    #[default]
    Strict,
    /// Generous line-free selection.
    Loose,
}

/// Application settings, read from a JSON file.  Every field is optional in
/// the file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of undo snapshots.
    pub history_capacity: usize,
    /// Factor applied to the first column of a spectrum file (GHz → MHz).
    pub frequency_scale: f64,
    /// Initial polynomial order; `null` leaves fitting off.
    pub fit_order: Option<usize>,
    pub save_mode: SaveMode,
    pub strict_suffix: String,
    pub loose_suffix: String,
    /// Extension of the snapshot image written next to saved intervals.
    pub snapshot_extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            frequency_scale: 1e3,
            fit_order: None,
            save_mode: SaveMode::Strict,
            strict_suffix: "_strict_winstr.txt".to_string(),
            loose_suffix: "_loose_winstr.txt".to_string(),
            snapshot_extension: "png".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing settings JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Like [`Settings::load`] but falls back to defaults, logging why.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("serializing settings")?;
        std::fs::write(path, text).with_context(|| format!("writing settings {}", path.display()))
    }

    /// File-name suffix for the given mode.
    pub fn suffix(&self, mode: SaveMode) -> &str {
        match mode {
            SaveMode::Strict => &self.strict_suffix,
            SaveMode::Loose => &self.loose_suffix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let s = Settings::from_json(r#"{ "history_capacity": 20, "save_mode": "loose" }"#).unwrap();
        assert_eq!(s.history_capacity, 20);
        assert_eq!(s.save_mode, SaveMode::Loose);
        assert_eq!(s.frequency_scale, 1e3);
        assert_eq!(s.suffix(SaveMode::Loose), "_loose_winstr.txt");
        assert_eq!(s.suffix(SaveMode::Strict), "_strict_winstr.txt");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Settings::from_json(r#"{ "save_mode": "sloppy" }"#).is_err());
    }

    #[test]
    fn saved_settings_load_back() {
        let settings = Settings {
            history_capacity: 7,
            fit_order: Some(2),
            save_mode: SaveMode::Loose,
            ..Settings::default()
        };
        let path = std::env::temp_dir()
            .join(format!("linemarker-settings-{}.json", std::process::id()));
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_falls_back() {
        let s = Settings::load_or_default(Path::new("/nonexistent/linemarker.json"));
        assert_eq!(s, Settings::default());
    }
}
