/// Data layer: spectrum, selection masks, interval text, edit history and
/// baseline fitting.  No I/O apart from `loader`, no UI.
///
/// Architecture:
/// ```text
///  .tsv / .csv / .txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  two columns → Spectrum (ascending, scaled)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐   gesture    ┌──────────┐
///   │ Spectrum  │ ───────────▶ │   Mask    │ ──▶ history (undo/redo)
///   └──────────┘              └──────────┘
///        │                        │    ▲
///        ▼                        ▼    │
///   ┌──────────┐              ┌──────────┐
///   │   fit     │ ◀── mask ─── │  codec    │  "f1~f2;f3~f4"
///   └──────────┘              └──────────┘
/// ```

pub mod codec;
pub mod error;
pub mod fit;
pub mod history;
pub mod loader;
pub mod model;
