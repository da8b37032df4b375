//! Line-free channel marking for 1-D spectra.
//!
//! The [`data`] module holds everything the interactive front end calls
//! into: the spectrum model, selection masks, the `f1~f2;...` interval
//! codec, bounded undo/redo history and the polynomial baseline fit.

pub mod config;
pub mod data;

pub use data::codec::{decode, encode};
pub use data::error::{FitError, LoadError, ParseError};
pub use data::fit::{fit_baseline, Baseline, FitOrder};
pub use data::history::{EditHistory, Step};
pub use data::model::{Interval, Mask, Spectrum};
