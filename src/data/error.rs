use thiserror::Error;

// ---------------------------------------------------------------------------
// Core error taxonomy
// ---------------------------------------------------------------------------

/// Malformed or unsupported tabular input.  Fatal to the load only; the
/// previously loaded spectrum stays usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("spectrum contains no samples")]
    Empty,
    #[error("frequency column has {frequencies} values but intensity column has {intensities}")]
    LengthMismatch {
        frequencies: usize,
        intensities: usize,
    },
    #[error("sample {index} is not a finite number")]
    NonFinite { index: usize },
    #[error("frequencies are not strictly monotonic at sample {index}")]
    NotMonotonic { index: usize },
    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

/// Malformed interval text.  The current mask is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("interval text is empty")]
    Empty,
    #[error("interval {index} ('{token}') is not a pair of the form f1~f2")]
    MalformedPair { index: usize, token: String },
    #[error("interval {index}: '{token}' is not a finite number")]
    InvalidNumber { index: usize, token: String },
}

/// Reasons a baseline is unavailable.  Never fatal: editing continues and
/// no curve is drawn.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("baseline fitting is disabled")]
    Disabled,
    #[error("{selected} selected channels are not enough for an order {order} polynomial")]
    NotEnoughChannels { selected: usize, order: usize },
    #[error("selected channels do not determine an order {order} polynomial")]
    Degenerate { order: usize },
    #[error("mask has {mask} entries but spectrum has {spectrum} samples")]
    MaskMismatch { mask: usize, spectrum: usize },
}
