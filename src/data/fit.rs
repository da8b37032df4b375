use std::str::FromStr;

use nalgebra::{DMatrix, DVector};

use super::error::FitError;
use super::model::{Mask, Spectrum};

// ---------------------------------------------------------------------------
// Fit order – what the user typed into the order box
// ---------------------------------------------------------------------------

/// Requested polynomial order, or no fit at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitOrder {
    #[default]
    Disabled,
    Order(usize),
}

impl FitOrder {
    pub fn from_option(order: Option<usize>) -> Self {
        order.map_or(FitOrder::Disabled, FitOrder::Order)
    }

    pub fn as_option(self) -> Option<usize> {
        match self {
            FitOrder::Disabled => None,
            FitOrder::Order(n) => Some(n),
        }
    }
}

/// Rejected order text.  The caller keeps its previous order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a polynomial order")]
pub struct InvalidFitOrder(pub String);

impl FromStr for FitOrder {
    type Err = InvalidFitOrder;

    /// Digits give an order; empty text or a leading minus disables fitting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.starts_with('-') {
            return Ok(FitOrder::Disabled);
        }
        if !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidFitOrder(s.to_string()));
        }
        s.parse::<usize>()
            .map(FitOrder::Order)
            .map_err(|_| InvalidFitOrder(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Baseline fit
// ---------------------------------------------------------------------------

/// Polynomial baseline evaluated over the whole spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    pub order: usize,
    /// Coefficients in ascending powers of the normalized frequency.
    pub coefficients: Vec<f64>,
    /// Baseline value at every channel.
    pub curve: Vec<f64>,
}

impl Baseline {
    /// Evaluate at a normalized frequency (Horner).
    pub fn eval(&self, t: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }
}

/// Map every frequency onto `[0, 1]` using the full spectrum range, so the
/// coefficients keep their scale whichever channels are selected.
pub fn normalized_frequencies(spectrum: &Spectrum) -> Vec<f64> {
    let (lo, hi) = spectrum.frequency_range();
    let span = hi - lo;
    spectrum
        .frequencies()
        .iter()
        .map(|&f| if span > 0.0 { (f - lo) / span } else { 0.0 })
        .collect()
}

/// Least-squares polynomial of intensity against normalized frequency,
/// using only the selected channels, evaluated across every channel.
pub fn fit_baseline(spectrum: &Spectrum, mask: &Mask, order: FitOrder) -> Result<Baseline, FitError> {
    let FitOrder::Order(order) = order else {
        return Err(FitError::Disabled);
    };
    if mask.len() != spectrum.len() {
        return Err(FitError::MaskMismatch {
            mask: mask.len(),
            spectrum: spectrum.len(),
        });
    }
    let selected = mask.count_selected();
    if selected <= order {
        return Err(FitError::NotEnoughChannels { selected, order });
    }

    let t = normalized_frequencies(spectrum);
    let (xs, ys): (Vec<f64>, Vec<f64>) = t
        .iter()
        .zip(spectrum.intensities())
        .zip(mask.iter())
        .filter(|(_, keep)| *keep)
        .map(|((&x, &y), _)| (x, y))
        .unzip();

    let n_coef = order + 1;
    let design = DMatrix::from_fn(xs.len(), n_coef, |i, j| xs[i].powi(j as i32));
    let target = DVector::from_vec(ys);

    let svd = design.svd(true, true);
    let max_sv = svd.singular_values.max();
    let eps = f64::EPSILON * xs.len().max(n_coef) as f64 * max_sv;
    if max_sv.is_nan() || max_sv <= 0.0 || svd.rank(eps) < n_coef {
        return Err(FitError::Degenerate { order });
    }
    let solution = svd
        .solve(&target, eps)
        .map_err(|_| FitError::Degenerate { order })?;

    let coefficients: Vec<f64> = solution.iter().copied().collect();
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(FitError::Degenerate { order });
    }

    let mut baseline = Baseline {
        order,
        coefficients,
        curve: Vec::new(),
    };
    baseline.curve = t.iter().map(|&x| baseline.eval(x)).collect();
    log::debug!(
        "order {order} baseline fitted on {selected} of {} channels",
        spectrum.len()
    );
    Ok(baseline)
}
