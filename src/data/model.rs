use std::fmt;

use super::error::LoadError;

// ---------------------------------------------------------------------------
// Spectrum – the frequency grid every mask is defined against
// ---------------------------------------------------------------------------

/// A single spectrum with strictly ascending frequencies.
///
/// Immutable once built.  Loading a new file replaces it wholesale, and every
/// mask built against the old one must be discarded with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    intensities: Vec<f64>,
}

impl Spectrum {
    /// Validate raw columns and build a spectrum.
    ///
    /// Descending input is reversed (both columns together) so the stored
    /// frequency axis is always ascending.
    pub fn load(mut frequencies: Vec<f64>, mut intensities: Vec<f64>) -> Result<Self, LoadError> {
        if frequencies.len() != intensities.len() {
            return Err(LoadError::LengthMismatch {
                frequencies: frequencies.len(),
                intensities: intensities.len(),
            });
        }
        if frequencies.is_empty() {
            return Err(LoadError::Empty);
        }
        if let Some(index) = frequencies
            .iter()
            .zip(intensities.iter())
            .position(|(f, y)| !f.is_finite() || !y.is_finite())
        {
            return Err(LoadError::NonFinite { index });
        }

        let descending = frequencies.len() > 1 && frequencies[1] < frequencies[0];
        if descending {
            frequencies.reverse();
            intensities.reverse();
        }

        if let Some(pos) = frequencies.windows(2).position(|w| w[1] <= w[0]) {
            // Report the offending sample in the caller's original order.
            let index = if descending {
                frequencies.len() - 1 - pos
            } else {
                pos + 1
            };
            return Err(LoadError::NotMonotonic { index });
        }

        Ok(Spectrum {
            frequencies,
            intensities,
        })
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether the spectrum has no channels.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn intensities(&self) -> &[f64] {
        &self.intensities
    }

    pub fn frequency(&self, index: usize) -> Option<f64> {
        self.frequencies.get(index).copied()
    }

    /// Lowest and highest frequency.
    pub fn frequency_range(&self) -> (f64, f64) {
        // Non-empty and ascending by construction.
        (self.frequencies[0], self.frequencies[self.frequencies.len() - 1])
    }

    /// Lowest and highest intensity.
    pub fn intensity_range(&self) -> (f64, f64) {
        self.intensities
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &y| {
                (lo.min(y), hi.max(y))
            })
    }

    /// Index of the channel whose frequency is closest to `freq`.
    /// Ties resolve to the lower index.
    pub fn nearest_index(&self, freq: f64) -> usize {
        let upper = self.frequencies.partition_point(|&f| f < freq);
        if upper == 0 {
            return 0;
        }
        if upper == self.frequencies.len() {
            return upper - 1;
        }
        let below = freq - self.frequencies[upper - 1];
        let above = self.frequencies[upper] - freq;
        if below <= above {
            upper - 1
        } else {
            upper
        }
    }
}

// ---------------------------------------------------------------------------
// Mask – per-channel selection
// ---------------------------------------------------------------------------

/// Boolean selection over the channels of one [`Spectrum`]; `true` marks a
/// line-free channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Mask {
    selected: Vec<bool>,
}

impl Mask {
    /// A mask of `len` channels with nothing selected.
    pub fn empty(len: usize) -> Self {
        Mask {
            selected: vec![false; len],
        }
    }

    pub fn from_bools(selected: Vec<bool>) -> Self {
        Mask { selected }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.selected
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.selected.iter().copied()
    }

    /// Number of selected channels.
    pub fn count_selected(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Mark channels `left..=right` as selected.  Out-of-range indices are
    /// clamped; an inverted range selects nothing.
    pub(crate) fn select_span(&mut self, left: usize, right: usize) {
        if self.selected.is_empty() || left > right {
            return;
        }
        let right = right.min(self.selected.len() - 1);
        for s in self.selected.iter_mut().take(right + 1).skip(left) {
            *s = true;
        }
    }

    /// Apply one drag gesture and return the resulting mask.
    ///
    /// Channels strictly between `lo` and `hi` are affected; the bounds are
    /// swapped if given in reverse.  `additive` selects them (union),
    /// otherwise they are deselected (subtraction).
    pub fn apply_selection(&self, spectrum: &Spectrum, lo: f64, hi: f64, additive: bool) -> Mask {
        let (lo, hi) = if hi < lo { (hi, lo) } else { (lo, hi) };
        let selected = self
            .selected
            .iter()
            .zip(spectrum.frequencies())
            .map(|(&s, &f)| {
                let inside = f > lo && f < hi;
                if additive {
                    s || inside
                } else {
                    s && !inside
                }
            })
            .collect();
        Mask { selected }
    }

    /// Channel-wise union.
    pub fn union(&self, other: &Mask) -> Mask {
        Mask {
            selected: self
                .selected
                .iter()
                .zip(other.selected.iter())
                .map(|(&a, &b)| a || b)
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Interval – one contiguous run of selected channels
// ---------------------------------------------------------------------------

/// A closed frequency range whose endpoints lie on the spectrum grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Index of the first selected channel.
    pub left: usize,
    /// Index of the last selected channel (inclusive).
    pub right: usize,
    pub start_freq: f64,
    pub end_freq: f64,
}

impl Interval {
    /// Number of channels covered.
    pub fn channels(&self) -> usize {
        self.right - self.left + 1
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}~{:.4}", self.start_freq, self.end_freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Spectrum {
        Spectrum::load(
            vec![100.0, 101.0, 102.0, 103.0, 104.0],
            vec![1.0, 2.0, 3.0, 2.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn descending_input_is_reversed_with_intensities() {
        let sp = Spectrum::load(vec![3.0, 2.0, 1.0], vec![30.0, 20.0, 10.0]).unwrap();
        assert_eq!(sp.frequencies(), &[1.0, 2.0, 3.0]);
        assert_eq!(sp.intensities(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn load_rejects_bad_columns() {
        assert_eq!(Spectrum::load(vec![], vec![]), Err(LoadError::Empty));
        assert_eq!(
            Spectrum::load(vec![1.0, 2.0], vec![1.0]),
            Err(LoadError::LengthMismatch {
                frequencies: 2,
                intensities: 1
            })
        );
        assert_eq!(
            Spectrum::load(vec![1.0, f64::NAN], vec![1.0, 1.0]),
            Err(LoadError::NonFinite { index: 1 })
        );
        assert_eq!(
            Spectrum::load(vec![1.0, 2.0, 2.0], vec![1.0, 1.0, 1.0]),
            Err(LoadError::NotMonotonic { index: 2 })
        );
        assert_eq!(
            Spectrum::load(vec![5.0, 4.0, 4.5, 1.0], vec![0.0; 4]),
            Err(LoadError::NotMonotonic { index: 2 })
        );
    }

    #[test]
    fn single_sample_spectrum_is_valid() {
        let sp = Spectrum::load(vec![42.0], vec![1.0]).unwrap();
        assert_eq!(sp.len(), 1);
        assert_eq!(sp.frequency_range(), (42.0, 42.0));
        assert_eq!(sp.nearest_index(-1e9), 0);
    }

    #[test]
    fn nearest_index_snaps_and_breaks_ties_low() {
        let sp = grid();
        assert_eq!(sp.nearest_index(99.0), 0);
        assert_eq!(sp.nearest_index(101.4), 1);
        assert_eq!(sp.nearest_index(101.5), 1);
        assert_eq!(sp.nearest_index(101.6), 2);
        assert_eq!(sp.nearest_index(1000.0), 4);
        assert_eq!(sp.nearest_index(100.99995), 1);
    }

    #[test]
    fn apply_selection_uses_open_range() {
        let sp = grid();
        let m = Mask::empty(sp.len()).apply_selection(&sp, 103.0, 100.5, true);
        assert_eq!(m.as_slice(), &[false, true, true, false, false]);

        let m = m.apply_selection(&sp, 99.0, 101.5, false);
        assert_eq!(m.as_slice(), &[false, false, true, false, false]);
    }

    #[test]
    fn apply_selection_leaves_source_untouched() {
        let sp = grid();
        let before = Mask::empty(sp.len());
        let after = before.apply_selection(&sp, 99.0, 105.0, true);
        assert_eq!(before.count_selected(), 0);
        assert_eq!(after.count_selected(), 5);
    }

    #[test]
    fn interval_display_uses_four_decimals() {
        let iv = Interval {
            left: 0,
            right: 2,
            start_freq: 216988.66834,
            end_freq: 216995.9926,
        };
        assert_eq!(iv.to_string(), "216988.6683~216995.9926");
        assert_eq!(iv.channels(), 3);
    }
}
