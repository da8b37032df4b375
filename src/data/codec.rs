use super::error::ParseError;
use super::model::{Interval, Mask, Spectrum};

// ---------------------------------------------------------------------------
// Interval text codec
// ---------------------------------------------------------------------------
//
// Text form:  `f1~f2;f3~f4;...`, four decimals per bound, in the spectrum's
// own frequency unit.  An empty mask encodes to "".

const PAIR_SEPARATOR: &str = ";";
const BOUND_SEPARATOR: &str = "~";

/// Detect the maximal runs of selected channels.
///
/// The mask is conceptually padded with an unselected channel on both ends,
/// so runs touching either boundary are still closed.  Returns inclusive
/// `(left, right)` index pairs in ascending order.
pub fn edges(mask: &Mask) -> Vec<(usize, usize)> {
    let sel = mask.as_slice();
    let padded = |i: isize| -> bool {
        usize::try_from(i)
            .ok()
            .and_then(|i| sel.get(i).copied())
            .unwrap_or(false)
    };

    let mut lefts = Vec::new();
    let mut rights = Vec::new();
    for (i, &s) in sel.iter().enumerate() {
        if !s {
            continue;
        }
        let i_signed = i as isize;
        if !padded(i_signed - 1) {
            lefts.push(i);
        }
        if !padded(i_signed + 1) {
            rights.push(i);
        }
    }
    assert_eq!(lefts.len(), rights.len(), "unbalanced mask edges");

    lefts.into_iter().zip(rights).collect()
}

/// Selected runs as frequency intervals on the spectrum grid.
pub fn intervals(mask: &Mask, spectrum: &Spectrum) -> Vec<Interval> {
    edges(mask)
        .into_iter()
        .filter_map(|(left, right)| {
            Some(Interval {
                left,
                right,
                start_freq: spectrum.frequency(left)?,
                end_freq: spectrum.frequency(right)?,
            })
        })
        .collect()
}

/// Render the mask as interval text.
pub fn encode(mask: &Mask, spectrum: &Spectrum) -> String {
    debug_assert_eq!(mask.len(), spectrum.len(), "mask does not belong to spectrum");
    intervals(mask, spectrum)
        .iter()
        .map(Interval::to_string)
        .collect::<Vec<_>>()
        .join(PAIR_SEPARATOR)
}

/// Parse interval text into a mask over `spectrum`.
///
/// Each bound snaps to the nearest channel instead of being range-tested:
/// written frequencies are truncated to four decimals and a plain
/// inequality would drop the boundary channels.  Pairs may come in any
/// order and may overlap; the result is their union.
pub fn decode(text: &str, spectrum: &Spectrum) -> Result<Mask, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut mask = Mask::empty(spectrum.len());
    for (index, pair) in text.split(PAIR_SEPARATOR).enumerate() {
        let (lo, hi) = parse_pair(index, pair)?;
        let left = spectrum.nearest_index(lo);
        let right = spectrum.nearest_index(hi);
        if left > right {
            log::debug!("interval {index} ('{}') is inverted, nothing selected", pair.trim());
        }
        mask.select_span(left, right);
    }
    Ok(mask)
}

fn parse_pair(index: usize, pair: &str) -> Result<(f64, f64), ParseError> {
    let tokens: Vec<&str> = pair.split(BOUND_SEPARATOR).map(str::trim).collect();
    let [lo, hi] = tokens.as_slice() else {
        return Err(ParseError::MalformedPair {
            index,
            token: pair.trim().to_string(),
        });
    };
    Ok((parse_bound(index, lo)?, parse_bound(index, hi)?))
}

fn parse_bound(index: usize, token: &str) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            index,
            token: token.to_string(),
        })
}
