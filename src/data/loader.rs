use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::error::LoadError;
use super::model::Spectrum;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a two-column spectrum file.  Dispatch the separator by extension.
///
/// Supported layouts (no header, `#` starts a comment line):
/// * `.csv`            – comma separated
/// * anything else     – columns split on any run of spaces or tabs
///                       (`.tsv`, `.txt`, `.dat`, ...)
///
/// The first column is frequency and is multiplied by `frequency_scale`
/// once, the second is intensity.  Further columns are ignored.
pub fn load_file(path: &Path, frequency_scale: f64) -> Result<Spectrum> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening spectrum file {}", path.display()))?;
    let spectrum = parse_table(file, delimiter_for(path), frequency_scale)
        .with_context(|| format!("parsing spectrum file {}", path.display()))?;
    Ok(spectrum)
}

/// Field separator for a spectrum file, chosen by extension.
pub fn delimiter_for(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "tsv" | "tab" => b'\t',
        "csv" => b',',
        _ => b' ',
    }
}

// ---------------------------------------------------------------------------
// Table parser
// ---------------------------------------------------------------------------

/// Parse headerless two-column data into a [`Spectrum`].
///
/// Every field is further split on ASCII whitespace, so runs of spaces or
/// tabs separate columns whatever `delimiter` is (aligned text tables,
/// space-padded `.tsv`, tab-separated `.txt`).
pub fn parse_table<R: Read>(reader: R, delimiter: u8, frequency_scale: f64) -> Result<Spectrum, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut frequencies = Vec::new();
    let mut intensities = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::MalformedRow {
            row,
            reason: e.to_string(),
        })?;

        let mut fields = record.iter().flat_map(str::split_ascii_whitespace);
        let Some(freq) = fields.next() else {
            // blank line
            continue;
        };
        let intensity = fields.next().ok_or_else(|| LoadError::MalformedRow {
            row,
            reason: "expected two columns, found one".to_string(),
        })?;

        frequencies.push(parse_cell(freq, row, "frequency")? * frequency_scale);
        intensities.push(parse_cell(intensity, row, "intensity")?);
    }

    let spectrum = Spectrum::load(frequencies, intensities)?;
    log::debug!("parsed {} channels", spectrum.len());
    Ok(spectrum)
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<f64, LoadError> {
    cell.parse::<f64>().map_err(|_| LoadError::MalformedRow {
        row,
        reason: format!("{column} '{cell}' is not a number"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tab_separated_and_scales_frequency() {
        let text = "216.0\t0.5\n216.001\t0.7\n216.002\t0.6\n";
        let sp = parse_table(text.as_bytes(), b'\t', 1e3).unwrap();
        assert_eq!(sp.len(), 3);
        assert!((sp.frequencies()[1] - 216001.0).abs() < 1e-6);
        assert_eq!(sp.intensities(), &[0.5, 0.7, 0.6]);
    }

    #[test]
    fn descending_file_is_normalized() {
        let text = "3,30\n2,20\n1,10\n";
        let sp = parse_table(text.as_bytes(), b',', 1.0).unwrap();
        assert_eq!(sp.frequencies(), &[1.0, 2.0, 3.0]);
        assert_eq!(sp.intensities(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn aligned_whitespace_comments_and_extra_columns() {
        let text = "# freq  intensity\n  1.0   5.0  x\n\n  2.0   6.0\n";
        let sp = parse_table(text.as_bytes(), b' ', 1.0).unwrap();
        assert_eq!(sp.frequencies(), &[1.0, 2.0]);
        assert_eq!(sp.intensities(), &[5.0, 6.0]);
    }

    #[test]
    fn space_aligned_tsv_loads() {
        let text = "216.0 0.5\n216.001   0.7\n";
        let sp = parse_table(text.as_bytes(), b'\t', 1e3).unwrap();
        assert_eq!(sp.len(), 2);
        assert!((sp.frequencies()[0] - 216000.0).abs() < 1e-6);
        assert_eq!(sp.intensities(), &[0.5, 0.7]);
    }

    #[test]
    fn tab_separated_txt_loads() {
        let text = "216.0\t0.5\n216.001 \t 0.7\n";
        let sp = parse_table(text.as_bytes(), b' ', 1e3).unwrap();
        assert_eq!(sp.len(), 2);
        assert!((sp.frequencies()[1] - 216001.0).abs() < 1e-6);
        assert_eq!(sp.intensities(), &[0.5, 0.7]);
    }

    #[test]
    fn rejects_bad_rows() {
        let err = parse_table("1\t2\n3\n".as_bytes(), b'\t', 1.0).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { row: 1, .. }));

        let err = parse_table("1\tabc\n".as_bytes(), b'\t', 1.0).unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { row: 0, .. }));

        let err = parse_table("".as_bytes(), b'\t', 1.0).unwrap_err();
        assert_eq!(err, LoadError::Empty);

        let err = parse_table("1\t1\n1\t2\n".as_bytes(), b'\t', 1.0).unwrap_err();
        assert_eq!(err, LoadError::NotMonotonic { index: 1 });
    }

    #[test]
    fn delimiter_follows_extension() {
        assert_eq!(delimiter_for(Path::new("a/spw0.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("spw0.CSV")), b',');
        assert_eq!(delimiter_for(Path::new("spw0.txt")), b' ');
        assert_eq!(delimiter_for(Path::new("spw0")), b' ');
    }
}
