//! src/source/text.rs
//!
//! Text formats: recorded value files and live record lines.

use std::fs;
use std::path::Path;

use log::info;

use super::SourceError;
use crate::engine::CHANNELS;

/// Numeric values of a recording, in file order.
///
/// Blank lines and `//` comments are skipped, values are comma separated and
/// tokens that are not numbers are dropped.
pub fn parse_values(text: &str) -> Vec<f64> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("//"))
        .flat_map(|l| l.split(','))
        .filter_map(|tok| tok.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}

/// Read a recording from disk. A file without any numeric token is an error.
pub fn load_values(path: &Path) -> Result<Vec<f64>, SourceError> {
    let text = fs::read_to_string(path)?;
    let values = parse_values(&text);
    if values.is_empty() {
        return Err(SourceError::NoData(path.display().to_string()));
    }
    info!("loaded {} values from {}", values.len(), path.display());
    Ok(values)
}

/// Parse one live record `c1,c2,c3`.
///
/// Empty fields and `-` mean absent. Returns `None` for a malformed record
/// (too many fields or a field that is not a number).
pub fn parse_record(line: &str) -> Option<[Option<f64>; CHANNELS]> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let mut values = [None; CHANNELS];
    for (i, field) in line.split(',').enumerate() {
        let slot = values.get_mut(i)?;
        let field = field.trim();
        if field.is_empty() || field == "-" {
            continue;
        }
        *slot = Some(field.parse::<f64>().ok()?);
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_blanks_and_garbage() {
        let text = "// header\n\n1400, 1410,abc\n  // note\n1420,,1430\n";
        assert_eq!(parse_values(text), vec![1400.0, 1410.0, 1420.0, 1430.0]);
    }

    #[test]
    fn no_numbers_yields_empty() {
        assert!(parse_values("// only\nfoo,bar\n").is_empty());
    }

    #[test]
    fn record_fields_may_be_absent() {
        assert_eq!(
            parse_record("1400,-,1390"),
            Some([Some(1400.0), None, Some(1390.0)])
        );
        assert_eq!(parse_record("1400"), Some([Some(1400.0), None, None]));
        assert_eq!(parse_record("1400,,"), Some([Some(1400.0), None, None]));
    }

    #[test]
    fn malformed_records_are_rejected() {
        assert_eq!(parse_record(""), None);
        assert_eq!(parse_record("1,2,3,4"), None);
        assert_eq!(parse_record("1400,x"), None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_values(Path::new("/nonexistent/strip-monitor.txt"));
        assert!(matches!(err, Err(SourceError::Io(_))));
    }
}
