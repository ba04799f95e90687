//! Spectrum files in the plain-text `.fs` format.
//!
//! Layout:
//!
//! - any number of `#` comment lines
//! - a header `d1 d2 [folded|unfolded] ["pop1" "pop2"]`
//! - `d1 * d2` data values in row-major order
//! - optionally `d1 * d2` mask flags (`0`/`1`)
//!
//! Values may be spread over any number of lines.

use std::fs;
use std::path::Path;

use nalgebra::DMatrix;

use crate::error::AppError;
use crate::spectrum::Spectrum;

fn malformed(path: &Path, what: impl std::fmt::Display) -> AppError {
    AppError::new(1, format!("Malformed spectrum file '{}': {what}", path.display()))
}

struct Header {
    dims: (usize, usize),
    folded: bool,
    pop_ids: Option<(String, String)>,
}

fn parse_header(line: &str, path: &Path) -> Result<Header, AppError> {
    // Quoted population labels may contain spaces.
    let mut parts = line.split('"');
    let head = parts.next().unwrap_or_default();
    let labels: Vec<&str> = parts.enumerate().filter(|(i, _)| i % 2 == 0).map(|(_, s)| s).collect();

    let mut tokens = head.split_whitespace();
    let mut dim = |axis: &str| -> Result<usize, AppError> {
        let token = tokens
            .next()
            .ok_or_else(|| malformed(path, format!("missing {axis} dimension")))?;
        let value: usize = token
            .parse()
            .map_err(|_| malformed(path, format!("invalid {axis} dimension '{token}'")))?;
        if value < 2 {
            return Err(malformed(path, format!("{axis} dimension must be at least 2")));
        }
        Ok(value)
    };
    let dims = (dim("first")?, dim("second")?);

    let folded = match tokens.next() {
        None | Some("unfolded") => false,
        Some("folded") => true,
        Some(other) => return Err(malformed(path, format!("unexpected header token '{other}'"))),
    };

    let pop_ids = match labels.as_slice() {
        [] => None,
        [a, b, ..] => Some((a.to_string(), b.to_string())),
        [_] => return Err(malformed(path, "expected two population labels")),
    };

    Ok(Header { dims, folded, pop_ids })
}

/// Parse the text of a spectrum file. `path` is only used in error messages.
pub fn parse_spectrum(text: &str, path: &Path) -> Result<Spectrum, AppError> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    let header_line = lines.next().ok_or_else(|| malformed(path, "empty file"))?;
    let header = parse_header(header_line, path)?;
    let (rows, cols) = header.dims;
    let cells = rows * cols;

    let tokens: Vec<&str> = lines.flat_map(str::split_whitespace).collect();
    if tokens.len() < cells {
        return Err(malformed(path, format!("expected {cells} values, found {}", tokens.len())));
    }

    let mut values = Vec::with_capacity(cells);
    for token in &tokens[..cells] {
        let v: f64 = token
            .parse()
            .map_err(|_| malformed(path, format!("invalid value '{token}'")))?;
        if !v.is_finite() || v < 0.0 {
            return Err(malformed(path, format!("invalid count {v}")));
        }
        values.push(v);
    }
    let data = DMatrix::from_row_slice(rows, cols, &values);

    let rest = &tokens[cells..];
    let spectrum = match rest.len() {
        0 => {
            let fs = Spectrum::new(data);
            if header.folded { fs.fold() } else { fs }
        }
        n if n == cells => {
            let mut flags = Vec::with_capacity(cells);
            for token in rest {
                flags.push(match *token {
                    "0" => false,
                    "1" => true,
                    other => return Err(malformed(path, format!("invalid mask flag '{other}'"))),
                });
            }
            let mask = DMatrix::from_row_slice(rows, cols, &flags);
            Spectrum::from_parts(data, mask, header.folded).ok_or_else(|| malformed(path, "mask shape mismatch"))?
        }
        n => return Err(malformed(path, format!("expected 0 or {cells} mask flags, found {n}"))),
    };

    Ok(match header.pop_ids {
        Some((a, b)) => spectrum.with_pop_ids(a, b),
        None => spectrum,
    })
}

/// Read a spectrum file. A missing or unreadable file is exit code 1.
pub fn read_spectrum(path: &Path) -> Result<Spectrum, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(1, format!("Failed to read spectrum file '{}': {e}", path.display())))?;
    parse_spectrum(&text, path)
}

/// Render a spectrum in the `.fs` format, mask included.
pub fn format_spectrum(spectrum: &Spectrum) -> String {
    let (rows, cols) = (spectrum.data().nrows(), spectrum.data().ncols());
    let mut out = format!("{rows} {cols} {}", if spectrum.is_folded() { "folded" } else { "unfolded" });
    if let Some((a, b)) = spectrum.pop_ids() {
        out.push_str(&format!(" \"{a}\" \"{b}\""));
    }
    out.push('\n');

    let mut values = Vec::with_capacity(rows * cols);
    let mut flags = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            values.push(spectrum.get(i, j).to_string());
            flags.push(if spectrum.is_masked(i, j) { "1" } else { "0" });
        }
    }
    out.push_str(&values.join(" "));
    out.push('\n');
    out.push_str(&flags.join(" "));
    out.push('\n');
    out
}

/// Write a spectrum file. Failures are exit code 4.
pub fn write_spectrum(path: &Path, spectrum: &Spectrum) -> Result<(), AppError> {
    fs::write(path, format_spectrum(spectrum))
        .map_err(|e| AppError::new(4, format!("Failed to write spectrum file '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# two demes\n\
        3 4 unfolded \"North sea\" \"Baltic\"\n\
        0 5 3 1\n\
        7 2 1 0\n\
        2 1 4 0\n\
        1 0 0 0 0 0 0 0 0 0 0 1\n";

    #[test]
    fn reads_header_data_mask_and_labels() {
        let fs = parse_spectrum(SAMPLE, Path::new("sample.fs")).unwrap();
        assert_eq!(fs.sample_sizes(), (2, 3));
        assert_eq!(fs.get(1, 0), 7.0);
        assert_eq!(fs.get(2, 2), 4.0);
        assert!(fs.is_masked(0, 0));
        assert!(fs.is_masked(2, 3));
        assert!(!fs.is_masked(0, 1));
        assert!(!fs.is_folded());
        assert_eq!(fs.pop_ids(), Some(("North sea", "Baltic")));
    }

    #[test]
    fn missing_mask_masks_the_corners() {
        let fs = parse_spectrum("2 2\n0 1 2 0\n", Path::new("x.fs")).unwrap();
        assert!(fs.is_masked(0, 0));
        assert!(fs.is_masked(1, 1));
        assert!(!fs.is_masked(0, 1));
        assert_eq!(fs.pop_ids(), None);
    }

    #[test]
    fn folded_flag_is_honoured() {
        let fs = parse_spectrum("3 3 folded\n0 1 2 3 4 5 6 7 8\n", Path::new("x.fs")).unwrap();
        assert!(fs.is_folded());
    }

    #[test]
    fn malformed_files_are_exit_code_one() {
        for text in ["", "3\n1 2 3", "2 2\n1 2 3", "2 2\n1 2 x 4", "2 2 sideways\n1 2 3 4", "2 2\n1 2 3 4\n1 0"] {
            let err = parse_spectrum(text, Path::new("bad.fs")).unwrap_err();
            assert_eq!(err.exit_code(), 1, "{text:?}");
        }
    }

    #[test]
    fn written_files_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.fs");
        let fs = parse_spectrum(SAMPLE, Path::new("sample.fs")).unwrap().with_singletons_masked();
        write_spectrum(&path, &fs).unwrap();
        assert_eq!(read_spectrum(&path).unwrap(), fs);
    }

    #[test]
    fn unreadable_file_is_exit_code_one() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_spectrum(&dir.path().join("absent.fs")).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
