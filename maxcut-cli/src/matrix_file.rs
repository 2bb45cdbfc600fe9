use std::path::Path;

use eyre::{bail, WrapErr};

/// Parses a dense matrix written one row per line with whitespace-separated
/// entries. Blank lines and `#` comments are skipped; rows are not checked for
/// equal length here, which is left to [`maxcut::WeightMatrix::from_rows`].
pub fn parse_rows(text: &str) -> eyre::Result<Vec<Vec<f64>>> {
    let mut rows = vec![];
    for (number, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<f64>()
                    .wrap_err_with(|| format!("line {}: `{token}` is not a number", number + 1))
            })
            .collect::<eyre::Result<Vec<_>>>()?;
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("no matrix rows found");
    }
    Ok(rows)
}

pub fn read_rows<P: AsRef<Path>>(path: P) -> eyre::Result<Vec<Vec<f64>>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    parse_rows(&text).wrap_err_with(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# a path on three vertices\n0 1 0\n\n1 0 2.5  # heavier edge\n0 2.5 0\n";
        let rows = parse_rows(text).unwrap();
        assert!(rows == vec![vec![0.0, 1.0, 0.0], vec![1.0, 0.0, 2.5], vec![0.0, 2.5, 0.0]]);
    }

    #[test]
    fn reports_the_offending_line() {
        let err = parse_rows("0 1\n1 zero\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn empty_file_is_an_error() {
        assert!(parse_rows("# nothing\n\n").is_err());
    }
}
