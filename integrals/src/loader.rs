//! Plain-text integral files.
//!
//! The format is the one used by the classic SCF programming exercises:
//!
//! * nuclear repulsion: a single number;
//! * one-electron matrices: `i j value` per line, 1-based, either triangle;
//! * two-electron integrals: `i j k l value` per line, 1-based, any one of
//!   the eight equivalent orderings.
//!
//! Blank lines and lines starting with `#` are ignored.

extern crate nalgebra as na;

use crate::error::IntegralError;
use crate::store::{IntegralStore, TwoElectronIntegrals};
use na::DMatrix;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Locations of the five files that make up an integral set.
#[derive(Clone, Debug)]
pub struct IntegralFiles {
    pub nuclear_repulsion: PathBuf,
    pub overlap: PathBuf,
    pub kinetic: PathBuf,
    pub nuclear_attraction: PathBuf,
    pub two_electron: PathBuf,
}

impl IntegralFiles {
    /// Default file names (`enuc.dat`, `s.dat`, `t.dat`, `v.dat`, `eri.dat`) inside `dir`.
    pub fn in_directory(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        IntegralFiles {
            nuclear_repulsion: dir.join("enuc.dat"),
            overlap: dir.join("s.dat"),
            kinetic: dir.join("t.dat"),
            nuclear_attraction: dir.join("v.dat"),
            two_electron: dir.join("eri.dat"),
        }
    }

    /// Read and validate all files.
    ///
    /// When `num_basis` is `None` the basis size is taken from the largest
    /// orbital index in the overlap file.
    pub fn load(&self, num_basis: Option<usize>) -> Result<IntegralStore, IntegralError> {
        let overlap_text = read(&self.overlap)?;
        let num_basis = match num_basis {
            Some(n) => n,
            None => max_index(&overlap_text, &self.overlap, 2)?,
        };
        info!(
            "Loading integrals for {} orbitals from {}",
            num_basis,
            self.overlap.parent().unwrap_or(Path::new(".")).display()
        );

        let enuc = parse_scalar(&read(&self.nuclear_repulsion)?, &self.nuclear_repulsion)?;
        let overlap = parse_one_electron(&overlap_text, &self.overlap, num_basis)?;
        let kinetic = parse_one_electron(&read(&self.kinetic)?, &self.kinetic, num_basis)?;
        let nuclear = parse_one_electron(
            &read(&self.nuclear_attraction)?,
            &self.nuclear_attraction,
            num_basis,
        )?;
        let eri = parse_two_electron(&read(&self.two_electron)?, &self.two_electron, num_basis)?;

        IntegralStore::new(enuc, overlap, kinetic, nuclear, eri)
    }
}

fn read(path: &Path) -> Result<String, IntegralError> {
    debug!("Reading {}", path.display());
    fs::read_to_string(path).map_err(|source| IntegralError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a file holding one number.
pub fn parse_scalar(content: &str, path: &Path) -> Result<f64, IntegralError> {
    let (line, text) = records(content)
        .next()
        .ok_or_else(|| IntegralError::Parse {
            path: path.to_path_buf(),
            line: 1,
            message: "expected a single number, found an empty file".to_string(),
        })?;
    text.trim().parse::<f64>().map_err(|e| IntegralError::Parse {
        path: path.to_path_buf(),
        line,
        message: format!("invalid number '{}': {}", text.trim(), e),
    })
}

/// Parse `i j value` lines into a symmetric `num_basis`×`num_basis` matrix.
pub fn parse_one_electron(
    content: &str,
    path: &Path,
    num_basis: usize,
) -> Result<DMatrix<f64>, IntegralError> {
    let mut matrix = DMatrix::zeros(num_basis, num_basis);
    for (line, text) in records(content) {
        let (indices, value) = parse_entry::<2>(text, path, line, num_basis)?;
        let [i, j] = indices;
        matrix[(i, j)] = value;
        matrix[(j, i)] = value;
    }
    Ok(matrix)
}

/// Parse `i j k l value` lines into a compressed two-electron tensor.
pub fn parse_two_electron(
    content: &str,
    path: &Path,
    num_basis: usize,
) -> Result<TwoElectronIntegrals, IntegralError> {
    let mut eri = TwoElectronIntegrals::zeros(num_basis);
    let mut count = 0usize;
    for (line, text) in records(content) {
        let (indices, value) = parse_entry::<4>(text, path, line, num_basis)?;
        let [i, j, k, l] = indices;
        eri.set(i, j, k, l, value);
        count += 1;
    }
    debug!("Read {} two-electron integrals ({} unique slots)", count, eri.len());
    Ok(eri)
}

/// Non-empty, non-comment lines with their 1-based line numbers.
fn records(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(n, text)| (n + 1, text))
        .filter(|(_, text)| {
            let trimmed = text.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
}

/// Split a line into `N` zero-based orbital indices followed by a value.
fn parse_entry<const N: usize>(
    text: &str,
    path: &Path,
    line: usize,
    num_basis: usize,
) -> Result<([usize; N], f64), IntegralError> {
    let parse_error = |message: String| IntegralError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    };

    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != N + 1 {
        return Err(parse_error(format!(
            "expected {} indices and a value, found {} fields",
            N,
            fields.len()
        )));
    }

    let mut indices = [0usize; N];
    for (slot, field) in indices.iter_mut().zip(&fields[..N]) {
        let index = field
            .parse::<usize>()
            .map_err(|e| parse_error(format!("invalid orbital index '{}': {}", field, e)))?;
        if index == 0 || index > num_basis {
            return Err(IntegralError::IndexOutOfRange {
                path: path.to_path_buf(),
                line,
                index,
                num_basis,
            });
        }
        *slot = index - 1;
    }

    let value = fields[N]
        .parse::<f64>()
        .map_err(|e| parse_error(format!("invalid value '{}': {}", fields[N], e)))?;

    Ok((indices, value))
}

/// Largest 1-based orbital index appearing in the leading `width` columns.
fn max_index(content: &str, path: &Path, width: usize) -> Result<usize, IntegralError> {
    let mut max = 0;
    for (line, text) in records(content) {
        for field in text.split_whitespace().take(width) {
            let index = field.parse::<usize>().map_err(|e| IntegralError::Parse {
                path: path.to_path_buf(),
                line,
                message: format!("invalid orbital index '{}': {}", field, e),
            })?;
            max = max.max(index);
        }
    }
    if max == 0 {
        return Err(IntegralError::Parse {
            path: path.to_path_buf(),
            line: 1,
            message: "no matrix elements found".to_string(),
        });
    }
    Ok(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> PathBuf {
        PathBuf::from("test.dat")
    }

    #[test]
    fn test_parse_scalar() {
        let value = parse_scalar("# comment\n\n   8.002367061810450  \n", &path()).unwrap();
        assert_eq!(value, 8.002367061810450);
        assert!(matches!(
            parse_scalar("", &path()),
            Err(IntegralError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_scalar("\nabc\n", &path()),
            Err(IntegralError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_one_electron_mirrors_triangle() {
        let text = "1 1 1.0\n2 1 0.25\n2 2 1.0\n3 1 -0.5\n3 3 2.0\n";
        let m = parse_one_electron(text, &path(), 3).unwrap();
        assert_eq!(m[(0, 1)], 0.25);
        assert_eq!(m[(1, 0)], 0.25);
        assert_eq!(m[(0, 2)], -0.5);
        assert_eq!(m[(2, 0)], -0.5);
        assert_eq!(m[(1, 2)], 0.0);
        assert_eq!(m[(2, 2)], 2.0);
    }

    #[test]
    fn test_parse_one_electron_rejects_bad_lines() {
        assert!(matches!(
            parse_one_electron("1 1 1.0\n3 1 0.2\n", &path(), 2),
            Err(IntegralError::IndexOutOfRange { line: 2, index: 3, num_basis: 2, .. })
        ));
        assert!(matches!(
            parse_one_electron("0 1 1.0\n", &path(), 2),
            Err(IntegralError::IndexOutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            parse_one_electron("1 1\n", &path(), 2),
            Err(IntegralError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_one_electron("1 x 1.0\n", &path(), 2),
            Err(IntegralError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_two_electron_uses_compound_slot() {
        let text = "1 1 1 1 0.7746\n2 1 1 1 0.4441\n2 1 2 1 0.2970\n2 2 1 1 0.5697\n";
        let eri = parse_two_electron(text, &path(), 2).unwrap();
        assert_eq!(eri.get(0, 0, 0, 0), 0.7746);
        assert_eq!(eri.get(0, 0, 0, 1), 0.4441);
        assert_eq!(eri.get(0, 1, 1, 0), 0.2970);
        assert_eq!(eri.get(0, 0, 1, 1), 0.5697);
        assert_eq!(eri.get(1, 1, 1, 1), 0.0);
    }

    #[test]
    fn test_nan_entry_fails_store_validation() {
        let overlap = parse_one_electron("1 1 1.0\n2 1 NaN\n2 2 1.0\n", &path(), 2).unwrap();
        let err = IntegralStore::new(
            0.5,
            overlap,
            DMatrix::zeros(2, 2),
            DMatrix::zeros(2, 2),
            TwoElectronIntegrals::zeros(2),
        )
        .unwrap_err();
        assert!(matches!(err, IntegralError::NonFinite { name: "overlap", .. }));
    }

    #[test]
    fn test_max_index() {
        assert_eq!(max_index("1 1 1.0\n7 3 0.1\n4 4 1.0\n", &path(), 2).unwrap(), 7);
        assert!(max_index("# nothing\n", &path(), 2).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let files = IntegralFiles::in_directory("/nonexistent/integral/set");
        match files.load(None) {
            Err(IntegralError::Io { path, .. }) => {
                assert!(path.ends_with("s.dat"));
            }
            other => panic!("expected I/O error, got {:?}", other.map(|s| s.num_basis())),
        }
    }
}
