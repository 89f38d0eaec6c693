use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating an integral set.
#[derive(Error, Debug)]
pub enum IntegralError {
    /// A one-electron matrix does not have the expected N×N shape.
    #[error("{name} matrix has shape {rows}x{cols}, expected {expected}x{expected}")]
    DimensionMismatch {
        name: &'static str,
        rows: usize,
        cols: usize,
        expected: usize,
    },

    /// A one-electron matrix is not symmetric within tolerance.
    #[error("{name} matrix is not symmetric: element ({i}, {j}) differs from its transpose by {deviation:.3e}")]
    NotSymmetric {
        name: &'static str,
        i: usize,
        j: usize,
        deviation: f64,
    },

    /// An integral is NaN or infinite. `index` is the column-major element
    /// position for matrices, the compound index for the two-electron array.
    #[error("{name} contains a non-finite value {value} at position {index}")]
    NonFinite {
        name: &'static str,
        index: usize,
        value: f64,
    },

    /// The compressed two-electron array has the wrong length for the basis size.
    #[error("two-electron integral array has {actual} elements, expected {expected} for {num_basis} orbitals")]
    TensorLength {
        actual: usize,
        expected: usize,
        num_basis: usize,
    },

    /// An orbital index in an input file lies outside the basis.
    #[error("{path}:{line}: orbital index {index} outside of basis of size {num_basis}")]
    IndexOutOfRange {
        path: PathBuf,
        line: usize,
        index: usize,
        num_basis: usize,
    },

    /// A line of an input file could not be parsed.
    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("I/O error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
