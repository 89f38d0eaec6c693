//! Symmetric (Löwdin) orthogonalization.

extern crate nalgebra as na;

use crate::error::ScfError;
use integrals::IntegralError;
use na::{DMatrix, DVector};

/// Compute X = S^(-1/2) = L Λ^(-1/2) Lᵀ from the eigendecomposition S = L Λ Lᵀ.
///
/// XᵀSX is the identity. A non-positive eigenvalue means the basis is
/// linearly dependent; no eigenvalues are discarded. Non-finite entries are
/// rejected before the eigensolver sees them.
pub fn orthogonalizer(overlap: &DMatrix<f64>) -> Result<DMatrix<f64>, ScfError> {
    if let Some((index, &value)) = overlap.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(IntegralError::NonFinite {
            name: "overlap",
            index,
            value,
        }
        .into());
    }

    let eig = overlap.clone().symmetric_eigen();

    let mut inv_sqrt_vals = DVector::zeros(eig.eigenvalues.len());
    for (index, &eigenvalue) in eig.eigenvalues.iter().enumerate() {
        if !(eigenvalue > 0.0) {
            return Err(ScfError::LinearlyDependentBasis { index, eigenvalue });
        }
        inv_sqrt_vals[index] = 1.0 / eigenvalue.sqrt();
    }

    let inv_sqrt_d = DMatrix::from_diagonal(&inv_sqrt_vals);
    Ok(&eig.eigenvectors * inv_sqrt_d * eig.eigenvectors.transpose())
}
