//! AO → MO transformation of the two-electron integrals.

extern crate nalgebra as na;

use crate::error::ScfError;
use integrals::{canonical_quartets, num_pairs, pair_index, TwoElectronIntegrals};
use itertools::iproduct;
use na::DMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Strategy for computing (ij|kl) = Σ_pqrs C(p,i) C(q,j) C(r,k) C(s,l) (pq|rs).
///
/// `coeffs` is square, AO rows by MO columns.
pub trait IntegralTransform: Send + Sync {
    fn name(&self) -> &'static str;

    fn transform(&self, ao: &TwoElectronIntegrals, coeffs: &DMatrix<f64>) -> TwoElectronIntegrals;
}

/// One O(N^4) sum per symmetry-unique MO quartet, O(N^8) overall.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectTransform;

impl IntegralTransform for DirectTransform {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn transform(&self, ao: &TwoElectronIntegrals, coeffs: &DMatrix<f64>) -> TwoElectronIntegrals {
        let n = ao.num_basis();
        info!("Transforming integrals to MO basis (direct, O(N^8), N = {})", n);

        let quartets: Vec<(usize, usize, usize, usize)> = canonical_quartets(n).collect();
        let values: Vec<f64> = quartets
            .par_iter()
            .map(|&(i, j, k, l)| {
                let mut value = 0.0;
                for (p, q, r, s) in iproduct!(0..n, 0..n, 0..n, 0..n) {
                    value += coeffs[(p, i)]
                        * coeffs[(q, j)]
                        * coeffs[(r, k)]
                        * coeffs[(s, l)]
                        * ao.get(p, q, r, s);
                }
                value
            })
            .collect();

        let mut mo = TwoElectronIntegrals::zeros(n);
        for (&(i, j, k, l), value) in quartets.iter().zip(values) {
            mo.set(i, j, k, l, value);
        }
        mo
    }
}

/// Two half-transformations, each applying CᵀXC to one N×N block per
/// index pair, O(N^5) overall.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuarterTransform;

impl IntegralTransform for QuarterTransform {
    fn name(&self) -> &'static str {
        "quarter"
    }

    fn transform(&self, ao: &TwoElectronIntegrals, coeffs: &DMatrix<f64>) -> TwoElectronIntegrals {
        let n = ao.num_basis();
        info!("Transforming integrals to MO basis (quarter, O(N^5), N = {})", n);

        let ct = coeffs.transpose();
        // Position in `pairs` equals the pair's packed index.
        let pairs: Vec<(usize, usize)> =
            (0..n).flat_map(|p| (0..=p).map(move |q| (p, q))).collect();
        debug_assert_eq!(pairs.len(), num_pairs(n));

        // half[pq][kl] = (pq|kl), AO bra and MO ket
        let half: Vec<Vec<f64>> = pairs
            .par_iter()
            .map(|&(p, q)| {
                let x = DMatrix::from_fn(n, n, |r, s| ao.get(p, q, r, s));
                let y = &ct * x * coeffs;
                pairs.iter().map(|&(k, l)| y[(k, l)]).collect()
            })
            .collect();

        // full[kl][ij] = (ij|kl), all MO
        let full: Vec<Vec<f64>> = (0..pairs.len())
            .into_par_iter()
            .map(|kl| {
                let x = DMatrix::from_fn(n, n, |p, q| half[pair_index(p, q)][kl]);
                let y = &ct * x * coeffs;
                pairs.iter().map(|&(i, j)| y[(i, j)]).collect()
            })
            .collect();

        let mut mo = TwoElectronIntegrals::zeros(n);
        for (kl, &(k, l)) in pairs.iter().enumerate() {
            for (ij, &(i, j)) in pairs.iter().enumerate().skip(kl) {
                mo.set(i, j, k, l, full[kl][ij]);
            }
        }
        mo
    }
}

/// Configuration-level choice of [`IntegralTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformAlgorithm {
    Direct,
    #[default]
    Quarter,
}

impl TransformAlgorithm {
    pub fn strategy(&self) -> Box<dyn IntegralTransform> {
        match self {
            TransformAlgorithm::Direct => Box::new(DirectTransform),
            TransformAlgorithm::Quarter => Box::new(QuarterTransform),
        }
    }
}

impl FromStr for TransformAlgorithm {
    type Err = ScfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(TransformAlgorithm::Direct),
            "quarter" => Ok(TransformAlgorithm::Quarter),
            _ => Err(ScfError::UnknownTransform(s.to_string())),
        }
    }
}

impl fmt::Display for TransformAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformAlgorithm::Direct => f.write_str("direct"),
            TransformAlgorithm::Quarter => f.write_str("quarter"),
        }
    }
}
