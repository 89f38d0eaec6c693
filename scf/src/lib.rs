//! Closed-shell Hartree-Fock with a second-order Møller-Plesset correction.
//!
//! The library takes a precomputed [`IntegralStore`], iterates the restricted
//! Hartree-Fock equations to self-consistency with [`RestrictedSCF`] and then
//! evaluates the MP2 correlation energy with [`MP2`].

pub mod error;
pub mod mp2_impl;
pub mod scf_impl;

#[cfg(test)]
mod test_systems;

pub use error::ScfError;
pub use integrals::{IntegralFiles, IntegralStore, TwoElectronIntegrals};
pub use mp2_impl::{
    DirectTransform, IntegralTransform, Mp2Result, QuarterTransform, TransformAlgorithm, MP2,
};
pub use scf_impl::{
    orthogonalizer, Convergence, RestrictedSCF, ScfObserver, ScfOptions, ScfOutcome, ScfSnapshot,
    ScfSolution,
};
