use integrals::IntegralError;
use thiserror::Error;

/// Failures of the SCF and MP2 stages.
#[derive(Error, Debug)]
pub enum ScfError {
    /// The overlap matrix has a non-positive eigenvalue, i.e. the basis is
    /// linearly dependent and S^(-1/2) does not exist.
    #[error("overlap matrix eigenvalue {index} is {eigenvalue:.3e}; the basis is linearly dependent")]
    LinearlyDependentBasis { index: usize, eigenvalue: f64 },

    #[error("{num_occ} occupied orbitals requested but the basis has only {num_basis} functions")]
    InvalidOccupation { num_occ: usize, num_basis: usize },

    /// Both convergence criteria were not met within the cycle limit.
    #[error(
        "SCF failed to converge after {max_cycle} cycles (dE = {delta_energy:.3e}, rms(D) = {rms_density:.3e})"
    )]
    NotConverged {
        max_cycle: usize,
        delta_energy: f64,
        rms_density: f64,
    },

    /// An SCF solution was paired with integrals over a different basis.
    #[error("SCF solution spans {solution} basis functions but the integral set has {integrals}")]
    BasisMismatch { solution: usize, integrals: usize },

    /// An MP2 energy denominator vanished.
    #[error(
        "degenerate orbitals: denominator e{i} + e{j} - e{a} - e{b} = {denominator:.3e} in MP2 sum"
    )]
    DegenerateOrbitals {
        i: usize,
        j: usize,
        a: usize,
        b: usize,
        denominator: f64,
    },

    #[error("unknown integral transformation '{0}' (expected 'direct' or 'quarter')")]
    UnknownTransform(String),

    #[error(transparent)]
    Integrals(#[from] IntegralError),
}
