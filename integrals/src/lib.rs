//! Precomputed molecular integrals for closed-shell SCF calculations.
//!
//! The crate owns the data side of a Hartree-Fock run: the one-electron
//! matrices (overlap, kinetic, nuclear attraction), the nuclear repulsion
//! energy and the two-electron repulsion integrals stored in compressed,
//! eight-fold symmetric form. Nothing here evaluates integrals; they are
//! supplied from outside, typically through [`loader`].

pub mod error;
pub mod index;
pub mod loader;
pub mod store;

pub use error::IntegralError;
pub use index::{canonical_quartets, compound_index, compressed_len, num_pairs, pair_index};
pub use loader::IntegralFiles;
pub use store::{IntegralStore, TwoElectronIntegrals};
