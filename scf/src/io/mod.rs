//! Input/Output operations for SCF calculations
//!
//! This module handles logging setup and integral loading.

mod integral_loader;
mod output;

pub use integral_loader::load_integrals;
pub use output::setup_output;
