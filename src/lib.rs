//! Crate root: core type aliases and the public surface of the functional
//! encryption core.
//!
//! This crate implements the mathematical substrate and scheme state
//! machines of a functional-encryption (FE) library: given a ciphertext
//! encrypting `x` and a functional key for `f`, decryption recovers `f(x)`
//! and nothing else. Two function families are supported: inner-product
//! (`f_y(x) = ⟨x, y⟩`, including multi-client/decentralized variants and a
//! quadratic generalization `xᵀMy`) and attribute-based access control
//! (key-policy and ciphertext-policy).
//!
//! ## Layering
//!
//! - [`math`] — arbitrary-precision integers, safe-prime/ElGamal setup,
//!   dense integer vector/matrix containers.
//! - [`group`] — BN254 pairing-group wrappers (`G1`, `G2`, `GT`).
//! - [`sample`] — uniform and discrete Gaussian samplers.
//! - [`dlog`] — baby-step/giant-step and Pollard rho discrete-log recovery.
//! - [`policy`] — boolean-expression-to-MSP translation and linear solving.
//! - [`schemes`] — the FE and ABE schemes themselves.
//!
//! Each scheme composes the layers below it; schemes never reach into one
//! another (see the design notes in `DESIGN.md`).

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

/// Flat error type shared across every layer and scheme.
pub mod error;
/// L0/L1: big integers, safe primes, vector/matrix containers.
pub mod math;
/// L2: BN254 pairing-group wrappers.
pub mod group;
/// L3: uniform and discrete Gaussian samplers.
pub mod sample;
/// L4 (discrete-log half): baby-step/giant-step, Pollard rho.
pub mod dlog;
/// L5: boolean-to-MSP policy engine and linear algebra over `Z_p`.
pub mod policy;
/// L6: the FE and ABE schemes.
pub mod schemes;

/// Scalar field of the BN254 curve.
pub type F = ark_bn254::Fr;
/// `G1` affine points of the BN254 curve.
pub type G1 = ark_bn254::G1Affine;
/// `G2` affine points of the BN254 curve.
pub type G2 = ark_bn254::G2Affine;
/// The pairing target group.
pub type GT = group::Gt;

/// The fixed `G1` generator.
pub fn g1_generator() -> G1 {
    use ark_ec::{CurveGroup, Group};
    ark_bn254::G1Projective::generator().into_affine()
}

/// The fixed `G2` generator.
pub fn g2_generator() -> G2 {
    use ark_ec::{CurveGroup, Group};
    ark_bn254::G2Projective::generator().into_affine()
}

pub use error::{CfeError, Result};
