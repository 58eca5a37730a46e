//! L5: the shared policy engine — boolean-expression-to-MSP translation and
//! the linear-algebra procedures used to recover ABE reconstruction
//! coefficients.

pub mod dippe_policy;
pub mod linalg;
pub mod msp;

pub use dippe_policy::{attribute_vector, conjunction_policy_vectors, threshold_policy_vectors};
pub use linalg::{gaussian_elimination_solve, mat_inverse_mod};
pub use msp::Msp;
