//! L2: BN254 pairing-group wrappers — `G1`, `G2`, `GT`, vector/matrix
//! containers over each, scalar multiplication, pairing, and hash-to-curve.
//!
//! Kept thin per the design notes: everything here is a direct wrapper over
//! `ark-bn254`/`ark-ec`/`ark-ff`, so swapping the pairing-friendly curve
//! library would only touch this module.

pub mod hash;
pub mod pairing;
pub mod points;
pub mod scalar;

pub use hash::hash_to_group;
pub use pairing::{gt_generator, gt_scale, pair, Gt, GtVector};
pub use points::{GroupMatrix, GroupVector};
pub use scalar::{int_to_scalar, scalar_to_int};
