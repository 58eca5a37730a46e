//! Uniform sampling, grounded on
//! `examples/original_source/src/sample/uniform.c`: rejection sampling on
//! the smallest byte length containing the bound, discarding draws `>= n`.
//!
//! `num-bigint`'s `gen_bigint_range` already performs exactly this rejection
//! scheme, so this module is a thin, spec-shaped wrapper over
//! [`crate::math::bigint`].

use num_bigint::BigInt;
use rand::RngCore;

use crate::math::bigint::{uniform_below, uniform_range};
use crate::math::IntVector;

/// Sample a uniform integer in `[0, n)`.
pub fn uniform_mod<R: RngCore + ?Sized>(rng: &mut R, n: &BigInt) -> BigInt {
    uniform_below(rng, n)
}

/// Sample a uniform integer in `[lo, hi)`.
pub fn uniform_range_sample<R: RngCore + ?Sized>(rng: &mut R, lo: &BigInt, hi: &BigInt) -> BigInt {
    uniform_range(rng, lo, hi)
}

/// Sample a length-`len` vector of uniform integers in `[0, n)`.
pub fn uniform_vec<R: RngCore + ?Sized>(rng: &mut R, len: usize, n: &BigInt) -> IntVector {
    IntVector((0..len).map(|_| uniform_mod(rng, n)).collect())
}

/// Sample a length-`len` vector of uniform integers in `[lo, hi)`.
pub fn uniform_range_vec<R: RngCore + ?Sized>(
    rng: &mut R,
    len: usize,
    lo: &BigInt,
    hi: &BigInt,
) -> IntVector {
    IntVector((0..len).map(|_| uniform_range_sample(rng, lo, hi)).collect())
}

/// A single unbiased random bit.
pub fn bit_sample<R: RngCore + ?Sized>(rng: &mut R) -> bool {
    rng.next_u32() & 1 == 1
}
