//! Helper policy-vector constructions for DIPPE: conjunctions of
//! attributes and exact-threshold policies, supplementing the base
//! construction with constructions the original implements:
//! policies over fixed-width bit patterns.
//!
//! DIPPE decryption succeeds iff `⟨v, w⟩ = 0 mod r`. Both helpers below
//! build a `(v, w)` pair realizing the named policy over `n` boolean-valued
//! positions.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::{CfeError, Result};
use crate::math::IntVector;

/// Build `(v, w)` for a conjunction policy over `n` positions: `w` (the
/// attribute vector of a decryptor) satisfies the policy iff every position
/// named `required` is set to `1` in `w`.
///
/// Construction: `v_i = 1` for `i` in `required`, `v_i = 0` elsewhere, and a
/// fresh last coordinate `v_n = -|required|`. `w_i = bit_i` for `i < n`,
/// `w_n = 1`. Then `⟨v, w⟩ = Σ_{i ∈ required} bit_i - |required|`, which is
/// zero exactly when every required bit is `1`.
pub fn conjunction_policy_vectors(n: usize, required: &[usize]) -> Result<IntVector> {
    for &i in required {
        if i >= n {
            return Err(CfeError::MalformedPolicy(format!(
                "conjunction policy position {} out of range for n={}",
                i, n
            )));
        }
    }
    let mut v = vec![BigInt::zero(); n + 1];
    for &i in required {
        v[i] = BigInt::one();
    }
    v[n] = -BigInt::from(required.len());
    Ok(IntVector(v))
}

/// Build the attribute vector `w` for a bit pattern `bits` (length `n`)
/// against a policy vector produced by [`conjunction_policy_vectors`] or
/// [`threshold_policy_vectors`].
pub fn attribute_vector(bits: &[bool]) -> IntVector {
    let mut w: Vec<BigInt> = bits
        .iter()
        .map(|&b| if b { BigInt::one() } else { BigInt::zero() })
        .collect();
    w.push(BigInt::one());
    IntVector(w)
}

/// Build the policy vector `v` for an exact-threshold policy over `n`
/// positions: satisfied iff exactly `threshold` of the `n` bits are set.
///
/// Construction: `v_i = 1` for `i < n`, `v_n = -threshold`, so
/// `⟨v, w⟩ = (Σ bit_i) - threshold`.
pub fn threshold_policy_vectors(n: usize, threshold: usize) -> Result<IntVector> {
    if threshold > n {
        return Err(CfeError::MalformedPolicy(format!(
            "threshold {} exceeds position count {}",
            threshold, n
        )));
    }
    let mut v = vec![BigInt::one(); n];
    v.push(-BigInt::from(threshold));
    Ok(IntVector(v))
}
