//! Baby-step/giant-step discrete log recovery over `Z_p^*` (L4).
//!
//! Grounded on `cfe_baby_giant`/`cfe_baby_giant_with_neg` in
//! `examples/original_source/src/internal/dlog.c`: build a hash table of
//! `g^i mod p` for `i ∈ [0, m)`, `m = ⌈√bound⌉ + 1`, then probe
//! `h · (g^{-1})^{mj} mod p` for `j ∈ [0, m)`. The signed variant retries
//! with `g^{-1}` on failure and negates the recovered exponent.

use std::collections::HashMap;

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::{CfeError, Result};
use crate::math::bigint::{isqrt, mod_inverse, mod_pow};

/// Baby-step/giant-step search for `x` such that `h = g^x mod p`, `0 <= x <
/// bound`. `order` is the known order of `g` (used to size the table when no
/// tighter `bound` is supplied); pass the same value for both when the exact
/// group order is the only available bound.
pub fn baby_giant(h: &BigInt, g: &BigInt, p: &BigInt, order: &BigInt, bound: &BigInt) -> Result<BigInt> {
    let m = isqrt(bound) + 1;
    let _ = order;

    let mut table: HashMap<Vec<u8>, BigInt> = HashMap::new();
    let mut x = BigInt::one();
    let mut i = BigInt::zero();
    while &i < &m {
        table.insert(x.to_signed_bytes_be(), i.clone());
        x = (&x * g) % p;
        i += 1;
    }

    let g_inv = mod_inverse(g, p).ok_or_else(|| {
        CfeError::DLogCalcFailed("generator has no inverse modulo p".into())
    })?;
    let z = mod_pow(&g_inv, &m, p).expect("p > 0");

    let mut gamma = mod_floor_pos(h, p);
    let mut j = BigInt::zero();
    while &j < &m {
        if let Some(i) = table.get(&gamma.to_signed_bytes_be()) {
            return Ok(&j * &m + i);
        }
        gamma = (&gamma * &z) % p;
        j += 1;
    }

    Err(CfeError::DLogNotFound {
        bound: bound.to_string(),
    })
}

fn mod_floor_pos(v: &BigInt, p: &BigInt) -> BigInt {
    let r = v % p;
    if r < BigInt::zero() {
        r + p
    } else {
        r
    }
}

/// Signed baby-step/giant-step: try the positive search first; on failure,
/// retry with `g^{-1}` and negate the recovered exponent. Recovers `x` with
/// `|x| < bound`.
pub fn baby_giant_signed(
    h: &BigInt,
    g: &BigInt,
    p: &BigInt,
    order: &BigInt,
    bound: &BigInt,
) -> Result<BigInt> {
    match baby_giant(h, g, p, order, bound) {
        Ok(x) => Ok(x),
        Err(_) => {
            let g_inv = mod_inverse(g, p)
                .ok_or_else(|| CfeError::DLogCalcFailed("generator has no inverse modulo p".into()))?;
            let x = baby_giant(h, &g_inv, p, order, bound)?;
            Ok(-x)
        }
    }
}
