//! Discrete-log recovery adapted to the pairing target group `GT` (`Fq12`
//! elements), used by FH-IPE, the quadratic scheme, GPSW, and FAME to
//! recover the final integer result from a `GT` encoding.
//!
//! Same baby-step/giant-step shape as [`crate::dlog::bsgs`], keyed by the
//! element's canonical serialization rather than its residue mod `p`.

use std::collections::HashMap;

use ark_ff::Zero;
use ark_serialize::CanonicalSerialize;
use num_bigint::BigInt;
use num_traits::Zero as _;

use crate::error::{CfeError, Result};
use crate::group::{gt_scale, Gt};
use crate::math::bigint::isqrt;

fn key_bytes(g: &Gt) -> Vec<u8> {
    let mut buf = Vec::new();
    g.serialize_compressed(&mut buf).expect("GT serialization cannot fail");
    buf
}

/// Recover `x` with `0 <= x < bound` such that `h = base^x` in `GT`.
pub fn baby_giant_gt(h: &Gt, base: &Gt, bound: &BigInt) -> Result<BigInt> {
    let m = isqrt(bound) + 1;

    let mut table: HashMap<Vec<u8>, BigInt> = HashMap::new();
    let mut acc = Gt::zero();
    let mut i = BigInt::zero();
    while &i < &m {
        table.insert(key_bytes(&acc), i.clone());
        acc += *base;
        i += 1;
    }

    let base_inv = -*base;
    let step = gt_scale(&base_inv, &m);

    let mut gamma = *h;
    let mut j = BigInt::zero();
    while &j < &m {
        if let Some(i) = table.get(&key_bytes(&gamma)) {
            return Ok(&j * &m + i);
        }
        gamma += step;
        j += 1;
    }

    Err(CfeError::DLogNotFound {
        bound: bound.to_string(),
    })
}

/// Signed variant: try the positive search, then retry with `base^{-1}` and
/// negate on success.
pub fn baby_giant_gt_signed(h: &Gt, base: &Gt, bound: &BigInt) -> Result<BigInt> {
    match baby_giant_gt(h, base, bound) {
        Ok(x) => Ok(x),
        Err(_) => {
            let base_inv = -*base;
            let x = baby_giant_gt(h, &base_inv, bound)?;
            Ok(-x)
        }
    }
}
