//! Arbitrary-precision integer primitives (L0).
//!
//! The schemes in this crate need unbounded integers: an RSA-style modulus
//! for Paillier, a configurable-bit-length safe prime for DDH/Damgård, and
//! LWE moduli chosen to dominate accumulated noise. `ark_bn254::Fr` (used by
//! the pairing-group layer) is fixed at ~254 bits and cannot serve this role,
//! so this layer is built directly on `num-bigint`.

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::RngCore;

/// The crate's unbounded signed integer type.
pub type Int = BigInt;

/// Reduce `a` into the canonical representative `[0, m)`, unlike `%` which
/// keeps the sign of `a`.
pub fn mod_floor(a: &Int, m: &Int) -> Int {
    let r = a.mod_floor(m);
    if r.is_negative() {
        r + m
    } else {
        r
    }
}

/// Modular exponentiation `base^exp mod m`, `m > 0`. `exp` may be negative,
/// in which case the modular inverse of `base` is used.
pub fn mod_pow(base: &Int, exp: &Int, m: &Int) -> Option<Int> {
    if exp.is_negative() {
        let inv = mod_inverse(base, m)?;
        let pos_exp = -exp;
        Some(mod_pow_unsigned(&inv, &pos_exp.to_biguint().unwrap(), m))
    } else {
        Some(mod_pow_unsigned(base, &exp.to_biguint().unwrap(), m))
    }
}

fn mod_pow_unsigned(base: &Int, exp: &BigUint, m: &Int) -> Int {
    let base_u = mod_floor(base, m).to_biguint().unwrap();
    let m_u = m.to_biguint().unwrap();
    let r = base_u.modpow(exp, &m_u);
    Int::from_biguint(Sign::Plus, r)
}

/// Modular multiplicative inverse of `a` modulo `m`, via the extended
/// Euclidean algorithm. Returns `None` if `gcd(a, m) != 1`.
pub fn mod_inverse(a: &Int, m: &Int) -> Option<Int> {
    let (g, x, _) = extended_gcd(&mod_floor(a, m), m);
    if g != Int::one() {
        None
    } else {
        Some(mod_floor(&x, m))
    }
}

/// Extended Euclidean algorithm: returns `(g, x, y)` such that
/// `a*x + b*y = g = gcd(a, b)`.
pub fn extended_gcd(a: &Int, b: &Int) -> (Int, Int, Int) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (Int::one(), Int::zero());
    let (mut old_t, mut t) = (Int::zero(), Int::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let new_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, new_r);
        let new_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, new_s);
        let new_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, new_t);
    }
    (old_r, old_s, old_t)
}

/// Sample a uniform integer in `[lo, hi)` using the supplied RNG.
pub fn uniform_range<R: RngCore + ?Sized>(rng: &mut R, lo: &Int, hi: &Int) -> Int {
    assert!(lo < hi, "uniform_range: empty interval");
    rng.gen_bigint_range(lo, hi)
}

/// Sample a uniform integer in `[0, n)`.
pub fn uniform_below<R: RngCore + ?Sized>(rng: &mut R, n: &Int) -> Int {
    uniform_range(rng, &Int::zero(), n)
}

/// Signed bound check: `true` iff `-bound < v < bound`.
pub fn within_bound(v: &Int, bound: &Int) -> bool {
    v > &(-bound) && v < bound
}

/// Centered representative of `v mod m` in `(-m/2, m/2]`.
pub fn center_mod(v: &Int, m: &Int) -> Int {
    let r = mod_floor(v, m);
    let half = m >> 1;
    if r > half {
        r - m
    } else {
        r
    }
}

/// Integer square root (floor), via `num-bigint`'s Newton iteration.
pub fn isqrt(n: &Int) -> Int {
    n.sqrt()
}

/// Ceiling of `a / b` for positive `a, b`.
pub fn ceil_div(a: &Int, b: &Int) -> Int {
    let (q, r) = a.div_rem(b);
    if r.is_zero() {
        q
    } else {
        q + 1
    }
}
