//! Pollard's rho discrete-log algorithm, a fallback for bounds too large for
//! baby-step/giant-step's `O(√bound)` memory.
//!
//! Grounded on `cfe_pollard_rho` in
//! `examples/original_source/src/internal/dlog.c`: three-class iteration
//! function partitioning the group by `x mod 3`, tortoise-and-hare cycle
//! detection, and on collision a `gcd`-based recovery with the standard
//! fallback of enumerating `q + k·(n/d)` for `k < d` when `gcd(r, n) > 1`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{CfeError, Result};
use crate::math::bigint::{mod_floor, mod_inverse, mod_pow};

const MAX_ITERATIONS: u64 = 1 << 24;

struct State {
    x: BigInt,
    a: BigInt,
    b: BigInt,
}

fn iterate(s: &mut State, h: &BigInt, g: &BigInt, p: &BigInt, n: &BigInt) {
    let r = mod_floor(&s.x, &BigInt::from(3));
    if r == BigInt::zero() {
        s.x = &s.x * &s.x;
        s.a *= 2;
        s.b *= 2;
    } else if r == BigInt::one() {
        s.x = &s.x * g;
        s.a += 1;
    } else {
        s.x = &s.x * h;
        s.b += 1;
    }
    s.x = mod_floor(&s.x, p);
    s.a = mod_floor(&s.a, n);
    s.b = mod_floor(&s.b, n);
}

/// Recover `x` such that `h = g^x mod p`, given the order `n` of `g`.
pub fn pollard_rho(h: &BigInt, g: &BigInt, p: &BigInt, n: &BigInt) -> Result<BigInt> {
    let mut s1 = State {
        x: BigInt::one(),
        a: BigInt::zero(),
        b: BigInt::zero(),
    };
    let mut s2 = State {
        x: BigInt::one(),
        a: BigInt::zero(),
        b: BigInt::zero(),
    };

    for _ in 0..MAX_ITERATIONS {
        iterate(&mut s1, h, g, p, n);
        iterate(&mut s2, h, g, p, n);
        iterate(&mut s2, h, g, p, n);

        if s1.x == s2.x {
            let r = mod_floor(&(&s2.b - &s1.b), n);
            let t = mod_floor(&(&s1.a - &s2.a), n);

            if r.is_zero() {
                return Err(CfeError::DLogCalcFailed(
                    "pollard rho collision was degenerate (r = 0)".into(),
                ));
            }

            let d = r.gcd(n);
            if d == BigInt::one() {
                let q = mod_inverse(&r, n).ok_or_else(|| {
                    CfeError::DLogCalcFailed("gcd(r, n) = 1 but inverse not found".into())
                })?;
                return Ok(mod_floor(&(q * t), n));
            }

            let r_d = &r / &d;
            let t_d = &t / &d;
            let n_div_d = n / &d;
            let mut q = mod_inverse(&r_d, &n_div_d)
                .ok_or_else(|| CfeError::DLogCalcFailed("no inverse of r/d mod n/d".into()))?;
            q = mod_floor(&(q * &t_d), &n_div_d);

            let mut k = BigInt::zero();
            while k < d {
                let candidate = mod_pow(g, &q, p).expect("p > 0");
                if &candidate == h {
                    return Ok(q);
                }
                q += &n_div_d;
                k += 1;
            }
        }
    }

    Err(CfeError::DLogNotFound {
        bound: n.to_string(),
    })
}
