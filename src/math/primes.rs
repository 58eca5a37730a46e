//! Safe-prime generation and ElGamal-style group setup (L4).
//!
//! Grounded on `examples/original_source/src/internal/keygen.c`
//! (`cfe_elgamal_init`): find a safe prime `p` of the requested bit length,
//! set `q = (p-1)/2`, then find a generator `g` of the order-`q` subgroup of
//! `Z_p^*` by sampling in `[3, p)` and squaring, retrying if `g` or its
//! inverse divides `p-1` (the classic small-subgroup check).

use num_bigint::BigInt;
use num_traits::{One, Zero};
use rand::RngCore;

use crate::error::{CfeError, Result};
use crate::math::bigint::{mod_inverse, mod_pow, uniform_range};

const MILLER_RABIN_ROUNDS: usize = 40;
const MAX_PRIME_ATTEMPTS: usize = 20_000;

/// Probabilistic primality test (Miller-Rabin, `MILLER_RABIN_ROUNDS` rounds).
pub fn is_probable_prime<R: RngCore + ?Sized>(n: &BigInt, rng: &mut R) -> bool {
    if n < &BigInt::from(2) {
        return false;
    }
    let small_primes = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31];
    for &p in &small_primes {
        let p = BigInt::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - 1;
    let mut d = n_minus_one.clone();
    let mut r = 0u32;
    while (&d % 2).is_zero() {
        d /= 2;
        r += 1;
    }

    'witness: for _ in 0..MILLER_RABIN_ROUNDS {
        let a = uniform_range(rng, &BigInt::from(2), &(n - 2));
        let mut x = mod_pow(&a, &d, n).expect("modulus is positive");
        if x == BigInt::one() || x == n_minus_one {
            continue;
        }
        for _ in 0..r - 1 {
            x = mod_pow(&x, &BigInt::from(2), n).expect("modulus is positive");
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Generate a random prime of exactly `bits` bits.
pub fn random_prime<R: RngCore + ?Sized>(rng: &mut R, bits: usize) -> Result<BigInt> {
    use num_bigint::RandBigInt;
    for _ in 0..MAX_PRIME_ATTEMPTS {
        let mut candidate = rng.gen_biguint(bits as u64);
        candidate.set_bit(bits as u64 - 1, true);
        candidate.set_bit(0, true);
        let candidate = BigInt::from(candidate);
        if is_probable_prime(&candidate, rng) {
            return Ok(candidate);
        }
    }
    Err(CfeError::PrimeGenFailed {
        attempts: MAX_PRIME_ATTEMPTS,
        bits,
    })
}

/// Generate a safe prime `p` (i.e. `p` and `q = (p-1)/2` both prime) of
/// exactly `bits` bits.
pub fn random_safe_prime<R: RngCore + ?Sized>(rng: &mut R, bits: usize) -> Result<(BigInt, BigInt)> {
    use num_bigint::RandBigInt;
    for _ in 0..MAX_PRIME_ATTEMPTS {
        let mut q_bits = rng.gen_biguint(bits as u64 - 1);
        q_bits.set_bit(bits as u64 - 2, true);
        q_bits.set_bit(0, true);
        let q = BigInt::from(q_bits);
        if !is_probable_prime(&q, rng) {
            continue;
        }
        let p = &q * 2 + 1;
        if is_probable_prime(&p, rng) {
            return Ok((p, q));
        }
    }
    Err(CfeError::PrimeGenFailed {
        attempts: MAX_PRIME_ATTEMPTS,
        bits,
    })
}

/// A multiplicative group `Z_p^*` with a distinguished generator `g` of the
/// order-`q` subgroup, `p = 2q + 1` a safe prime.
#[derive(Debug, Clone)]
pub struct ElGamalGroup {
    /// The safe prime modulus.
    pub p: BigInt,
    /// `q = (p - 1) / 2`, itself prime.
    pub q: BigInt,
    /// A generator of the order-`q` subgroup of `Z_p^*`.
    pub g: BigInt,
}

/// Build an `ElGamalGroup` of the requested modulus bit length.
///
/// Ground truth: `cfe_elgamal_init` in `keygen.c` — generate a safe prime,
/// then repeatedly sample `h ∈ [3, p)`, set `g = h² mod p`, and reject `g` if
/// `g` or `g^{-1} mod p` divides `p - 1` (both indicate `g` landed in a small
/// subgroup rather than the order-`q` one).
pub fn elgamal_init<R: RngCore + ?Sized>(rng: &mut R, modulus_bits: usize) -> Result<ElGamalGroup> {
    let (p, q) = random_safe_prime(rng, modulus_bits)?;
    let p_minus_one = &p - 1;

    for _ in 0..MAX_PRIME_ATTEMPTS {
        let h = uniform_range(rng, &BigInt::from(3), &p);
        let g = mod_pow(&h, &BigInt::from(2), &p).expect("p > 0");
        if g.is_zero() || g == BigInt::one() {
            continue;
        }
        let g_inv = match mod_inverse(&g, &p) {
            Some(v) => v,
            None => continue,
        };
        let divides = |d: &BigInt| !d.is_zero() && (&p_minus_one % d).is_zero();
        if divides(&g) || divides(&g_inv) {
            continue;
        }
        return Ok(ElGamalGroup { p, q, g });
    }
    Err(CfeError::PubKeyGenFailed(
        "could not find a subgroup generator".into(),
    ))
}
