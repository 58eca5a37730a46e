//! Inner-product FE, CCA-secure in the random-oracle-free sense of Damgård's
//! construction.
//!
//! Grounded on `examples/original_source/src/innerprod/fullysec/damgard.c`:
//! same ElGamal-style group as [`crate::schemes::ddh`], but with a second,
//! independently-sampled generator `h = g^t0` for random `t0`, two secret
//! vectors `s, t`, and a functional key that is a pair `(⟨s,y⟩, ⟨t,y⟩) mod
//! (p-1)`.

use num_bigint::BigInt;
use num_traits::One;
use rand::rngs::OsRng;

use crate::dlog::baby_giant_signed;
use crate::error::{CfeError, Result};
use crate::math::bigint::{mod_floor, mod_inverse, mod_pow, uniform_range};
use crate::math::{elgamal_init, ElGamalGroup, IntVector};

/// Immutable parameters for a Damgård scheme instance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DamgardParams {
    /// Vector length `ℓ`.
    pub ell: usize,
    /// Modulus bit length `k`.
    pub modulus_bits: usize,
    /// Coordinate bound `B`.
    pub bound: BigInt,
}

/// A Damgård scheme instance.
#[derive(Debug, Clone)]
pub struct Damgard {
    params: DamgardParams,
    group: ElGamalGroup,
    /// The second generator `h`, of the same order-`q` subgroup as `g`.
    h: BigInt,
}

/// Master secret key: the pair of exponent vectors `(s, t) ∈ (Z_{p-1}^ℓ)²`.
#[derive(Debug, Clone)]
pub struct DamgardMasterSecretKey {
    pub s: IntVector,
    pub t: IntVector,
}

/// Master public key: `(g^{s_i} · h^{t_i})_i`.
#[derive(Debug, Clone)]
pub struct DamgardMasterPublicKey(pub Vec<BigInt>);

/// A functional key for a vector `y`: `(⟨s,y⟩, ⟨t,y⟩) mod (p-1)`.
#[derive(Debug, Clone)]
pub struct DamgardFeKey {
    pub key1: BigInt,
    pub key2: BigInt,
}

/// A ciphertext for a plaintext vector `x`.
#[derive(Debug, Clone)]
pub struct DamgardCiphertext {
    /// `g^r mod p`.
    pub c0: BigInt,
    /// `h^r mod p`.
    pub c1: BigInt,
    /// `(MPK_i^r · g^{x_i} mod p)_i`.
    pub c: Vec<BigInt>,
}

impl Damgard {
    /// `S_init`: same preconditions as [`crate::schemes::ddh::Ddh::init`],
    /// plus a freshly sampled second generator `h`.
    #[tracing::instrument(skip(params), fields(ell = params.ell, modulus_bits = params.modulus_bits))]
    pub fn init(params: DamgardParams) -> Result<Damgard> {
        let mut rng = OsRng;
        let group = elgamal_init(&mut rng, params.modulus_bits)?;
        let bound_sq = &params.bound * &params.bound;
        let lhs = BigInt::from(params.ell as u64) * bound_sq;
        if lhs >= group.p {
            return Err(CfeError::PreconditionFailed(format!(
                "ell * bound^2 = {} is not < p ({} bits)",
                lhs, params.modulus_bits
            )));
        }
        let exp = uniform_range(&mut rng, &BigInt::one(), &group.p);
        let h = mod_pow(&group.g, &exp, &group.p).expect("p > 0");
        Ok(Damgard { params, group, h })
    }

    /// The underlying ElGamal-style group, exposed so multi-client wrappers
    /// (e.g. [`crate::schemes::damgard_multi::decentralized`]) can share its
    /// parameters for their own Diffie-Hellman derivations.
    pub fn group(&self) -> &ElGamalGroup {
        &self.group
    }

    /// `S_generate_master_keys`.
    #[tracing::instrument(skip_all)]
    pub fn generate_master_keys(&self) -> (DamgardMasterSecretKey, DamgardMasterPublicKey) {
        let mut rng = OsRng;
        let p_minus_one = &self.group.p - 1;
        let mut s = Vec::with_capacity(self.params.ell);
        let mut t = Vec::with_capacity(self.params.ell);
        let mut mpk = Vec::with_capacity(self.params.ell);
        for _ in 0..self.params.ell {
            let si = uniform_range(&mut rng, &BigInt::from(2), &p_minus_one);
            let ti = uniform_range(&mut rng, &BigInt::from(2), &p_minus_one);
            let y1 = mod_pow(&self.group.g, &si, &self.group.p).expect("p > 0");
            let y2 = mod_pow(&self.h, &ti, &self.group.p).expect("p > 0");
            mpk.push(mod_floor(&(y1 * y2), &self.group.p));
            s.push(si);
            t.push(ti);
        }
        (
            DamgardMasterSecretKey {
                s: IntVector(s),
                t: IntVector(t),
            },
            DamgardMasterPublicKey(mpk),
        )
    }

    /// `S_derive_fe_key`.
    #[tracing::instrument(skip(self, msk, y))]
    pub fn derive_fe_key(&self, msk: &DamgardMasterSecretKey, y: &IntVector) -> Result<DamgardFeKey> {
        y.check_bound(&self.params.bound)?;
        let p_minus_one = &self.group.p - 1;
        Ok(DamgardFeKey {
            key1: mod_floor(&msk.s.dot(y)?, &p_minus_one),
            key2: mod_floor(&msk.t.dot(y)?, &p_minus_one),
        })
    }

    /// `S_encrypt`.
    #[tracing::instrument(skip(self, mpk, x))]
    pub fn encrypt(&self, mpk: &DamgardMasterPublicKey, x: &IntVector) -> Result<DamgardCiphertext> {
        x.check_bound(&self.params.bound)?;
        if x.len() != self.params.ell || mpk.0.len() != self.params.ell {
            return Err(CfeError::MalformedInput("Damgard: dimension mismatch".into()));
        }
        let mut rng = OsRng;
        let p = &self.group.p;
        let r = uniform_range(&mut rng, &BigInt::one(), p);
        let c0 = mod_pow(&self.group.g, &r, p).expect("p > 0");
        let c1 = mod_pow(&self.h, &r, p).expect("p > 0");
        let c: Vec<BigInt> = mpk
            .0
            .iter()
            .zip(x.0.iter())
            .map(|(mpk_i, xi)| {
                let a = mod_pow(mpk_i, &r, p).expect("p > 0");
                let b = mod_pow(&self.group.g, xi, p).expect("p > 0");
                mod_floor(&(a * b), p)
            })
            .collect();
        Ok(DamgardCiphertext { c0, c1, c })
    }

    /// `S_decrypt`.
    #[tracing::instrument(skip(self, ct, key, y))]
    pub fn decrypt(&self, ct: &DamgardCiphertext, key: &DamgardFeKey, y: &IntVector) -> Result<BigInt> {
        y.check_bound(&self.params.bound)?;
        if ct.c.len() != y.len() {
            return Err(CfeError::MalformedCipher(
                "Damgard: ciphertext/key length mismatch".into(),
            ));
        }
        let p = &self.group.p;
        let mut num = BigInt::one();
        for (ci, yi) in ct.c.iter().zip(y.0.iter()) {
            num = mod_floor(&(num * mod_pow(ci, yi, p).expect("p > 0")), p);
        }
        let t1 = mod_pow(&ct.c0, &key.key1, p).expect("p > 0");
        let t2 = mod_pow(&ct.c1, &key.key2, p).expect("p > 0");
        let denom = mod_floor(&(t1 * t2), p);
        let denom_inv = mod_inverse(&denom, p)
            .ok_or_else(|| CfeError::DLogCalcFailed("ciphertext denominator not invertible mod p".into()))?;
        let u = mod_floor(&(num * denom_inv), p);

        let bound = BigInt::from(self.params.ell as u64) * &self.params.bound * &self.params.bound;
        baby_giant_signed(&u, &self.group.g, p, &self.group.q, &bound)
    }
}
