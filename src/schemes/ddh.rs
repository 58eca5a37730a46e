//! Inner-product FE from DDH.
//!
//! Grounded on `examples/original_source/src/innerprod/simple/ddh.c`:
//! setup picks an ElGamal-style safe-prime group, the master secret is a
//! vector of exponents, a functional key for `y` is `⟨s, y⟩ mod (p-1)`, and
//! decryption recovers `⟨x, y⟩` via signed baby-step/giant-step within bound
//! `ℓ·B²`.

use num_bigint::BigInt;
use num_traits::One;
use rand::rngs::OsRng;

use crate::dlog::baby_giant_signed;
use crate::error::{CfeError, Result};
use crate::math::bigint::{mod_floor, mod_pow, uniform_range};
use crate::math::{elgamal_init, ElGamalGroup, IntVector};

/// Immutable parameters for a DDH scheme instance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DdhParams {
    /// Vector length `ℓ`.
    pub ell: usize,
    /// Modulus bit length `k`.
    pub modulus_bits: usize,
    /// Coordinate bound `B`: all plaintext/key coordinates lie in `(-B, B)`.
    pub bound: BigInt,
}

/// A DDH scheme instance: parameters plus the ElGamal group chosen at init.
#[derive(Debug, Clone)]
pub struct Ddh {
    params: DdhParams,
    group: ElGamalGroup,
}

/// Master secret key: `s ∈ Z_q^ℓ`.
#[derive(Debug, Clone)]
pub struct DdhMasterSecretKey(pub IntVector);

/// Master public key: `(g^{s_i})_i`.
#[derive(Debug, Clone)]
pub struct DdhMasterPublicKey(pub Vec<BigInt>);

/// A functional key for a vector `y`.
#[derive(Debug, Clone)]
pub struct DdhFeKey(pub BigInt);

/// A ciphertext for a plaintext vector `x`.
#[derive(Debug, Clone)]
pub struct DdhCiphertext {
    /// `g^r mod p`.
    pub c0: BigInt,
    /// `(MPK_i^r · g^{x_i} mod p)_i`.
    pub c: Vec<BigInt>,
}

impl Ddh {
    /// `S_init`: pick a safe prime of `modulus_bits` bits, verify
    /// `ℓ·B² < p`.
    #[tracing::instrument(skip(params), fields(ell = params.ell, modulus_bits = params.modulus_bits))]
    pub fn init(params: DdhParams) -> Result<Ddh> {
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
        Ok(Ddh { params, group })
    }

    /// The chosen group (exposed for serialization / inspection).
    pub fn group(&self) -> &ElGamalGroup {
        &self.group
    }

    /// `S_generate_master_keys`.
    #[tracing::instrument(skip_all)]
    pub fn generate_master_keys(&self) -> (DdhMasterSecretKey, DdhMasterPublicKey) {
        let mut rng = OsRng;
        let s: Vec<BigInt> = (0..self.params.ell)
            .map(|_| uniform_range(&mut rng, &BigInt::from(2), &self.group.p))
            .collect();
        let mpk: Vec<BigInt> = s
            .iter()
            .map(|si| mod_pow(&self.group.g, si, &self.group.p).expect("p > 0"))
            .collect();
        (DdhMasterSecretKey(IntVector(s)), DdhMasterPublicKey(mpk))
    }

    /// `S_derive_fe_key`: `sk_y = ⟨s, y⟩ mod (p-1)`.
    #[tracing::instrument(skip(self, msk, y))]
    pub fn derive_fe_key(&self, msk: &DdhMasterSecretKey, y: &IntVector) -> Result<DdhFeKey> {
        y.check_bound(&self.params.bound)?;
        let p_minus_one = &self.group.p - 1;
        let dot = msk.0.dot(y)?;
        Ok(DdhFeKey(mod_floor(&dot, &p_minus_one)))
    }

    /// `S_encrypt`: sample `r ∈ [1, p)`, output `(g^r, (MPK_i^r · g^{x_i})_i)`.
    #[tracing::instrument(skip(self, mpk, x))]
    pub fn encrypt(&self, mpk: &DdhMasterPublicKey, x: &IntVector) -> Result<DdhCiphertext> {
        x.check_bound(&self.params.bound)?;
        if x.len() != self.params.ell || mpk.0.len() != self.params.ell {
            return Err(CfeError::MalformedInput("DDH: dimension mismatch".into()));
        }
        let mut rng = OsRng;
        let r = uniform_range(&mut rng, &BigInt::one(), &self.group.p);
        let p = &self.group.p;
        let c0 = mod_pow(&self.group.g, &r, p).expect("p > 0");
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
        Ok(DdhCiphertext { c0, c })
    }

    /// `S_decrypt`: recover `⟨x, y⟩` via signed baby-step/giant-step within
    /// bound `ℓ·B²`.
    #[tracing::instrument(skip(self, ct, key, y))]
    pub fn decrypt(&self, ct: &DdhCiphertext, key: &DdhFeKey, y: &IntVector) -> Result<BigInt> {
        y.check_bound(&self.params.bound)?;
        if ct.c.len() != y.len() {
            return Err(CfeError::MalformedCipher("DDH: ciphertext/key length mismatch".into()));
        }
        let p = &self.group.p;
        let mut num = BigInt::one();
        for (ci, yi) in ct.c.iter().zip(y.0.iter()) {
            num = mod_floor(&(num * mod_pow(ci, yi, p).expect("p > 0")), p);
        }
        let denom = mod_pow(&ct.c0, &key.0, p).expect("p > 0");
        let denom_inv = crate::math::bigint::mod_inverse(&denom, p)
            .ok_or_else(|| CfeError::DLogCalcFailed("ciphertext c0 not invertible mod p".into()))?;
        let u = mod_floor(&(num * denom_inv), p);

        let bound = BigInt::from(self.params.ell as u64) * &self.params.bound * &self.params.bound;
        baby_giant_signed(&u, &self.group.g, p, &self.group.q, &bound)
    }
}
