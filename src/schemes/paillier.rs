//! Inner-product FE from the decisional composite residuosity assumption.
//!
//! Grounded on `examples/original_source/src/innerprod/fullysec/paillier.c`:
//! modulus `n = p·q` for two safe primes, a generator `g` of the `2n`-th
//! residues subgroup of `Z_{n²}^*`, a Gaussian-distributed master secret
//! vector (standard deviation `σ = floor(sqrt(λ·n⁵)) + 2`), and Paillier-style
//! encryption/decryption around it.

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};
use rand::rngs::OsRng;

use crate::error::{CfeError, Result};
use crate::math::bigint::{mod_floor, mod_inverse, mod_pow, uniform_range};
use crate::math::primes::random_safe_prime;
use crate::math::IntVector;
use crate::sample::NormalDouble;

/// Immutable parameters for a Paillier scheme instance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PaillierParams {
    /// Vector length `ℓ`.
    pub ell: usize,
    /// Security parameter `λ`, also used as the Gaussian sampler's precision.
    pub lambda: u32,
    /// Bit length of each of the two safe primes `p, q`.
    pub bit_len: usize,
    /// Coordinate bound on plaintext vectors.
    pub bound_x: BigInt,
    /// Coordinate bound on functional-key vectors.
    pub bound_y: BigInt,
}

/// A Paillier scheme instance.
#[derive(Debug, Clone)]
pub struct Paillier {
    params: PaillierParams,
    n: BigInt,
    n_square: BigInt,
    g: BigInt,
    sigma: f64,
}

/// Master secret key: a Gaussian-sampled vector `msk ∈ Z^ℓ`.
#[derive(Debug, Clone)]
pub struct PaillierMasterSecretKey(pub IntVector);

/// Master public key: `(g^{msk_i} mod n²)_i`.
#[derive(Debug, Clone)]
pub struct PaillierMasterPublicKey(pub Vec<BigInt>);

/// A functional key for a vector `y`: `⟨msk, y⟩` (unreduced).
#[derive(Debug, Clone)]
pub struct PaillierFeKey(pub BigInt);

/// A ciphertext for a plaintext vector `x`.
#[derive(Debug, Clone)]
pub struct PaillierCiphertext {
    /// `g^r mod n²`.
    pub c0: BigInt,
    /// `((x_i·n + 1) · MPK_i^r) mod n²`.
    pub c: Vec<BigInt>,
}

impl Paillier {
    /// `S_init`: two safe primes `p, q` of `bit_len` bits, `n = pq`, and a
    /// generator of the `2n`-th residues subgroup of `Z_{n²}^*`.
    #[tracing::instrument(skip(params), fields(ell = params.ell, bit_len = params.bit_len))]
    pub fn init(params: PaillierParams) -> Result<Paillier> {
        let mut rng = OsRng;
        let (p, _) = random_safe_prime(&mut rng, params.bit_len)?;
        let (q, _) = random_safe_prime(&mut rng, params.bit_len)?;
        let n = &p * &q;
        let n_square = &n * &n;

        let check_x = BigInt::from(params.ell as u64) * &params.bound_x * &params.bound_x;
        if n <= check_x {
            return Err(CfeError::ParamGenFailed(
                "n is not large enough relative to ell * bound_x^2".into(),
            ));
        }
        let check_y = BigInt::from(params.ell as u64) * &params.bound_y * &params.bound_y;
        if n <= check_y {
            return Err(CfeError::ParamGenFailed(
                "n is not large enough relative to ell * bound_y^2".into(),
            ));
        }

        let g_prime = uniform_range(&mut rng, &BigInt::zero(), &n_square);
        let mut g = mod_pow(&g_prime, &n, &n_square).expect("n_square > 0");
        g = mod_pow(&g, &BigInt::from(2), &n_square).expect("n_square > 0");
        if mod_inverse(&g, &n_square).is_none() {
            return Err(CfeError::ParamGenFailed(
                "generated residues-subgroup generator is not invertible mod n^2".into(),
            ));
        }

        let n_to_5 = (0..5).fold(BigInt::one(), |acc, _| acc * &n);
        let radicand = BigInt::from(params.lambda) * n_to_5;
        let sigma = crate::math::bigint::isqrt(&radicand)
            .to_f64()
            .unwrap_or(f64::MAX)
            + 2.0;

        Ok(Paillier {
            params,
            n,
            n_square,
            g,
            sigma,
        })
    }

    /// `S_generate_master_keys`.
    #[tracing::instrument(skip_all)]
    pub fn generate_master_keys(&self) -> (PaillierMasterSecretKey, PaillierMasterPublicKey) {
        let mut rng = OsRng;
        let sampler = NormalDouble::new(self.sigma, self.params.lambda);
        let msk: Vec<BigInt> = (0..self.params.ell).map(|_| sampler.sample(&mut rng)).collect();
        let mpk: Vec<BigInt> = msk
            .iter()
            .map(|yi| mod_pow(&self.g, yi, &self.n_square).expect("n_square > 0"))
            .collect();
        (PaillierMasterSecretKey(IntVector(msk)), PaillierMasterPublicKey(mpk))
    }

    /// `S_derive_fe_key`: `⟨msk, y⟩`, unreduced.
    #[tracing::instrument(skip(self, msk, y))]
    pub fn derive_fe_key(&self, msk: &PaillierMasterSecretKey, y: &IntVector) -> Result<PaillierFeKey> {
        y.check_bound(&self.params.bound_y)?;
        Ok(PaillierFeKey(msk.0.dot(y)?))
    }

    /// `S_encrypt`.
    #[tracing::instrument(skip(self, mpk, x))]
    pub fn encrypt(&self, mpk: &PaillierMasterPublicKey, x: &IntVector) -> Result<PaillierCiphertext> {
        x.check_bound(&self.params.bound_x)?;
        if x.len() != self.params.ell || mpk.0.len() != self.params.ell {
            return Err(CfeError::MalformedInput("Paillier: dimension mismatch".into()));
        }
        let mut rng = OsRng;
        let n_div_4 = &self.n / 4;
        let r = uniform_range(&mut rng, &BigInt::zero(), &n_div_4.max(BigInt::one()));
        let c0 = mod_pow(&self.g, &r, &self.n_square).expect("n_square > 0");
        let c: Vec<BigInt> = x
            .0
            .iter()
            .zip(mpk.0.iter())
            .map(|(xi, mpk_i)| {
                let t1 = xi * &self.n + 1;
                let t2 = mod_pow(mpk_i, &r, &self.n_square).expect("n_square > 0");
                mod_floor(&(t1 * t2), &self.n_square)
            })
            .collect();
        Ok(PaillierCiphertext { c0, c })
    }

    /// `S_decrypt`.
    #[tracing::instrument(skip(self, ct, key, y))]
    pub fn decrypt(&self, ct: &PaillierCiphertext, key: &PaillierFeKey, y: &IntVector) -> Result<BigInt> {
        y.check_bound(&self.params.bound_y)?;
        if ct.c.len() != y.len() {
            return Err(CfeError::MalformedCipher(
                "Paillier: ciphertext/key length mismatch".into(),
            ));
        }
        let mut res = mod_pow(&ct.c0, &(-&key.0), &self.n_square)
            .ok_or_else(|| CfeError::DLogCalcFailed("ciphertext c0 not invertible mod n^2".into()))?;
        for (ci, yi) in ct.c.iter().zip(y.0.iter()) {
            let t = mod_pow(ci, yi, &self.n_square).expect("n_square > 0");
            res = mod_floor(&(res * t), &self.n_square);
        }
        res = mod_floor(&(res - 1), &self.n_square);
        res /= &self.n;

        let half_n = &self.n / 2;
        if res > half_n {
            res -= &self.n;
        }
        Ok(res)
    }
}
