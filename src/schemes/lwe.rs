//! Inner-product FE from LWE, its fully-secure variant
//! ([`fully_secure`]), and the ring-LWE speedup ([`ring`]).
//!
//! Grounded on `examples/original_source/src/innerprod/simple/lwe.c`: a
//! public matrix `A ∈ Z_q^{m×n}`, a secret key matrix `SK ∈ Z_q^{n×ℓ}`, a
//! Gaussian-noised public key `PK = A·SK + E`, and a "center" encoding
//! `t(x) = floor(x·q/p) mod q` that folds the plaintext into the LWE sample
//! before rounding it back out on decryption.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::rngs::OsRng;

use crate::error::{CfeError, Result};
use crate::math::bigint::{mod_floor, uniform_range};
use crate::math::primes::random_prime;
use crate::math::{IntMatrix, IntVector};
use crate::sample::NormalDouble;

fn center(x: &IntVector, p: &BigInt, q: &BigInt) -> IntVector {
    IntVector(
        x.0.iter()
            .map(|xi| {
                let t = (xi * q).div_floor(p);
                mod_floor(&t, q)
            })
            .collect(),
    )
}

/// Immutable parameters for a simple LWE scheme instance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LweParams {
    /// Vector length `ℓ`.
    pub ell: usize,
    /// Gaussian-noise precision parameter `n`.
    pub n: usize,
    /// Coordinate bound on plaintext vectors.
    pub bound_x: BigInt,
    /// Coordinate bound on functional-key vectors.
    pub bound_y: BigInt,
}

/// A simple-LWE scheme instance.
#[derive(Debug, Clone)]
pub struct Lwe {
    params: LweParams,
    p: BigInt,
    q: BigInt,
    m: usize,
    sigma_q: f64,
    a: IntMatrix,
}

/// Secret key: `SK ∈ Z_q^{n×ℓ}`.
#[derive(Debug, Clone)]
pub struct LweSecretKey(pub IntMatrix);
/// Public key: `PK = (A·SK + E) mod q ∈ Z_q^{m×ℓ}`.
#[derive(Debug, Clone)]
pub struct LwePublicKey(pub IntMatrix);
/// Functional key for `y`: `SK·y mod q`.
#[derive(Debug, Clone)]
pub struct LweFeKey(pub IntVector);
/// Ciphertext: `(A^T r, PK^T r + t(x)) mod q`.
#[derive(Debug, Clone)]
pub struct LweCiphertext(pub IntVector);

impl Lwe {
    /// `S_init`: derive `p`, `q`, and `m` from `ℓ`, `n`, and the two bounds,
    /// following the same closed-form sizing as the original, then sample
    /// the public matrix `A`.
    #[tracing::instrument(skip(params), fields(ell = params.ell, n = params.n))]
    pub fn init(params: LweParams) -> Result<Lwe> {
        let mut rng = OsRng;
        let n_bits_p = params.bound_x.bits() + params.bound_y.bits() + (params.ell as u64).bits() + 2;
        let p = random_prime(&mut rng, n_bits_p as usize)?;

        let l_f = params.ell as f64;
        let n_f = params.n as f64;
        let bound_x_f = params.bound_x.to_f64().unwrap_or(f64::MAX);
        let bound_y_f = params.bound_y.to_f64().unwrap_or(f64::MAX);
        let val = bound_x_f * l_f.sqrt() + 1.0;
        let mut x = val * p.to_f64().unwrap_or(f64::MAX) * bound_y_f;
        x *= (8.0 * n_f) * (n_f + l_f + 1.0).sqrt();
        let x = x * x.sqrt();
        let n_bits_q = (x.abs().log2().ceil() as u64 + 1).max(8);
        let q = random_prime(&mut rng, n_bits_q as usize)?;

        let m = ((n_f + l_f + 1.0) * n_bits_q as f64 + 2.0 * n_f + 1.0) as usize;

        let mut sigma = 1.0 / (2.0 * (2.0 * l_f * m as f64 * n_f).sqrt());
        sigma /= p.to_f64().unwrap_or(f64::MAX);
        sigma /= bound_y_f;
        let sigma_q = (sigma * q.to_f64().unwrap_or(f64::MAX)).ceil();

        let mut a_data = Vec::with_capacity(m * params.n);
        for _ in 0..m * params.n {
            a_data.push(uniform_range(&mut rng, &BigInt::zero(), &q));
        }
        let a = IntMatrix::from_rows(m, params.n, a_data);

        Ok(Lwe {
            params,
            p,
            q,
            m,
            sigma_q,
            a,
        })
    }

    /// `S_generate_sec_key`: `SK` uniform in `Z_q^{n×ℓ}`.
    #[tracing::instrument(skip_all)]
    pub fn generate_sec_key(&self) -> LweSecretKey {
        let mut rng = OsRng;
        let mut data = Vec::with_capacity(self.params.n * self.params.ell);
        for _ in 0..self.params.n * self.params.ell {
            data.push(uniform_range(&mut rng, &BigInt::zero(), &self.q));
        }
        LweSecretKey(IntMatrix::from_rows(self.params.n, self.params.ell, data))
    }

    /// `S_generate_pub_key`: `PK = (A·SK + E) mod q`.
    #[tracing::instrument(skip(self, sk))]
    pub fn generate_pub_key(&self, sk: &LweSecretKey) -> Result<LwePublicKey> {
        if sk.0.rows != self.params.n || sk.0.cols != self.params.ell {
            return Err(CfeError::MalformedSecKey("LWE: SK shape mismatch".into()));
        }
        let mut rng = OsRng;
        let sampler = NormalDouble::new(self.sigma_q, self.params.n as u32);
        let mut pk = self.a.mul_mat(&sk.0)?.mod_reduce(&self.q);
        for r in 0..pk.rows {
            for c in 0..pk.cols {
                let e = sampler.sample(&mut rng);
                let v = mod_floor(&(pk.get(r, c) + e), &self.q);
                pk.set(r, c, v);
            }
        }
        Ok(LwePublicKey(pk))
    }

    /// `S_derive_fe_key`: `sk_y = SK·y mod q`.
    #[tracing::instrument(skip(self, sk, y))]
    pub fn derive_fe_key(&self, sk: &LweSecretKey, y: &IntVector) -> Result<LweFeKey> {
        y.check_bound(&self.params.bound_y)?;
        if sk.0.rows != self.params.n || sk.0.cols != self.params.ell {
            return Err(CfeError::MalformedSecKey("LWE: SK shape mismatch".into()));
        }
        Ok(LweFeKey(sk.0.mul_vec_mod(y, &self.q)?))
    }

    /// `S_encrypt`.
    #[tracing::instrument(skip(self, pk, x))]
    pub fn encrypt(&self, pk: &LwePublicKey, x: &IntVector) -> Result<LweCiphertext> {
        x.check_bound(&self.params.bound_x)?;
        if pk.0.rows != self.m || pk.0.cols != self.params.ell {
            return Err(CfeError::MalformedPubKey("LWE: PK shape mismatch".into()));
        }
        if x.len() != self.params.ell {
            return Err(CfeError::MalformedInput("LWE: x length mismatch".into()));
        }
        let mut rng = OsRng;
        let two = BigInt::from(2);
        let r = IntVector((0..self.m).map(|_| uniform_range(&mut rng, &BigInt::zero(), &two)).collect());

        let ct0 = self.a.transpose().mul_vec_mod(&r, &self.q)?;

        let t = center(x, &self.p, &self.q);
        let mut ct_last = pk.0.transpose().mul_vec_mod(&r, &self.q)?;
        ct_last = ct_last.add(&t)?.mod_reduce(&self.q);

        let mut joined = ct0.0;
        joined.extend(ct_last.0);
        Ok(LweCiphertext(IntVector(joined)))
    }

    /// `S_decrypt`.
    #[tracing::instrument(skip(self, ct, key, y))]
    pub fn decrypt(&self, ct: &LweCiphertext, key: &LweFeKey, y: &IntVector) -> Result<BigInt> {
        y.check_bound(&self.params.bound_y)?;
        if key.0.len() != self.params.n {
            return Err(CfeError::MalformedFEKey("LWE: key length mismatch".into()));
        }
        if y.len() != self.params.ell {
            return Err(CfeError::MalformedInput("LWE: y length mismatch".into()));
        }
        if ct.0.len() != self.params.n + self.params.ell {
            return Err(CfeError::MalformedCipher("LWE: ciphertext length mismatch".into()));
        }
        let ct0 = IntVector(ct.0 .0[..self.params.n].to_vec());
        let ct_last = IntVector(ct.0 .0[self.params.n..].to_vec());

        let mut d = mod_floor(&y.dot(&ct_last)?, &self.q);
        let prod = mod_floor(&ct0.dot(&key.0)?, &self.q);
        d = mod_floor(&(d - prod), &self.q);

        let half_q = &self.q / 2;
        if d > half_q {
            d -= &self.q;
        }
        d = d * &self.p + &half_q;
        Ok(d.div_floor(&self.q))
    }
}

/// Fully-secure LWE: the same `(A, SK, PK)` shape, but `SK` is
/// structured so a corrupted functional key never leaks more than `⟨x,y⟩`
/// even under adaptive key queries — grounded on
/// `examples/original_source/src/innerprod/fullysec/lwe_fs.c`.
pub mod fully_secure {
    use super::*;

    /// Immutable parameters for the fully-secure LWE scheme.
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    pub struct LweFsParams {
        pub ell: usize,
        pub n: usize,
        pub bound_x: BigInt,
        pub bound_y: BigInt,
    }

    /// The fully-secure LWE scheme instance.
    #[derive(Debug, Clone)]
    pub struct LweFs {
        params: LweFsParams,
        k: BigInt,
        q: BigInt,
        m: usize,
        sigma1: f64,
        sigma2: f64,
        sigma_q: f64,
        a: IntMatrix,
    }

    /// Secret key: `SK ∈ Z^{ℓ×m}`, rows split between two Gaussian widths
    /// with an identity block stitched into the second half.
    #[derive(Debug, Clone)]
    pub struct LweFsSecretKey(pub IntMatrix);
    /// Public key: `PK = (SK·A) mod q ∈ Z_q^{ℓ×n}`.
    #[derive(Debug, Clone)]
    pub struct LweFsPublicKey(pub IntMatrix);
    /// Functional key for `y`: `y^T·SK mod q`.
    #[derive(Debug, Clone)]
    pub struct LweFsFeKey(pub IntVector);
    /// Ciphertext: `(c0, c1) = (A·r + e0, PK·r + e1 + t(x)) mod q`.
    #[derive(Debug, Clone)]
    pub struct LweFsCiphertext {
        pub c0: IntVector,
        pub c1: IntVector,
    }

    impl LweFs {
        /// `S_init`: iteratively size `q` (and hence the two Gaussian widths
        /// `σ1, σ2`) until the derived bit length stabilizes, then sample `A`.
        #[tracing::instrument(skip(params), fields(ell = params.ell, n = params.n))]
        pub fn init(params: LweFsParams) -> Result<LweFs> {
            let mut rng = OsRng;
            let k = &params.bound_x * &params.bound_y * BigInt::from(2 * params.ell as u64);
            let k_f = k.to_f64().unwrap_or(f64::MAX);
            let k_squared_f = k_f * k_f;
            let n_f = params.n as f64;

            let mut n_bits_q = 1usize;
            let (mut sigma1, mut sigma2, mut sigma, mut sigma_prime);
            loop {
                let bound_m_f = n_f * n_bits_q as f64;
                let log2_m = bound_m_f.max(2.0).log2();
                let max = k_squared_f.max(bound_m_f);

                sigma1 = ((n_f * log2_m).sqrt() * max.sqrt()).ceil();
                let n_pow3 = n_f.powi(3);
                let pow_sqrt_log_m_5 = log2_m.sqrt().powi(5);
                sigma2 = (n_f.sqrt() * n_pow3 * pow_sqrt_log_m_5 * bound_m_f.sqrt() * max).ceil();

                let bound2 = sigma1 * sigma1 + sigma2 * sigma2;
                sigma = 1.0 / k_squared_f / bound2 / n_f.log2();

                let n_f_pow6 = n_f.powi(6);
                let n_bits_q_pow2 = (n_bits_q as f64).powi(2);
                let sqrt_log_n_pow5 = n_f.log2().sqrt().powi(5);
                sigma_prime = sigma / k_f / (n_f_pow6 * n_bits_q_pow2 * sqrt_log_n_pow5);

                let bound_for_q = n_f.log2().sqrt() / sigma_prime;
                let new_bits = (bound_for_q.abs().max(1.0).log2().ceil() as usize + 1).max(8);
                if new_bits < n_bits_q {
                    break;
                }
                n_bits_q = new_bits.max(n_bits_q + 1);
                if n_bits_q > 4096 {
                    return Err(CfeError::ParamGenFailed(
                        "fully-secure LWE parameter search did not converge".into(),
                    ));
                }
            }

            let q = random_prime(&mut rng, n_bits_q)?;
            let m = (1.01 * n_f * n_bits_q as f64) as usize;
            let sigma_q = (sigma * q.to_f64().unwrap_or(f64::MAX)).ceil();

            let mut a_data = Vec::with_capacity(m * params.n);
            for _ in 0..m * params.n {
                a_data.push(uniform_range(&mut rng, &BigInt::zero(), &q));
            }
            let a = IntMatrix::from_rows(m, params.n, a_data);

            Ok(LweFs {
                params,
                k,
                q,
                m,
                sigma1,
                sigma2,
                sigma_q,
                a,
            })
        }

        /// `S_generate_sec_key`.
        #[tracing::instrument(skip_all)]
        pub fn generate_sec_key(&self) -> LweFsSecretKey {
            let mut rng = OsRng;
            let sampler1 = NormalDouble::new(self.sigma1, self.params.n as u32);
            let sampler2 = NormalDouble::new(self.sigma2, self.params.n as u32);
            let half_rows = self.m / 2;
            let mut data = Vec::with_capacity(self.params.ell * self.m);
            for i in 0..self.params.ell {
                for j in 0..self.m {
                    let mut val = if j < half_rows {
                        sampler1.sample(&mut rng)
                    } else {
                        sampler2.sample(&mut rng)
                    };
                    if j >= half_rows && j - half_rows == i {
                        val += 1;
                    }
                    data.push(val);
                }
            }
            LweFsSecretKey(IntMatrix::from_rows(self.params.ell, self.m, data))
        }

        /// `S_generate_pub_key`: `PK = (SK·A) mod q`.
        #[tracing::instrument(skip(self, sk))]
        pub fn generate_pub_key(&self, sk: &LweFsSecretKey) -> Result<LweFsPublicKey> {
            if sk.0.rows != self.params.ell || sk.0.cols != self.m {
                return Err(CfeError::MalformedSecKey("fully-secure LWE: SK shape mismatch".into()));
            }
            Ok(LweFsPublicKey(sk.0.mul_mat(&self.a)?.mod_reduce(&self.q)))
        }

        /// `S_derive_fe_key`: `z_y = y^T·SK mod q`.
        #[tracing::instrument(skip(self, y, sk))]
        pub fn derive_fe_key(&self, y: &IntVector, sk: &LweFsSecretKey) -> Result<LweFsFeKey> {
            y.check_bound(&self.params.bound_y)?;
            if sk.0.rows != self.params.ell || sk.0.cols != self.m {
                return Err(CfeError::MalformedSecKey("fully-secure LWE: SK shape mismatch".into()));
            }
            Ok(LweFsFeKey(sk.0.transpose().mul_vec_mod(y, &self.q)?))
        }

        /// `S_encrypt`.
        #[tracing::instrument(skip(self, x, pk))]
        pub fn encrypt(&self, x: &IntVector, pk: &LweFsPublicKey) -> Result<LweFsCiphertext> {
            x.check_bound(&self.params.bound_x)?;
            if x.len() != self.params.ell {
                return Err(CfeError::MalformedInput("fully-secure LWE: x length mismatch".into()));
            }
            if pk.0.rows != self.params.ell || pk.0.cols != self.params.n {
                return Err(CfeError::MalformedPubKey("fully-secure LWE: PK shape mismatch".into()));
            }
            let mut rng = OsRng;
            let sampler = NormalDouble::new(self.sigma_q, self.params.n as u32);
            let r = IntVector((0..self.params.n).map(|_| uniform_range(&mut rng, &BigInt::zero(), &self.q)).collect());
            let e0 = IntVector((0..self.m).map(|_| sampler.sample(&mut rng)).collect());
            let e1 = IntVector((0..self.params.ell).map(|_| sampler.sample(&mut rng)).collect());

            let c0 = self.a.mul_vec(&r)?.add(&e0)?.mod_reduce(&self.q);

            let q_div_k = (&self.q / &self.k).max(BigInt::one());
            let t = IntVector(x.0.iter().map(|xi| xi * &q_div_k).collect());
            let c1 = pk.0.mul_vec(&r)?.add(&e1)?.add(&t)?.mod_reduce(&self.q);

            Ok(LweFsCiphertext { c0, c1 })
        }

        /// `S_decrypt`.
        #[tracing::instrument(skip(self, ct, key, y))]
        pub fn decrypt(&self, ct: &LweFsCiphertext, key: &LweFsFeKey, y: &IntVector) -> Result<BigInt> {
            y.check_bound(&self.params.bound_y)?;
            if key.0.len() != self.m {
                return Err(CfeError::MalformedFEKey("fully-secure LWE: key length mismatch".into()));
            }
            if y.len() != self.params.ell {
                return Err(CfeError::MalformedInput("fully-secure LWE: y length mismatch".into()));
            }

            let mut mu1 = mod_floor(&(y.dot(&ct.c1)? - key.0.dot(&ct.c0)?), &self.q);
            let half_q = &self.q / 2;
            if mu1 > half_q {
                mu1 -= &self.q;
            }

            let k_times_2 = &self.k * 2;
            let q_div_k = &self.q / &self.k;
            let q_div_k_times_2 = &self.q / &k_times_2;

            Ok((mu1 + q_div_k_times_2).div_floor(&q_div_k))
        }
    }
}

/// Ring-LWE: the speedup where plaintexts live in
/// `Z_p[x]/(xⁿ+1)`, secret/public keys are ring elements, and ring
/// multiplication is negacyclic convolution — grounded on
/// `examples/original_source/src/innerprod/simple/ring_lwe.c`.
pub mod ring {
    use super::*;

    /// A polynomial in `Z_q[x]/(xⁿ+1)`, coefficients in `[0, q)`, length `n`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RingElement(pub Vec<BigInt>);

    /// Negacyclic convolution `a*b mod (xⁿ+1)`, schoolbook `O(n²)`.
    fn poly_mul_schoolbook(a: &[BigInt], b: &[BigInt], q: &BigInt) -> Vec<BigInt> {
        let n = a.len();
        let mut out = vec![BigInt::zero(); n];
        for i in 0..n {
            if a[i].is_zero() {
                continue;
            }
            for j in 0..n {
                let k = i + j;
                let term = &a[i] * &b[j];
                if k < n {
                    out[k] += term;
                } else {
                    out[k - n] -= term;
                }
            }
        }
        for c in out.iter_mut() {
            *c = mod_floor(c, q);
        }
        out
    }

    /// Polynomial multiplication, `xⁿ+1` reduction. Schoolbook `O(n²)`,
    /// matching `examples/original_source/src/innerprod/fullysec/ring_lwe.c`
    /// directly; an NTT fast path is a clear follow-up once `n` grows large
    /// enough to matter.
    fn poly_mul(a: &RingElement, b: &RingElement, q: &BigInt) -> RingElement {
        RingElement(poly_mul_schoolbook(&a.0, &b.0, q))
    }

    fn poly_add(a: &RingElement, b: &RingElement, q: &BigInt) -> RingElement {
        RingElement(a.0.iter().zip(&b.0).map(|(x, y)| mod_floor(&(x + y), q)).collect())
    }

    fn poly_sub(a: &RingElement, b: &RingElement, q: &BigInt) -> RingElement {
        RingElement(a.0.iter().zip(&b.0).map(|(x, y)| mod_floor(&(x - y), q)).collect())
    }

    fn ring_center(x: &RingElement, p: &BigInt, q: &BigInt) -> RingElement {
        RingElement(x.0.iter().map(|xi| mod_floor(&(xi * q).div_floor(p), q)).collect())
    }

    /// Immutable parameters for a ring-LWE scheme instance.
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    pub struct RingLweParams {
        /// Number of plaintext rows `ℓ`.
        pub ell: usize,
        /// Ring degree `n`, must be a power of two.
        pub n: usize,
        /// Coordinate bound.
        pub bound: BigInt,
        /// Plaintext modulus `p`.
        pub p: BigInt,
        /// Ciphertext modulus `q`.
        pub q: BigInt,
        /// Gaussian standard deviation for secret/noise sampling.
        pub sigma: f64,
    }

    /// A ring-LWE scheme instance.
    #[derive(Debug, Clone)]
    pub struct RingLwe {
        params: RingLweParams,
        a: RingElement,
    }

    /// Secret key: `ℓ` small ring elements.
    #[derive(Debug, Clone)]
    pub struct RingLweSecretKey(pub Vec<RingElement>);
    /// Public key: `PK_i = a·SK_i + E_i`.
    #[derive(Debug, Clone)]
    pub struct RingLwePublicKey(pub Vec<RingElement>);
    /// Functional key for `y`: `Σ y_i · SK_i mod q`.
    #[derive(Debug, Clone)]
    pub struct RingLweFeKey(pub RingElement);
    /// Ciphertext: `ℓ` rows plus one extra row carrying `a·r + e`.
    #[derive(Debug, Clone)]
    pub struct RingLweCiphertext {
        pub rows: Vec<RingElement>,
        pub last: RingElement,
    }

    impl RingLwe {
        /// `S_init`: requires `p ≥ 2·ℓ·B²` and `n` a power of two, then
        /// samples the public ring element `a`.
        #[tracing::instrument(skip(params), fields(ell = params.ell, n = params.n))]
        pub fn init(params: RingLweParams) -> Result<RingLwe> {
            if params.n == 0 || (params.n & (params.n - 1)) != 0 {
                return Err(CfeError::PreconditionFailed("ring-LWE: n must be a power of two".into()));
            }
            let two_l_b_sq = &params.bound * &params.bound * BigInt::from(2 * params.ell as u64);
            if params.p < two_l_b_sq {
                return Err(CfeError::PreconditionFailed(
                    "ring-LWE: p must be at least 2 * ell * bound^2".into(),
                ));
            }
            let mut rng = OsRng;
            let a = RingElement((0..params.n).map(|_| uniform_range(&mut rng, &BigInt::zero(), &params.q)).collect());
            Ok(RingLwe { params, a })
        }

        fn sampler(&self) -> NormalDouble {
            NormalDouble::new(self.params.sigma, self.params.n as u32)
        }

        /// `S_generate_sec_key`: `ℓ` Gaussian-sampled ring elements.
        #[tracing::instrument(skip_all)]
        pub fn generate_sec_key(&self) -> RingLweSecretKey {
            let mut rng = OsRng;
            let sampler = self.sampler();
            RingLweSecretKey(
                (0..self.params.ell)
                    .map(|_| RingElement((0..self.params.n).map(|_| sampler.sample(&mut rng)).collect()))
                    .collect(),
            )
        }

        /// `S_generate_pub_key`: `PK_i = a·SK_i + E_i mod q`.
        #[tracing::instrument(skip(self, sk))]
        pub fn generate_pub_key(&self, sk: &RingLweSecretKey) -> Result<RingLwePublicKey> {
            if sk.0.len() != self.params.ell {
                return Err(CfeError::MalformedSecKey("ring-LWE: SK row count mismatch".into()));
            }
            let mut rng = OsRng;
            let sampler = self.sampler();
            let pk = sk
                .0
                .iter()
                .map(|sk_i| {
                    let e_i = RingElement((0..self.params.n).map(|_| sampler.sample(&mut rng)).collect());
                    poly_add(&poly_mul(sk_i, &self.a, &self.params.q), &e_i, &self.params.q)
                })
                .collect();
            Ok(RingLwePublicKey(pk))
        }

        /// `S_derive_fe_key`: `Σ y_i · SK_i mod q`.
        #[tracing::instrument(skip(self, sk, y))]
        pub fn derive_fe_key(&self, sk: &RingLweSecretKey, y: &IntVector) -> Result<RingLweFeKey> {
            y.check_bound(&self.params.bound)?;
            if sk.0.len() != self.params.ell || y.len() != self.params.ell {
                return Err(CfeError::MalformedInput("ring-LWE: y/SK length mismatch".into()));
            }
            let mut acc = RingElement(vec![BigInt::zero(); self.params.n]);
            for (yi, sk_i) in y.0.iter().zip(sk.0.iter()) {
                let scaled = RingElement(sk_i.0.iter().map(|c| mod_floor(&(c * yi), &self.params.q)).collect());
                acc = poly_add(&acc, &scaled, &self.params.q);
            }
            Ok(RingLweFeKey(acc))
        }

        /// `S_encrypt`: encrypts `ℓ` plaintext rows `X_i`, each a length-`n`
        /// coefficient vector bounded by `bound`.
        #[tracing::instrument(skip(self, x, pk))]
        pub fn encrypt(&self, x: &[IntVector], pk: &RingLwePublicKey) -> Result<RingLweCiphertext> {
            if x.len() != self.params.ell || pk.0.len() != self.params.ell {
                return Err(CfeError::MalformedInput("ring-LWE: row count mismatch".into()));
            }
            for row in x {
                row.check_bound(&self.params.bound)?;
                if row.len() != self.params.n {
                    return Err(CfeError::MalformedInput("ring-LWE: row width mismatch".into()));
                }
            }
            let mut rng = OsRng;
            let sampler = self.sampler();
            let r = RingElement((0..self.params.n).map(|_| sampler.sample(&mut rng)).collect());

            let mut rows = Vec::with_capacity(self.params.ell);
            for (pk_i, x_i) in pk.0.iter().zip(x.iter()) {
                let e_i = RingElement((0..self.params.n).map(|_| sampler.sample(&mut rng)).collect());
                let mut row = poly_add(&poly_mul(pk_i, &r, &self.params.q), &e_i, &self.params.q);
                let t_i = ring_center(&RingElement(x_i.0.clone()), &self.params.p, &self.params.q);
                row = poly_add(&row, &t_i, &self.params.q);
                rows.push(row);
            }

            let e_last = RingElement((0..self.params.n).map(|_| sampler.sample(&mut rng)).collect());
            let last = poly_add(&poly_mul(&self.a, &r, &self.params.q), &e_last, &self.params.q);

            Ok(RingLweCiphertext { rows, last })
        }

        /// `S_decrypt`: recovers `y·X`, the weighted sum of the plaintext
        /// rows, as a length-`n` coefficient vector.
        #[tracing::instrument(skip(self, ct, key, y))]
        pub fn decrypt(&self, ct: &RingLweCiphertext, key: &RingLweFeKey, y: &IntVector) -> Result<IntVector> {
            y.check_bound(&self.params.bound)?;
            if key.0 .0.len() != self.params.n {
                return Err(CfeError::MalformedFEKey("ring-LWE: key width mismatch".into()));
            }
            if y.len() != self.params.ell || ct.rows.len() != self.params.ell {
                return Err(CfeError::MalformedCipher("ring-LWE: ciphertext row count mismatch".into()));
            }

            let mut ct_prod = RingElement(vec![BigInt::zero(); self.params.n]);
            for (yi, row) in y.0.iter().zip(ct.rows.iter()) {
                let scaled = RingElement(row.0.iter().map(|c| mod_floor(&(c * yi), &self.params.q)).collect());
                ct_prod = poly_add(&ct_prod, &scaled, &self.params.q);
            }
            let cross = poly_mul(&ct.last, &key.0, &self.params.q);
            let mut res = poly_sub(&ct_prod, &cross, &self.params.q);

            let half_q = &self.params.q / 2;
            for c in res.0.iter_mut() {
                if *c > half_q {
                    *c -= &self.params.q;
                }
                *c = (&*c * &self.params.p + &half_q).div_floor(&self.params.q);
            }
            Ok(IntVector(res.0))
        }
    }
}
