//! Quadratic functional encryption, `f_M(x, y) = xᵀ M y`.
//!
//! Grounded on `examples/original_source/src/quadratic/sgp.c` (the
//! Sans-Gay-Pointcheval construction): the master secret is a pair of
//! `Z_n`-bounded vectors `(s, t)`; a functional key for a matrix `F` is a
//! single `G2` point `g2^{sᵀFt}`; a ciphertext pairs each coordinate of `x`
//! (resp. `y`) with a fresh one-time-pad coordinate derived from `s` (resp.
//! `t`) and hides the pair behind a random invertible `2×2` matrix `W` so
//! that only the bilinear combination picked out by `F` cancels the pads.

use num_bigint::BigInt;
use num_traits::Zero;
use rand::rngs::OsRng;

use crate::dlog::baby_giant_gt_signed;
use crate::error::{CfeError, Result};
use crate::group::scalar::int_to_scalar;
use crate::group::{gt_generator, gt_scale, pair};
use crate::math::bigint::{mod_floor, uniform_range};
use crate::math::{IntMatrix, IntVector};
use crate::policy::mat_inverse_mod;
use crate::{g1_generator, g2_generator, G1, G2};

fn bn254_order() -> BigInt {
    "21888242871839275222246405745257275088548364400416034343698204186575808495617"
        .parse()
        .expect("fixed BN254 scalar field order")
}

/// Immutable parameters for a quadratic FE instance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QuadraticParams {
    /// Vector length `n`.
    pub n: usize,
    /// Coordinate bound `B` on `x`, `y`, and `s`, `t`.
    pub bound: BigInt,
}

/// A quadratic FE instance.
#[derive(Debug, Clone)]
pub struct Quadratic {
    params: QuadraticParams,
    order: BigInt,
}

/// Master secret key: the pair of bound-sampled vectors `(s, t)`.
#[derive(Debug, Clone)]
pub struct QuadraticMasterSecretKey {
    pub s: IntVector,
    pub t: IntVector,
}

/// A functional key for a matrix `F`: `g2^{sᵀFt}`.
#[derive(Debug, Clone)]
pub struct QuadraticFeKey(pub G2);

/// A ciphertext for a pair of vectors `(x, y)`.
#[derive(Debug, Clone)]
pub struct QuadraticCiphertext {
    /// `g1^γ`, for the random scalar `γ` used to blind the functional key at
    /// decryption time.
    pub g1_gamma: G1,
    /// Per-coordinate `G1` pair `(g1^{v_{i,0}}, g1^{v_{i,1}})` where
    /// `v_i = (W⁻¹)ᵀ · (x_i, γ·s_i)`.
    pub a: Vec<(G1, G1)>,
    /// Per-coordinate `G2` pair `(g2^{v_{i,0}}, g2^{v_{i,1}})` where
    /// `v_i = W · (y_i, -t_i)`.
    pub b: Vec<(G2, G2)>,
}

impl Quadratic {
    /// `S_init`: requires `n² · B³ ≤ r`, the BN254 scalar field order.
    #[tracing::instrument(skip(params), fields(n = params.n))]
    pub fn init(params: QuadraticParams) -> Result<Quadratic> {
        let order = bn254_order();
        let n_sq = BigInt::from(params.n as u64) * BigInt::from(params.n as u64);
        let bound_cubed = &params.bound * &params.bound * &params.bound;
        if n_sq * bound_cubed > order {
            return Err(CfeError::PreconditionFailed(
                "n^2 * bound^3 exceeds the BN254 scalar field order".into(),
            ));
        }
        Ok(Quadratic { params, order })
    }

    /// `S_generate_master_keys`.
    #[tracing::instrument(skip_all)]
    pub fn generate_master_key(&self) -> QuadraticMasterSecretKey {
        let mut rng = OsRng;
        let s = (0..self.params.n)
            .map(|_| uniform_range(&mut rng, &BigInt::zero(), &self.params.bound))
            .collect();
        let t = (0..self.params.n)
            .map(|_| uniform_range(&mut rng, &BigInt::zero(), &self.params.bound))
            .collect();
        QuadraticMasterSecretKey {
            s: IntVector(s),
            t: IntVector(t),
        }
    }

    /// `S_derive_fe_key`: `g2^{sᵀ F t}`.
    #[tracing::instrument(skip(self, msk, f))]
    pub fn derive_fe_key(&self, msk: &QuadraticMasterSecretKey, f: &IntMatrix) -> Result<QuadraticFeKey> {
        for row in 0..f.rows {
            IntVector(f.row(row).to_vec()).check_bound(&self.params.bound)?;
        }
        let ft = f.mul_vec(&msk.t)?;
        let res = msk.s.dot(&ft)?;
        Ok(QuadraticFeKey(scalar_mul_g2(&g2_generator(), &res)))
    }

    /// `S_encrypt`.
    #[tracing::instrument(skip(self, x, y, msk))]
    pub fn encrypt(&self, x: &IntVector, y: &IntVector, msk: &QuadraticMasterSecretKey) -> Result<QuadraticCiphertext> {
        x.check_bound(&self.params.bound)?;
        y.check_bound(&self.params.bound)?;
        if x.len() != self.params.n || y.len() != self.params.n {
            return Err(CfeError::MalformedInput("quadratic FE: dimension mismatch".into()));
        }
        let mut rng = OsRng;

        let (w, w_inv) = loop {
            let data = (0..4)
                .map(|_| uniform_range(&mut rng, &BigInt::zero(), &self.order))
                .collect();
            let w = IntMatrix::from_rows(2, 2, data);
            match mat_inverse_mod(&w, &self.order) {
                Ok((w_inv, _det)) => break (w, w_inv),
                Err(CfeError::NoSolutionExists) => continue,
                Err(e) => return Err(e),
            }
        };
        let w_inv_tr = w_inv.transpose();

        let gamma = uniform_range(&mut rng, &BigInt::zero(), &self.order);

        let mut a = Vec::with_capacity(self.params.n);
        let mut b = Vec::with_capacity(self.params.n);
        for i in 0..self.params.n {
            let gamma_s_i = mod_floor(&(&gamma * &msk.s.0[i]), &self.order);
            let v = IntVector(vec![x.0[i].clone(), gamma_s_i]);
            let v_i = w_inv_tr.mul_vec_mod(&v, &self.order)?;
            a.push((
                scalar_mul_g1(&g1_generator(), &v_i.0[0]),
                scalar_mul_g1(&g1_generator(), &v_i.0[1]),
            ));

            let neg_t_i = -&msk.t.0[i];
            let v = IntVector(vec![y.0[i].clone(), neg_t_i]);
            let v_i = w.mul_vec_mod(&v, &self.order)?;
            b.push((
                scalar_mul_g2(&g2_generator(), &v_i.0[0]),
                scalar_mul_g2(&g2_generator(), &v_i.0[1]),
            ));
        }

        let g1_gamma = scalar_mul_g1(&g1_generator(), &gamma);
        Ok(QuadraticCiphertext { g1_gamma, a, b })
    }

    /// `S_decrypt`: recover `xᵀ F y` as a `GT` discrete log bounded by
    /// `n² · B³`.
    #[tracing::instrument(skip(self, ct, key, f))]
    pub fn decrypt(&self, ct: &QuadraticCiphertext, key: &QuadraticFeKey, f: &IntMatrix) -> Result<BigInt> {
        if ct.a.len() != self.params.n || ct.b.len() != self.params.n {
            return Err(CfeError::MalformedCipher("quadratic FE: vector length mismatch".into()));
        }
        if f.rows != self.params.n || f.cols != self.params.n {
            return Err(CfeError::MalformedInput("quadratic FE: matrix shape mismatch".into()));
        }

        let mut prod = pair(&ct.g1_gamma, &key.0);
        for i in 0..f.rows {
            for j in 0..f.cols {
                let el = f.get(i, j);
                if el.is_zero() {
                    continue;
                }
                let (t1, t3) = &ct.a[i];
                let (t2, t4) = &ct.b[j];
                let mut contribution = pair(t1, t2) + pair(t3, t4);
                let exponent = if *el < BigInt::zero() {
                    contribution = -contribution;
                    -el
                } else {
                    el.clone()
                };
                prod += gt_scale(&contribution, &exponent);
            }
        }

        let bound = BigInt::from(self.params.n as u64) * BigInt::from(self.params.n as u64) * &self.params.bound * &self.params.bound * &self.params.bound;
        baby_giant_gt_signed(&prod, &gt_generator(), &bound)
    }
}

fn scalar_mul_g1(p: &G1, scalar: &BigInt) -> G1 {
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::PrimeField;
    p.mul_bigint(int_to_scalar(scalar).into_bigint()).into_affine()
}

fn scalar_mul_g2(p: &G2, scalar: &BigInt) -> G2 {
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::PrimeField;
    p.mul_bigint(int_to_scalar(scalar).into_bigint()).into_affine()
}

