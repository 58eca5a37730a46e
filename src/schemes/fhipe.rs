//! Function-hiding inner-product encryption, plus its multi-client
//! extension.
//!
//! Grounded on `examples/original_source/src/innerprod/fullysec/fhipe.c`:
//! two fixed generators `g1 ∈ G1`, `g2 ∈ G2`, and a random dual basis pair
//! `(B, B*)` over `Z_r` (`r` the BN254 scalar field order) satisfying
//! `B · B*ᵀ = det(B) · I`. A functional key for `y` hides `y` behind
//! `B`-transformed, `α`-blinded `G1` points; a ciphertext for `x` hides `x`
//! behind `B*`-transformed, `β`-blinded `G2` points. Decryption pairs them
//! coordinate-wise and recovers `⟨x, y⟩ · α · β · det(B)` as a `GT` discrete
//! log, the `α · β · det(B)` factor having been pre-multiplied into `k1`.

use num_bigint::BigInt;
use rand::rngs::OsRng;

use crate::dlog::baby_giant_gt_signed;
use crate::error::{CfeError, Result};
use crate::group::scalar::int_to_scalar;
use crate::group::{pair, Gt, GtVector};
use crate::math::bigint::uniform_range;
use crate::math::{IntMatrix, IntVector};
use crate::policy::mat_inverse_mod;
use crate::{g1_generator, g2_generator, G1, G2};

/// BN254's scalar field order `r`, the group order every exponent in this
/// scheme is reduced modulo.
fn bn254_order() -> BigInt {
    "21888242871839275222246405745257275088548364400416034343698204186575808495617"
        .parse()
        .expect("fixed BN254 scalar field order")
}

/// Immutable parameters for a function-hiding IPE instance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FhipeParams {
    /// Vector length `ℓ`.
    pub ell: usize,
    /// Coordinate bound on plaintext vectors.
    pub bound_x: BigInt,
    /// Coordinate bound on functional-key vectors.
    pub bound_y: BigInt,
}

/// A function-hiding IPE instance.
#[derive(Debug, Clone)]
pub struct Fhipe {
    params: FhipeParams,
    order: BigInt,
}

/// The master secret key: two generator points and a random dual basis.
#[derive(Debug, Clone)]
pub struct FhipeMasterSecretKey {
    g1: G1,
    g2: G2,
    b: IntMatrix,
    b_star: IntMatrix,
    det: BigInt,
}

/// A functional key for a vector `y`.
#[derive(Debug, Clone)]
pub struct FhipeFeKey {
    k1: G1,
    k2: Vec<G1>,
}

/// A ciphertext for a plaintext vector `x`.
#[derive(Debug, Clone)]
pub struct FhipeCiphertext {
    c1: G2,
    c2: Vec<G2>,
}

impl Fhipe {
    /// `S_init`: requires `ℓ · bound_x · bound_y < r`.
    #[tracing::instrument(skip(params), fields(ell = params.ell))]
    pub fn init(params: FhipeParams) -> Result<Fhipe> {
        let order = bn254_order();
        let check = BigInt::from(params.ell as u64) * &params.bound_x * &params.bound_y;
        if check >= order {
            return Err(CfeError::PreconditionFailed(
                "ell * bound_x * bound_y is not < the BN254 scalar field order".into(),
            ));
        }
        Ok(Fhipe { params, order })
    }

    /// `S_generate_master_key`: random generators, a uniform basis `B`, and
    /// its dual `B* = det(B) · (B⁻¹)ᵀ`.
    #[tracing::instrument(skip_all)]
    pub fn generate_master_key(&self) -> Result<FhipeMasterSecretKey> {
        let mut rng = OsRng;
        let exp1 = uniform_range(&mut rng, &BigInt::from(0), &self.order);
        let exp2 = uniform_range(&mut rng, &BigInt::from(0), &self.order);
        let g1 = scalar_mul_g1(&g1_generator(), &exp1);
        let g2 = scalar_mul_g2(&g2_generator(), &exp2);

        let mut b_data = Vec::with_capacity(self.params.ell * self.params.ell);
        for _ in 0..self.params.ell * self.params.ell {
            b_data.push(uniform_range(&mut rng, &BigInt::from(0), &self.order));
        }
        let b = IntMatrix::from_rows(self.params.ell, self.params.ell, b_data);

        let (b_inv, det) = mat_inverse_mod(&b, &self.order)?;
        let mut b_star = b_inv.transpose();
        for r in 0..b_star.rows {
            for c in 0..b_star.cols {
                let v = crate::math::bigint::mod_floor(&(b_star.get(r, c) * &det), &self.order);
                b_star.set(r, c, v);
            }
        }

        Ok(FhipeMasterSecretKey {
            g1,
            g2,
            b,
            b_star,
            det,
        })
    }

    /// `S_derive_fe_key`.
    #[tracing::instrument(skip(self, y, msk))]
    pub fn derive_fe_key(&self, y: &IntVector, msk: &FhipeMasterSecretKey) -> Result<FhipeFeKey> {
        y.check_bound(&self.params.bound_y)?;
        let mut rng = OsRng;
        let alpha = uniform_range(&mut rng, &BigInt::from(0), &self.order);

        let alpha_det = crate::math::bigint::mod_floor(&(&alpha * &msk.det), &self.order);
        let k1 = scalar_mul_g1(&msk.g1, &alpha_det);

        let b_y = msk.b.mul_vec_mod(y, &self.order)?;
        let alpha_b_y = IntVector(
            b_y.0
                .iter()
                .map(|v| crate::math::bigint::mod_floor(&(v * &alpha), &self.order))
                .collect(),
        );
        let k2 = alpha_b_y.0.iter().map(|v| scalar_mul_g1(&msk.g1, v)).collect();

        Ok(FhipeFeKey { k1, k2 })
    }

    /// `S_encrypt`.
    #[tracing::instrument(skip(self, x, msk))]
    pub fn encrypt(&self, x: &IntVector, msk: &FhipeMasterSecretKey) -> Result<FhipeCiphertext> {
        x.check_bound(&self.params.bound_x)?;
        let mut rng = OsRng;
        let beta = uniform_range(&mut rng, &BigInt::from(0), &self.order);
        let c1 = scalar_mul_g2(&msk.g2, &beta);

        let b_star_x = msk.b_star.mul_vec_mod(x, &self.order)?;
        let beta_b_star_x = IntVector(
            b_star_x
                .0
                .iter()
                .map(|v| crate::math::bigint::mod_floor(&(v * &beta), &self.order))
                .collect(),
        );
        let c2 = beta_b_star_x.0.iter().map(|v| scalar_mul_g2(&msk.g2, v)).collect();

        Ok(FhipeCiphertext { c1, c2 })
    }

    /// `S_decrypt`: recover `⟨x, y⟩` as a `GT` discrete log bounded by
    /// `ℓ · bound_x · bound_y`.
    #[tracing::instrument(skip(self, ct, key))]
    pub fn decrypt(&self, ct: &FhipeCiphertext, key: &FhipeFeKey) -> Result<BigInt> {
        if ct.c2.len() != self.params.ell || key.k2.len() != self.params.ell {
            return Err(CfeError::MalformedCipher("FH-IPE: vector length mismatch".into()));
        }
        let d1 = pair(&key.k1, &ct.c1);
        let d2 = GtVector(
            key.k2
                .iter()
                .zip(ct.c2.iter())
                .map(|(k2_i, c2_i)| pair(k2_i, c2_i))
                .collect(),
        )
        .sum();

        let bound = BigInt::from(self.params.ell as u64) * &self.params.bound_x * &self.params.bound_y;
        baby_giant_gt_signed(&d2, &d1, &bound)
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

/// Multi-client function-hiding IPE, collusion-resistant across clients.
///
/// Grounded on
/// `examples/original_source/src/innerprod/fullysec/fh_multi_ipe.c`
/// (its header comment calls it a "Damgard multi input scheme", but the body
/// is the FH-IPE multi-client construction). Each client gets its own random
/// dual basis `(B_i, B*_i)` over a shared field, but `B*_i` is scaled by one
/// `mu` shared by every client instead of a per-instance blinding scalar, so
/// the public key `e(g1,g2)^mu` is fixed once at setup. On top of the
/// `vec_len` real coordinates, every basis carries `sec_level` extra
/// dimensions: the first is a zero-sum share `γ_i` of a `mu`-scaled constant
/// (`Σ_i γ_i = 0`), split across clients the same way `ddh_multi`'s
/// decentralized OTP splits its blinding term, so pairing a single client's
/// functional key against its own ciphertext alone yields `⟨x_i,y_i⟩` plus an
/// unremovable `γ_i` offset — only summing every client's share cancels it.
/// The remaining `sec_level - 1` dimensions are independent Gaussian-style
/// padding, disjoint between the key side and the ciphertext side by
/// construction (the key never assigns a value to the ciphertext-only
/// padding coordinates and vice versa), so they never interact during an
/// honest decryption — in the original C they occupy non-overlapping rows of
/// each client's `2·vec_len + 2·sec_level + 1`-wide basis for the same
/// reason. This crate folds that padding into a basis of width
/// `vec_len + 2·sec_level` per client (dropping the further rows the
/// original carries purely as inert hiding dimensions for its security
/// proof's simulator, never read or written by any honest `encrypt`/
/// `derive_fe_key`/`decrypt` call), which is observationally identical for
/// every real protocol run.
pub mod multi_client {
    use super::*;
    use crate::group::{gt_generator, gt_scale, GroupVector};
    use ark_ff::Zero;

    /// Parameters for a collusion-resistant multi-client FH-IPE instance.
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    pub struct FhipeMultiParams {
        /// Number of participating clients `n`.
        pub num_clients: usize,
        /// Per-client vector length `ℓ`.
        pub vec_len: usize,
        /// Extra per-client basis dimensions blocking collusion; must be
        /// at least 1 (the zero-sum coordinate). Values above 1 add inert
        /// Gaussian-style padding with no effect on correctness, matching
        /// the hiding-only dimensions of the original construction.
        pub sec_level: usize,
        /// Coordinate bound on plaintext vectors.
        pub bound_x: BigInt,
        /// Coordinate bound on functional-key vectors.
        pub bound_y: BigInt,
    }

    /// A multi-client FH-IPE instance.
    pub struct FhipeMulti {
        params: FhipeMultiParams,
        order: BigInt,
        dim: usize,
    }

    /// The master secret key: a shared blinding scalar `mu`, plus one dual
    /// basis pair `(B_i, B*_i)` per client, `B*_i` pre-scaled by `mu`.
    pub struct FhipeMultiMasterSecretKey {
        pub mu: BigInt,
        pub bases: Vec<(IntMatrix, IntMatrix)>,
    }

    /// A functional key for a per-client set of vectors `(y_1, ..., y_n)`:
    /// one `G2` vector per client, each of width `vec_len + 2·sec_level`.
    pub struct FhipeMultiFeKey(pub Vec<Vec<G2>>);

    /// A ciphertext: one `G1` vector per client slot.
    pub struct FhipeMultiCiphertext(pub Vec<Vec<G1>>);

    impl FhipeMulti {
        /// `S_init`: requires `vec_len · num_clients · bound_x · bound_y < r`
        /// and at least one collusion-blocking dimension per client.
        #[tracing::instrument(skip(params), fields(vec_len = params.vec_len, num_clients = params.num_clients))]
        pub fn init(params: FhipeMultiParams) -> Result<FhipeMulti> {
            if params.sec_level == 0 {
                return Err(CfeError::PreconditionFailed(
                    "FH-IPE-multi: sec_level must be at least 1".into(),
                ));
            }
            if params.num_clients == 0 {
                return Err(CfeError::PreconditionFailed(
                    "FH-IPE-multi: num_clients must be at least 1".into(),
                ));
            }
            let order = bn254_order();
            let check = BigInt::from((params.vec_len * params.num_clients) as u64)
                * &params.bound_x
                * &params.bound_y;
            if check >= order {
                return Err(CfeError::PreconditionFailed(
                    "vec_len * num_clients * bound_x * bound_y is not < the BN254 scalar field order".into(),
                ));
            }
            let dim = params.vec_len + 2 * params.sec_level;
            Ok(FhipeMulti { params, order, dim })
        }

        /// `S_generate_keys`: one shared `mu` giving the fixed public base
        /// `e(g1,g2)^mu`, and one independent random dual basis per client,
        /// each `B*_i` scaled by that same `mu`.
        #[tracing::instrument(skip_all)]
        pub fn generate_master_keys(&self) -> Result<(FhipeMultiMasterSecretKey, Gt)> {
            let mut rng = OsRng;
            let mu = uniform_range(&mut rng, &BigInt::from(0), &self.order);
            let pub_key = gt_scale(&gt_generator(), &mu);

            let mut bases = Vec::with_capacity(self.params.num_clients);
            for _ in 0..self.params.num_clients {
                let mut b_data = Vec::with_capacity(self.dim * self.dim);
                for _ in 0..self.dim * self.dim {
                    b_data.push(uniform_range(&mut rng, &BigInt::from(0), &self.order));
                }
                let b = IntMatrix::from_rows(self.dim, self.dim, b_data);
                let (b_inv, _det) = mat_inverse_mod(&b, &self.order)?;
                let mut b_star = b_inv.transpose();
                for r in 0..b_star.rows {
                    for c in 0..b_star.cols {
                        let v = crate::math::bigint::mod_floor(&(b_star.get(r, c) * &mu), &self.order);
                        b_star.set(r, c, v);
                    }
                }
                bases.push((b, b_star));
            }
            Ok((FhipeMultiMasterSecretKey { mu, bases }, pub_key))
        }

        /// Combine a matrix's rows under integer weights: `Σ_j v_j · row_j(m)`.
        fn row_combination(&self, m: &IntMatrix, v: &IntVector) -> Result<IntVector> {
            m.transpose().mul_vec_mod(v, &self.order)
        }

        /// `S_derive_fe_key` for one vector `y_i` per client. Samples the
        /// `sec_level × num_clients` padding matrix `γ`, zero-sums its first
        /// row across clients, and leaves the rest uniform.
        #[tracing::instrument(skip(self, msk, y))]
        pub fn derive_fe_key(&self, msk: &FhipeMultiMasterSecretKey, y: &[IntVector]) -> Result<FhipeMultiFeKey> {
            if y.len() != self.params.num_clients || msk.bases.len() != self.params.num_clients {
                return Err(CfeError::MalformedInput("FH-IPE-multi: client count mismatch".into()));
            }
            let mut rng = OsRng;
            let n = self.params.num_clients;
            let k = self.params.sec_level;
            let mut gamma = IntMatrix::from_rows(
                k,
                n,
                (0..k * n).map(|_| uniform_range(&mut rng, &BigInt::from(0), &self.order)).collect(),
            );
            let mut row0_sum = BigInt::from(0);
            for i in 0..n - 1 {
                row0_sum += gamma.get(0, i).clone();
            }
            gamma.set(0, n - 1, crate::math::bigint::mod_floor(&-row0_sum, &self.order));

            let mut per_client = Vec::with_capacity(n);
            for (i, (y_i, (_, b_star_i))) in y.iter().zip(msk.bases.iter()).enumerate() {
                y_i.check_bound(&self.params.bound_y)?;
                if y_i.len() != self.params.vec_len {
                    return Err(CfeError::MalformedInput("FH-IPE-multi: y length mismatch".into()));
                }
                let mut coeffs = y_i.0.clone();
                for t in 0..k {
                    coeffs.push(gamma.get(t, i).clone());
                }
                coeffs.resize(self.dim, BigInt::from(0));
                let key_vec = self.row_combination(b_star_i, &IntVector(coeffs))?;
                per_client.push(GroupVector::<G2>::lift_generator(&key_vec).0);
            }
            Ok(FhipeMultiFeKey(per_client))
        }

        /// `S_encrypt` for client `client_idx`'s plaintext slice `x_i`.
        #[tracing::instrument(skip(self, msk, x_i))]
        pub fn encrypt_slot(
            &self,
            client_idx: usize,
            msk: &FhipeMultiMasterSecretKey,
            x_i: &IntVector,
        ) -> Result<Vec<G1>> {
            x_i.check_bound(&self.params.bound_x)?;
            if x_i.len() != self.params.vec_len {
                return Err(CfeError::MalformedInput("FH-IPE-multi: x length mismatch".into()));
            }
            let (b_i, _) = msk
                .bases
                .get(client_idx)
                .ok_or_else(|| CfeError::MalformedInput("FH-IPE-multi: client index out of range".into()))?;
            let mut rng = OsRng;
            let k = self.params.sec_level;
            let mut coeffs = x_i.0.clone();
            coeffs.push(BigInt::from(1));
            coeffs.resize(self.params.vec_len + k, BigInt::from(0));
            for _ in 0..k {
                coeffs.push(uniform_range(&mut rng, &BigInt::from(0), &self.order));
            }
            let cipher_vec = self.row_combination(b_i, &IntVector(coeffs))?;
            Ok(GroupVector::<G1>::lift_generator(&cipher_vec).0)
        }

        /// `S_decrypt`: pair every client's functional key against its
        /// ciphertext coordinate-wise, sum across clients and coordinates,
        /// and recover the discrete log against the fixed base `e(g1,g2)^mu`.
        #[tracing::instrument(skip(self, ct, key, pub_key))]
        pub fn decrypt(&self, ct: &FhipeMultiCiphertext, key: &FhipeMultiFeKey, pub_key: &Gt) -> Result<BigInt> {
            if ct.0.len() != self.params.num_clients || key.0.len() != self.params.num_clients {
                return Err(CfeError::MalformedCipher("FH-IPE-multi: client count mismatch".into()));
            }
            let mut total = Gt::zero();
            for (cipher_i, key_i) in ct.0.iter().zip(key.0.iter()) {
                if cipher_i.len() != key_i.len() {
                    return Err(CfeError::MalformedCipher("FH-IPE-multi: per-client width mismatch".into()));
                }
                for (c, k) in cipher_i.iter().zip(key_i.iter()) {
                    total += pair(c, k);
                }
            }
            let bound =
                BigInt::from((self.params.vec_len * self.params.num_clients) as u64) * &self.params.bound_x * &self.params.bound_y;
            baby_giant_gt_signed(&total, pub_key, &bound)
        }
    }
}
