//! Key-policy attribute-based encryption, the Goyal-Pandey-Sahai-Waters
//! construction.
//!
//! Grounded on `examples/original_source/src/abe/gpsw.c`: a flat attribute
//! universe `{0, …, ℓ-1}`, a master secret vector `sk ∈ Z_p^{ℓ+1}` (the last
//! coordinate is the "master" exponent), a ciphertext labeled by a set of
//! attributes `γ`, and a functional key built from a Monotone Span Program
//! whose rows are assigned to attributes: [`generate_policy_keys`] derives
//! one `G1` share per MSP row from a random sum-to-`sk[ℓ]` splitting, and
//! [`delegate_keys`] hands a decryptor the rows matching its own attribute
//! set. Decryption recovers the MSP's reconstruction coefficients (the
//! vector that combines the decryptor's rows into the all-ones target) via
//! Gaussian elimination and uses them to cancel the random splitting.

use num_bigint::BigInt;
use num_traits::One;
use rand::rngs::OsRng;

use crate::error::{CfeError, Result};
use crate::group::scalar::int_to_scalar;
use crate::group::{gt_generator, gt_scale, pair};
use crate::math::bigint::{mod_inverse, uniform_range};
use crate::math::{IntMatrix, IntVector};
use crate::policy::{gaussian_elimination_solve, Msp};
use crate::{g1_generator, GT, G1, G2};

fn bn254_order() -> BigInt {
    "21888242871839275222246405745257275088548364400416034343698204186575808495617"
        .parse()
        .expect("fixed BN254 scalar field order")
}

/// Immutable parameters for a KP-ABE instance: the size of the flat
/// attribute universe.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GpswParams {
    pub ell: usize,
}

/// A KP-ABE instance.
#[derive(Debug, Clone)]
pub struct Gpsw {
    params: GpswParams,
    p: BigInt,
}

/// Master public key: one `G2` point per attribute, and `y = e(g1,g2)^{sk[ℓ]}`.
#[derive(Debug, Clone)]
pub struct GpswMasterPublicKey {
    pub t: Vec<G2>,
    pub y: GT,
}

/// Master secret key: `sk ∈ Z_p^{ℓ+1}`.
#[derive(Debug, Clone)]
pub struct GpswMasterSecretKey(pub IntVector);

/// A ciphertext labeled by the attribute set `γ`.
#[derive(Debug, Clone)]
pub struct GpswCiphertext {
    pub e0: GT,
    pub e: Vec<G2>,
    pub gamma: Vec<usize>,
}

/// A decryptor's functional key: the rows of the MSP matching its owned
/// attributes, plus one `G1` share per row.
#[derive(Debug, Clone)]
pub struct GpswKeys {
    pub mat: IntMatrix,
    pub d: Vec<G1>,
    pub row_to_attrib: Vec<i64>,
}

impl Gpsw {
    /// `S_init`.
    #[tracing::instrument(skip(params), fields(ell = params.ell))]
    pub fn init(params: GpswParams) -> Gpsw {
        Gpsw { params, p: bn254_order() }
    }

    /// `S_generate_master_keys`.
    #[tracing::instrument(skip_all)]
    pub fn generate_master_keys(&self) -> (GpswMasterPublicKey, GpswMasterSecretKey) {
        let mut rng = OsRng;
        let sk: Vec<BigInt> = (0..=self.params.ell)
            .map(|_| uniform_range(&mut rng, &BigInt::from(0), &self.p))
            .collect();

        let g2 = crate::g2_generator();
        let t: Vec<G2> = sk[..self.params.ell].iter().map(|si| scalar_mul_g2(&g2, si)).collect();

        let gt = gt_generator();
        let y = gt_scale(&gt, &sk[self.params.ell]);

        (GpswMasterPublicKey { t, y }, GpswMasterSecretKey(IntVector(sk)))
    }

    /// `S_encrypt`: blind a `GT` message `msg` under the attribute set `γ`.
    #[tracing::instrument(skip(self, msg, mpk))]
    pub fn encrypt(&self, msg: &GT, gamma: &[usize], mpk: &GpswMasterPublicKey) -> Result<GpswCiphertext> {
        if gamma.iter().any(|&a| a >= self.params.ell) {
            return Err(CfeError::MalformedInput("GPSW: attribute index out of range".into()));
        }
        let mut rng = OsRng;
        let s = uniform_range(&mut rng, &BigInt::from(0), &self.p);
        let e0 = gt_scale(&mpk.y, &s) + *msg;
        let e = gamma.iter().map(|&a| scalar_mul_g2(&mpk.t[a], &s)).collect();
        Ok(GpswCiphertext {
            e0,
            e,
            gamma: gamma.to_vec(),
        })
    }

    /// Split `y` into `d` shares summing to `y mod p`, the last share
    /// absorbing the residual.
    fn get_sum(&self, y: &BigInt, d: usize) -> IntVector {
        let mut rng = OsRng;
        let mut v: Vec<BigInt> = (0..d).map(|_| uniform_range(&mut rng, &BigInt::from(0), &self.p)).collect();
        let sum: BigInt = v[..d - 1].iter().sum();
        v[d - 1] = crate::math::bigint::mod_floor(&(y - sum), &self.p);
        IntVector(v)
    }

    /// Derive one `G1` share per MSP row from a random sum-to-`sk[ℓ]`
    /// splitting, each divided by the row's attribute secret.
    #[tracing::instrument(skip(self, msp, sk))]
    pub fn generate_policy_keys(&self, msp: &Msp, sk: &GpswMasterSecretKey) -> Result<Vec<G1>> {
        let u = self.get_sum(&(sk.0).0[self.params.ell], msp.cols());
        let g1 = g1_generator();
        let mut keys = Vec::with_capacity(msp.rows());
        for i in 0..msp.rows() {
            let attrib = msp.row_to_attrib[i];
            if attrib < 0 || attrib as usize >= self.params.ell {
                return Err(CfeError::MalformedPolicy("GPSW: MSP row names an out-of-range attribute".into()));
            }
            let t_map_i_inv = mod_inverse(&(sk.0).0[attrib as usize], &self.p)
                .ok_or_else(|| CfeError::SecKeyGenFailed("attribute secret not invertible mod p".into()))?;
            let mat_times_u = IntVector(msp.mat.row(i).to_vec()).dot(&u)?;
            let pow = crate::math::bigint::mod_floor(&(t_map_i_inv * mat_times_u), &self.p);
            keys.push(scalar_mul_g1(&g1, &pow));
        }
        Ok(keys)
    }

    /// Restrict the policy keys to the rows whose attribute is in `attribs`.
    #[tracing::instrument(skip(self, policy_keys, msp))]
    pub fn delegate_keys(&self, policy_keys: &[G1], msp: &Msp, attribs: &[i64]) -> GpswKeys {
        let positions = msp.rows_for_attributes(attribs);
        let selected = msp.mat.select_rows(&positions);
        let d = positions.iter().map(|&i| policy_keys[i]).collect();
        let row_to_attrib = positions.iter().map(|&i| msp.row_to_attrib[i]).collect();
        GpswKeys {
            mat: selected,
            d,
            row_to_attrib,
        }
    }

    /// `S_decrypt`: recover the MSP reconstruction coefficients and cancel
    /// the random splitting pairing-by-pairing.
    #[tracing::instrument(skip(self, cipher, keys))]
    pub fn decrypt(&self, cipher: &GpswCiphertext, keys: &GpswKeys) -> Result<GT> {
        let ones = IntVector(vec![BigInt::one(); keys.mat.cols]);
        let alpha = gaussian_elimination_solve(&keys.mat.transpose(), &ones, &self.p)
            .map_err(|_| CfeError::InsufficientKeys)?;

        let mut positions = Vec::with_capacity(keys.mat.rows);
        for &attrib in &keys.row_to_attrib {
            let pos = cipher
                .gamma
                .iter()
                .position(|&a| a as i64 == attrib)
                .ok_or(CfeError::InsufficientKeys)?;
            positions.push(pos);
        }

        let mut decryption = cipher.e0;
        for i in 0..keys.mat.rows {
            let pair_val = pair(&keys.d[i], &cipher.e[positions[i]]);
            decryption -= gt_scale(&pair_val, &alpha.0[i]);
        }
        Ok(decryption)
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
