//! Ciphertext-policy attribute-based encryption, the Agrawal-Chase "FAME"
//! construction.
//!
//! Grounded on `examples/original_source/src/abe/fame.c` for setup, key
//! generation, and encryption: a size-`k=2` assumption with secret
//! exponents `(a1, a2, b1, b2, d1, d2, d3)`, three hash-tagged `G1` points
//! per MSP row (indices `0..3`) combined according to the policy matrix
//! entry, and per-attribute keys built the same way from the attribute's
//! own tag. The original source's decryption routine was not present in the
//! retrieval pack (only declared in its header); the decryption below is
//! this crate's own derivation of the published construction's pairing
//! cancellation, using the identical key/ciphertext layout the rest of the
//! file is grounded on — see `DESIGN.md`.
//!
//! Hash-to-curve uses [`crate::group::hash_to_group`]'s explicit
//! domain-separation tag rather than the original's ad hoc string
//! concatenation, to the same effect.

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{PrimeField, Zero};
use num_bigint::BigInt;
use rand::rngs::OsRng;

use crate::error::{CfeError, Result};
use crate::group::scalar::int_to_scalar;
use crate::group::{hash_to_group, pair};
use crate::math::bigint::{mod_inverse, uniform_range};
use crate::math::IntVector;
use crate::policy::{gaussian_elimination_solve, Msp};
use crate::{g1_generator, g2_generator, GT, G1, G2};

fn g1_identity() -> G1 {
    G1::identity()
}

fn g1_add(a: G1, b: G1) -> G1 {
    (a + b).into_affine()
}

const DOMAIN_ATTR: &[u8] = b"cfe-fame-attr";
const DOMAIN_COL: &[u8] = b"cfe-fame-col";

fn bn254_order() -> BigInt {
    "21888242871839275222246405745257275088548364400416034343698204186575808495617"
        .parse()
        .expect("fixed BN254 scalar field order")
}

fn tag(attrib: i64, slot: usize, k: usize) -> Vec<u8> {
    format!("{attrib} {slot} {k}").into_bytes()
}

fn col_tag(col: usize, slot: usize, k: usize) -> Vec<u8> {
    format!("{col} {slot} {k}").into_bytes()
}

/// A FAME instance: just the shared group order `p`.
#[derive(Debug, Clone)]
pub struct Fame {
    p: BigInt,
}

/// Public key: `(g2^{a1}, g2^{a2})` and `(e(g1,g2)^{a1 d1 + d3},
/// e(g1,g2)^{a2 d2 + d3})`.
#[derive(Debug, Clone)]
pub struct FameMasterPublicKey {
    pub part_g2: [G2; 2],
    pub part_gt: [GT; 2],
}

/// Master secret key: `(a1, a2, b1, b2)` and `(g1^{d1}, g1^{d2}, g1^{d3})`.
#[derive(Debug, Clone)]
pub struct FameMasterSecretKey {
    pub part_int: [BigInt; 4],
    pub part_g1: [G1; 3],
}

/// A ciphertext for a message `msg ∈ GT`, encrypted under an MSP policy.
#[derive(Debug, Clone)]
pub struct FameCiphertext {
    pub ct0: [G2; 3],
    pub ct: Vec<[G1; 3]>,
    pub ct_prime: GT,
    pub msp: Msp,
}

/// A decryptor's attribute keys.
#[derive(Debug, Clone)]
pub struct FameAttribKeys {
    pub k0: [G2; 3],
    pub k: Vec<[G1; 3]>,
    pub row_to_attrib: Vec<i64>,
}

impl Fame {
    /// `S_init`.
    #[tracing::instrument]
    pub fn init() -> Fame {
        Fame { p: bn254_order() }
    }

    /// `S_generate_master_keys`.
    #[tracing::instrument(skip_all)]
    pub fn generate_master_keys(&self) -> (FameMasterPublicKey, FameMasterSecretKey) {
        let mut rng = OsRng;
        let val: Vec<BigInt> = (0..7).map(|_| uniform_range(&mut rng, &BigInt::from(0), &self.p)).collect();
        let (a1, a2, b1, b2, d1, d2, d3) = (
            val[0].clone(),
            val[1].clone(),
            val[2].clone(),
            val[3].clone(),
            val[4].clone(),
            val[5].clone(),
            val[6].clone(),
        );

        let g1 = g1_generator();
        let g2 = g2_generator();
        let part_g1 = [scalar_mul_g1(&g1, &d1), scalar_mul_g1(&g1, &d2), scalar_mul_g1(&g1, &d3)];
        let part_g2 = [scalar_mul_g2(&g2, &a1), scalar_mul_g2(&g2, &a2)];

        let gt = pair(&g1, &g2);
        let exp0 = crate::math::bigint::mod_floor(&(&a1 * &d1 + &d3), &self.p);
        let exp1 = crate::math::bigint::mod_floor(&(&a2 * &d2 + &d3), &self.p);
        let part_gt = [crate::group::gt_scale(&gt, &exp0), crate::group::gt_scale(&gt, &exp1)];

        (
            FameMasterPublicKey { part_g2, part_gt },
            FameMasterSecretKey {
                part_int: [a1, a2, b1, b2],
                part_g1,
            },
        )
    }

    /// `S_encrypt`.
    #[tracing::instrument(skip(self, msg, msp, mpk))]
    pub fn encrypt(&self, msg: &GT, msp: &Msp, mpk: &FameMasterPublicKey) -> Result<FameCiphertext> {
        let mut rng = OsRng;
        let s = [
            uniform_range(&mut rng, &BigInt::from(0), &self.p),
            uniform_range(&mut rng, &BigInt::from(0), &self.p),
        ];

        let ct0 = [
            scalar_mul_g2(&mpk.part_g2[0], &s[0]),
            scalar_mul_g2(&mpk.part_g2[1], &s[1]),
            scalar_mul_g2(&g2_generator(), &(&s[0] + &s[1])),
        ];

        let mut ct = Vec::with_capacity(msp.rows());
        for i in 0..msp.rows() {
            let attrib = msp.row_to_attrib[i];
            let mut row = [g1_identity(); 3];
            for l in 0..3 {
                let h0 = scalar_mul_g1(&hash_to_group::<G1>(DOMAIN_ATTR, &tag(attrib, l, 0)), &s[0]);
                let h1 = scalar_mul_g1(&hash_to_group::<G1>(DOMAIN_ATTR, &tag(attrib, l, 1)), &s[1]);
                let mut acc = g1_add(h0, h1);

                for j in 0..msp.cols() {
                    let c0 = scalar_mul_g1(&hash_to_group::<G1>(DOMAIN_COL, &col_tag(j, l, 0)), &s[0]);
                    let c1 = scalar_mul_g1(&hash_to_group::<G1>(DOMAIN_COL, &col_tag(j, l, 1)), &s[1]);
                    let combined = g1_add(c0, c1);
                    let entry = msp.mat.get(i, j);
                    let scaled = scalar_mul_g1(&combined, entry);
                    acc = g1_add(acc, scaled);
                }
                row[l] = acc;
            }
            ct.push(row);
        }

        let ct_prime = crate::group::gt_scale(&mpk.part_gt[0], &s[0]) + crate::group::gt_scale(&mpk.part_gt[1], &s[1]) + *msg;

        Ok(FameCiphertext {
            ct0,
            ct,
            ct_prime,
            msp: msp.clone(),
        })
    }

    /// `S_generate_attrib_keys`.
    #[tracing::instrument(skip(self, gamma, msk))]
    pub fn generate_attrib_keys(&self, gamma: &[i64], msk: &FameMasterSecretKey) -> Result<FameAttribKeys> {
        let mut rng = OsRng;
        let r = [
            uniform_range(&mut rng, &BigInt::from(0), &self.p),
            uniform_range(&mut rng, &BigInt::from(0), &self.p),
        ];
        let sigma: Vec<BigInt> = (0..gamma.len())
            .map(|_| uniform_range(&mut rng, &BigInt::from(0), &self.p))
            .collect();

        let pow0 = crate::math::bigint::mod_floor(&(&msk.part_int[2] * &r[0]), &self.p);
        let pow1 = crate::math::bigint::mod_floor(&(&msk.part_int[3] * &r[1]), &self.p);
        let pow2 = crate::math::bigint::mod_floor(&(&r[0] + &r[1]), &self.p);
        let g2 = g2_generator();
        let k0 = [scalar_mul_g2(&g2, &pow0), scalar_mul_g2(&g2, &pow1), scalar_mul_g2(&g2, &pow2)];

        let a_inv = [
            mod_inverse(&msk.part_int[0], &self.p)
                .ok_or_else(|| CfeError::SecKeyGenFailed("a1 not invertible mod p".into()))?,
            mod_inverse(&msk.part_int[1], &self.p)
                .ok_or_else(|| CfeError::SecKeyGenFailed("a2 not invertible mod p".into()))?,
        ];

        let g1 = g1_generator();
        let mut k = Vec::with_capacity(gamma.len());
        for (i, &attrib) in gamma.iter().enumerate() {
            let g_sigma = scalar_mul_g1(&g1, &sigma[i]);
            let mut row = [g1_identity(); 3];
            for t in 0..2 {
                let mut acc = g_sigma;
                for j in 0..3 {
                    acc = g1_add(acc, hash_to_group::<G1>(DOMAIN_ATTR, &tag(attrib, j, t)));
                }
                row[t] = scalar_mul_g1(&acc, &a_inv[t]);
            }
            row[2] = (-g_sigma.into_group()).into_affine();
            k.push(row);
        }

        Ok(FameAttribKeys {
            k0,
            k,
            row_to_attrib: gamma.to_vec(),
        })
    }

    /// `S_decrypt`: requires the owned attributes' MSP rows to reconstruct
    /// the target vector `(1, 0, …, 0)`.
    #[tracing::instrument(skip(self, cipher, keys))]
    pub fn decrypt(&self, cipher: &FameCiphertext, keys: &FameAttribKeys) -> Result<GT> {
        let positions = cipher.msp.rows_for_attributes(&keys.row_to_attrib);
        if positions.is_empty() {
            return Err(CfeError::InsufficientKeys);
        }
        let mat_sub = cipher.msp.mat.select_rows(&positions);
        let mut target = vec![BigInt::from(0); cipher.msp.cols()];
        if !target.is_empty() {
            target[0] = BigInt::from(1);
        }
        let alpha = gaussian_elimination_solve(&mat_sub.transpose(), &IntVector(target), &self.p)
            .map_err(|_| CfeError::InsufficientKeys)?;

        let mut decryption = cipher.ct_prime;
        for (row_idx, &pos) in positions.iter().enumerate() {
            let attrib = cipher.msp.row_to_attrib[pos];
            let key_idx = keys
                .row_to_attrib
                .iter()
                .position(|&a| a == attrib)
                .ok_or(CfeError::InsufficientKeys)?;

            let mut e_i = GT::zero();
            for l in 0..3 {
                e_i += pair(&cipher.ct[pos][l], &keys.k0[l]);
            }
            let mut f_i = GT::zero();
            for t in 0..3 {
                f_i += pair(&keys.k[key_idx][t], &cipher.ct0[t]);
            }

            let alpha_i = &alpha.0[row_idx];
            decryption += crate::group::gt_scale(&(f_i - e_i), alpha_i);
        }

        Ok(decryption)
    }
}

fn scalar_mul_g1(p: &G1, scalar: &BigInt) -> G1 {
    p.mul_bigint(int_to_scalar(scalar).into_bigint()).into_affine()
}

fn scalar_mul_g2(p: &G2, scalar: &BigInt) -> G2 {
    p.mul_bigint(int_to_scalar(scalar).into_bigint()).into_affine()
}
