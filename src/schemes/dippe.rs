//! Decentralized inner-product predicate encryption.
//!
//! Grounded on `examples/original_source/src/abe/dippe.c`: a size-`k`
//! assumption shared by every authority, fixed once at setup as two public
//! `G1` matrices `g1^A` (`(k+1)×k`) and `g1^{UA}` (`(k+1)×k`, `U` a random
//! `(k+1)×(k+1)` mixing matrix discarded after use). Each authority
//! independently samples `(σ, α, W)` and publishes `g2^σ`, `g1^{WᵀA}`, and
//! `gt^{αᵀA}`; a decryptor's key for authority `m` combines that authority's
//! share of a `Z_r`-valued policy vector `v` against an attribute vector `w`
//! of the same length, cross-authority-bound via a `gid`-tagged hash so
//! shares from different authorities for the same user line up. Decryption
//! succeeds — recovering the encrypted `GT` message exactly — iff
//! `⟨v, w⟩ = 0 mod r`; otherwise it returns an unrelated group element.
//! [`crate::policy::dippe_policy`] builds `(v, w)` pairs for conjunction and
//! exact-threshold predicates.

use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ff::{PrimeField, Zero};
use ark_serialize::CanonicalSerialize;
use num_bigint::BigInt;
use rand::rngs::OsRng;

use crate::error::{CfeError, Result};
use crate::group::scalar::int_to_scalar;
use crate::group::{gt_scale, pair, GroupMatrix, GroupVector};
use crate::math::bigint::uniform_range;
use crate::math::{IntMatrix, IntVector};
use crate::{g2_generator, GT, G1, G2};

const DOMAIN_COORD: &[u8] = b"cfe-dippe-coord";
const DOMAIN_MUE: &[u8] = b"cfe-dippe-mue";

fn bn254_order() -> BigInt {
    "21888242871839275222246405745257275088548364400416034343698204186575808495617"
        .parse()
        .expect("fixed BN254 scalar field order")
}

/// Hash `(i, gid, attrs)` to a `G2` point, independent of any authority.
fn hash_coord(i: usize, gid: &str, attrs: &IntVector) -> G2 {
    let mut buf = format!("{i}|{gid}|").into_bytes();
    for a in &attrs.0 {
        buf.extend_from_slice(a.to_string().as_bytes());
        buf.push(b',');
    }
    crate::group::hash_to_group::<G2>(DOMAIN_COORD, &buf)
}

/// Hash a pairwise Diffie-Hellman term (an authority-to-authority shared
/// `G2` point) together with `gid`/`attrs` into the cross-authority binding
/// term `μ`.
fn hash_mue_term(point: &G2, gid: &str, attrs: &IntVector) -> G2 {
    let mut buf = Vec::new();
    point.serialize_compressed(&mut buf).expect("G2 serializes");
    buf.extend_from_slice(gid.as_bytes());
    buf.push(b'|');
    for a in &attrs.0 {
        buf.extend_from_slice(a.to_string().as_bytes());
        buf.push(b',');
    }
    crate::group::hash_to_group::<G2>(DOMAIN_MUE, &buf)
}

/// `M * G`: left-multiply a `G1` group matrix by a plain integer matrix,
/// entrywise scalar multiplication summed over the contracted dimension.
fn int_mat_mul_g1_mat(m: &IntMatrix, g: &GroupMatrix<G1>) -> GroupMatrix<G1> {
    assert_eq!(m.cols, g.rows, "DIPPE: int/group matrix contraction shape mismatch");
    let mut data = Vec::with_capacity(m.rows * g.cols);
    for r in 0..m.rows {
        for c in 0..g.cols {
            let mut acc = <G1 as AffineRepr>::Group::zero();
            for l in 0..m.cols {
                acc += g.get(l, c).mul_bigint(int_to_scalar(m.get(r, l)).into_bigint());
            }
            data.push(acc.into_affine());
        }
    }
    GroupMatrix::from_rows(m.rows, g.cols, data)
}

fn scalar_mul_g1(p: &G1, scalar: &BigInt) -> G1 {
    p.mul_bigint(int_to_scalar(scalar).into_bigint()).into_affine()
}

fn scalar_mul_g2(p: &G2, scalar: &BigInt) -> G2 {
    p.mul_bigint(int_to_scalar(scalar).into_bigint()).into_affine()
}

fn g1_add(a: G1, b: G1) -> G1 {
    (a + b).into_affine()
}

/// Immutable parameters shared by every DIPPE authority: the assumption
/// size `k`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DippeParams {
    pub assump_size: usize,
}

/// The shared, authority-independent part of the scheme: the assumption
/// matrices `g1^A` and `g1^{UA}`.
#[derive(Debug, Clone)]
pub struct Dippe {
    params: DippeParams,
    p: BigInt,
    g1_a: GroupMatrix<G1>,
    g1_ua: GroupMatrix<G1>,
}

/// One authority's public key.
#[derive(Debug, Clone)]
pub struct DippePubKey {
    pub g2_sigma: G2,
    pub g1_w_a: GroupMatrix<G1>,
    pub gt_alpha_a: Vec<GT>,
}

/// One authority's secret key.
#[derive(Debug, Clone)]
pub struct DippeSecKey {
    sigma: BigInt,
    alpha: IntVector,
    w: IntMatrix,
}

/// A ciphertext encrypted under a policy vector `v` of length `m` (the
/// number of participating authorities).
#[derive(Debug, Clone)]
pub struct DippeCiphertext {
    pub c0: GroupVector<G1>,
    pub ci: GroupMatrix<G1>,
    pub c_prime: GT,
}

/// A decryptor's share of a functional key from one authority.
#[derive(Debug, Clone)]
pub struct DippeUserSecKey {
    pub ki: GroupVector<G2>,
}

impl Dippe {
    /// `S_init`: sample the shared assumption matrices.
    #[tracing::instrument(skip(params), fields(assump_size = params.assump_size))]
    pub fn init(params: DippeParams) -> Dippe {
        let p = bn254_order();
        let mut rng = OsRng;
        let k = params.assump_size;

        let a_data: Vec<BigInt> = (0..(k + 1) * k)
            .map(|_| uniform_range(&mut rng, &BigInt::from(0), &p))
            .collect();
        let a = IntMatrix::from_rows(k + 1, k, a_data);
        let g1_a = GroupMatrix::lift_generator(&a);

        let u_data: Vec<BigInt> = (0..(k + 1) * (k + 1))
            .map(|_| uniform_range(&mut rng, &BigInt::from(0), &p))
            .collect();
        let u = IntMatrix::from_rows(k + 1, k + 1, u_data);
        let ua = u.mul_mat(&a).expect("A/U shapes checked at construction").mod_reduce(&p);
        let g1_ua = GroupMatrix::lift_generator(&ua);

        Dippe { params, p, g1_a, g1_ua }
    }

    /// `S_generate_master_keys`: one authority's independent keypair.
    #[tracing::instrument(skip_all)]
    pub fn generate_master_keys(&self) -> (DippePubKey, DippeSecKey) {
        let mut rng = OsRng;
        let k = self.params.assump_size;

        let sigma = uniform_range(&mut rng, &BigInt::from(0), &self.p);
        let alpha = IntVector((0..=k).map(|_| uniform_range(&mut rng, &BigInt::from(0), &self.p)).collect());
        let w_data: Vec<BigInt> = (0..(k + 1) * (k + 1))
            .map(|_| uniform_range(&mut rng, &BigInt::from(0), &self.p))
            .collect();
        let w = IntMatrix::from_rows(k + 1, k + 1, w_data);

        let g2_sigma = scalar_mul_g2(&g2_generator(), &sigma);
        let g1_w_a = int_mat_mul_g1_mat(&w.transpose(), &self.g1_a);

        let g2 = g2_generator();
        let mut gt_alpha_a = Vec::with_capacity(k);
        for j in 0..k {
            let mut acc = GT::zero();
            for i in 0..=k {
                let e = pair(self.g1_a.get(i, j), &g2);
                acc += gt_scale(&e, &alpha.0[i]);
            }
            gt_alpha_a.push(acc);
        }

        (
            DippePubKey { g2_sigma, g1_w_a, gt_alpha_a },
            DippeSecKey { sigma, alpha, w },
        )
    }

    /// `S_encrypt`: `pks.len()` must equal `pol.len()`, one public key per
    /// policy-vector coordinate.
    #[tracing::instrument(skip(self, msg, pol, pks))]
    pub fn encrypt(&self, msg: &GT, pol: &IntVector, pks: &[DippePubKey]) -> Result<DippeCiphertext> {
        if pks.len() != pol.len() {
            return Err(CfeError::InsufficientKeys);
        }
        let k = self.params.assump_size;
        let mut rng = OsRng;
        let s = IntVector((0..k).map(|_| uniform_range(&mut rng, &BigInt::from(0), &self.p)).collect());

        let mut c0 = Vec::with_capacity(k + 1);
        for i in 0..=k {
            c0.push(self.g1_a.row_vector(i).weighted_sum(&s)?);
        }

        let mut ci = Vec::with_capacity(pol.len() * (k + 1));
        for (m, pk) in pks.iter().enumerate() {
            for i in 0..=k {
                let w_a_s = pk.g1_w_a.row_vector(i).weighted_sum(&s)?;
                let ua_s = self.g1_ua.row_vector(i).weighted_sum(&s)?;
                let x_ua_s = scalar_mul_g1(&ua_s, &pol.0[m]);
                ci.push(g1_add(x_ua_s, w_a_s));
            }
        }

        let mut c_prime = GT::zero();
        for pk in pks {
            for kk in 0..k {
                c_prime += gt_scale(&pk.gt_alpha_a[kk], &s.0[kk]);
            }
        }
        c_prime += *msg;

        Ok(DippeCiphertext {
            c0: GroupVector(c0),
            ci: GroupMatrix::from_rows(pol.len(), k + 1, ci),
            c_prime,
        })
    }

    /// `S_keygen`: this authority (`usk_id` in `0..pks.len()`) issues its
    /// share of a functional key for attribute vector `w = attrs` and a
    /// caller-chosen `gid` binding every authority's shares to the same
    /// decryptor. Requires `attrs` end in a set bit, matching the
    /// constant-term convention of [`crate::policy::dippe_policy`].
    #[tracing::instrument(skip(self, pks, sk, attrs, gid))]
    pub fn generate_user_secret_key(
        &self,
        usk_id: usize,
        pks: &[DippePubKey],
        sk: &DippeSecKey,
        attrs: &IntVector,
        gid: &str,
    ) -> Result<DippeUserSecKey> {
        let k = self.params.assump_size;
        if pks.is_empty() || usk_id >= pks.len() || attrs.len() != pks.len() {
            return Err(CfeError::InsufficientKeys);
        }
        if attrs.0.last().map(num_traits::Zero::is_zero).unwrap_or(true) {
            return Err(CfeError::InsufficientKeys);
        }

        let mut mu = <G2 as AffineRepr>::Group::zero();
        for (i, pk) in pks.iter().enumerate() {
            let shared = scalar_mul_g2(&pk.g2_sigma, &sk.sigma);
            let hashed = hash_mue_term(&shared, gid, attrs);
            match i.cmp(&usk_id) {
                std::cmp::Ordering::Less => mu += hashed,
                std::cmp::Ordering::Greater => mu -= hashed,
                std::cmp::Ordering::Equal => {}
            }
        }

        let h: Vec<G2> = (0..=k).map(|i| hash_coord(i, gid, attrs)).collect();
        let attr_active = !num_traits::Zero::is_zero(&attrs.0[usk_id]);

        let g2 = g2_generator();
        let mut ki = Vec::with_capacity(k + 1);
        for i in 0..=k {
            let mut acc = <G2 as AffineRepr>::Group::zero();
            if attr_active {
                for kk in 0..=k {
                    acc += h[kk].mul_bigint(int_to_scalar(sk.w.get(i, kk)).into_bigint());
                }
                acc = -acc;
            }
            acc += g2.mul_bigint(int_to_scalar(&sk.alpha.0[i]).into_bigint());
            acc += mu;
            ki.push(acc.into_affine());
        }

        Ok(DippeUserSecKey { ki: GroupVector(ki) })
    }

    /// `S_decrypt`: requires one key share per authority (`usks.len() ==
    /// cipher.ci.rows == attrs.len()`), all issued for the same `gid`.
    #[tracing::instrument(skip(self, usks, cipher, attrs, gid))]
    pub fn decrypt(&self, usks: &[DippeUserSecKey], cipher: &DippeCiphertext, attrs: &IntVector, gid: &str) -> Result<GT> {
        let k = self.params.assump_size;
        if usks.is_empty() || attrs.0.last().map(num_traits::Zero::is_zero).unwrap_or(true) {
            return Err(CfeError::InsufficientKeys);
        }
        if usks.len() != cipher.ci.rows || usks.len() != attrs.len() {
            return Err(CfeError::MalformedCipher(
                "DIPPE: key/attribute/ciphertext count mismatch".into(),
            ));
        }

        let mut c0_k = GT::zero();
        for i in 0..=k {
            let mut g2_sum = <G2 as AffineRepr>::Group::zero();
            for usk in usks {
                g2_sum += usk.ki.0[i];
            }
            c0_k += pair(&cipher.c0.0[i], &g2_sum.into_affine());
        }

        let mut ci_h = GT::zero();
        for i in 0..=k {
            let mut g1_sum = <G1 as AffineRepr>::Group::zero();
            for (j, bit) in attrs.0.iter().enumerate() {
                if !num_traits::Zero::is_zero(bit) {
                    g1_sum += *cipher.ci.get(j, i);
                }
            }
            let h_i = hash_coord(i, gid, attrs);
            ci_h += pair(&g1_sum.into_affine(), &h_i);
        }

        Ok(cipher.c_prime - c0_k - ci_h)
    }
}
