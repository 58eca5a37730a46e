//! The target group `GT` and the bilinear pairing `e: G1 × G2 → GT` (L2).

use ark_bn254::Bn254;
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::Group;
use ark_ff::{PrimeField, Zero};

use crate::error::{CfeError, Result};
use crate::group::scalar::int_to_scalar;
use crate::group::points::GroupVector;
use crate::math::IntVector;
use crate::{G1, G2};

/// An element of the pairing target group. Written additively, as
/// `ark_ec::pairing::PairingOutput` is, even though the underlying `Fq12`
/// group operation is field multiplication.
pub type Gt = PairingOutput<Bn254>;

/// Compute `e(p, q)`.
pub fn pair(p: &G1, q: &G2) -> Gt {
    Bn254::pairing(*p, *q)
}

/// `e(g1, g2)`, the fixed generator pairing used as the GT "base" by GPSW,
/// FAME, and the quadratic scheme.
pub fn gt_generator() -> Gt {
    pair(&crate::g1_generator(), &crate::g2_generator())
}

/// Scalar-multiply a `GT` element by an arbitrary-precision integer.
pub fn gt_scale(g: &Gt, x: &num_bigint::BigInt) -> Gt {
    g.mul_bigint(int_to_scalar(x).into_bigint())
}

/// A dense vector of `GT` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GtVector(pub Vec<Gt>);

impl GtVector {
    /// Pairing of a `G1` vector against a `G2` vector, elementwise:
    /// `(e(g1_i, g2_i))_i`.
    pub fn pair_elementwise(g1: &GroupVector<G1>, g2: &GroupVector<G2>) -> Result<Self> {
        if g1.len() != g2.len() {
            return Err(CfeError::MalformedInput(
                "G1/G2 vector length mismatch in elementwise pairing".into(),
            ));
        }
        Ok(GtVector(
            g1.0.iter().zip(g2.0.iter()).map(|(a, b)| pair(a, b)).collect(),
        ))
    }

    /// Sum of `e(g1_i, g2_i)^{w_i}` for weights `w`, i.e. the weighted
    /// aggregation used by GPSW/FAME/quadratic decryption.
    pub fn weighted_pairing_sum(
        g1: &GroupVector<G1>,
        g2: &GroupVector<G2>,
        weights: &IntVector,
    ) -> Result<Gt> {
        let pairs = Self::pair_elementwise(g1, g2)?;
        if pairs.0.len() != weights.len() {
            return Err(CfeError::MalformedInput("pairing/weight length mismatch".into()));
        }
        let mut acc = Gt::zero();
        for (gt, w) in pairs.0.iter().zip(weights.0.iter()) {
            acc += gt_scale(gt, w);
        }
        Ok(acc)
    }

    /// Sum of all entries.
    pub fn sum(&self) -> Gt {
        let mut acc = Gt::zero();
        for g in &self.0 {
            acc += *g;
        }
        acc
    }
}
