//! Vector / matrix containers over a pairing-group affine point type (L2).
//!
//! Generic over `ark_ec::AffineRepr` so the same container shape serves
//! `G1Affine`, `G2Affine`, and (via [`crate::group::GtElement`]) `GT`.

use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ff::PrimeField;

use crate::error::{CfeError, Result};
use crate::group::scalar::int_to_scalar;
use crate::math::{IntMatrix, IntVector};

/// A dense vector of points in a single group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupVector<G>(pub Vec<G>);

impl<G: AffineRepr> GroupVector<G> {
    /// Build from a list of points.
    pub fn new(points: Vec<G>) -> Self {
        GroupVector(points)
    }

    /// Length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lift an integer vector into this group by scalar-multiplying the
    /// generator by each entry: `(g^{v_i})_i`.
    pub fn lift_generator(v: &IntVector) -> Self {
        let gen = G::Group::generator();
        GroupVector(
            v.0.iter()
                .map(|x| gen.mul_bigint(int_to_scalar(x).into_bigint()).into_affine())
                .collect(),
        )
    }

    /// Scalar-multiply this vector pointwise by an integer vector of the
    /// same length: `(self_i^{v_i})_i`.
    pub fn scale(&self, v: &IntVector) -> Result<Self> {
        if self.len() != v.len() {
            return Err(CfeError::MalformedInput(
                "group vector / scalar vector length mismatch".into(),
            ));
        }
        Ok(GroupVector(
            self.0
                .iter()
                .zip(v.0.iter())
                .map(|(p, x)| p.mul_bigint(int_to_scalar(x).into_bigint()).into_affine())
                .collect(),
        ))
    }

    /// Scale every entry by the same integer scalar.
    pub fn scale_uniform(&self, x: &num_bigint::BigInt) -> Self {
        let s = int_to_scalar(x).into_bigint();
        GroupVector(self.0.iter().map(|p| p.mul_bigint(s).into_affine()).collect())
    }

    /// Pointwise group addition.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.len() != other.len() {
            return Err(CfeError::MalformedInput("group vector length mismatch".into()));
        }
        Ok(GroupVector(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| (*a + *b).into_affine())
                .collect(),
        ))
    }

    /// Sum of all entries (the group's identity for an empty vector).
    pub fn sum(&self) -> G {
        let mut acc = G::Group::zero();
        for p in &self.0 {
            acc += *p;
        }
        acc.into_affine()
    }

    /// `Σ_i self_i^{v_i}` — a multi-scalar "dot product" into the group.
    pub fn weighted_sum(&self, v: &IntVector) -> Result<G> {
        Ok(self.scale(v)?.sum())
    }
}

/// A dense, row-major matrix of points in a single group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatrix<G> {
    /// Row count.
    pub rows: usize,
    /// Column count.
    pub cols: usize,
    data: Vec<G>,
}

impl<G: AffineRepr> GroupMatrix<G> {
    /// Build from row-major data.
    pub fn from_rows(rows: usize, cols: usize, data: Vec<G>) -> Self {
        assert_eq!(data.len(), rows * cols, "GroupMatrix shape mismatch");
        GroupMatrix { rows, cols, data }
    }

    /// Lift an integer matrix into this group entrywise.
    pub fn lift_generator(m: &IntMatrix) -> Self {
        let gen = G::Group::generator();
        let mut data = Vec::with_capacity(m.rows * m.cols);
        for r in 0..m.rows {
            for c in 0..m.cols {
                data.push(gen.mul_bigint(int_to_scalar(m.get(r, c)).into_bigint()).into_affine());
            }
        }
        GroupMatrix {
            rows: m.rows,
            cols: m.cols,
            data,
        }
    }

    /// Entry at `(r, c)`.
    pub fn get(&self, r: usize, c: usize) -> &G {
        &self.data[r * self.cols + c]
    }

    /// Row `r` as a [`GroupVector`].
    pub fn row_vector(&self, r: usize) -> GroupVector<G> {
        GroupVector(self.data[r * self.cols..(r + 1) * self.cols].to_vec())
    }

    /// Pointwise group addition.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(CfeError::MalformedInput("group matrix shape mismatch".into()));
        }
        Ok(GroupMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| (*a + *b).into_affine())
                .collect(),
        })
    }
}
