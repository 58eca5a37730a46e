//! Dense integer vector / matrix containers (L1).
//!
//! Row-major, arbitrary-precision. Operations that take multiple operands
//! require matching dimensions and return `CfeError::MalformedInput`
//! otherwise.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::{CfeError, Result};
use crate::math::bigint::{mod_floor, within_bound};

/// A dense vector of arbitrary-precision integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntVector(pub Vec<BigInt>);

impl IntVector {
    /// Build a vector from its entries.
    pub fn new(entries: Vec<BigInt>) -> Self {
        IntVector(entries)
    }

    /// The vector's length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dot product `⟨self, other⟩`, unreduced (lives in `Z`).
    pub fn dot(&self, other: &IntVector) -> Result<BigInt> {
        if self.len() != other.len() {
            return Err(CfeError::MalformedInput(format!(
                "dot product length mismatch: {} vs {}",
                self.len(),
                other.len()
            )));
        }
        Ok(self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a * b)
            .fold(BigInt::zero(), |acc, v| acc + v))
    }

    /// Dot product reduced modulo `m`.
    pub fn dot_mod(&self, other: &IntVector, m: &BigInt) -> Result<BigInt> {
        self.dot(other).map(|v| mod_floor(&v, m))
    }

    /// Reduce every entry modulo `m` into `[0, m)`.
    pub fn mod_reduce(&self, m: &BigInt) -> IntVector {
        IntVector(self.0.iter().map(|v| mod_floor(v, m)).collect())
    }

    /// Check every entry satisfies `-bound < v < bound`.
    pub fn check_bound(&self, bound: &BigInt) -> Result<()> {
        for (i, v) in self.0.iter().enumerate() {
            if !within_bound(v, bound) {
                return Err(CfeError::BoundCheckFailed {
                    index: i,
                    value: v.to_string(),
                    bound: bound.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Elementwise sum.
    pub fn add(&self, other: &IntVector) -> Result<IntVector> {
        if self.len() != other.len() {
            return Err(CfeError::MalformedInput("vector length mismatch".into()));
        }
        Ok(IntVector(
            self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect(),
        ))
    }

    /// Elementwise subtraction.
    pub fn sub(&self, other: &IntVector) -> Result<IntVector> {
        if self.len() != other.len() {
            return Err(CfeError::MalformedInput("vector length mismatch".into()));
        }
        Ok(IntVector(
            self.0.iter().zip(&other.0).map(|(a, b)| a - b).collect(),
        ))
    }
}

/// A dense, row-major matrix of arbitrary-precision integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntMatrix {
    /// Row count.
    pub rows: usize,
    /// Column count.
    pub cols: usize,
    data: Vec<BigInt>,
}

impl IntMatrix {
    /// Build a matrix from row-major data; panics on shape mismatch (an
    /// internal-bug-only invariant, never reachable from user input).
    pub fn from_rows(rows: usize, cols: usize, data: Vec<BigInt>) -> Self {
        assert_eq!(data.len(), rows * cols, "IntMatrix shape mismatch");
        IntMatrix { rows, cols, data }
    }

    /// A `rows x cols` matrix of zeros.
    pub fn zero(rows: usize, cols: usize) -> Self {
        IntMatrix {
            rows,
            cols,
            data: vec![BigInt::zero(); rows * cols],
        }
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zero(n, n);
        for i in 0..n {
            m.set(i, i, BigInt::from(1));
        }
        m
    }

    /// Entry at `(r, c)`.
    pub fn get(&self, r: usize, c: usize) -> &BigInt {
        &self.data[r * self.cols + c]
    }

    /// Set entry at `(r, c)`.
    pub fn set(&mut self, r: usize, c: usize, v: BigInt) {
        self.data[r * self.cols + c] = v;
    }

    /// Borrow row `r` as a slice.
    pub fn row(&self, r: usize) -> &[BigInt] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Extract row `r` as an owned `IntVector`.
    pub fn row_vector(&self, r: usize) -> IntVector {
        IntVector(self.row(r).to_vec())
    }

    /// Build a new matrix containing only the given rows, in order.
    pub fn select_rows(&self, row_indices: &[usize]) -> IntMatrix {
        let mut data = Vec::with_capacity(row_indices.len() * self.cols);
        for &r in row_indices {
            data.extend_from_slice(self.row(r));
        }
        IntMatrix::from_rows(row_indices.len(), self.cols, data)
    }

    /// Transpose.
    pub fn transpose(&self) -> IntMatrix {
        let mut out = IntMatrix::zero(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(c, r, self.get(r, c).clone());
            }
        }
        out
    }

    /// Pad with zero columns on the right up to `new_cols`.
    pub fn pad_cols(&self, new_cols: usize) -> IntMatrix {
        assert!(new_cols >= self.cols);
        let mut out = IntMatrix::zero(self.rows, new_cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(r, c, self.get(r, c).clone());
            }
        }
        out
    }

    /// Stack `self` atop `other` row-wise, after padding both to the wider
    /// column count. Used by MSP `OR` combination.
    pub fn stack_rows(&self, other: &IntMatrix) -> IntMatrix {
        let cols = self.cols.max(other.cols);
        let a = self.pad_cols(cols);
        let b = other.pad_cols(cols);
        let mut data = a.data.clone();
        data.extend(b.data.clone());
        IntMatrix::from_rows(a.rows + b.rows, cols, data)
    }

    /// Matrix-vector product `M * v` (unreduced).
    pub fn mul_vec(&self, v: &IntVector) -> Result<IntVector> {
        if self.cols != v.len() {
            return Err(CfeError::MalformedInput(format!(
                "matrix-vector shape mismatch: {} cols vs {} entries",
                self.cols,
                v.len()
            )));
        }
        let mut out = Vec::with_capacity(self.rows);
        for r in 0..self.rows {
            let row = IntVector(self.row(r).to_vec());
            out.push(row.dot(v)?);
        }
        Ok(IntVector(out))
    }

    /// Matrix-vector product reduced modulo `m`.
    pub fn mul_vec_mod(&self, v: &IntVector, m: &BigInt) -> Result<IntVector> {
        self.mul_vec(v).map(|r| r.mod_reduce(m))
    }

    /// Matrix-matrix product (unreduced).
    pub fn mul_mat(&self, other: &IntMatrix) -> Result<IntMatrix> {
        if self.cols != other.rows {
            return Err(CfeError::MalformedInput("matrix-matrix shape mismatch".into()));
        }
        let mut out = IntMatrix::zero(self.rows, other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut acc = BigInt::zero();
                for k in 0..self.cols {
                    acc += self.get(r, k) * other.get(k, c);
                }
                out.set(r, c, acc);
            }
        }
        Ok(out)
    }

    /// Reduce every entry modulo `m` into `[0, m)`.
    pub fn mod_reduce(&self, m: &BigInt) -> IntMatrix {
        IntMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| mod_floor(v, m)).collect(),
        }
    }
}
