//! Linear system solving over `Z_p` (L5), used to recover MSP reconstruction
//! coefficients during ABE decryption.
//!
//! Grounded on `gaussian_elimination` in
//! `examples/original_source/src/abe/policy.c`: forward elimination with
//! pivot search (row swaps to find a nonzero pivot in each column),
//! elimination of entries below the pivot via the pivot's modular inverse,
//! free-variable tracking via a `-1` sentinel in the result vector,
//! inconsistency detection from nonzero residuals below the last pivot row,
//! then back-substitution from the last pivot row upward.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::{CfeError, Result};
use crate::math::bigint::mod_inverse;
use crate::math::{IntMatrix, IntVector};

/// Solve `M x = v (mod p)` for a prime `p`. Free variables (columns with no
/// pivot) are set to zero in the returned solution. Returns
/// `CfeError::NoSolutionExists` if the system is inconsistent.
pub fn gaussian_elimination_solve(mat: &IntMatrix, v: &IntVector, p: &BigInt) -> Result<IntVector> {
    if mat.rows != v.len() {
        return Err(CfeError::MalformedInput(
            "gaussian elimination: matrix/vector row mismatch".into(),
        ));
    }

    let mut m = mat.mod_reduce(p);
    let mut vv = v.mod_reduce(p);
    let mut res = vec![BigInt::from(-1); mat.cols];

    let (mut h, mut k) = (0usize, 0usize);
    while h < m.rows && k < m.cols {
        let mut pivot_row = None;
        for i in h..m.rows {
            if !m.get(i, k).is_zero() {
                pivot_row = Some(i);
                break;
            }
        }
        let Some(pivot_row) = pivot_row else {
            res[k] = BigInt::zero();
            k += 1;
            continue;
        };
        if pivot_row != h {
            swap_rows(&mut m, h, pivot_row);
            vv.0.swap(h, pivot_row);
        }

        let pivot = m.get(h, k).clone();
        let pivot_inv = mod_inverse(&pivot, p)
            .expect("pivot is nonzero mod prime p, hence invertible");

        for i in (h + 1)..m.rows {
            let factor = (&pivot_inv * m.get(i, k)) % p;
            m.set(i, k, BigInt::zero());
            for j in (k + 1)..m.cols {
                let updated = (m.get(i, j) - &factor * m.get(h, j)).rem_euclid_p(p);
                m.set(i, j, updated);
            }
            let updated_v = (&vv.0[i] - &factor * &vv.0[h]).rem_euclid_p(p);
            vv.0[i] = updated_v;
        }
        k += 1;
        h += 1;
    }

    for i in h..m.rows {
        if !vv.0[i].is_zero() {
            return Err(CfeError::NoSolutionExists);
        }
    }
    for j in k..m.cols {
        res[j] = BigInt::zero();
    }

    if h == 0 {
        // no pivot rows at all: every remaining variable is free (zero).
        return Ok(IntVector(res.iter().map(|x| if *x == BigInt::from(-1) { BigInt::zero() } else { x.clone() }).collect()));
    }

    let mut hh = h - 1;
    let mut kk = k - 1;
    loop {
        if res[kk] == BigInt::from(-1) {
            let mut acc = BigInt::zero();
            for l in (kk + 1)..m.cols {
                acc += m.get(hh, l) * &res[l];
            }
            let rhs = (&vv.0[hh] - &acc).rem_euclid_p(p);
            let pivot_inv = mod_inverse(m.get(hh, kk), p)
                .expect("pivot is nonzero mod prime p, hence invertible");
            res[kk] = (&rhs * &pivot_inv).rem_euclid_p(p);
            if hh == 0 {
                break;
            }
            hh -= 1;
        }
        if kk == 0 {
            break;
        }
        kk -= 1;
    }

    Ok(IntVector(res))
}

fn swap_rows(m: &mut IntMatrix, a: usize, b: usize) {
    if a == b {
        return;
    }
    for c in 0..m.cols {
        let tmp = m.get(a, c).clone();
        let v = m.get(b, c).clone();
        m.set(a, c, v);
        m.set(b, c, tmp);
    }
}

trait RemEuclidP {
    fn rem_euclid_p(&self, p: &BigInt) -> BigInt;
}
impl RemEuclidP for BigInt {
    fn rem_euclid_p(&self, p: &BigInt) -> BigInt {
        crate::math::bigint::mod_floor(self, p)
    }
}

/// Matrix inverse over `Z_p`, via Gauss-Jordan elimination on the augmented
/// `[M | I]` matrix, returning both `M^{-1}` and `det(M) mod p`.
pub fn mat_inverse_mod(mat: &IntMatrix, p: &BigInt) -> Result<(IntMatrix, BigInt)> {
    if mat.rows != mat.cols {
        return Err(CfeError::MalformedInput("matrix inverse requires a square matrix".into()));
    }
    let n = mat.rows;
    let mut m = mat.mod_reduce(p);
    let mut inv = IntMatrix::identity(n);
    let mut det = BigInt::one();

    for col in 0..n {
        let mut pivot_row = None;
        for r in col..n {
            if !m.get(r, col).is_zero() {
                pivot_row = Some(r);
                break;
            }
        }
        let Some(pivot_row) = pivot_row else {
            return Err(CfeError::NoSolutionExists);
        };
        if pivot_row != col {
            swap_rows(&mut m, col, pivot_row);
            swap_rows(&mut inv, col, pivot_row);
            det = -det;
        }
        let pivot = m.get(col, col).clone();
        det = (&det * &pivot).rem_euclid_p(p);
        let pivot_inv = mod_inverse(&pivot, p).ok_or(CfeError::NoSolutionExists)?;

        for c in 0..n {
            let v = (m.get(col, c) * &pivot_inv).rem_euclid_p(p);
            m.set(col, c, v);
            let iv = (inv.get(col, c) * &pivot_inv).rem_euclid_p(p);
            inv.set(col, c, iv);
        }

        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = m.get(r, col).clone();
            if factor.is_zero() {
                continue;
            }
            for c in 0..n {
                let v = (m.get(r, c) - &factor * m.get(col, c)).rem_euclid_p(p);
                m.set(r, c, v);
                let iv = (inv.get(r, c) - &factor * inv.get(col, c)).rem_euclid_p(p);
                inv.set(r, c, iv);
            }
        }
    }

    Ok((inv, det))
}
