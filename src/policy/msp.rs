//! Monotone Span Program construction from a boolean policy expression (L5).
//!
//! Grounded on `boolean_to_msp`/`boolean_to_msp_iterative` in
//! `examples/original_source/src/abe/policy.c`: a top-down recursive-descent
//! scan that, at bracket depth zero, prefers the first top-level `AND` over
//! the first top-level `OR`; combines the two sides by column-stacking
//! (`OR`) or by introducing one fresh signed column (`AND`); and treats a
//! bare integer as a leaf naming an attribute.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::{CfeError, Result};
use crate::math::{IntMatrix, IntVector};

/// A Monotone Span Program: an `ℓ × d` integer matrix `M` and a row →
/// attribute map `ρ`.
#[derive(Debug, Clone)]
pub struct Msp {
    /// The span-program matrix.
    pub mat: IntMatrix,
    /// `row_to_attrib[i]` is the attribute identifier for row `i`.
    pub row_to_attrib: Vec<i64>,
}

impl Msp {
    /// Parse a monotone boolean expression (`AND`/`OR`, no `NOT`, integer
    /// attribute leaves, parenthesized grouping) into an MSP.
    ///
    /// `convert_to_ones`: if set, post-multiply so the reconstruction target
    /// becomes `(1, 1, …, 1)` rather than `(1, 0, …, 0)` — a configuration
    /// choice at the call site, not a per-scheme constant.
    pub fn from_boolean_expression(expr: &str, convert_to_ones: bool) -> Result<Msp> {
        let trimmed: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
        let vec = IntVector(vec![BigInt::one()]);
        let mut msp = parse_iterative(&trimmed, &vec, 1)?;
        if convert_to_ones {
            msp.mat = apply_convert_to_ones(&msp.mat);
        }
        Ok(msp)
    }

    /// Number of rows (`ℓ`).
    pub fn rows(&self) -> usize {
        self.mat.rows
    }

    /// Number of columns (`d`).
    pub fn cols(&self) -> usize {
        self.mat.cols
    }

    /// Row indices whose attribute is contained in `owned`.
    pub fn rows_for_attributes(&self, owned: &[i64]) -> Vec<usize> {
        self.row_to_attrib
            .iter()
            .enumerate()
            .filter(|(_, a)| owned.contains(a))
            .map(|(i, _)| i)
            .collect()
    }
}

fn apply_convert_to_ones(mat: &IntMatrix) -> IntMatrix {
    let c = mat.cols;
    let mut inv = IntMatrix::zero(c, c);
    for j in 0..c {
        inv.set(0, j, BigInt::one());
        inv.set(j, j, BigInt::one());
    }
    mat.mul_mat(&inv).expect("shapes match by construction")
}

/// Split `expr` into the left/right substrings around a top-level `AND` (if
/// present) or `OR`, respecting parenthesis depth. Matches the C scan order:
/// `AND` is checked before `OR` at every position.
enum Split<'a> {
    And(&'a str, &'a str),
    Or(&'a str, &'a str),
    None,
}

fn find_top_level_split(expr: &str) -> Split<'_> {
    let bytes = expr.as_bytes();
    let mut depth: i32 = 0;
    let n = bytes.len();
    for i in 0..n {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            if i + 3 <= n && &expr[i..i + 3] == "AND" {
                return Split::And(&expr[..i], &expr[i + 3..]);
            }
            if i + 2 <= n && &expr[i..i + 2] == "OR" {
                return Split::Or(&expr[..i], &expr[i + 2..]);
            }
        }
    }
    Split::None
}

fn parse_iterative(expr: &str, vec: &IntVector, c: usize) -> Result<Msp> {
    match find_top_level_split(expr) {
        Split::And(left, right) => {
            let (vec1, vec2) = init_set_and_vecs(vec, c);
            let msp1 = parse_iterative(left, &vec1, c + 1)?;
            let msp2 = parse_iterative(right, &vec2, msp1.mat.cols)?;
            Ok(combine(msp1, msp2))
        }
        Split::Or(left, right) => {
            let msp1 = parse_iterative(left, vec, c)?;
            let msp2 = parse_iterative(right, vec, msp1.mat.cols)?;
            Ok(combine(msp1, msp2))
        }
        Split::None => {
            if expr.starts_with('(') && expr.ends_with(')') && expr.len() >= 2 {
                return parse_iterative(&expr[1..expr.len() - 1], vec, c);
            }
            let attrib: i64 = expr
                .parse()
                .map_err(|_| CfeError::CorruptedBoolExpression(expr.to_string()))?;
            if attrib < 0 {
                return Err(CfeError::CorruptedBoolExpression(expr.to_string()));
            }
            let mut row = vec![BigInt::zero(); c];
            for (i, v) in vec.0.iter().enumerate() {
                if i < c {
                    row[i] = v.clone();
                }
            }
            Ok(Msp {
                mat: IntMatrix::from_rows(1, c, row),
                row_to_attrib: vec![attrib],
            })
        }
    }
}

fn init_set_and_vecs(vec: &IntVector, c: usize) -> (IntVector, IntVector) {
    let mut vec1 = vec![BigInt::zero(); c + 1];
    let mut vec2 = vec![BigInt::zero(); c + 1];
    for (i, v) in vec.0.iter().enumerate() {
        if i < c {
            vec2[i] = v.clone();
        }
    }
    vec1[c] = BigInt::from(-1);
    vec2[c] = BigInt::one();
    (IntVector(vec1), IntVector(vec2))
}

fn combine(msp1: Msp, msp2: Msp) -> Msp {
    let mat = msp1.mat.stack_rows(&msp2.mat);
    let mut row_to_attrib = msp1.row_to_attrib;
    row_to_attrib.extend(msp2.row_to_attrib);
    Msp { mat, row_to_attrib }
}
