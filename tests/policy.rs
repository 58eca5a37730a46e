use num_bigint::BigInt;
use num_traits::One;

use cfe::error::CfeError;
use cfe::math::{IntMatrix, IntVector};
use cfe::policy::{gaussian_elimination_solve, mat_inverse_mod, Msp};

fn small_prime() -> BigInt {
    BigInt::from(10_007)
}

#[test]
fn zero_matrix_nonzero_rhs_has_no_solution() {
    let p = small_prime();
    let mat = IntMatrix::zero(2, 2);
    let rhs = IntVector(vec![BigInt::one(), BigInt::from(2)]);
    let err = gaussian_elimination_solve(&mat, &rhs, &p).unwrap_err();
    assert!(matches!(err, CfeError::NoSolutionExists));
}

#[test]
fn inverse_round_trips_when_determinant_nonzero() {
    let p = small_prime();
    let mat = IntMatrix::from_rows(
        3,
        3,
        vec![
            BigInt::from(2), BigInt::from(0), BigInt::from(1),
            BigInt::from(1), BigInt::from(3), BigInt::from(0),
            BigInt::from(0), BigInt::from(1), BigInt::from(4),
        ],
    );
    let (inv, det) = mat_inverse_mod(&mat, &p).unwrap();
    assert_ne!(det, BigInt::from(0));

    let product = mat.mul_mat(&inv).unwrap().mod_reduce(&p);
    let identity = IntMatrix::identity(3);
    for r in 0..3 {
        for c in 0..3 {
            assert_eq!(product.get(r, c), identity.get(r, c));
        }
    }
}

#[test]
fn singular_matrix_has_no_inverse() {
    let p = small_prime();
    let mat = IntMatrix::from_rows(
        2,
        2,
        vec![BigInt::from(2), BigInt::from(4), BigInt::from(1), BigInt::from(2)],
    );
    assert!(mat_inverse_mod(&mat, &p).is_err());
}

#[test]
fn msp_conjunction_requires_every_leaf() {
    let msp = Msp::from_boolean_expression("1AND2AND3", false).unwrap();
    assert_eq!(msp.rows(), 3);

    // All three rows present: the all-ones target is reconstructible.
    let full = msp.rows_for_attributes(&[1, 2, 3]);
    assert_eq!(full.len(), 3);
    let mat_sub = msp.mat.select_rows(&full);
    let ones = IntVector(vec![BigInt::one(); msp.cols()]);
    assert!(gaussian_elimination_solve(&mat_sub.transpose(), &ones, &small_prime()).is_ok());

    // Missing a leaf: no reconstruction.
    let partial = msp.rows_for_attributes(&[1, 2]);
    let mat_sub = msp.mat.select_rows(&partial);
    assert!(gaussian_elimination_solve(&mat_sub.transpose(), &ones, &small_prime()).is_err());
}

#[test]
fn msp_disjunction_any_single_leaf_suffices() {
    let msp = Msp::from_boolean_expression("1OR2OR3", false).unwrap();
    assert_eq!(msp.rows(), 3);
    assert_eq!(msp.cols(), 1);

    for attrib in [1i64, 2, 3] {
        let positions = msp.rows_for_attributes(&[attrib]);
        assert_eq!(positions.len(), 1);
        let mat_sub = msp.mat.select_rows(&positions);
        let ones = IntVector(vec![BigInt::one(); msp.cols()]);
        assert!(gaussian_elimination_solve(&mat_sub.transpose(), &ones, &small_prime()).is_ok());
    }
}
