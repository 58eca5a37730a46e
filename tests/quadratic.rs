use num_bigint::BigInt;

use cfe::math::{IntMatrix, IntVector};
use cfe::schemes::quadratic::{Quadratic, QuadraticParams};

fn iv(vals: &[i64]) -> IntVector {
    IntVector(vals.iter().map(|&v| BigInt::from(v)).collect())
}

#[test]
fn recovers_bilinear_form() {
    let scheme = Quadratic::init(QuadraticParams {
        n: 3,
        bound: BigInt::from(10),
    })
    .unwrap();

    let msk = scheme.generate_master_key();
    let x = iv(&[1, 2, 3]);
    let y = iv(&[4, -1, 2]);
    let f = IntMatrix::from_rows(
        3,
        3,
        vec![
            BigInt::from(1), BigInt::from(0), BigInt::from(0),
            BigInt::from(0), BigInt::from(2), BigInt::from(0),
            BigInt::from(0), BigInt::from(0), BigInt::from(-1),
        ],
    );

    let key = scheme.derive_fe_key(&msk, &f).unwrap();
    let ct = scheme.encrypt(&x, &y, &msk).unwrap();
    let got = scheme.decrypt(&ct, &key, &f).unwrap();

    // x^T F y = 1*4 + 2*2*(-1) + 3*(-1)*2 = 4 - 4 - 6 = -6
    assert_eq!(got, BigInt::from(-6));
}
