use num_bigint::BigInt;

use cfe::math::IntVector;
use cfe::schemes::damgard::{Damgard, DamgardParams};

fn iv(vals: &[i64]) -> IntVector {
    IntVector(vals.iter().map(|&v| BigInt::from(v)).collect())
}

#[test]
fn recovers_inner_product() {
    let scheme = Damgard::init(DamgardParams {
        ell: 4,
        modulus_bits: 512,
        bound: BigInt::from(500),
    })
    .unwrap();

    let (msk, mpk) = scheme.generate_master_keys();
    let x = iv(&[3, -7, 11, 2]);
    let y = iv(&[2, 2, 2, 2]);

    let key = scheme.derive_fe_key(&msk, &y).unwrap();
    let ct = scheme.encrypt(&mpk, &x).unwrap();
    let got = scheme.decrypt(&ct, &key, &y).unwrap();

    assert_eq!(got, x.dot(&y).unwrap());
}
