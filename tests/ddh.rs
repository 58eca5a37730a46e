use num_bigint::BigInt;

use cfe::math::IntVector;
use cfe::schemes::ddh::{Ddh, DdhParams};

fn iv(vals: &[i64]) -> IntVector {
    IntVector(vals.iter().map(|&v| BigInt::from(v)).collect())
}

#[test]
fn recovers_inner_product() {
    let scheme = Ddh::init(DdhParams {
        ell: 5,
        modulus_bits: 512,
        bound: BigInt::from(1000),
    })
    .expect("params satisfy ell * bound^2 < p at 512 bits");

    let (msk, mpk) = scheme.generate_master_keys();
    let x = iv(&[10, -20, 30, -40, 50]);
    let y = iv(&[1, 1, 1, 1, 1]);

    let key = scheme.derive_fe_key(&msk, &y).unwrap();
    let ct = scheme.encrypt(&mpk, &x).unwrap();
    let result = scheme.decrypt(&ct, &key, &y).unwrap();

    assert_eq!(result, BigInt::from(30));
}

#[test]
fn rejects_coordinate_at_bound() {
    let scheme = Ddh::init(DdhParams {
        ell: 2,
        modulus_bits: 256,
        bound: BigInt::from(100),
    })
    .unwrap();
    let (_, mpk) = scheme.generate_master_keys();

    let ok = iv(&[99, -99]);
    assert!(scheme.encrypt(&mpk, &ok).is_ok());

    let over = iv(&[100, 0]);
    assert!(scheme.encrypt(&mpk, &over).is_err());
}
