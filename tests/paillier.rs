use num_bigint::BigInt;
use rand::rngs::OsRng;

use cfe::math::bigint::uniform_range;
use cfe::math::IntVector;
use cfe::schemes::paillier::{Paillier, PaillierParams};

fn random_bounded(ell: usize, bound: &BigInt) -> IntVector {
    let mut rng = OsRng;
    IntVector((0..ell).map(|_| uniform_range(&mut rng, &-bound, bound)).collect())
}

#[test]
fn recovers_inner_product_with_signed_coordinates() {
    let bound_x = BigInt::from(1024);
    let bound_y = BigInt::from(1024);
    let scheme = Paillier::init(PaillierParams {
        ell: 50,
        lambda: 128,
        bit_len: 512,
        bound_x: bound_x.clone(),
        bound_y: bound_y.clone(),
    })
    .expect("512-bit safe primes comfortably satisfy n > ell * bound^2");

    let (msk, mpk) = scheme.generate_master_keys();
    let x = random_bounded(50, &bound_x);
    let y = random_bounded(50, &bound_y);

    let key = scheme.derive_fe_key(&msk, &y).unwrap();
    let ct = scheme.encrypt(&mpk, &x).unwrap();
    let got = scheme.decrypt(&ct, &key, &y).unwrap();

    let expected = x.dot(&y).unwrap();
    assert_eq!(got, expected);
}

#[test]
fn rejects_dimension_mismatch() {
    let scheme = Paillier::init(PaillierParams {
        ell: 3,
        lambda: 128,
        bit_len: 256,
        bound_x: BigInt::from(100),
        bound_y: BigInt::from(100),
    })
    .unwrap();
    let (_, mpk) = scheme.generate_master_keys();
    let too_short = IntVector(vec![BigInt::from(1), BigInt::from(2)]);
    assert!(scheme.encrypt(&mpk, &too_short).is_err());
}
