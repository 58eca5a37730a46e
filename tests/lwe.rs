use num_bigint::BigInt;
use rand::rngs::OsRng;

use cfe::math::bigint::uniform_range;
use cfe::math::IntVector;
use cfe::schemes::lwe::{Lwe, LweParams};

fn random_bounded(ell: usize, bound: &BigInt) -> IntVector {
    let mut rng = OsRng;
    IntVector((0..ell).map(|_| uniform_range(&mut rng, &-bound, bound)).collect())
}

#[test]
fn recovers_inner_product() {
    let bound = BigInt::from(10_000);
    let scheme = Lwe::init(LweParams {
        ell: 4,
        n: 128,
        bound_x: bound.clone(),
        bound_y: bound.clone(),
    })
    .expect("LWE parameter derivation succeeds for these bounds");

    let sk = scheme.generate_sec_key();
    let pk = scheme.generate_pub_key(&sk).unwrap();

    let x = random_bounded(4, &bound);
    let y = random_bounded(4, &bound);

    let key = scheme.derive_fe_key(&sk, &y).unwrap();
    let ct = scheme.encrypt(&pk, &x).unwrap();
    let got = scheme.decrypt(&ct, &key, &y).unwrap();

    assert_eq!(got, x.dot(&y).unwrap());
}

#[test]
fn rejects_wrong_length_ciphertext() {
    let bound = BigInt::from(50);
    let scheme = Lwe::init(LweParams {
        ell: 2,
        n: 16,
        bound_x: bound.clone(),
        bound_y: bound.clone(),
    })
    .unwrap();
    let sk = scheme.generate_sec_key();
    let pk = scheme.generate_pub_key(&sk).unwrap();
    let y = random_bounded(2, &bound);
    let key = scheme.derive_fe_key(&sk, &y).unwrap();

    let bad_ct = cfe::schemes::lwe::LweCiphertext(IntVector(vec![BigInt::from(0); 3]));
    assert!(scheme.decrypt(&bad_ct, &key, &y).is_err());
}
