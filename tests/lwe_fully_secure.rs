use num_bigint::BigInt;
use rand::rngs::OsRng;

use cfe::math::bigint::uniform_range;
use cfe::math::IntVector;
use cfe::schemes::lwe::fully_secure::{LweFs, LweFsParams};

fn random_bounded(ell: usize, bound: &BigInt) -> IntVector {
    let mut rng = OsRng;
    IntVector((0..ell).map(|_| uniform_range(&mut rng, &-bound, bound)).collect())
}

#[test]
fn recovers_inner_product() {
    let bound = BigInt::from(50);
    let scheme = LweFs::init(LweFsParams {
        ell: 3,
        n: 64,
        bound_x: bound.clone(),
        bound_y: bound.clone(),
    })
    .expect("fully-secure LWE parameter search converges for these bounds");

    let sk = scheme.generate_sec_key();
    let pk = scheme.generate_pub_key(&sk).unwrap();

    let x = random_bounded(3, &bound);
    let y = random_bounded(3, &bound);

    let key = scheme.derive_fe_key(&y, &sk).unwrap();
    let ct = scheme.encrypt(&x, &pk).unwrap();
    let got = scheme.decrypt(&ct, &key, &y).unwrap();

    assert_eq!(got, x.dot(&y).unwrap());
}

#[test]
fn rejects_out_of_bound_plaintext() {
    let bound = BigInt::from(10);
    let scheme = LweFs::init(LweFsParams {
        ell: 2,
        n: 32,
        bound_x: bound.clone(),
        bound_y: bound.clone(),
    })
    .unwrap();

    let sk = scheme.generate_sec_key();
    let pk = scheme.generate_pub_key(&sk).unwrap();

    let over = IntVector(vec![BigInt::from(11), BigInt::from(0)]);
    assert!(scheme.encrypt(&over, &pk).is_err());
}
