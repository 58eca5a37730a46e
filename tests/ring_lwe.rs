use num_bigint::BigInt;
use rand::rngs::OsRng;

use cfe::math::bigint::uniform_range;
use cfe::math::IntVector;
use cfe::schemes::lwe::ring::{RingLwe, RingLweParams};

fn random_bounded(n: usize, bound: &BigInt) -> IntVector {
    let mut rng = OsRng;
    IntVector((0..n).map(|_| uniform_range(&mut rng, &-bound, bound)).collect())
}

#[test]
fn recovers_weighted_row_sum() {
    let bound = BigInt::from(5);
    let params = RingLweParams {
        ell: 2,
        n: 4,
        bound: bound.clone(),
        p: BigInt::from(101),
        q: BigInt::from(1_000_003),
        sigma: 1.0,
    };
    let scheme = RingLwe::init(params).expect("p >= 2 * ell * bound^2 and n a power of two");

    let sk = scheme.generate_sec_key();
    let pk = scheme.generate_pub_key(&sk).unwrap();

    let rows = [random_bounded(4, &bound), random_bounded(4, &bound)];
    let y = IntVector(vec![BigInt::from(1), BigInt::from(2)]);

    let key = scheme.derive_fe_key(&sk, &y).unwrap();
    let ct = scheme.encrypt(&rows, &pk).unwrap();
    let got = scheme.decrypt(&ct, &key, &y).unwrap();

    let expected: Vec<BigInt> = (0..4)
        .map(|k| &rows[0].0[k] * &y.0[0] + &rows[1].0[k] * &y.0[1])
        .collect();
    assert_eq!(got.0, expected);
}

#[test]
fn rejects_non_power_of_two_degree() {
    let params = RingLweParams {
        ell: 1,
        n: 3,
        bound: BigInt::from(5),
        p: BigInt::from(101),
        q: BigInt::from(1_000_003),
        sigma: 1.0,
    };
    assert!(RingLwe::init(params).is_err());
}
