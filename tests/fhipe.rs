use num_bigint::BigInt;

use cfe::math::IntVector;
use cfe::schemes::fhipe::multi_client::{FhipeMulti, FhipeMultiCiphertext, FhipeMultiParams};
use cfe::schemes::fhipe::{Fhipe, FhipeParams};

fn iv(vals: &[i64]) -> IntVector {
    IntVector(vals.iter().map(|&v| BigInt::from(v)).collect())
}

#[test]
fn recovers_inner_product_without_revealing_either_vector() {
    let scheme = Fhipe::init(FhipeParams {
        ell: 4,
        bound_x: BigInt::from(100),
        bound_y: BigInt::from(100),
    })
    .unwrap();

    let msk = scheme.generate_master_key().unwrap();
    let x = iv(&[3, -1, 4, 1]);
    let y = iv(&[5, 9, -2, 6]);

    let key = scheme.derive_fe_key(&y, &msk).unwrap();
    let ct = scheme.encrypt(&x, &msk).unwrap();
    let got = scheme.decrypt(&ct, &key).unwrap();

    assert_eq!(got, x.dot(&y).unwrap());
}

#[test]
fn multi_client_recovers_sum_of_per_client_inner_products() {
    let scheme = FhipeMulti::init(FhipeMultiParams {
        num_clients: 3,
        vec_len: 2,
        sec_level: 2,
        bound_x: BigInt::from(20),
        bound_y: BigInt::from(20),
    })
    .unwrap();
    let (msk, pub_key) = scheme.generate_master_keys().unwrap();

    let xs = [iv(&[3, -1]), iv(&[2, 5]), iv(&[-4, 7])];
    let ys = [iv(&[1, 2]), iv(&[3, -2]), iv(&[0, 4])];

    let mut ciphers = Vec::with_capacity(3);
    for (i, x) in xs.iter().enumerate() {
        ciphers.push(scheme.encrypt_slot(i, &msk, x).unwrap());
    }
    let ct = FhipeMultiCiphertext(ciphers);
    let key = scheme.derive_fe_key(&msk, &ys).unwrap();

    let got = scheme.decrypt(&ct, &key, &pub_key).unwrap();
    let expected: BigInt = xs.iter().zip(ys.iter()).map(|(x, y)| x.dot(y).unwrap()).sum();
    assert_eq!(got, expected);
}

#[test]
fn multi_client_rejects_mismatched_client_counts() {
    let scheme = FhipeMulti::init(FhipeMultiParams {
        num_clients: 2,
        vec_len: 2,
        sec_level: 1,
        bound_x: BigInt::from(20),
        bound_y: BigInt::from(20),
    })
    .unwrap();
    let (msk, pub_key) = scheme.generate_master_keys().unwrap();

    let c0 = scheme.encrypt_slot(0, &msk, &iv(&[1, 1])).unwrap();
    let ct = FhipeMultiCiphertext(vec![c0]);
    let key = scheme.derive_fe_key(&msk, &[iv(&[1, 1]), iv(&[1, 1])]).unwrap();

    assert!(scheme.decrypt(&ct, &key, &pub_key).is_err());
}
