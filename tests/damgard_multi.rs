use num_bigint::BigInt;

use cfe::schemes::damgard::DamgardParams;
use cfe::schemes::damgard_multi::decentralized::Client;
use cfe::schemes::damgard_multi::{DamgardMulti, DamgardMultiCiphertext, DamgardMultiParams};
use cfe::math::{IntMatrix, IntVector};

fn iv(vals: &[i64]) -> IntVector {
    IntVector(vals.iter().map(|&v| BigInt::from(v)).collect())
}

#[test]
fn recovers_inner_product_across_slots() {
    let params = DamgardMultiParams {
        num_slots: 3,
        ell: 2,
        modulus_bits: 256,
        bound: BigInt::from(100),
    };
    let scheme = DamgardMulti::init(params).unwrap();
    let (msk, mpk) = scheme.generate_master_keys();

    let xs = [iv(&[1, 2]), iv(&[3, -4]), iv(&[5, 6])];
    let mut cts = Vec::with_capacity(3);
    for (i, x) in xs.iter().enumerate() {
        let otp_row = msk.otp.row_vector(i);
        cts.push(scheme.encrypt_slot(i, &mpk, &otp_row, x).unwrap());
    }
    let ct = DamgardMultiCiphertext(cts);

    let y = IntMatrix::from_rows(
        3,
        2,
        vec![
            BigInt::from(1), BigInt::from(1),
            BigInt::from(1), BigInt::from(1),
            BigInt::from(1), BigInt::from(1),
        ],
    );
    let key = scheme.derive_fe_key(&msk, &y).unwrap();
    let got = scheme.decrypt(&ct, &key, &y).unwrap();

    let expected: BigInt = xs.iter().map(|x| x.dot(&iv(&[1, 1])).unwrap()).sum();
    assert_eq!(got, cfe::math::bigint::mod_floor(&expected, &BigInt::from(100)));
}

#[test]
fn decentralized_client_shares_telescope_to_zero() {
    let damgard_params = DamgardParams {
        ell: 2,
        modulus_bits: 256,
        bound: BigInt::from(2000),
    };
    let num_clients = 3;
    let clients: Vec<Client> = (0..num_clients)
        .map(|i| Client::init(i, num_clients, damgard_params.clone()).unwrap())
        .collect();
    let publics: Vec<BigInt> = clients.iter().map(|c| c.dh_public.clone()).collect();

    let shares: Vec<IntVector> = clients
        .iter()
        .map(|c| c.set_share(&publics, 2).unwrap())
        .collect();

    let total: IntVector = shares
        .into_iter()
        .reduce(|a, b| a.add(&b).unwrap())
        .unwrap();
    assert_eq!(total, iv(&[0, 0]));
}
