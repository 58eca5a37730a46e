use ark_ff::Zero;

use cfe::policy::dippe_policy::{attribute_vector, conjunction_policy_vectors};
use cfe::schemes::dippe::{Dippe, DippeParams};
use cfe::GT;

const GID: &str = "alice";

// "11011": required positions 0, 1, 4 (bits 2 is don't-care).
const REQUIRED: &[usize] = &[0, 1, 4];
const N: usize = 5;

fn setup(n_authorities: usize) -> (Dippe, Vec<cfe::schemes::dippe::DippePubKey>, Vec<cfe::schemes::dippe::DippeSecKey>) {
    let scheme = Dippe::init(DippeParams { assump_size: 2 });
    let mut pks = Vec::with_capacity(n_authorities);
    let mut sks = Vec::with_capacity(n_authorities);
    for _ in 0..n_authorities {
        let (pk, sk) = scheme.generate_master_keys();
        pks.push(pk);
        sks.push(sk);
    }
    (scheme, pks, sks)
}

fn user_keys(
    scheme: &Dippe,
    pks: &[cfe::schemes::dippe::DippePubKey],
    sks: &[cfe::schemes::dippe::DippeSecKey],
    attrs: &cfe::math::IntVector,
) -> Vec<cfe::schemes::dippe::DippeUserSecKey> {
    sks.iter()
        .enumerate()
        .map(|(i, sk)| scheme.generate_user_secret_key(i, pks, sk, attrs, GID).unwrap())
        .collect()
}

#[test]
fn matching_pattern_decrypts() {
    let pol = conjunction_policy_vectors(N, REQUIRED).unwrap();
    let (scheme, pks, sks) = setup(pol.len());

    let msg = GT::zero();
    let ct = scheme.encrypt(&msg, &pol, &pks).unwrap();

    let bits = [true, true, false, true, true];
    let attrs = attribute_vector(&bits);
    let keys = user_keys(&scheme, &pks, &sks, &attrs);

    let recovered = scheme.decrypt(&keys, &ct, &attrs, GID).unwrap();
    assert_eq!(recovered, msg);
}

#[test]
fn non_matching_pattern_fails_to_decrypt() {
    let pol = conjunction_policy_vectors(N, REQUIRED).unwrap();
    let (scheme, pks, sks) = setup(pol.len());

    let msg = GT::zero();
    let ct = scheme.encrypt(&msg, &pol, &pks).unwrap();

    // bit 1 (required) is unset: the conjunction is not satisfied.
    let bits = [true, false, false, true, true];
    let attrs = attribute_vector(&bits);
    let keys = user_keys(&scheme, &pks, &sks, &attrs);

    let recovered = scheme.decrypt(&keys, &ct, &attrs, GID).unwrap();
    assert_ne!(recovered, msg);
}
