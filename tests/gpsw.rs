use ark_ff::UniformRand;
use rand::rngs::OsRng;

use cfe::group::pair;
use cfe::policy::Msp;
use cfe::schemes::gpsw::{Gpsw, GpswParams};
use cfe::{g1_generator, g2_generator};

const POLICY: &str = "(5OR3)AND((2OR4)OR(1AND6))";

fn sample_message() -> cfe::GT {
    let mut rng = OsRng;
    let scalar = cfe::F::rand(&mut rng);
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::PrimeField;
    let p = g1_generator().mul_bigint(scalar.into_bigint()).into_affine();
    pair(&p, &g2_generator())
}

#[test]
fn satisfying_attribute_set_decrypts() {
    let scheme = Gpsw::init(GpswParams { ell: 10 });
    let (mpk, msk) = scheme.generate_master_keys();

    let msp = Msp::from_boolean_expression(POLICY, true).unwrap();
    let policy_keys = scheme.generate_policy_keys(&msp, &msk).unwrap();

    let msg = sample_message();
    let ct = scheme.encrypt(&msg, &[1, 2, 3, 4, 5, 6, 7], &mpk).unwrap();

    let owned: [i64; 3] = [1, 3, 6];
    let keys = scheme.delegate_keys(&policy_keys, &msp, &owned);
    let recovered = scheme.decrypt(&ct, &keys).unwrap();
    assert_eq!(recovered, msg);
}

#[test]
fn non_satisfying_attribute_set_fails() {
    let scheme = Gpsw::init(GpswParams { ell: 10 });
    let (mpk, msk) = scheme.generate_master_keys();

    let msp = Msp::from_boolean_expression(POLICY, true).unwrap();
    let policy_keys = scheme.generate_policy_keys(&msp, &msk).unwrap();

    let msg = sample_message();
    let ct = scheme.encrypt(&msg, &[1, 2, 3, 4, 5, 6, 7], &mpk).unwrap();

    let owned: [i64; 1] = [2];
    let keys = scheme.delegate_keys(&policy_keys, &msp, &owned);
    assert!(scheme.decrypt(&ct, &keys).is_err());
}
