use ark_ff::Zero;

use cfe::policy::Msp;
use cfe::schemes::fame::Fame;
use cfe::GT;

const POLICY: &str = "(5OR3)AND((2OR4)OR(1AND6))";

#[test]
fn satisfying_attribute_set_decrypts_identity() {
    let scheme = Fame::init();
    let (mpk, msk) = scheme.generate_master_keys();

    let msp = Msp::from_boolean_expression(POLICY, false).unwrap();
    let msg = GT::zero();
    let ct = scheme.encrypt(&msg, &msp, &mpk).unwrap();

    let gamma = [1i64, 3, 6];
    let keys = scheme.generate_attrib_keys(&gamma, &msk).unwrap();

    let recovered = scheme.decrypt(&ct, &keys).unwrap();
    assert_eq!(recovered, msg);
}

#[test]
fn non_satisfying_attribute_set_fails() {
    let scheme = Fame::init();
    let (mpk, msk) = scheme.generate_master_keys();

    let msp = Msp::from_boolean_expression(POLICY, false).unwrap();
    let msg = GT::zero();
    let ct = scheme.encrypt(&msg, &msp, &mpk).unwrap();

    let gamma = [2i64];
    let keys = scheme.generate_attrib_keys(&gamma, &msk).unwrap();

    assert!(scheme.decrypt(&ct, &keys).is_err());
}
