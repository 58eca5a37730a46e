use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{PrimeField, UniformRand};
use rand::rngs::OsRng;

use cfe::group::scalar::scalar_to_int;
use cfe::group::{gt_scale, pair};
use cfe::{g1_generator, g2_generator, F};

#[test]
fn pairing_is_bilinear() {
    let mut rng = OsRng;
    let a = F::rand(&mut rng);
    let b = F::rand(&mut rng);

    let p = g1_generator().mul_bigint(a.into_bigint()).into_affine();
    let q = g2_generator().mul_bigint(b.into_bigint()).into_affine();

    let lhs = pair(&p, &q);
    let base = pair(&g1_generator(), &g2_generator());
    let ab = scalar_to_int(&(a * b));
    let rhs = gt_scale(&base, &ab);

    assert_eq!(lhs, rhs);
}

#[test]
fn pairing_with_identity_is_identity() {
    use ark_ff::Zero;
    let identity = cfe::G1::identity();
    let result = pair(&identity, &g2_generator());
    assert_eq!(result, cfe::GT::zero());
}
