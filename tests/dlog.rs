use num_bigint::BigInt;

use cfe::dlog::{baby_giant_signed, pollard_rho};
use cfe::math::bigint::mod_pow;

fn small_group() -> (BigInt, BigInt, BigInt) {
    // A small safe-prime-order subgroup is unnecessary here: any prime
    // modulus and a generator of a large-enough subgroup suffice for
    // exercising the search bound.
    let p = BigInt::from(1_000_003u64);
    let g = BigInt::from(5);
    let q = &p - 1;
    (p, g, q)
}

#[test]
fn finds_discrete_log_at_the_search_bound() {
    let (p, g, q) = small_group();
    let bound = BigInt::from(500);
    let x = BigInt::from(499);
    let h = mod_pow(&g, &x, &p).unwrap();

    let found = baby_giant_signed(&h, &g, &p, &q, &bound).unwrap();
    assert_eq!(found, x);
}

#[test]
fn discrete_log_above_bound_is_not_found() {
    let (p, g, q) = small_group();
    let bound = BigInt::from(500);
    let x = BigInt::from(5000);
    let h = mod_pow(&g, &x, &p).unwrap();

    assert!(baby_giant_signed(&h, &g, &p, &q, &bound).is_err());
}

#[test]
fn pollard_rho_agrees_with_baby_giant() {
    let (p, g, q) = small_group();
    let x = BigInt::from(12345);
    let h = mod_pow(&g, &x, &p).unwrap();

    let found = pollard_rho(&h, &g, &p, &q).unwrap();
    let check = mod_pow(&g, &found, &p).unwrap();
    assert_eq!(check, h);
}

#[test]
fn random_prime_has_requested_bit_length() {
    let mut rng = rand::rngs::OsRng;
    let p = cfe::math::primes::random_prime(&mut rng, 64).unwrap();
    assert_eq!(p.bits(), 64);
}
