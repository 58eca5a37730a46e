//! Deterministic hash-to-group (L2), used by FAME's per-row hashing and by
//! any scheme that needs a nothing-up-my-sleeve generator.
//!
//! Uses `blake3` as a domain-separated XOF: the caller-supplied domain tag
//! and the input bytes are absorbed length-delimited, then the XOF output
//! is expanded until it maps (via `mul_bigint` of the fixed generator) onto
//! a group element.
//! Mapping the hash output to a scalar and multiplying the generator is a
//! standard "hash-to-group via exponentiation" construction; it is not a
//! constant-time encoding and is not used for anything secret.

use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ff::{BigInteger, PrimeField};

/// Hash `domain || input` into a point of group `G` via
/// `generator^{H(domain, input)}`.
pub fn hash_to_group<G: AffineRepr>(domain: &[u8], input: &[u8]) -> G
where
    G::ScalarField: PrimeField,
{
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(domain.len() as u64).to_le_bytes());
    hasher.update(domain);
    hasher.update(&(input.len() as u64).to_le_bytes());
    hasher.update(input);
    let mut xof = hasher.finalize_xof();
    let mut buf = [0u8; 64];
    xof.fill(&mut buf);
    let scalar = G::ScalarField::from_le_bytes_mod_order(&buf);
    G::Group::generator().mul_bigint(scalar.into_bigint()).into_affine()
}
