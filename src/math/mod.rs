//! L0/L1: arbitrary-precision integers, safe-prime/ElGamal setup, and
//! dense integer vector/matrix containers.

pub mod bigint;
pub mod matrix;
pub mod primes;

pub use bigint::Int;
pub use matrix::{IntMatrix, IntVector};
pub use primes::{elgamal_init, random_prime, random_safe_prime, ElGamalGroup};
