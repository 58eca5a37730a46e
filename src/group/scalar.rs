//! Conversions between the crate's arbitrary-precision integers (L0) and the
//! BN254 scalar field `Fr`, used whenever an `IntVector`/`IntMatrix` is
//! "lifted" into a pairing group by scalar multiplication.

use ark_ff::{BigInteger, PrimeField};
use num_bigint::{BigInt, Sign};

use crate::F;

/// Reduce an arbitrary-precision integer into the BN254 scalar field,
/// respecting sign (negative integers map to `-|v| mod r`).
pub fn int_to_scalar(v: &BigInt) -> F {
    let (sign, bytes) = v.to_bytes_le();
    let f = F::from_le_bytes_mod_order(&bytes);
    match sign {
        Sign::Minus => -f,
        _ => f,
    }
}

/// Convert a scalar field element back into a non-negative arbitrary
/// precision integer in `[0, r)`. This is a one-way "unlift" used only for
/// diagnostics/tests; scheme decryption recovers plaintexts via discrete log,
/// never this direct conversion.
pub fn scalar_to_int(f: &F) -> BigInt {
    let repr = f.into_bigint();
    let bytes = repr.to_bytes_le();
    BigInt::from_bytes_le(Sign::Plus, &bytes)
}
