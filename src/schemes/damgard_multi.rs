//! Inner-product FE, multi-client over Damgård's construction, plus the
//! decentralized variant.
//!
//! Grounded on
//! `examples/original_source/src/innerprod/fullysec/damgard_multi.c`
//! for the trusted-dealer variant and
//! `examples/original_source/src/innerprod/fullysec/damgard_dec_multi.c`
//! for the decentralized extension. Structurally this mirrors
//! [`crate::schemes::ddh_multi`]: each of `n` slots runs an independent
//! [`crate::schemes::damgard::Damgard`] instance, an additive one-time pad
//! `OTP ∈ Z_B^{n×ℓ}` blinds each slot's plaintext before encryption, and the
//! functional key for a matrix `Y` compensates with `z = ⟨OTP, Y⟩ mod B`.
//! Per-slot ciphertexts therefore carry values in `(-2B, 2B)`, so each
//! slot's underlying Damgård instance is initialized with bound `2B`.

use num_bigint::BigInt;
use num_traits::Zero;
use rand::rngs::OsRng;

use crate::error::{CfeError, Result};
use crate::math::bigint::{mod_floor, uniform_range};
use crate::math::{IntMatrix, IntVector};
use crate::schemes::damgard::{
    Damgard, DamgardCiphertext, DamgardFeKey, DamgardMasterPublicKey, DamgardMasterSecretKey, DamgardParams,
};

/// Parameters for a multi-client Damgård scheme instance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DamgardMultiParams {
    /// Number of slots `n`.
    pub num_slots: usize,
    /// Per-slot vector length `ℓ`.
    pub ell: usize,
    /// Modulus bit length, shared by every slot's Damgård instance.
    pub modulus_bits: usize,
    /// Coordinate bound `B`.
    pub bound: BigInt,
}

/// A multi-client Damgård scheme instance: `n` independent Damgård instances.
pub struct DamgardMulti {
    params: DamgardMultiParams,
    slots: Vec<Damgard>,
}

/// Master secret key: one Damgård master secret key per slot, plus the OTP
/// matrix.
pub struct DamgardMultiMasterSecretKey {
    /// Per-slot Damgård master secret keys.
    pub slot_msks: Vec<DamgardMasterSecretKey>,
    /// The blinding one-time-pad matrix, `n x ell`, entries in `[0, B)`.
    pub otp: IntMatrix,
}

/// Master public key: one Damgård master public key per slot.
pub struct DamgardMultiMasterPublicKey(pub Vec<DamgardMasterPublicKey>);

/// A functional key for a matrix `Y ∈ Z^{n×ℓ}`.
pub struct DamgardMultiFeKey {
    /// Per-slot functional keys, `sk_{Y_i}` for row `i` of `Y`.
    pub slot_keys: Vec<DamgardFeKey>,
    /// Compensating scalar `z = ⟨OTP, Y⟩ mod B`.
    pub z: BigInt,
}

/// A ciphertext: one per-slot Damgård ciphertext.
pub struct DamgardMultiCiphertext(pub Vec<DamgardCiphertext>);

impl DamgardMulti {
    /// `S_init`: build `n` independent Damgård instances, each with
    /// coordinate bound `2B` to accommodate OTP blinding.
    pub fn init(params: DamgardMultiParams) -> Result<DamgardMulti> {
        let doubled_bound = &params.bound * 2;
        let mut slots = Vec::with_capacity(params.num_slots);
        for _ in 0..params.num_slots {
            slots.push(Damgard::init(DamgardParams {
                ell: params.ell,
                modulus_bits: params.modulus_bits,
                bound: doubled_bound.clone(),
            })?);
        }
        Ok(DamgardMulti { params, slots })
    }

    /// `S_generate_master_keys`.
    pub fn generate_master_keys(&self) -> (DamgardMultiMasterSecretKey, DamgardMultiMasterPublicKey) {
        let mut rng = OsRng;
        let mut slot_msks = Vec::with_capacity(self.params.num_slots);
        let mut slot_mpks = Vec::with_capacity(self.params.num_slots);
        for slot in &self.slots {
            let (msk, mpk) = slot.generate_master_keys();
            slot_msks.push(msk);
            slot_mpks.push(mpk);
        }
        let mut otp_data = Vec::with_capacity(self.params.num_slots * self.params.ell);
        for _ in 0..self.params.num_slots * self.params.ell {
            otp_data.push(uniform_range(&mut rng, &BigInt::zero(), &self.params.bound));
        }
        let otp = IntMatrix::from_rows(self.params.num_slots, self.params.ell, otp_data);
        (
            DamgardMultiMasterSecretKey { slot_msks, otp },
            DamgardMultiMasterPublicKey(slot_mpks),
        )
    }

    /// `S_derive_fe_key` for a matrix `Y ∈ Z^{n×ℓ}`.
    pub fn derive_fe_key(&self, msk: &DamgardMultiMasterSecretKey, y: &IntMatrix) -> Result<DamgardMultiFeKey> {
        if y.rows != self.params.num_slots || y.cols != self.params.ell {
            return Err(CfeError::MalformedInput("Damgard-multi: Y shape mismatch".into()));
        }
        let mut slot_keys = Vec::with_capacity(self.params.num_slots);
        for (i, slot) in self.slots.iter().enumerate() {
            let row = y.row_vector(i);
            slot_keys.push(slot.derive_fe_key(&msk.slot_msks[i], &row)?);
        }
        let mut z = BigInt::zero();
        for r in 0..y.rows {
            for c in 0..y.cols {
                z += msk.otp.get(r, c) * y.get(r, c);
            }
        }
        z = mod_floor(&z, &self.params.bound);
        Ok(DamgardMultiFeKey { slot_keys, z })
    }

    /// `S_encrypt` for slot `slot_idx`'s plaintext `x_i`, blinded by that
    /// slot's OTP row before the underlying Damgård encryption.
    pub fn encrypt_slot(
        &self,
        slot_idx: usize,
        mpk: &DamgardMultiMasterPublicKey,
        otp_row: &IntVector,
        x_i: &IntVector,
    ) -> Result<DamgardCiphertext> {
        let blinded = x_i.add(otp_row)?;
        self.slots[slot_idx].encrypt(&mpk.0[slot_idx], &blinded)
    }

    /// `S_decrypt`: sum the per-slot inner products, subtract `z`.
    pub fn decrypt(&self, ct: &DamgardMultiCiphertext, key: &DamgardMultiFeKey, y: &IntMatrix) -> Result<BigInt> {
        if ct.0.len() != self.params.num_slots || key.slot_keys.len() != self.params.num_slots {
            return Err(CfeError::MalformedCipher("Damgard-multi: slot count mismatch".into()));
        }
        let mut total = BigInt::zero();
        for i in 0..self.params.num_slots {
            let y_row = y.row_vector(i);
            total += self.slots[i].decrypt(&ct.0[i], &key.slot_keys[i], &y_row)?;
        }
        Ok(mod_floor(&(total - &key.z), &self.params.bound))
    }
}

/// The decentralized multi-client variant: each client independently runs
/// its own Damgård setup and contributes a share of a zero-sum blinding
/// matrix derived from pairwise Diffie-Hellman secrets, so no trusted
/// authority ever sees the whole OTP. Structurally the same telescoping
/// idea as [`crate::schemes::ddh_multi::decentralized`], adapted to
/// Damgård's two-generator group.
pub mod decentralized {
    use super::*;
    use crate::group::hash_to_group;
    use crate::math::bigint::mod_pow;
    use crate::math::ElGamalGroup;
    use crate::G1;

    /// One client's local state in the decentralized protocol.
    pub struct Client {
        /// This client's index among the `n` participants.
        pub index: usize,
        /// Total number of clients.
        pub num_clients: usize,
        /// This client's local Damgård instance (own group, own slot keys).
        pub damgard: Damgard,
        /// This client's Diffie-Hellman secret (shared-secret derivation).
        pub dh_secret: BigInt,
        /// This client's Diffie-Hellman public value `g^{dh_secret}`.
        pub dh_public: BigInt,
    }

    impl Client {
        /// `client_init`: set up a local Damgård instance and a fresh DH key
        /// pair.
        pub fn init(index: usize, num_clients: usize, damgard_params: DamgardParams) -> Result<Client> {
            let damgard = Damgard::init(damgard_params)?;
            let mut rng = OsRng;
            let group = damgard.group().clone();
            let dh_secret = uniform_range(&mut rng, &BigInt::from(2), &group.p);
            let dh_public = mod_pow(&group.g, &dh_secret, &group.p).expect("p > 0");
            Ok(Client {
                index,
                num_clients,
                damgard,
                dh_secret,
                dh_public,
            })
        }

        /// Derive this client's row of the zero-sum blinding matrix from the
        /// published DH public keys of every other client, the same way
        /// [`crate::schemes::ddh_multi::decentralized::Client::set_share`]
        /// does: a deterministic, domain-separated hash of each pairwise
        /// shared secret, positive for clients with a lower index and
        /// negative for clients with a higher index, so that summing every
        /// client's contribution across all pairs telescopes to zero.
        pub fn set_share(&self, other_publics: &[BigInt], ell: usize) -> Result<IntVector> {
            if other_publics.len() != self.num_clients {
                return Err(CfeError::MalformedInput(
                    "decentralized Damgard-multi: public key count mismatch".into(),
                ));
            }
            let group: &ElGamalGroup = self.damgard.group();
            let mut share = vec![BigInt::zero(); ell];
            for (j, other_pub) in other_publics.iter().enumerate() {
                if j == self.index {
                    continue;
                }
                let shared = mod_pow(other_pub, &self.dh_secret, &group.p).expect("p > 0");
                let sign: i64 = if self.index < j { 1 } else { -1 };
                let (lo, hi) = (self.index.min(j), self.index.max(j));
                for (k, s) in share.iter_mut().enumerate() {
                    let tag = format!("damgard-dmcfe-otp:{lo}:{hi}:{k}");
                    let point: G1 = hash_to_group(tag.as_bytes(), &shared.to_signed_bytes_be());
                    let mut buf = Vec::new();
                    use ark_serialize::CanonicalSerialize;
                    point
                        .serialize_compressed(&mut buf)
                        .expect("G1 serialization cannot fail");
                    let digest = blake3::hash(&buf);
                    let scalar = BigInt::from_bytes_be(num_bigint::Sign::Plus, &digest.as_bytes()[..8]);
                    *s += sign * scalar;
                }
            }
            Ok(IntVector(share))
        }
    }
}
