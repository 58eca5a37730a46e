//! L6: the FE and ABE schemes. Each scheme is a distinct Rust type with its
//! own `init`/`generate_master_keys`/`derive_fe_key`/`encrypt`/`decrypt`
//! methods; there is no shared scheme trait or enum (see `DESIGN.md`).

pub mod damgard;
pub mod damgard_multi;
pub mod ddh;
pub mod ddh_multi;
pub mod dippe;
pub mod fame;
pub mod fhipe;
pub mod gpsw;
pub mod lwe;
pub mod paillier;
pub mod quadratic;
