//! L4 (discrete-log half): baby-step/giant-step and Pollard rho, used by
//! every scheme to recover a small integer result from a group element
//! after decryption.

pub mod bsgs;
pub mod gt;
pub mod pollard_rho;

pub use bsgs::{baby_giant, baby_giant_signed};
pub use gt::{baby_giant_gt, baby_giant_gt_signed};
pub use pollard_rho::pollard_rho;
