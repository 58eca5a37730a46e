//! Flat error surface shared by every layer and scheme in this crate.
//!
//! Every fallible public function returns `Result<T, CfeError>`. Foreign
//! errors (bignum parsing, serde, ark-serialize) are always converted into a
//! variant here before crossing a public boundary — callers never see a
//! foreign error type.

/// The single discriminated error type returned by every fallible operation
/// in this crate.
#[derive(Debug, thiserror::Error)]
pub enum CfeError {
    /// Generic initialization failure not covered by a more specific variant.
    #[error("initialization failed: {0}")]
    Init(String),

    /// Probabilistic prime generation exhausted its attempt budget.
    #[error("prime generation failed after {attempts} attempts ({bits} bits)")]
    PrimeGenFailed {
        /// Number of attempts made before giving up.
        attempts: usize,
        /// Requested bit length.
        bits: usize,
    },

    /// Derived-parameter generation (e.g. LWE's fixed-point search for `q`)
    /// failed to converge.
    #[error("parameter generation failed: {0}")]
    ParamGenFailed(String),

    /// A scheme-level algebraic precondition does not hold (e.g. `ℓ·B² < p`).
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Public-key material failed to generate.
    #[error("public key generation failed: {0}")]
    PubKeyGenFailed(String),

    /// Secret-key material failed to generate.
    #[error("secret key generation failed: {0}")]
    SecKeyGenFailed(String),

    /// A declared coordinate bound was violated by an input vector/matrix.
    #[error("bound check failed: coordinate {index} = {value} is not in (-{bound}, {bound})")]
    BoundCheckFailed {
        /// Offending coordinate index.
        index: usize,
        /// Offending value, rendered for diagnosis.
        value: String,
        /// The declared bound.
        bound: String,
    },

    /// Input shape (dimension, length) does not match what the scheme expects.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A deserialized public key failed its structural/shape checks.
    #[error("malformed public key: {0}")]
    MalformedPubKey(String),

    /// A deserialized secret key failed its structural/shape checks.
    #[error("malformed secret key: {0}")]
    MalformedSecKey(String),

    /// A deserialized functional key failed its structural/shape checks.
    #[error("malformed functional key: {0}")]
    MalformedFEKey(String),

    /// A deserialized ciphertext failed its structural/shape checks.
    #[error("malformed ciphertext: {0}")]
    MalformedCipher(String),

    /// Discrete-log recovery exhausted its search bound without a match.
    #[error("discrete log not found within bound {bound}")]
    DLogNotFound {
        /// The search bound that was exhausted.
        bound: String,
    },

    /// Discrete-log recovery failed for a reason other than exhausting the
    /// search bound (e.g. Pollard rho's gcd step found no usable factor).
    #[error("discrete log computation failed: {0}")]
    DLogCalcFailed(String),

    /// ABE decryption: the decryptor's attribute set does not satisfy the
    /// ciphertext's policy (the MSP solver found no reconstruction).
    #[error("insufficient keys to satisfy the access policy")]
    InsufficientKeys,

    /// The boolean policy expression failed to parse.
    #[error("corrupted boolean expression: {0}")]
    CorruptedBoolExpression(String),

    /// A linear system over `Z_p` has no solution.
    #[error("no solution exists for the linear system")]
    NoSolutionExists,

    /// A deserialized or constructed MSP/policy object is malformed.
    #[error("malformed policy: {0}")]
    MalformedPolicy(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Canonical ark-serialize (de)serialization failed.
    #[error("canonical serialization error: {0}")]
    CanonicalSerialization(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CfeError>;

impl From<ark_serialize::SerializationError> for CfeError {
    fn from(e: ark_serialize::SerializationError) -> Self {
        CfeError::CanonicalSerialization(e.to_string())
    }
}
