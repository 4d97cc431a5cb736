//! Error types for latchkey-core

use thiserror::Error;

/// Result type for ML-DSA-44 operations
pub type Result<T> = std::result::Result<T, MlDsaError>;

/// Errors that can occur during ML-DSA-44 operations
///
/// Verification mismatch is not represented here: an honest mismatch is an
/// expected outcome and is reported as `Ok(false)` by [`crate::verify`].
#[derive(Debug, Error)]
pub enum MlDsaError {
    /// Key generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Public key bytes could not be deserialized
    #[error("Malformed public key: {0}")]
    MalformedPublicKey(String),

    /// Secret key bytes could not be deserialized
    #[error("Malformed secret key: {0}")]
    MalformedSecretKey(String),

    /// Invalid seed length
    #[error("Invalid seed length: expected {expected}, got {actual}")]
    InvalidSeedLength {
        /// Expected seed size
        expected: usize,
        /// Actual seed size
        actual: usize,
    },

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key size
        expected: usize,
        /// Actual key size
        actual: usize,
    },

    /// Invalid signature length
    #[error("Invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength {
        /// Expected signature size
        expected: usize,
        /// Actual signature size
        actual: usize,
    },
}
