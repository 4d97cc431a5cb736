//! # ML-DSA-44 (FIPS 204) typed facade
//!
//! This module wraps the `fips204` implementation of ML-DSA-44 behind owned,
//! fixed-length buffer types. The host bindings built on top of this crate
//! (linear-memory, managed-runtime, native) all marshal raw bytes into these
//! types at their boundary, so a secret key can never be passed where a
//! signature is expected and a wrong-length buffer is rejected before it
//! reaches the primitive.
//!
//! ## Buffer sizes
//!
//! | Buffer     | Length constant    | Bytes |
//! |------------|--------------------|-------|
//! | Seed       | [`SEED_LEN`]       | 32    |
//! | Public key | [`PUBLIC_KEY_LEN`] | 1312  |
//! | Secret key | [`SECRET_KEY_LEN`] | 2560  |
//! | Signature  | [`SIGNATURE_LEN`]  | 2420  |
//!
//! ML-DSA-44 is the NIST security category 2 parameter set.
//!
//! ## Signing mode
//!
//! [`sign`] uses the primitive's hedged (randomized) signing path with an
//! empty context string. Repeat signatures over the same message and key may
//! differ byte-for-byte; every one of them verifies.
//!
//! ## Statelessness
//!
//! Nothing here holds state between calls. Every operation is a pure
//! function over its inputs (plus fresh randomness for [`generate_keypair`]
//! and [`sign`]), so all operations may be invoked concurrently from
//! independent threads with no shared mutable state.

use fips204::ml_dsa_44;
use fips204::traits::{SerDes, Signer, Verifier};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use subtle::{Choice, ConstantTimeEq};
use tracing::instrument;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{MlDsaError, Result};

/// Seed length in bytes for deterministic key derivation
pub const SEED_LEN: usize = 32;

/// ML-DSA-44 public key length in bytes
pub const PUBLIC_KEY_LEN: usize = ml_dsa_44::PK_LEN;

/// ML-DSA-44 secret key length in bytes
pub const SECRET_KEY_LEN: usize = ml_dsa_44::SK_LEN;

/// ML-DSA-44 signature length in bytes
pub const SIGNATURE_LEN: usize = ml_dsa_44::SIG_LEN;

/// Caller-supplied entropy for deterministic key derivation
///
/// # Security
///
/// A seed fully determines the derived keypair, so it is key material in its
/// own right. The field is private and the seed is zeroized on drop.
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Creates a seed from exactly [`SEED_LEN`] bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the seed bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Seed {
    type Error = MlDsaError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SEED_LEN] = bytes.try_into().map_err(|_e| {
            MlDsaError::InvalidSeedLength { expected: SEED_LEN, actual: bytes.len() }
        })?;
        Ok(Self(bytes))
    }
}

/// ML-DSA-44 public key (FIPS 204 serialized format)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Creates a public key from exactly [`PUBLIC_KEY_LEN`] bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the serialized public key bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = MlDsaError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_e| {
            MlDsaError::InvalidKeyLength { expected: PUBLIC_KEY_LEN, actual: bytes.len() }
        })?;
        Ok(Self(bytes))
    }
}

/// ML-DSA-44 secret key (FIPS 204 serialized format)
///
/// # Security
///
/// - The field is private to prevent direct access to secret material
/// - Implements `ZeroizeOnDrop` for automatic memory cleanup
/// - Implements `ConstantTimeEq` for timing-safe comparisons
/// - Does not implement `Clone` to prevent unzeroized copies
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_LEN]);

impl SecretKey {
    /// Creates a secret key from exactly [`SECRET_KEY_LEN`] bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the serialized secret key bytes
    ///
    /// # Security Warning
    /// Handle the returned bytes with care. Do not copy or store them
    /// without proper zeroization.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = MlDsaError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SECRET_KEY_LEN] = bytes.try_into().map_err(|_e| {
            MlDsaError::InvalidKeyLength { expected: SECRET_KEY_LEN, actual: bytes.len() }
        })?;
        Ok(Self(bytes))
    }
}

impl ConstantTimeEq for SecretKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_slice().ct_eq(other.0.as_slice())
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SecretKey {}

/// ML-DSA-44 signature (FIPS 204 serialized format)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Creates a signature from exactly [`SIGNATURE_LEN`] bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the serialized signature bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = MlDsaError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_e| {
            MlDsaError::InvalidSignatureLength { expected: SIGNATURE_LEN, actual: bytes.len() }
        })?;
        Ok(Self(bytes))
    }
}

/// Generate an ML-DSA-44 keypair from the operating system RNG
///
/// Each call draws fresh randomness; two calls produce independent keypairs.
/// For reproducible derivation from caller-supplied entropy use
/// [`seed_keypair`].
///
/// # Errors
/// Returns an error if the primitive reports a key generation failure.
#[instrument(level = "debug")]
pub fn generate_keypair() -> Result<(PublicKey, SecretKey)> {
    let (pk, sk) = ml_dsa_44::try_keygen().map_err(|e| {
        MlDsaError::KeyGenerationFailed(format!("ML-DSA-44 key generation failed: {}", e))
    })?;
    Ok((PublicKey(pk.into_bytes()), SecretKey(sk.into_bytes())))
}

/// Derive an ML-DSA-44 keypair deterministically from a seed
///
/// Identical seeds always produce identical keypairs; distinct seeds produce
/// distinct keypairs with overwhelming probability. The seed initializes a
/// ChaCha20 stream that supplies the primitive's key generation randomness.
///
/// # Errors
/// Returns an error if the primitive reports a key generation failure.
#[instrument(level = "debug", skip(seed))]
pub fn seed_keypair(seed: &Seed) -> Result<(PublicKey, SecretKey)> {
    let mut rng = ChaCha20Rng::from_seed(*seed.as_bytes());
    let (pk, sk) = ml_dsa_44::try_keygen_with_rng(&mut rng).map_err(|e| {
        MlDsaError::KeyGenerationFailed(format!("ML-DSA-44 seeded key generation failed: {}", e))
    })?;
    Ok((PublicKey(pk.into_bytes()), SecretKey(sk.into_bytes())))
}

/// Sign a message with ML-DSA-44
///
/// Uses hedged signing with an empty context string. The message may be any
/// length, including empty.
///
/// # Errors
/// Returns an error if the secret key cannot be deserialized or the
/// primitive reports a signing failure. No partial signature is ever
/// returned.
#[instrument(level = "debug", skip(secret_key, message), fields(message_len = message.len()))]
pub fn sign(secret_key: &SecretKey, message: &[u8]) -> Result<Signature> {
    let sk = ml_dsa_44::PrivateKey::try_from_bytes(secret_key.0).map_err(|e| {
        MlDsaError::MalformedSecretKey(format!(
            "Failed to deserialize ML-DSA-44 secret key: {}",
            e
        ))
    })?;
    let sig = sk
        .try_sign(message, &[])
        .map_err(|e| MlDsaError::SigningFailed(format!("ML-DSA-44 signing failed: {}", e)))?;
    Ok(Signature(sig))
}

/// Verify an ML-DSA-44 signature
///
/// Returns `Ok(true)` for a valid signature and `Ok(false)` for an honest
/// mismatch (wrong message, wrong key, or corrupted signature). A mismatch
/// is an expected outcome, not an error.
///
/// # Errors
/// Returns an error only if the public key cannot be deserialized.
#[instrument(level = "debug", skip(public_key, message, signature), fields(message_len = message.len()))]
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> Result<bool> {
    let pk = ml_dsa_44::PublicKey::try_from_bytes(public_key.0).map_err(|e| {
        MlDsaError::MalformedPublicKey(format!(
            "Failed to deserialize ML-DSA-44 public key: {}",
            e
        ))
    })?;
    Ok(pk.verify(message, &signature.0, &[]))
}
