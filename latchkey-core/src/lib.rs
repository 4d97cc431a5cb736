//! # latchkey-core
//!
//! Typed ML-DSA-44 (FIPS 204) operations shared by every latchkey host
//! binding.
//!
//! This crate owns the calls into the signature primitive and the
//! fixed-length buffer types that make misuse a compile error. The host
//! adapters (`latchkey-wasm`, `latchkey-jni`, `latchkey-ffi`) contain no
//! cryptographic logic of their own: they validate and marshal raw host
//! buffers into the types defined here, call the four operations, and map
//! the outcome back to their boundary's error convention.
//!
//! ## Operations
//!
//! - [`generate_keypair`]: fresh keypair from the operating system RNG
//! - [`seed_keypair`]: deterministic keypair from a 32-byte seed
//! - [`sign`]: hedged signature over an arbitrary-length message
//! - [`verify`]: signature verification, mismatch reported as `Ok(false)`
//!
//! ## Example
//!
//! ```
//! use latchkey_core::{generate_keypair, sign, verify};
//!
//! # fn main() -> latchkey_core::Result<()> {
//! let (pk, sk) = generate_keypair()?;
//! let signature = sign(&sk, b"important message")?;
//! assert!(verify(&pk, b"important message", &signature)?);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod ml_dsa;

pub use error::{MlDsaError, Result};
pub use ml_dsa::{
    generate_keypair, seed_keypair, sign, verify, PublicKey, Seed, SecretKey, Signature,
    PUBLIC_KEY_LEN, SECRET_KEY_LEN, SEED_LEN, SIGNATURE_LEN,
};
