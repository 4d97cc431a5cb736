//! # latchkey-ffi
//!
//! C ABI binding for ML-DSA-44, for native hosts that link the library
//! directly.
//!
//! All functions use the convention:
//!   - Caller owns all buffers
//!   - Rust writes into `*mut u8` outputs of the published fixed sizes
//!   - Length-returning calls report `-1` on any failure
//!   - All functions prefixed `ml_dsa44_` to avoid symbol conflicts
//!
//! `ml_dsa44_seed_keypair` returns nothing and so has no error channel: a
//! null pointer or a primitive failure aborts the process instead of
//! leaving the output buffers half-written. The two int-returning calls
//! fold every failure into `-1`. Panics never unwind across the boundary;
//! they are caught and mapped to the same outcomes.
//!
//! No state survives between calls; every function is a pure function of
//! its input buffers.

#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

use std::panic;
use std::process;
use std::ptr;
use std::slice;

use latchkey_core::{
    seed_keypair, sign, verify, PublicKey, Seed, SecretKey, Signature, PUBLIC_KEY_LEN,
    SECRET_KEY_LEN, SEED_LEN, SIGNATURE_LEN,
};

/// Runs a closure that may panic, returning -1 on panic instead of
/// unwinding, which is undefined behavior across an `extern "C"` boundary.
/// `AssertUnwindSafe` is fine here: the closures capture raw pointers and
/// no torn state is observed through them after a panic.
unsafe fn catch_ffi<F: FnOnce() -> i32>(f: F) -> i32 {
    match panic::catch_unwind(panic::AssertUnwindSafe(f)) {
        Ok(rc) => rc,
        Err(_) => -1,
    }
}

/// Derives an ML-DSA-44 keypair from a 32-byte seed.
///
/// Writes `PUBLIC_KEY_LEN` (1312) bytes to `pk_out` and `SECRET_KEY_LEN`
/// (2560) bytes to `sk_out`. The derivation is deterministic: the same
/// seed always produces the same keypair. There is no error return; a
/// null pointer or a key generation failure aborts the process.
///
/// # Safety
///
/// `seed` must be readable for `SEED_LEN` bytes, `pk_out` writable for
/// `PUBLIC_KEY_LEN` bytes, and `sk_out` writable for `SECRET_KEY_LEN`
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn ml_dsa44_seed_keypair(
    seed: *const u8,
    pk_out: *mut u8,
    sk_out: *mut u8,
) {
    if seed.is_null() || pk_out.is_null() || sk_out.is_null() {
        process::abort();
    }
    let seed_bytes = slice::from_raw_parts(seed, SEED_LEN);

    let rc = catch_ffi(|| {
        let seed = match Seed::try_from(seed_bytes) {
            Ok(seed) => seed,
            Err(_) => return -1,
        };
        let (pk, sk) = match seed_keypair(&seed) {
            Ok(pair) => pair,
            Err(_) => return -1,
        };
        ptr::copy_nonoverlapping(pk.as_bytes().as_ptr(), pk_out, PUBLIC_KEY_LEN);
        ptr::copy_nonoverlapping(sk.as_bytes().as_ptr(), sk_out, SECRET_KEY_LEN);
        0
    });
    if rc != 0 {
        process::abort();
    }
}

/// Signs `mlen` bytes at `m` with the secret key at `sk`.
///
/// Writes `SIGNATURE_LEN` (2420) bytes to `sig_out` and returns that
/// length, or returns `-1` with `sig_out` untouched when the key is
/// undecodable or signing fails. An empty message is allowed: pass
/// `mlen == 0`, in which case `m` may be null.
///
/// # Safety
///
/// `m` must be readable for `mlen` bytes (or null with `mlen == 0`),
/// `sk` readable for `SECRET_KEY_LEN` bytes, and `sig_out` writable for
/// `SIGNATURE_LEN` bytes.
#[no_mangle]
pub unsafe extern "C" fn ml_dsa44_sign(
    m: *const u8,
    mlen: usize,
    sk: *const u8,
    sig_out: *mut u8,
) -> i32 {
    if (m.is_null() && mlen != 0) || sk.is_null() || sig_out.is_null() {
        return -1;
    }
    let message: &[u8] = if mlen == 0 { &[] } else { slice::from_raw_parts(m, mlen) };
    let sk_bytes = slice::from_raw_parts(sk, SECRET_KEY_LEN);

    catch_ffi(|| {
        let secret_key = match SecretKey::try_from(sk_bytes) {
            Ok(secret_key) => secret_key,
            Err(_) => return -1,
        };
        let signature = match sign(&secret_key, message) {
            Ok(signature) => signature,
            Err(_) => return -1,
        };
        ptr::copy_nonoverlapping(signature.as_bytes().as_ptr(), sig_out, SIGNATURE_LEN);
        SIGNATURE_LEN as i32
    })
}

/// Verifies `siglen` bytes of signature at `sig` over `mlen` bytes at `m`
/// under the public key at `pk`.
///
/// Returns `0` for a valid signature and `-1` for everything else,
/// including a wrong `siglen`, an undecodable public key, and an honest
/// mismatch. An empty message is allowed: pass `mlen == 0`, in which case
/// `m` may be null.
///
/// # Safety
///
/// `sig` must be readable for `siglen` bytes, `m` readable for `mlen`
/// bytes (or null with `mlen == 0`), and `pk` readable for
/// `PUBLIC_KEY_LEN` bytes.
#[no_mangle]
pub unsafe extern "C" fn ml_dsa44_verify(
    sig: *const u8,
    siglen: usize,
    m: *const u8,
    mlen: usize,
    pk: *const u8,
) -> i32 {
    if sig.is_null() || (m.is_null() && mlen != 0) || pk.is_null() {
        return -1;
    }
    if siglen != SIGNATURE_LEN {
        return -1;
    }
    let sig_bytes = slice::from_raw_parts(sig, SIGNATURE_LEN);
    let message: &[u8] = if mlen == 0 { &[] } else { slice::from_raw_parts(m, mlen) };
    let pk_bytes = slice::from_raw_parts(pk, PUBLIC_KEY_LEN);

    catch_ffi(|| {
        let signature = match Signature::try_from(sig_bytes) {
            Ok(signature) => signature,
            Err(_) => return -1,
        };
        let public_key = match PublicKey::try_from(pk_bytes) {
            Ok(public_key) => public_key,
            Err(_) => return -1,
        };
        match verify(&public_key, message, &signature) {
            Ok(true) => 0,
            _ => -1,
        }
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────
