//! # latchkey-jni
//!
//! Managed-runtime (JNI) binding for ML-DSA-44.
//!
//! The managed caller allocates every buffer as a Java `byte[]` sized from
//! the published length constants and passes it down. Each export pins its
//! arrays for the duration of the call through [`AutoElements`] guards, so
//! pin and unpin happen exactly once on every exit path, normal or early.
//! The release mode is fixed at acquisition:
//!
//! - inputs (message, secret key, signature to check) are pinned with
//!   [`ReleaseMode::NoCopyBack`], so the JVM copy is never written back
//! - outputs (generated keys, produced signature) are pinned with
//!   [`ReleaseMode::CopyBack`], so the bytes written here reach the JVM
//!   array when the guard drops
//!
//! ## Error convention
//!
//! `mlDsa44Sign` and `mlDsa44Verify` report every failure as `-1`; the
//! managed side cannot distinguish a wrong-length key from a signing
//! failure, matching the other latchkey bindings. `mlDsa44GenerateKeypair`
//! returns nothing, so it has no error channel: a wrong-length output
//! array or a key generation failure aborts the process rather than
//! letting the caller read half-written key material. Panics never cross
//! the JNI boundary; they are caught and mapped to the same outcomes.
//!
//! No state survives between calls.

// JNI export names encode the Java package and class path.
#![allow(non_snake_case)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

use jni::JNIEnv;
use jni::errors::Result as JniResult;
use jni::objects::{AutoElements, JByteArray, JClass, ReleaseMode};
use jni::sys::{jbyte, jint};
use std::panic;
use std::process;
use std::slice;

mod marshal;

/// Views pinned `jbyte` elements as unsigned bytes.
fn bytes_of<'a>(elements: &'a AutoElements<'_, '_, '_, jbyte>) -> &'a [u8] {
    // SAFETY: jbyte and u8 have identical size and alignment, and the
    // pinned region is valid for elements.len() bytes.
    unsafe { slice::from_raw_parts(elements.as_ptr().cast::<u8>(), elements.len()) }
}

/// Views pinned `jbyte` elements as writable unsigned bytes.
fn bytes_of_mut<'a>(elements: &'a mut AutoElements<'_, '_, '_, jbyte>) -> &'a mut [u8] {
    // SAFETY: as above, with exclusive access through the guard.
    unsafe { slice::from_raw_parts_mut(elements.as_mut_ptr().cast::<u8>(), elements.len()) }
}

/// Generates an ML-DSA-44 keypair into the two provided arrays.
///
/// `pk_arr` must be exactly `PUBLIC_KEY_LEN` (1312) bytes and `sk_arr`
/// exactly `SECRET_KEY_LEN` (2560) bytes. Both arrays are committed back
/// to the JVM together on success. There is no error return: a
/// wrong-length array, a pin failure, or a primitive failure aborts the
/// process.
#[no_mangle]
pub extern "system" fn Java_com_example_app_MainActivity_mlDsa44GenerateKeypair<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    pk_arr: JByteArray<'local>,
    sk_arr: JByteArray<'local>,
) {
    let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| -> JniResult<bool> {
        // SAFETY: both arrays stay untouched through the JNIEnv for as
        // long as the guards are alive.
        let mut pk_elements = unsafe { env.get_array_elements(&pk_arr, ReleaseMode::CopyBack)? };
        let mut sk_elements = unsafe { env.get_array_elements(&sk_arr, ReleaseMode::CopyBack)? };

        Ok(marshal::generate_into(bytes_of_mut(&mut pk_elements), bytes_of_mut(&mut sk_elements)))
    }));

    match outcome {
        Ok(Ok(true)) => {}
        _ => process::abort(),
    }
}

/// Signs `mlen` bytes of `msg_arr` with the secret key in `sk_arr`.
///
/// The signature is written into the front of `sig_arr`, which must hold
/// at least `SIGNATURE_LEN` (2420) bytes. Returns the signature length on
/// success and `-1` on any failure. The message and secret key arrays are
/// never written back; the signature array is committed when the call
/// returns, whether or not it was written.
#[no_mangle]
pub extern "system" fn Java_com_example_app_MainActivity_mlDsa44Sign<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    msg_arr: JByteArray<'local>,
    mlen: jint,
    sk_arr: JByteArray<'local>,
    sig_arr: JByteArray<'local>,
) -> jint {
    let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| -> JniResult<jint> {
        // SAFETY: arrays stay untouched through the JNIEnv while pinned.
        let msg_elements = unsafe { env.get_array_elements(&msg_arr, ReleaseMode::NoCopyBack)? };
        let sk_elements = unsafe { env.get_array_elements(&sk_arr, ReleaseMode::NoCopyBack)? };
        let mut sig_elements = unsafe { env.get_array_elements(&sig_arr, ReleaseMode::CopyBack)? };

        let msg_bytes = bytes_of(&msg_elements);
        let mlen = match usize::try_from(mlen) {
            Ok(n) if n <= msg_bytes.len() => n,
            _ => return Ok(-1),
        };

        Ok(marshal::sign_into(
            &msg_bytes[..mlen],
            bytes_of(&sk_elements),
            bytes_of_mut(&mut sig_elements),
        ))
    }));

    match outcome {
        Ok(Ok(code)) => code,
        _ => -1,
    }
}

/// Verifies `siglen` bytes of `sig_arr` over `mlen` bytes of `msg_arr`
/// under the public key in `pk_arr`.
///
/// Returns `0` for a valid signature and `-1` for everything else. All
/// three arrays are read-only for this call and are never written back.
#[no_mangle]
pub extern "system" fn Java_com_example_app_MainActivity_mlDsa44Verify<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    sig_arr: JByteArray<'local>,
    siglen: jint,
    msg_arr: JByteArray<'local>,
    mlen: jint,
    pk_arr: JByteArray<'local>,
) -> jint {
    let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| -> JniResult<jint> {
        // SAFETY: arrays stay untouched through the JNIEnv while pinned.
        let sig_elements = unsafe { env.get_array_elements(&sig_arr, ReleaseMode::NoCopyBack)? };
        let msg_elements = unsafe { env.get_array_elements(&msg_arr, ReleaseMode::NoCopyBack)? };
        let pk_elements = unsafe { env.get_array_elements(&pk_arr, ReleaseMode::NoCopyBack)? };

        let sig_bytes = bytes_of(&sig_elements);
        let siglen = match usize::try_from(siglen) {
            Ok(n) if n <= sig_bytes.len() => n,
            _ => return Ok(-1),
        };
        let msg_bytes = bytes_of(&msg_elements);
        let mlen = match usize::try_from(mlen) {
            Ok(n) if n <= msg_bytes.len() => n,
            _ => return Ok(-1),
        };

        Ok(marshal::verify_parts(
            &sig_bytes[..siglen],
            &msg_bytes[..mlen],
            bytes_of(&pk_elements),
        ))
    }));

    match outcome {
        Ok(Ok(code)) => code,
        _ => -1,
    }
}

/// Teardown hook for the managed side's lifecycle.
///
/// The binding keeps no state between calls, so there is nothing to
/// release. The export exists so the managed caller can pair every init
/// path with a cleanup call unconditionally.
#[no_mangle]
pub extern "system" fn Java_com_example_app_MainActivity_mlDsa44Cleanup<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) {
    // Stateless binding, nothing to tear down.
}
