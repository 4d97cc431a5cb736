//! # latchkey-wasm
//!
//! Linear-memory host binding for ML-DSA-44 signature verification.
//!
//! A sandboxed host drives this module through three exports. `allocate`
//! hands out regions of the module's linear memory, the host copies its
//! buffers in, then calls [`verify`] with the region locations. From the
//! host's perspective the pointers exchanged here are plain offsets into
//! the module's exported memory.
//!
//! ## Contract
//!
//! - [`allocate`] returns the location of a fresh writable region, or the
//!   null location on failure or for a zero-size request. The null return
//!   is the only failure signal; the host must check for it.
//! - [`release`] returns a region to the allocator. Every allocation must
//!   be released exactly once. The allocator keeps no record of live
//!   regions, so a double release or a bogus location is undefined
//!   behavior, exactly as with a C `free`.
//! - [`verify`] reads a public key, challenge message, and signature at
//!   fixed lengths from the given locations and returns `0` for a valid
//!   signature, `-1` otherwise.
//!
//! No state survives between calls. The host owns every buffer lifetime.

#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

use std::alloc::{alloc, dealloc, Layout};
use std::slice;

use latchkey_core::{PublicKey, Signature, PUBLIC_KEY_LEN, SIGNATURE_LEN};

/// Challenge message length in bytes read by [`verify`].
///
/// The host protocol served by this binding always submits 16-byte
/// challenges, so [`verify`] takes no message length parameter and reads
/// exactly this many bytes at the message location. Confirm the challenge
/// size with the host protocol before reusing this binding anywhere else;
/// a host that writes a different challenge length will silently verify
/// against the wrong bytes.
pub const CHALLENGE_LEN: usize = 16;

// Each region is prefixed by a hidden usize header recording its size, so
// release can rebuild the Layout without a length parameter.
const HEADER_LEN: usize = std::mem::size_of::<usize>();
const ALIGN: usize = std::mem::align_of::<usize>();

/// Allocates `size` bytes of linear memory for the host.
///
/// Returns the location of the region, or null when `size` is zero, when
/// the total allocation size would overflow, or when the underlying
/// allocator fails. The host must treat a null return as allocation
/// failure.
#[no_mangle]
pub extern "C" fn allocate(size: usize) -> *mut u8 {
    if size == 0 {
        return std::ptr::null_mut();
    }
    let total = match size.checked_add(HEADER_LEN) {
        Some(total) => total,
        None => return std::ptr::null_mut(),
    };
    let layout = match Layout::from_size_align(total, ALIGN) {
        Ok(layout) => layout,
        Err(_) => return std::ptr::null_mut(),
    };

    // SAFETY: layout has non-zero size and a valid alignment.
    let base = unsafe { alloc(layout) };
    if base.is_null() {
        return std::ptr::null_mut();
    }

    // SAFETY: base is valid for the full layout and ALIGN-aligned, so the
    // header write is in bounds and aligned. The region handed to the host
    // starts after the header.
    unsafe {
        base.cast::<usize>().write(size);
        base.add(HEADER_LEN)
    }
}

/// Releases a region previously returned by [`allocate`].
///
/// A null location is ignored. Passing any other location not returned by
/// [`allocate`], or releasing the same location twice, is undefined
/// behavior; no bookkeeping exists to detect it.
///
/// # Safety
///
/// `ptr` must be null or a location returned by [`allocate`] that has not
/// been released yet.
#[no_mangle]
pub unsafe extern "C" fn release(ptr: *mut u8) {
    if ptr.is_null() {
        return;
    }
    // SAFETY: per the contract, ptr came from allocate, so the size header
    // sits immediately before it and the layout below matches the one the
    // region was allocated with.
    unsafe {
        let base = ptr.sub(HEADER_LEN);
        let size = base.cast::<usize>().read();
        let layout = Layout::from_size_align_unchecked(size + HEADER_LEN, ALIGN);
        dealloc(base, layout);
    }
}

/// Verifies an ML-DSA-44 signature over a [`CHALLENGE_LEN`]-byte challenge.
///
/// Reads [`PUBLIC_KEY_LEN`] bytes at `pk_ptr`, [`CHALLENGE_LEN`] bytes at
/// `msg_ptr`, and [`SIGNATURE_LEN`] bytes at `sig_ptr`. Returns `0` when
/// the signature is valid and `-1` for every failure, including a null
/// location, an undecodable public key, and an honest signature mismatch.
///
/// # Safety
///
/// Each non-null location must be readable for its fixed length above.
/// Locations returned by [`allocate`] with the matching sizes satisfy
/// this.
#[no_mangle]
pub unsafe extern "C" fn verify(pk_ptr: *const u8, msg_ptr: *const u8, sig_ptr: *const u8) -> i32 {
    if pk_ptr.is_null() || msg_ptr.is_null() || sig_ptr.is_null() {
        return -1;
    }

    // SAFETY: the caller guarantees each location is readable for the
    // fixed length used here.
    let (pk_bytes, msg, sig_bytes) = unsafe {
        (
            slice::from_raw_parts(pk_ptr, PUBLIC_KEY_LEN),
            slice::from_raw_parts(msg_ptr, CHALLENGE_LEN),
            slice::from_raw_parts(sig_ptr, SIGNATURE_LEN),
        )
    };

    let pk = match PublicKey::try_from(pk_bytes) {
        Ok(pk) => pk,
        Err(_) => return -1,
    };
    let sig = match Signature::try_from(sig_bytes) {
        Ok(sig) => sig,
        Err(_) => return -1,
    };

    match latchkey_core::verify(&pk, msg, &sig) {
        Ok(true) => 0,
        _ => -1,
    }
}
