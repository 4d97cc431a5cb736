//! Concurrency and Thread Safety Tests for latchkey-core
//!
//! Every operation in the facade is a pure function over its inputs, so
//! independent threads may generate keys, sign, and verify with no shared
//! mutable state. These tests validate that claim.
//!
//! Test coverage:
//! - Parallel key generation (no race conditions, no RNG collision)
//! - Concurrent sign/verify pipelines on independent keypairs
//! - Seed derivation agreement across threads
//! - Shared read-only key access from many threads

#![allow(clippy::expect_used)]

use latchkey_core::{generate_keypair, seed_keypair, sign, verify, Seed, SEED_LEN};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

// ============================================================================
// Parallel Key Generation Tests
// ============================================================================

#[test]
fn test_parallel_keygen_produces_unique_keys() {
    const NUM_THREADS: usize = 8;
    const KEYS_PER_THREAD: usize = 2;

    let keys = Arc::new(std::sync::Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let keys = Arc::clone(&keys);
            thread::spawn(move || {
                let mut local_keys = Vec::new();

                for _ in 0..KEYS_PER_THREAD {
                    let (pk, _sk) =
                        generate_keypair().expect("keypair generation should succeed");
                    local_keys.push(pk.as_bytes().to_vec());
                }

                let mut keys_guard = keys.lock().expect("mutex should not be poisoned");
                keys_guard.extend(local_keys);
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }

    let keys_guard = keys.lock().expect("mutex should not be poisoned");
    let total_keys = keys_guard.len();
    assert_eq!(total_keys, NUM_THREADS * KEYS_PER_THREAD, "Should have generated all keys");

    // Verify all keys are unique
    let mut unique_keys: std::collections::HashSet<Vec<u8>> = std::collections::HashSet::new();
    for key in keys_guard.iter() {
        unique_keys.insert(key.clone());
    }
    assert_eq!(
        unique_keys.len(),
        total_keys,
        "All generated keys should be unique (no RNG collision)"
    );
}

// ============================================================================
// Concurrent Sign/Verify Pipeline Tests
// ============================================================================

#[test]
fn test_concurrent_sign_verify_pipelines() {
    const NUM_THREADS: usize = 8;

    let success_count = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|i| {
            let success_count = Arc::clone(&success_count);
            thread::spawn(move || {
                let (pk, sk) = generate_keypair().expect("keypair generation should succeed");
                let message = format!("thread {} message", i);

                let signature = sign(&sk, message.as_bytes()).expect("signing should succeed");
                let is_valid = verify(&pk, message.as_bytes(), &signature)
                    .expect("verification should succeed");

                if is_valid {
                    success_count.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }

    assert_eq!(
        success_count.load(Ordering::SeqCst),
        NUM_THREADS,
        "Every thread's pipeline should sign and verify successfully"
    );
}

#[test]
fn test_cross_thread_signatures_do_not_cross_verify() {
    const NUM_THREADS: usize = 4;

    let results = Arc::new(std::sync::Mutex::new(Vec::new()));
    let message = b"shared message across threads";

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let results = Arc::clone(&results);
            thread::spawn(move || {
                let (pk, sk) = generate_keypair().expect("keypair generation should succeed");
                let signature = sign(&sk, message).expect("signing should succeed");

                let mut guard = results.lock().expect("mutex should not be poisoned");
                guard.push((pk, signature));
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }

    let guard = results.lock().expect("mutex should not be poisoned");
    for (i, (pk, _)) in guard.iter().enumerate() {
        for (j, (_, signature)) in guard.iter().enumerate() {
            let is_valid = verify(pk, message, signature).expect("verification should succeed");
            if i == j {
                assert!(is_valid, "Signature {} should verify under its own key", i);
            } else {
                assert!(
                    !is_valid,
                    "Signature {} should NOT verify under key {} from another thread",
                    j, i
                );
            }
        }
    }
}

// ============================================================================
// Seed Derivation Agreement Tests
// ============================================================================

#[test]
fn test_same_seed_agrees_across_threads() {
    const NUM_THREADS: usize = 8;
    const SEED: [u8; SEED_LEN] = [0x2Au8; SEED_LEN];

    let public_keys = Arc::new(std::sync::Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let public_keys = Arc::clone(&public_keys);
            thread::spawn(move || {
                let (pk, _sk) =
                    seed_keypair(&Seed::from_bytes(SEED)).expect("seeded keygen should succeed");

                let mut guard = public_keys.lock().expect("mutex should not be poisoned");
                guard.push(pk.as_bytes().to_vec());
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }

    let guard = public_keys.lock().expect("mutex should not be poisoned");
    assert_eq!(guard.len(), NUM_THREADS);
    let first = &guard[0];
    for pk in guard.iter() {
        assert_eq!(pk, first, "Every thread should derive the identical keypair from one seed");
    }
}

// ============================================================================
// Thread Safety with Shared Read Access
// ============================================================================

#[test]
fn test_shared_secret_key_concurrent_signing() {
    let (pk, sk) = generate_keypair().expect("keypair generation should succeed");

    const NUM_THREADS: usize = 8;
    let pk = Arc::new(pk);
    let sk = Arc::new(sk);
    let success_count = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|i| {
            let pk = Arc::clone(&pk);
            let sk = Arc::clone(&sk);
            let success_count = Arc::clone(&success_count);
            thread::spawn(move || {
                let message = format!("concurrent signer {}", i);
                let signature = sign(&sk, message.as_bytes()).expect("signing should succeed");
                let is_valid = verify(&pk, message.as_bytes(), &signature)
                    .expect("verification should succeed");

                if is_valid {
                    success_count.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }

    assert_eq!(
        success_count.load(Ordering::SeqCst),
        NUM_THREADS,
        "All concurrent signers sharing one key should produce valid signatures"
    );
}

#[test]
fn test_shared_public_key_concurrent_verification() {
    let (pk, sk) = generate_keypair().expect("keypair generation should succeed");
    let message = b"message verified by many threads";
    let signature = sign(&sk, message).expect("signing should succeed");

    const NUM_THREADS: usize = 8;
    let pk = Arc::new(pk);
    let signature = Arc::new(signature);
    let consistent_count = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let pk = Arc::clone(&pk);
            let signature = Arc::clone(&signature);
            let consistent_count = Arc::clone(&consistent_count);
            thread::spawn(move || {
                for _ in 0..4 {
                    let is_valid =
                        verify(&pk, message, &signature).expect("verification should succeed");
                    if is_valid {
                        consistent_count.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }

    assert_eq!(
        consistent_count.load(Ordering::SeqCst),
        NUM_THREADS * 4,
        "Every concurrent verification of the same signature should succeed"
    );
}
