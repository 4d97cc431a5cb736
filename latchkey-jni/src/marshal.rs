//! Buffer marshaling between pinned JVM arrays and the typed facade.
//!
//! Everything here operates on plain byte slices so it can be unit tested
//! without a JVM. The JNI exports in the crate root pin the Java arrays,
//! view them as slices, and delegate to these functions.

use latchkey_core::{PublicKey, SecretKey, Signature, PUBLIC_KEY_LEN, SECRET_KEY_LEN, SIGNATURE_LEN};

/// Generates a keypair into caller-provided output buffers.
///
/// Both buffers must be exactly the serialized key lengths; the managed
/// caller allocates them from the published constants. Returns `false`
/// without touching either buffer when a length is wrong or the primitive
/// fails, `true` when both keys have been written.
pub(crate) fn generate_into(pk_out: &mut [u8], sk_out: &mut [u8]) -> bool {
    if pk_out.len() != PUBLIC_KEY_LEN || sk_out.len() != SECRET_KEY_LEN {
        return false;
    }
    match latchkey_core::generate_keypair() {
        Ok((pk, sk)) => {
            pk_out.copy_from_slice(pk.as_bytes());
            sk_out.copy_from_slice(sk.as_bytes());
            true
        }
        Err(_) => false,
    }
}

/// Signs `message` with the serialized secret key in `sk`.
///
/// Writes the signature into the front of `sig_out` and returns the
/// signature length, or `-1` when the key has the wrong length, the
/// output buffer is too small, or signing fails. On `-1` the output
/// buffer is untouched.
pub(crate) fn sign_into(message: &[u8], sk: &[u8], sig_out: &mut [u8]) -> i32 {
    let secret_key = match SecretKey::try_from(sk) {
        Ok(secret_key) => secret_key,
        Err(_) => return -1,
    };
    if sig_out.len() < SIGNATURE_LEN {
        return -1;
    }
    match latchkey_core::sign(&secret_key, message) {
        Ok(signature) => {
            sig_out[..SIGNATURE_LEN].copy_from_slice(signature.as_bytes());
            SIGNATURE_LEN as i32
        }
        Err(_) => -1,
    }
}

/// Verifies the serialized signature `sig` over `msg` under `pk`.
///
/// Returns `0` for a valid signature and `-1` for everything else:
/// wrong-length signature or key, undecodable key, or honest mismatch.
pub(crate) fn verify_parts(sig: &[u8], msg: &[u8], pk: &[u8]) -> i32 {
    let signature = match Signature::try_from(sig) {
        Ok(signature) => signature,
        Err(_) => return -1,
    };
    let public_key = match PublicKey::try_from(pk) {
        Ok(public_key) => public_key,
        Err(_) => return -1,
    };
    match latchkey_core::verify(&public_key, msg, &signature) {
        Ok(true) => 0,
        _ => -1,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_into_fills_both_buffers() {
        let mut pk = vec![0u8; PUBLIC_KEY_LEN];
        let mut sk = vec![0u8; SECRET_KEY_LEN];

        assert!(generate_into(&mut pk, &mut sk), "generation should succeed");
        assert!(!pk.iter().all(|&b| b == 0), "public key buffer should be written");
        assert!(!sk.iter().all(|&b| b == 0), "secret key buffer should be written");
    }

    #[test]
    fn test_generate_into_rejects_wrong_buffer_lengths() {
        let mut pk_short = vec![0u8; PUBLIC_KEY_LEN - 1];
        let mut sk = vec![0u8; SECRET_KEY_LEN];
        assert!(!generate_into(&mut pk_short, &mut sk));

        let mut pk = vec![0u8; PUBLIC_KEY_LEN];
        let mut sk_long = vec![0u8; SECRET_KEY_LEN + 1];
        assert!(!generate_into(&mut pk, &mut sk_long));
    }

    #[test]
    fn test_sign_into_then_verify_parts_roundtrip() {
        let mut pk = vec![0u8; PUBLIC_KEY_LEN];
        let mut sk = vec![0u8; SECRET_KEY_LEN];
        assert!(generate_into(&mut pk, &mut sk));

        let message = b"marshal roundtrip message";
        let mut sig = vec![0u8; SIGNATURE_LEN];

        let written = sign_into(message, &sk, &mut sig);
        assert_eq!(written, SIGNATURE_LEN as i32, "signing should report the signature length");

        assert_eq!(verify_parts(&sig, message, &pk), 0, "signature should verify");
        assert_eq!(verify_parts(&sig, b"different message", &pk), -1);
    }

    #[test]
    fn test_sign_into_rejects_wrong_secret_key_length() {
        let sk = vec![0u8; SECRET_KEY_LEN - 1];
        let mut sig = vec![0u8; SIGNATURE_LEN];

        assert_eq!(sign_into(b"message", &sk, &mut sig), -1);
        assert!(sig.iter().all(|&b| b == 0), "output buffer should be untouched on failure");
    }

    #[test]
    fn test_sign_into_rejects_short_output_buffer() {
        let mut pk = vec![0u8; PUBLIC_KEY_LEN];
        let mut sk = vec![0u8; SECRET_KEY_LEN];
        assert!(generate_into(&mut pk, &mut sk));

        let mut sig_short = vec![0u8; SIGNATURE_LEN - 1];
        assert_eq!(sign_into(b"message", &sk, &mut sig_short), -1);
    }

    #[test]
    fn test_sign_into_zeroed_key_signature_does_not_verify() {
        // Key content is not validated beyond its length: an all-zero
        // secret key signs. The output must not verify under an honest key.
        let mut pk = vec![0u8; PUBLIC_KEY_LEN];
        let mut sk = vec![0u8; SECRET_KEY_LEN];
        assert!(generate_into(&mut pk, &mut sk));

        let zeroed_sk = vec![0u8; SECRET_KEY_LEN];
        let mut sig = vec![0u8; SIGNATURE_LEN];
        assert_eq!(sign_into(b"message", &zeroed_sk, &mut sig), SIGNATURE_LEN as i32);

        assert_eq!(verify_parts(&sig, b"message", &pk), -1);
    }

    #[test]
    fn test_verify_parts_rejects_wrong_lengths() {
        let mut pk = vec![0u8; PUBLIC_KEY_LEN];
        let mut sk = vec![0u8; SECRET_KEY_LEN];
        assert!(generate_into(&mut pk, &mut sk));

        let message = b"length checks";
        let mut sig = vec![0u8; SIGNATURE_LEN];
        assert_eq!(sign_into(message, &sk, &mut sig), SIGNATURE_LEN as i32);

        assert_eq!(verify_parts(&sig[..SIGNATURE_LEN - 1], message, &pk), -1);
        assert_eq!(verify_parts(&sig, message, &pk[..PUBLIC_KEY_LEN - 1]), -1);
        assert_eq!(verify_parts(&[], message, &pk), -1);
    }

    #[test]
    fn test_verify_parts_rejects_tampered_signature() {
        let mut pk = vec![0u8; PUBLIC_KEY_LEN];
        let mut sk = vec![0u8; SECRET_KEY_LEN];
        assert!(generate_into(&mut pk, &mut sk));

        let message = b"tamper detection";
        let mut sig = vec![0u8; SIGNATURE_LEN];
        assert_eq!(sign_into(message, &sk, &mut sig), SIGNATURE_LEN as i32);

        sig[0] ^= 0x01;
        assert_eq!(verify_parts(&sig, message, &pk), -1);
    }

    #[test]
    fn test_empty_message_signs_and_verifies() {
        let mut pk = vec![0u8; PUBLIC_KEY_LEN];
        let mut sk = vec![0u8; SECRET_KEY_LEN];
        assert!(generate_into(&mut pk, &mut sk));

        let mut sig = vec![0u8; SIGNATURE_LEN];
        assert_eq!(sign_into(b"", &sk, &mut sig), SIGNATURE_LEN as i32);
        assert_eq!(verify_parts(&sig, b"", &pk), 0);
    }
}
