//! Decryptable commitments via encrypt-then-MAC.
//!
//! A commitment to `plaintext` under `key` is
//!
//! ```text
//! len_be32 || (plaintext XOR pad) || tag
//! ```
//!
//! where `pad = prf_labeled(key, "PAD", len)`, the tag is HMAC-SHA256 under
//! `prf_labeled(key, "MAC", 32)` over `len_be32 || aad || ciphertext`, and
//! `aad` is associated data both parties must agree on byte-for-byte.
//! Opening verifies the tag in constant time before any plaintext is
//! touched; every malformation fails closed as [`CommitError::Authentication`].

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::{prf::prf_labeled, utils::xor};

type HmacSha256 = Hmac<Sha256>;

/// Width of the commitment MAC tag in bytes.
pub const TAG_LEN: usize = 32;

/// Width of the big-endian plaintext length prefix in bytes.
pub const LEN_PREFIX: usize = 4;

const PAD_LABEL: &[u8] = b"PAD";
const MAC_LABEL: &[u8] = b"MAC";

/// Commitment opening failure. Tamper, wrong key, wrong associated data and
/// malformed containers are deliberately indistinguishable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitError {
    /// The commitment failed authentication.
    #[error("commitment failed authentication")]
    Authentication,
}

/// Commits to `plaintext` under `key`, binding `aad`.
pub fn commit(plaintext: &[u8], key: &[u8], aad: &[u8]) -> Vec<u8> {
    let len = (plaintext.len() as u32).to_be_bytes();
    let pad = prf_labeled(key, PAD_LABEL, plaintext.len());
    let ciphertext = xor(plaintext, &pad);
    let tag = compute_tag(key, &len, aad, &ciphertext);

    let mut out = Vec::with_capacity(LEN_PREFIX + ciphertext.len() + TAG_LEN);
    out.extend_from_slice(&len);
    out.extend_from_slice(&ciphertext);
    out.extend_from_slice(&tag);
    out
}

/// Opens a commitment, returning the plaintext.
///
/// The tag is verified (in constant time) before any decryption; no partial
/// plaintext is ever exposed on failure.
pub fn open(commitment: &[u8], key: &[u8], aad: &[u8]) -> Result<Vec<u8>, CommitError> {
    if commitment.len() < LEN_PREFIX + TAG_LEN {
        return Err(CommitError::Authentication);
    }

    let (len_bytes, rest) = commitment.split_at(LEN_PREFIX);
    let declared = u32::from_be_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]);
    let declared = declared as usize;

    if rest.len() != declared + TAG_LEN {
        return Err(CommitError::Authentication);
    }
    let (ciphertext, tag) = rest.split_at(declared);

    let mac_key = prf_labeled(key, MAC_LABEL, TAG_LEN);
    let mut mac = HmacSha256::new_from_slice(&mac_key).expect("HMAC takes keys of any length");
    mac.update(len_bytes);
    mac.update(aad);
    mac.update(ciphertext);
    mac.verify_slice(tag)
        .map_err(|_| CommitError::Authentication)?;

    let pad = prf_labeled(key, PAD_LABEL, declared);
    Ok(xor(ciphertext, &pad))
}

fn compute_tag(key: &[u8], len: &[u8], aad: &[u8], ciphertext: &[u8]) -> Vec<u8> {
    let mac_key = prf_labeled(key, MAC_LABEL, TAG_LEN);
    let mut mac = HmacSha256::new_from_slice(&mac_key).expect("HMAC takes keys of any length");
    mac.update(len);
    mac.update(aad);
    mac.update(ciphertext);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_round_trip() {
        let commitment = commit(b"hello world", b"key", b"aad");

        assert_eq!(
            open(&commitment, b"key", b"aad").unwrap(),
            b"hello world".to_vec()
        );
    }

    #[test]
    fn test_commit_empty_plaintext() {
        let commitment = commit(b"", b"key", b"");

        assert_eq!(commitment.len(), LEN_PREFIX + TAG_LEN);
        assert_eq!(open(&commitment, b"key", b"").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_tamper_any_bit_rejected() {
        let commitment = commit(b"secret", b"key", b"");

        for byte in 0..commitment.len() {
            for bit in 0..8 {
                let mut tampered = commitment.clone();
                tampered[byte] ^= 1u8 << bit;

                assert_eq!(
                    open(&tampered, b"key", b""),
                    Err(CommitError::Authentication),
                    "flip of byte {byte} bit {bit} must be rejected",
                );
            }
        }
    }

    #[test]
    fn test_wrong_key_rejected() {
        let commitment = commit(b"secret", b"key", b"");

        assert_eq!(
            open(&commitment, b"other key", b""),
            Err(CommitError::Authentication)
        );
    }

    #[test]
    fn test_wrong_aad_rejected() {
        let commitment = commit(b"secret", b"key", b"cell(0,1)");

        assert_eq!(
            open(&commitment, b"key", b"cell(1,0)"),
            Err(CommitError::Authentication)
        );
        assert_eq!(
            open(&commitment, b"key", b""),
            Err(CommitError::Authentication)
        );
    }

    #[test]
    fn test_truncated_container_rejected() {
        let commitment = commit(b"secret", b"key", b"");

        for cut in 0..commitment.len() {
            assert_eq!(
                open(&commitment[..cut], b"key", b""),
                Err(CommitError::Authentication)
            );
        }
    }
}
