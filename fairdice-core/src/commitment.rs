//! HMAC commitment scheme for the fair random protocol.
//!
//! One exchange: the opponent commits to a secret value by disclosing
//! `HMAC-SHA256(key, secret)`, the user contributes their own number while
//! knowing only the digest, the opponent then reveals `(key, secret)`, and
//! both sides combine `(secret + contribution) % modulus`. The digest binds
//! the opponent to its secret; the modular sum makes the result uniform for
//! any fixed user contribution.

use crate::{GameError, Result};
use hmac::{Hmac, Mac};
use rand::{Rng, RngCore};
use serde::Serialize;
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Size of the commitment key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// One side of a single fair exchange: a secret value drawn uniformly from
/// `[0, modulus)`, a fresh 256-bit key, and the binding digest.
#[derive(Clone, Serialize)]
pub struct FairCommitment {
    #[serde(skip)]
    secret: u64,
    #[serde(skip)]
    key: [u8; KEY_LEN],
    digest: [u8; 32],
    modulus: u64,
}

impl FairCommitment {
    /// Draw a fresh secret and key and compute the binding digest.
    ///
    /// `thread_rng` is a CSPRNG; there is no statistical-PRNG fallback.
    pub fn generate(modulus: u64) -> Result<Self> {
        if modulus == 0 {
            return Err(GameError::ZeroModulus);
        }
        let mut rng = rand::thread_rng();
        let secret = rng.gen_range(0..modulus);
        let mut key = [0u8; KEY_LEN];
        rng.fill_bytes(&mut key);
        let digest = digest_for(&key, secret);
        Ok(Self {
            secret,
            key,
            digest,
            modulus,
        })
    }

    /// The binding value disclosed before the counterparty contributes.
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Disclose the key and secret. Consumes the commitment so it can never
    /// be revealed twice or reused for another exchange.
    pub fn reveal(self) -> ([u8; KEY_LEN], u64) {
        (self.key, self.secret)
    }
}

impl fmt::Debug for FairCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never leak key or secret through Debug
        f.debug_struct("FairCommitment")
            .field("digest", &hex::encode(&self.digest[..8]))
            .field("modulus", &self.modulus)
            .finish()
    }
}

/// Compute `HMAC-SHA256(key, secret.to_be_bytes())`.
pub fn digest_for(key: &[u8; KEY_LEN], secret: u64) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(&secret.to_be_bytes());
    mac.finalize().into_bytes().into()
}

/// Check a revealed `(key, secret)` pair against a previously disclosed
/// digest. Constant-time comparison via the Mac verifier.
pub fn verify(key: &[u8; KEY_LEN], secret: u64, digest: &[u8; 32]) -> bool {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(&secret.to_be_bytes());
    mac.verify_slice(digest).is_ok()
}

/// Fold the two contributions into the final unbiased value.
///
/// For a fixed `contribution`, this maps the uniform `secret` bijectively
/// onto `[0, modulus)`, so neither side can steer the result.
pub fn combine(secret: u64, contribution: u64, modulus: u64) -> u64 {
    (secret % modulus + contribution % modulus) % modulus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_commitment_verifies() {
        let commitment = FairCommitment::generate(6).unwrap();
        let digest = *commitment.digest();
        let (key, secret) = commitment.reveal();

        assert!(secret < 6);
        assert!(verify(&key, secret, &digest));
    }

    #[test]
    fn test_altered_secret_fails_verification() {
        let commitment = FairCommitment::generate(6).unwrap();
        let digest = *commitment.digest();
        let (key, secret) = commitment.reveal();

        assert!(!verify(&key, (secret + 1) % 6, &digest));
    }

    #[test]
    fn test_altered_key_fails_verification() {
        let commitment = FairCommitment::generate(6).unwrap();
        let digest = *commitment.digest();
        let (mut key, secret) = commitment.reveal();
        key[0] ^= 0x01;

        assert!(!verify(&key, secret, &digest));
    }

    #[test]
    fn test_altered_digest_fails_verification() {
        let commitment = FairCommitment::generate(6).unwrap();
        let mut digest = *commitment.digest();
        digest[31] ^= 0x80;
        let (key, secret) = commitment.reveal();

        assert!(!verify(&key, secret, &digest));
    }

    #[test]
    fn test_fresh_keys_per_commitment() {
        let a = FairCommitment::generate(2).unwrap();
        let b = FairCommitment::generate(2).unwrap();
        // 256-bit keys never collide in practice
        assert_ne!(a.reveal().0, b.reveal().0);
    }

    #[test]
    fn test_zero_modulus_rejected() {
        assert!(matches!(
            FairCommitment::generate(0),
            Err(GameError::ZeroModulus)
        ));
    }

    #[test]
    fn test_combine_matches_protocol_example() {
        // opponent committed 4, user chose 2, six faces: index 0
        assert_eq!(combine(4, 2, 6), 0);
    }

    #[test]
    fn test_combine_is_bijective_in_secret() {
        // for any fixed user contribution, each residue is hit exactly once
        for modulus in [2u64, 5, 6, 9] {
            for contribution in 0..modulus {
                let mut seen = vec![false; modulus as usize];
                for secret in 0..modulus {
                    let result = combine(secret, contribution, modulus);
                    assert!(!seen[result as usize]);
                    seen[result as usize] = true;
                }
                assert!(seen.iter().all(|&hit| hit));
            }
        }
    }

    #[test]
    fn test_digest_binds_before_contribution() {
        // the digest computed at commit time is exactly what the revealed
        // pair reproduces, independent of anything chosen later
        let commitment = FairCommitment::generate(100).unwrap();
        let digest = *commitment.digest();
        let (key, secret) = commitment.reveal();
        assert_eq!(digest_for(&key, secret), digest);
    }
}
