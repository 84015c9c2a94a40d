use crate::commitment::{FairCommitment, KEY_LEN};
use crate::{GameError, Result};
use rand::Rng;

/// The automated counterparty.
///
/// Holds at most one pending commitment at a time: `begin_exchange` creates
/// it and hands back the digest, `reveal` takes it out. A commitment can
/// therefore never be reused across exchanges or revealed twice.
pub struct Opponent {
    pending: Option<FairCommitment>,
}

impl Opponent {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn has_committed(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a fair exchange: generate a fresh commitment for `modulus` and
    /// return its digest for disclosure.
    pub fn begin_exchange(&mut self, modulus: u64) -> Result<[u8; 32]> {
        if self.pending.is_some() {
            return Err(GameError::InvalidState(
                "previous commitment not yet revealed".to_string(),
            ));
        }
        let commitment = FairCommitment::generate(modulus)?;
        let digest = *commitment.digest();
        self.pending = Some(commitment);
        tracing::debug!("opponent committed (modulus {})", modulus);
        Ok(digest)
    }

    /// Disclose the pending commitment's key and secret.
    pub fn reveal(&mut self) -> Result<([u8; KEY_LEN], u64)> {
        let commitment = self
            .pending
            .take()
            .ok_or_else(|| GameError::InvalidState("no pending commitment".to_string()))?;
        tracing::debug!("opponent revealed commitment");
        Ok(commitment.reveal())
    }

    /// Pick a die from the remaining pool, uniformly at random. Only the
    /// opponent controls this choice, so it needs no fairness exchange.
    pub fn pick_die(&self, pool: &[usize]) -> usize {
        pool[rand::thread_rng().gen_range(0..pool.len())]
    }
}

impl Default for Opponent {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Opponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Opponent")
            .field("has_commitment", &self.pending.is_some())
            .finish()
    }
}
