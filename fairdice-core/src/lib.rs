//! Provably fair non-transitive dice game.
//!
//! The opponent commits to every random value with an HMAC digest before the
//! user contributes their own number, so neither side can bias an outcome
//! after the fact. Modular addition of the two contributions yields the
//! final value; the revealed key and secret let the user verify the digest.

pub mod commitment;
pub mod dice;
pub mod error;
pub mod game;
pub mod opponent;
pub mod probability;

pub use commitment::{combine, digest_for, verify, FairCommitment};
pub use dice::Die;
pub use error::{GameError, Result};
pub use game::{compare_faces, GameIo, GameOutcome, GameSession, GameState, Player};
pub use opponent::Opponent;
pub use probability::{win_matrix, win_probability};
