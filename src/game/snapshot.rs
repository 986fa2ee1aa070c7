//! Game snapshots.
//!
//! A `Snapshot` holds everything needed to continue a game: the state
//! (including the RNG position) and the turn order. It is a plain value;
//! `to_bytes`/`from_bytes` give a compact binary form for storage.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameState};
use crate::error::{ConfigError, SnapshotError};
use crate::turn::TurnOrder;

/// Captured game position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub turns: TurnOrder,
}

impl Snapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Check the snapshot belongs to a game set up with `config` and that
    /// its turn order agrees with its state.
    pub fn validate(&self, config: &GameConfig) -> Result<(), ConfigError> {
        let mismatch = |what: String| Err(ConfigError::SnapshotMismatch(what));
        let players = config.player_count;

        if self.state.player_count() != players || self.state.seat_count() != players {
            return mismatch(format!("state has {} seats, game has {players}", self.state.player_count()));
        }
        if self.turns.player_count() != players {
            return mismatch(format!("turn order has {} seats, game has {players}", self.turns.player_count()));
        }
        if self.turns.kind() != config.turn_order || self.turns.round_limit() != config.round_limit {
            return mismatch("turn order shape or round limit differs".to_string());
        }
        if self.turns.turn_counter() as usize >= players || self.turns.turn_owner().index() >= players {
            return mismatch("turn counters out of range".to_string());
        }
        if let Some(max) = self.turns.round_limit().max_rounds() {
            if self.turns.round_counter() > max {
                return mismatch(format!("round {} past limit {max}", self.turns.round_counter()));
            }
        }
        if self.turns.pending_reactions().iter().any(|p| p.index() >= players) {
            return mismatch("reaction queue names an unknown seat".to_string());
        }
        Ok(())
    }
}
