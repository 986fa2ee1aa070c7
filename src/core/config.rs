//! Game configuration types.
//!
//! Games configure the engine at startup by providing:
//! - the player count and first seat
//! - which turn-order shape they use (`TurnOrderKind`)
//! - whether the game is round-bounded (`RoundLimit`)
//! - the RNG seed
//!
//! Resource kinds and board areas are opaque identifiers the engine never
//! interprets; each game assigns them meaning.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::error::ConfigError;
use crate::turn::{TurnOrder, TurnOrderKind};

/// Resource kind identifier (grain, beer, silver, ...). Games define them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub u16);

impl ResourceId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Resource({})", self.0)
    }
}

/// Named area a resource can sit in (supply, storeroom, market, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AreaId(pub u16);

impl AreaId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Area({})", self.0)
    }
}

/// How many rounds a game may last.
///
/// Round-bounded games end on the round counter; unbounded games end only
/// when the rules set a terminal status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundLimit {
    #[default]
    Unbounded,
    Rounds(u32),
}

impl RoundLimit {
    /// The round count that ends the game, if any.
    #[must_use]
    pub const fn max_rounds(self) -> Option<u32> {
        match self {
            RoundLimit::Unbounded => None,
            RoundLimit::Rounds(n) => Some(n),
        }
    }

    /// Has `rounds_completed` reached the limit?
    #[must_use]
    pub const fn is_reached(self, rounds_completed: u32) -> bool {
        match self {
            RoundLimit::Unbounded => false,
            RoundLimit::Rounds(n) => rounds_completed >= n,
        }
    }
}

/// Complete game configuration.
///
/// ```
/// use tabletop::core::{GameConfig, RoundLimit};
/// use tabletop::turn::TurnOrderKind;
///
/// let config = GameConfig::new(4)
///     .with_turn_order(TurnOrderKind::Reactive)
///     .with_round_limit(RoundLimit::Rounds(10))
///     .with_seed(7);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.turn_order().player_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (1-255).
    pub player_count: usize,

    /// Turn-order shape.
    #[serde(default)]
    pub turn_order: TurnOrderKind,

    /// Round bound.
    #[serde(default)]
    pub round_limit: RoundLimit,

    /// Seat that opens the game.
    #[serde(default)]
    pub first_player: PlayerId,

    /// RNG seed.
    #[serde(default)]
    pub seed: u64,
}

impl GameConfig {
    /// Create a configuration with defaults: alternating turns, no round
    /// limit, seat 0 first, seed 0.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            turn_order: TurnOrderKind::default(),
            round_limit: RoundLimit::default(),
            first_player: PlayerId::default(),
            seed: 0,
        }
    }

    #[must_use]
    pub fn with_turn_order(mut self, kind: TurnOrderKind) -> Self {
        self.turn_order = kind;
        self
    }

    #[must_use]
    pub fn with_round_limit(mut self, limit: RoundLimit) -> Self {
        self.round_limit = limit;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration before building a game from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 || self.player_count > 255 {
            return Err(ConfigError::InvalidPlayerCount(self.player_count));
        }
        if self.first_player.index() >= self.player_count {
            return Err(ConfigError::InvalidFirstPlayer {
                first: self.first_player.0,
                player_count: self.player_count,
            });
        }
        if self.round_limit == RoundLimit::Rounds(0) {
            return Err(ConfigError::InvalidRoundLimit);
        }
        Ok(())
    }

    /// Build the configured turn order.
    ///
    /// Call [`validate`](Self::validate) first; the turn order assumes a
    /// valid seat layout.
    #[must_use]
    pub fn turn_order(&self) -> TurnOrder {
        TurnOrder::new(self.player_count, self.turn_order, self.round_limit)
            .with_first_player(self.first_player)
    }
}
