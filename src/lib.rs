//! # tabletop
//!
//! A multi-game tabletop simulation engine. Each game plugs in its own
//! rules (actions, content, win conditions) on top of a shared turn-order
//! state machine and game state.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The engine never interprets resources, areas, or
//!    actions. Games assign them meaning.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    Seats can be skipped or eliminated; turn order steps over them.
//!
//! 3. **Cheap Copies**: State uses persistent structures (`im`), so search
//!    agents can copy a game per rollout and run copies in parallel.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, game state, the `Action` contract
//! - `turn`: Turn order: counters, rounds, game end, per-game variants
//! - `rules`: `Rules` trait for game implementations
//! - `game`: `Game` outer loop and snapshots
//! - `content`: JSON content loading into immutable catalogs
//! - `games`: Game implementations
//! - `error`: Error types

pub mod core;
pub mod turn;
pub mod rules;
pub mod game;
pub mod content;
pub mod games;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, PlayerStatus,
    GameRng, GameRngState,
    AreaId, ResourceId, RoundLimit, GameConfig,
    Action, ActionRecord,
    GameResult, GameState, GameStatus, ResourceKey,
};

pub use crate::turn::{Direction, Transition, TurnOrder, TurnOrderKind, TurnVariant};

pub use crate::rules::Rules;

pub use crate::game::{Game, Snapshot};

pub use crate::content::{
    Catalog, ContentLoader, LoadPolicy, LoadReport, LoaderConfig,
    Deck, GraphBoard, GridBoard, MonsterDefinition, Quest, Token,
};

pub use crate::error::{ConfigError, LoadError, SnapshotError};
