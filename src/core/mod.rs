//! Core engine types: seats, state, actions, RNG, configuration.
//!
//! Everything here is game-agnostic. Games plug in through the `Action`
//! trait and the opaque `ResourceId`/`AreaId` identifiers.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, PlayerMap, PlayerStatus};
pub use rng::{GameRng, GameRngState};
pub use config::{AreaId, GameConfig, ResourceId, RoundLimit};
pub use action::{Action, ActionRecord};
pub use state::{GameResult, GameState, GameStatus, ResourceKey};
