//! The action contract.
//!
//! Actions are game-specific. The engine only needs three things from
//! them:
//! - they can be executed against a `GameState` on behalf of a seat,
//!   reporting success
//! - they compare and hash by their declared effect, so search agents can
//!   deduplicate transpositions
//! - they can be cloned into history and into copied games
//!
//! Games usually model their actions as a plain enum deriving `Eq` and
//! `Hash`; two actions with the same effect are then the same action.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::GameState;

/// A game-specific operation on `GameState`.
pub trait Action: Clone + Eq + Hash + Debug + Display {
    /// Apply the action for `player`.
    ///
    /// Returns false when the action could not be carried out. A failed
    /// action must leave the state unchanged.
    fn execute(&self, state: &mut GameState, player: PlayerId) -> bool;
}

/// An executed action with the turn position it happened at.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRecord<A> {
    /// Seat that acted.
    pub player: PlayerId,

    /// The action.
    pub action: A,

    /// Rounds completed when the action was taken.
    pub round: u32,

    /// Turns completed within that round.
    pub turn: u32,
}

impl<A> ActionRecord<A> {
    #[must_use]
    pub fn new(player: PlayerId, action: A, round: u32, turn: u32) -> Self {
        Self { player, action, round, turn }
    }
}
