//! Rules trait for game implementations.
//!
//! Games implement `Rules` to define:
//! - the starting state
//! - which actions the acting seat may take
//! - what happens after an action: whether the turn is over, whether
//!   someone has won

use crate::core::{Action, GameConfig, GameState, PlayerId};
use crate::turn::TurnOrder;

/// Per-game forward model.
///
/// The engine calls these methods from the game loop and from copies made
/// by search agents, so every method must be deterministic given the
/// state (randomness comes from `state.rng`).
///
/// ## Implementation Notes
///
/// - `legal_actions`: return empty when the acting seat cannot act
/// - `after_action`: the only place turns end; call
///   `turns.end_player_turn(state)` when the turn is complete, and
///   `state.end_game(..)` on victory
pub trait Rules {
    /// The game's action type.
    type Action: Action;

    /// Initialise a fresh state: starting resources, seat statuses.
    fn setup(&self, config: &GameConfig, state: &mut GameState);

    /// Actions the current player may take.
    fn legal_actions(&self, state: &GameState, turns: &TurnOrder) -> Vec<Self::Action>;

    /// Called after `action` executed successfully for `player`.
    fn after_action(
        &self,
        state: &mut GameState,
        turns: &mut TurnOrder,
        player: PlayerId,
        action: &Self::Action,
    );

    /// Is `action` currently legal?
    ///
    /// Default implementation searches `legal_actions`.
    fn is_legal(&self, state: &GameState, turns: &TurnOrder, action: &Self::Action) -> bool {
        self.legal_actions(state, turns).contains(action)
    }
}
