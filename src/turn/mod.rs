//! Turn management: whose turn it is, and how turns compose into rounds.
//!
//! ## Key Types
//!
//! - `TurnOrder`: counters plus the shared state machine
//! - `TurnVariant`: per-shape data (`Alternating` direction, `Reactive`
//!   sub-steps and reaction queue)
//! - `Transition`: what an `end_player_turn`/`end_round` call did
//!
//! ## Usage
//!
//! The outer loop asks `current_player()` who acts, applies an action to
//! the `GameState`, then calls `end_player_turn` when the rules say the
//! turn is over. Eligibility of seats and the ongoing/ended status are
//! read from the `GameState` on every transition.

pub mod order;
pub mod variant;

pub use order::{Transition, TurnOrder};
pub use variant::{Direction, TurnOrderKind, TurnVariant};
