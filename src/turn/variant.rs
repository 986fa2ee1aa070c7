//! Turn-order shapes.
//!
//! The state machine in [`TurnOrder`](super::TurnOrder) is shared; the
//! variant carries only what differs between shapes:
//! - `Alternating`: strict rotation, one seat per turn, in a direction
//!   that rules may reverse
//! - `Reactive`: a turn can contain sub-steps, including reactions from
//!   other seats that temporarily take control

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Which turn-order shape a game uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOrderKind {
    #[default]
    Alternating,
    Reactive,
}

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Increasing seat index.
    #[default]
    Clockwise,
    /// Decreasing seat index.
    Anticlockwise,
}

impl Direction {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::Anticlockwise,
            Direction::Anticlockwise => Direction::Clockwise,
        }
    }

    /// Seat `steps` places away from `from`, wrapping around the table.
    #[must_use]
    pub fn step(self, from: PlayerId, steps: usize, player_count: usize) -> PlayerId {
        let steps = steps % player_count;
        let index = match self {
            Direction::Clockwise => (from.index() + steps) % player_count,
            Direction::Anticlockwise => (from.index() + player_count - steps) % player_count,
        };
        PlayerId::new(index as u8)
    }
}

/// Variant-specific turn-order data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnVariant {
    Alternating {
        direction: Direction,
    },
    Reactive {
        /// Sub-step within the current turn.
        turn_step: u32,
        /// Seats waiting to react, head first.
        reactions: VecDeque<PlayerId>,
    },
}

impl TurnVariant {
    /// Fresh variant data for a shape.
    #[must_use]
    pub fn new(kind: TurnOrderKind) -> Self {
        match kind {
            TurnOrderKind::Alternating => TurnVariant::Alternating {
                direction: Direction::Clockwise,
            },
            TurnOrderKind::Reactive => TurnVariant::Reactive {
                turn_step: 0,
                reactions: VecDeque::new(),
            },
        }
    }

    #[must_use]
    pub fn kind(&self) -> TurnOrderKind {
        match self {
            TurnVariant::Alternating { .. } => TurnOrderKind::Alternating,
            TurnVariant::Reactive { .. } => TurnOrderKind::Reactive,
        }
    }

    /// Current direction of play. Reactive rotation is always clockwise.
    #[must_use]
    pub fn direction(&self) -> Direction {
        match self {
            TurnVariant::Alternating { direction } => *direction,
            TurnVariant::Reactive { .. } => Direction::Clockwise,
        }
    }

    /// Sub-step within the current turn; always 0 for alternating play.
    #[must_use]
    pub fn turn_step(&self) -> u32 {
        match self {
            TurnVariant::Alternating { .. } => 0,
            TurnVariant::Reactive { turn_step, .. } => *turn_step,
        }
    }

    /// Seat currently reacting, if any.
    #[must_use]
    pub fn reacting_player(&self) -> Option<PlayerId> {
        match self {
            TurnVariant::Alternating { .. } => None,
            TurnVariant::Reactive { reactions, .. } => reactions.front().copied(),
        }
    }

    /// Clear per-turn data at a turn or round boundary.
    pub(crate) fn end_turn(&mut self) {
        if let TurnVariant::Reactive { turn_step, reactions } = self {
            *turn_step = 0;
            reactions.clear();
        }
    }

    /// Back to the initial values for this shape.
    pub(crate) fn reset(&mut self) {
        *self = TurnVariant::new(self.kind());
    }
}
