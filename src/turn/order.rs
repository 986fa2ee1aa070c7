//! The turn-order state machine.
//!
//! Two nested counters drive it:
//!
//! ```text
//! Turn(i) --end_player_turn--> Turn(next eligible)      while turns < player_count
//! Turn(last) --end_player_turn--> end_round --> Turn(next eligible), round + 1
//! end_round [bounded, limit reached] --> game ended (RoundLimitReached)
//! any --[status not ongoing]--> frozen: every transition is a no-op
//! ```
//!
//! Unbounded games never end on the counters; only the rules end them by
//! setting the game status.

use serde::{Deserialize, Serialize};

use super::variant::{Direction, TurnOrderKind, TurnVariant};
use crate::core::{GameResult, GameState, PlayerId, RoundLimit};

/// What a transition did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The game had already ended; nothing changed.
    Ignored,
    /// The turn passed to another seat within the same round.
    NextPlayer(PlayerId),
    /// A round completed and `next` opens the following one.
    RoundEnded { round: u32, next: PlayerId },
    /// A round completed and the round limit ended the game.
    GameEnded { round: u32 },
}

/// Whose turn it is, how many turns and rounds have passed, and how the
/// next seat is chosen.
///
/// One instance per game. Copies are fully independent values, so search
/// agents can advance a copy freely.
///
/// ```
/// use tabletop::core::{GameState, PlayerId, RoundLimit};
/// use tabletop::turn::{TurnOrder, TurnOrderKind, Transition};
///
/// let mut state = GameState::new(3, 0);
/// let mut turns = TurnOrder::new(3, TurnOrderKind::Alternating, RoundLimit::Unbounded);
///
/// turns.end_player_turn(&mut state);
/// turns.end_player_turn(&mut state);
/// let t = turns.end_player_turn(&mut state);
///
/// assert_eq!(t, Transition::RoundEnded { round: 1, next: PlayerId::new(0) });
/// assert_eq!(turns.turn_counter(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnOrder {
    // === Configuration ===
    player_count: usize,
    round_limit: RoundLimit,
    first_player: PlayerId,

    // === Counters ===
    turn_counter: u32,
    round_counter: u32,
    turn_owner: PlayerId,

    variant: TurnVariant,
}

impl TurnOrder {
    /// Create a turn order with seat 0 opening the game.
    #[must_use]
    pub fn new(player_count: usize, kind: TurnOrderKind, round_limit: RoundLimit) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            round_limit,
            first_player: PlayerId::new(0),
            turn_counter: 0,
            round_counter: 0,
            turn_owner: PlayerId::new(0),
            variant: TurnVariant::new(kind),
        }
    }

    /// Open the game with a different seat.
    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        assert!(player.index() < self.player_count, "First player must be a seat");
        self.first_player = player;
        self.turn_owner = player;
        self
    }

    // === Queries ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn round_limit(&self) -> RoundLimit {
        self.round_limit
    }

    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    /// Turns completed in the current round.
    #[must_use]
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    /// Rounds completed.
    #[must_use]
    pub fn round_counter(&self) -> u32 {
        self.round_counter
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn turn_owner(&self) -> PlayerId {
        self.turn_owner
    }

    /// Seat that acts now: a reacting seat if one holds control, otherwise
    /// the turn owner.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.variant.reacting_player().unwrap_or(self.turn_owner)
    }

    /// Sub-step within the current turn (0 for alternating play).
    #[must_use]
    pub fn turn_step(&self) -> u32 {
        self.variant.turn_step()
    }

    #[must_use]
    pub fn kind(&self) -> TurnOrderKind {
        self.variant.kind()
    }

    #[must_use]
    pub fn variant(&self) -> &TurnVariant {
        &self.variant
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.variant.direction()
    }

    /// Next eligible seat after the turn owner in the direction of play.
    ///
    /// Wraps around the table and may return the turn owner itself when it
    /// is the only eligible seat. Returns `None` when no seat is eligible;
    /// the rules should have ended the game before that happens.
    #[must_use]
    pub fn next_player(&self, state: &GameState) -> Option<PlayerId> {
        let direction = self.direction();
        (1..=self.player_count)
            .map(|steps| direction.step(self.turn_owner, steps, self.player_count))
            .find(|&seat| state.is_eligible(seat))
    }

    // === Transitions ===

    /// Put the turn owner on the first eligible seat at or after the
    /// first player. Call once the rules have set up seat statuses.
    pub fn start(&mut self, state: &GameState) {
        let direction = self.direction();
        let first = (0..self.player_count)
            .map(|steps| direction.step(self.first_player, steps, self.player_count))
            .find(|&seat| state.is_eligible(seat));

        match first {
            Some(seat) => self.turn_owner = seat,
            None => tracing::warn!("no eligible seat to open the game"),
        }
    }

    /// Finish the turn owner's turn.
    ///
    /// Call after the action has fully applied its effects. Does nothing
    /// once the game has ended.
    pub fn end_player_turn(&mut self, state: &mut GameState) -> Transition {
        if !state.is_ongoing() {
            return Transition::Ignored;
        }

        self.turn_counter += 1;
        if self.turn_counter as usize >= self.player_count {
            return self.end_round(state);
        }

        self.variant.end_turn();
        self.move_to_next_player(state);
        tracing::trace!(
            player = %self.turn_owner,
            turn = self.turn_counter,
            round = self.round_counter,
            "turn passed"
        );
        Transition::NextPlayer(self.turn_owner)
    }

    /// Finish the round.
    ///
    /// A round-bounded game that reaches its limit ends with
    /// `GameResult::RoundLimitReached` and the turn owner stays put.
    /// Does nothing once the game has ended.
    pub fn end_round(&mut self, state: &mut GameState) -> Transition {
        if !state.is_ongoing() {
            return Transition::Ignored;
        }

        self.round_counter += 1;
        self.turn_counter = 0;
        self.variant.end_turn();

        if self.round_limit.is_reached(self.round_counter) {
            tracing::debug!(round = self.round_counter, "round limit reached");
            state.end_game(GameResult::RoundLimitReached);
            return Transition::GameEnded { round: self.round_counter };
        }

        self.move_to_next_player(state);
        tracing::debug!(round = self.round_counter, next = %self.turn_owner, "round ended");
        Transition::RoundEnded {
            round: self.round_counter,
            next: self.turn_owner,
        }
    }

    fn move_to_next_player(&mut self, state: &GameState) {
        match self.next_player(state) {
            Some(next) => self.turn_owner = next,
            None => tracing::warn!(owner = %self.turn_owner, "no eligible seat to pass the turn to"),
        }
    }

    // === Variant operations ===

    /// Reverse the direction of play. Only alternating play has a direction;
    /// returns false for other shapes.
    pub fn reverse(&mut self) -> bool {
        match &mut self.variant {
            TurnVariant::Alternating { direction } => {
                *direction = direction.reversed();
                true
            }
            TurnVariant::Reactive { .. } => false,
        }
    }

    /// Advance to the next sub-step of the current turn.
    /// Only reactive play has sub-steps; returns false for other shapes.
    pub fn advance_step(&mut self) -> bool {
        match &mut self.variant {
            TurnVariant::Reactive { turn_step, .. } => {
                *turn_step += 1;
                true
            }
            TurnVariant::Alternating { .. } => false,
        }
    }

    /// Queue `player` to react before control returns to the turn owner.
    /// Returns false for shapes without reactions.
    pub fn add_reaction(&mut self, player: PlayerId) -> bool {
        match &mut self.variant {
            TurnVariant::Reactive { reactions, .. } => {
                reactions.push_back(player);
                true
            }
            TurnVariant::Alternating { .. } => false,
        }
    }

    /// Seats still waiting to react, head first.
    #[must_use]
    pub fn pending_reactions(&self) -> Vec<PlayerId> {
        match &self.variant {
            TurnVariant::Reactive { reactions, .. } => reactions.iter().copied().collect(),
            TurnVariant::Alternating { .. } => Vec::new(),
        }
    }

    /// The reacting seat has finished: pop it and advance the sub-step.
    ///
    /// Returns the seat that finished reacting, or `None` when nobody was
    /// reacting or the game has ended.
    pub fn end_reaction(&mut self, state: &GameState) -> Option<PlayerId> {
        if !state.is_ongoing() {
            return None;
        }
        match &mut self.variant {
            TurnVariant::Reactive { turn_step, reactions } => {
                let reacted = reactions.pop_front()?;
                *turn_step += 1;
                Some(reacted)
            }
            TurnVariant::Alternating { .. } => None,
        }
    }

    // === Lifecycle ===

    /// Return to the initial counters. Configuration is kept.
    ///
    /// The owner is placed as `start` would place it, so an ineligible
    /// first player is stepped over.
    pub fn reset(&mut self, state: &GameState) {
        self.turn_counter = 0;
        self.round_counter = 0;
        self.turn_owner = self.first_player;
        self.variant.reset();
        self.start(state);
    }

    /// Independent copy with identical counters and configuration.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    fn alternating(n: usize) -> TurnOrder {
        TurnOrder::new(n, TurnOrderKind::Alternating, RoundLimit::Unbounded)
    }

    fn reactive(n: usize) -> TurnOrder {
        TurnOrder::new(n, TurnOrderKind::Reactive, RoundLimit::Unbounded)
    }

    #[test]
    fn test_initial_state() {
        let turns = alternating(4);

        assert_eq!(turns.turn_counter(), 0);
        assert_eq!(turns.round_counter(), 0);
        assert_eq!(turns.turn_owner(), p(0));
        assert_eq!(turns.current_player(), p(0));
        assert_eq!(turns.turn_step(), 0);
    }

    #[test]
    fn test_three_players_complete_a_round() {
        let mut state = GameState::new(3, 0);
        let mut turns = alternating(3);

        assert_eq!(turns.end_player_turn(&mut state), Transition::NextPlayer(p(1)));
        assert_eq!(turns.end_player_turn(&mut state), Transition::NextPlayer(p(2)));
        assert_eq!(
            turns.end_player_turn(&mut state),
            Transition::RoundEnded { round: 1, next: p(0) }
        );

        assert_eq!(turns.round_counter(), 1);
        assert_eq!(turns.turn_counter(), 0);
        assert_eq!(turns.turn_owner(), p(0));
    }

    #[test]
    fn test_single_player_every_turn_is_a_round() {
        let mut state = GameState::new(1, 0);
        let mut turns = alternating(1);

        for round in 1..=3 {
            assert_eq!(
                turns.end_player_turn(&mut state),
                Transition::RoundEnded { round, next: p(0) }
            );
        }
    }

    #[test]
    fn test_skips_ineligible_seats() {
        let mut state = GameState::new(4, 0);
        state.eliminate(p(1));
        state.skip(p(2));
        let mut turns = alternating(4);

        assert_eq!(turns.next_player(&state), Some(p(3)));
        turns.end_player_turn(&mut state);
        assert_eq!(turns.turn_owner(), p(3));

        turns.end_player_turn(&mut state);
        assert_eq!(turns.turn_owner(), p(0));
    }

    #[test]
    fn test_next_player_is_pure() {
        let state = GameState::new(3, 0);
        let turns = alternating(3);
        let before = turns.copy();

        assert_eq!(turns.next_player(&state), Some(p(1)));
        assert_eq!(turns, before);
    }

    #[test]
    fn test_next_player_only_self_eligible() {
        let mut state = GameState::new(3, 0);
        state.eliminate(p(1));
        state.eliminate(p(2));
        let turns = alternating(3);

        assert_eq!(turns.next_player(&state), Some(p(0)));
    }

    #[test]
    fn test_no_eligible_seat_keeps_owner() {
        let mut state = GameState::new(2, 0);
        state.eliminate(p(0));
        state.eliminate(p(1));
        let mut turns = alternating(2);

        assert_eq!(turns.next_player(&state), None);
        assert_eq!(turns.end_player_turn(&mut state), Transition::NextPlayer(p(0)));
        assert_eq!(turns.turn_owner(), p(0));
    }

    #[test]
    fn test_frozen_after_game_end() {
        let mut state = GameState::new(3, 0);
        let mut turns = reactive(3);
        turns.end_player_turn(&mut state);
        turns.advance_step();
        state.end_game(GameResult::Winner(p(1)));
        let before = turns.copy();

        for _ in 0..5 {
            assert_eq!(turns.end_player_turn(&mut state), Transition::Ignored);
            assert_eq!(turns.end_round(&mut state), Transition::Ignored);
        }

        assert_eq!(turns, before);
        assert_eq!(state.result(), Some(&GameResult::Winner(p(1))));
    }

    #[test]
    fn test_bounded_game_ends_on_limit() {
        let mut state = GameState::new(2, 0);
        let mut turns = TurnOrder::new(2, TurnOrderKind::Alternating, RoundLimit::Rounds(2));

        for _ in 0..3 {
            turns.end_player_turn(&mut state);
        }
        assert!(state.is_ongoing());
        assert_eq!(turns.turn_owner(), p(1));

        assert_eq!(turns.end_player_turn(&mut state), Transition::GameEnded { round: 2 });
        assert_eq!(state.result(), Some(&GameResult::RoundLimitReached));
        assert_eq!(turns.round_counter(), 2);
        assert_eq!(turns.turn_counter(), 0);
        assert_eq!(turns.turn_owner(), p(1));
    }

    #[test]
    fn test_unbounded_game_never_self_terminates() {
        let mut state = GameState::new(2, 0);
        let mut turns = alternating(2);

        for _ in 0..1_000 {
            turns.end_player_turn(&mut state);
        }

        assert!(state.is_ongoing());
        assert_eq!(turns.round_counter(), 500);
    }

    #[test]
    fn test_end_round_directly() {
        let mut state = GameState::new(3, 0);
        let mut turns = alternating(3);
        turns.end_player_turn(&mut state);

        assert_eq!(
            turns.end_round(&mut state),
            Transition::RoundEnded { round: 1, next: p(2) }
        );
        assert_eq!(turns.turn_counter(), 0);
    }

    #[test]
    fn test_reset_matches_fresh_instance() {
        let mut state = GameState::new(3, 0);
        let mut turns = reactive(3).with_first_player(p(1));
        for _ in 0..7 {
            turns.end_player_turn(&mut state);
        }
        turns.add_reaction(p(0));
        turns.advance_step();

        turns.reset(&state);

        assert_eq!(turns.copy(), reactive(3).with_first_player(p(1)));
    }

    #[test]
    fn test_reset_steps_over_ineligible_first_player() {
        let mut state = GameState::new(4, 0);
        let mut turns = alternating(4).with_first_player(p(1));
        turns.start(&state);
        turns.end_player_turn(&mut state);
        state.eliminate(p(1));

        turns.reset(&state);

        assert_eq!(turns.turn_owner(), p(2));
        assert_eq!(turns.current_player(), p(2));
        assert_eq!(turns.turn_counter(), 0);
        assert_eq!(turns.round_counter(), 0);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut state = GameState::new(3, 0);
        let original = reactive(3);

        let mut copy = original.copy();
        copy.end_player_turn(&mut state);
        copy.advance_step();
        copy.add_reaction(p(2));

        assert_eq!(original, reactive(3));
        assert_ne!(copy, original);
    }

    #[test]
    fn test_reactive_turn_step_resets() {
        let mut state = GameState::new(2, 0);
        let mut turns = reactive(2);

        assert!(turns.advance_step());
        assert!(turns.advance_step());
        assert_eq!(turns.turn_step(), 2);

        turns.end_player_turn(&mut state);
        assert_eq!(turns.turn_step(), 0);

        turns.advance_step();
        turns.end_player_turn(&mut state);
        assert_eq!(turns.turn_step(), 0);
        assert_eq!(turns.round_counter(), 1);
    }

    #[test]
    fn test_reactions_take_control() {
        let mut state = GameState::new(3, 0);
        let mut turns = reactive(3);

        assert!(turns.add_reaction(p(1)));
        assert!(turns.add_reaction(p(2)));
        assert_eq!(turns.current_player(), p(1));
        assert_eq!(turns.turn_owner(), p(0));

        assert_eq!(turns.end_reaction(&state), Some(p(1)));
        assert_eq!(turns.current_player(), p(2));
        assert_eq!(turns.turn_step(), 1);

        assert_eq!(turns.end_reaction(&state), Some(p(2)));
        assert_eq!(turns.current_player(), p(0));
        assert_eq!(turns.end_reaction(&state), None);
        assert_eq!(turns.turn_step(), 2);

        turns.end_player_turn(&mut state);
        assert_eq!(turns.current_player(), p(1));
    }

    #[test]
    fn test_end_player_turn_drops_pending_reactions() {
        let mut state = GameState::new(3, 0);
        let mut turns = reactive(3);
        turns.add_reaction(p(2));

        turns.end_player_turn(&mut state);

        assert!(turns.pending_reactions().is_empty());
        assert_eq!(turns.current_player(), p(1));
    }

    #[test]
    fn test_alternating_has_no_reactions() {
        let state = GameState::new(2, 0);
        let mut turns = alternating(2);

        assert!(!turns.add_reaction(p(1)));
        assert!(!turns.advance_step());
        assert_eq!(turns.end_reaction(&state), None);
        assert_eq!(turns.current_player(), p(0));
    }

    #[test]
    fn test_reverse_direction() {
        let mut state = GameState::new(4, 0);
        let mut turns = alternating(4);
        turns.end_player_turn(&mut state);
        assert_eq!(turns.turn_owner(), p(1));

        assert!(turns.reverse());
        assert_eq!(turns.direction(), Direction::Anticlockwise);
        turns.end_player_turn(&mut state);
        assert_eq!(turns.turn_owner(), p(0));
        turns.end_player_turn(&mut state);
        assert_eq!(turns.turn_owner(), p(3));

        assert!(!reactive(2).reverse());
    }

    #[test]
    fn test_start_picks_first_eligible_seat() {
        let mut state = GameState::new(4, 0);
        state.eliminate(p(2));
        let mut turns = alternating(4).with_first_player(p(2));

        turns.start(&state);

        assert_eq!(turns.turn_owner(), p(3));
    }

    #[test]
    fn test_serde_preserves_counters() {
        let mut state = GameState::new(3, 0);
        let mut turns = reactive(3);
        turns.end_player_turn(&mut state);
        turns.add_reaction(p(0));

        let json = serde_json::to_string(&turns).unwrap();
        let restored: TurnOrder = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, turns);
    }
}
