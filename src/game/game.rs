//! The outer game loop.
//!
//! `Game` owns one game instance: its state, its turn order, the action
//! history, and a shared reference to the content catalog. Each call to
//! [`Game::apply`] runs one action for the current player and lets the
//! rules decide whether the turn (or game) is over.

use std::sync::Arc;

use im::Vector;

use super::snapshot::Snapshot;
use crate::content::Catalog;
use crate::core::{Action, ActionRecord, GameConfig, GameResult, GameState, PlayerId};
use crate::error::ConfigError;
use crate::rules::Rules;
use crate::turn::TurnOrder;

/// One game instance.
///
/// `copy()` yields a fully independent instance for look-ahead: state,
/// turn order, and history are value copies; only the immutable catalog
/// is shared.
#[derive(Clone, Debug)]
pub struct Game<R: Rules> {
    config: GameConfig,
    rules: R,
    state: GameState,
    turns: TurnOrder,
    history: Vector<ActionRecord<R::Action>>,
    catalog: Option<Arc<Catalog>>,
}

impl<R: Rules> Game<R> {
    /// Validate `config`, set up the state, and seat the first player.
    pub fn new(config: GameConfig, rules: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let (state, turns) = Self::fresh(&config, &rules);
        Ok(Self {
            config,
            rules,
            state,
            turns,
            history: Vector::new(),
            catalog: None,
        })
    }

    fn fresh(config: &GameConfig, rules: &R) -> (GameState, TurnOrder) {
        let mut state = GameState::new(config.player_count, config.seed);
        rules.setup(config, &mut state);

        let mut turns = config.turn_order();
        turns.start(&state);
        (state, turns)
    }

    /// Attach the content catalog this game draws from.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn turns(&self) -> &TurnOrder {
        &self.turns
    }

    #[must_use]
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_deref()
    }

    /// Executed actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord<R::Action>> {
        &self.history
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turns.current_player()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        !self.state.is_ongoing()
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.state.result()
    }

    /// Legal actions for the current player; empty once the game is over.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<R::Action> {
        if self.is_over() {
            return Vec::new();
        }
        self.rules.legal_actions(&self.state, &self.turns)
    }

    // === Play ===

    /// Run `action` for the current player.
    ///
    /// Returns false without changing anything when the game is over, the
    /// action is not legal, or it fails to execute.
    pub fn apply(&mut self, action: &R::Action) -> bool {
        if self.is_over() {
            return false;
        }
        if !self.rules.is_legal(&self.state, &self.turns, action) {
            tracing::trace!(%action, "illegal action rejected");
            return false;
        }

        let player = self.turns.current_player();
        if !action.execute(&mut self.state, player) {
            return false;
        }

        self.history.push_back(ActionRecord::new(
            player,
            action.clone(),
            self.turns.round_counter(),
            self.turns.turn_counter(),
        ));
        self.rules
            .after_action(&mut self.state, &mut self.turns, player, action);
        true
    }

    /// Play uniformly random legal actions, drawn from the game's own RNG,
    /// until the game ends or `max_actions` have been applied.
    ///
    /// Returns the number of actions applied. Stops early when the rules
    /// offer an action that then fails to execute.
    pub fn random_playout(&mut self, max_actions: usize) -> usize {
        let mut applied = 0;
        while applied < max_actions && !self.is_over() {
            let legal = self.legal_actions();
            if legal.is_empty() {
                break;
            }
            let choice = self.state.rng.gen_range_usize(0..legal.len());
            if !self.apply(&legal[choice]) {
                tracing::warn!(action = %legal[choice], "legal action failed, playout stopped");
                break;
            }
            applied += 1;
        }
        applied
    }

    // === Lifecycle ===

    /// Restart from the initial state with the same configuration.
    pub fn reset(&mut self) {
        let (state, turns) = Self::fresh(&self.config, &self.rules);
        self.state = state;
        self.turns = turns;
        self.history = Vector::new();
    }

    /// Capture the state and turn order.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.copy(),
            turns: self.turns.copy(),
        }
    }

    /// Continue from a captured snapshot. History is cleared.
    ///
    /// Fails without changing anything when the snapshot was taken from a
    /// differently configured game or is internally inconsistent.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), ConfigError> {
        snapshot.validate(&self.config)?;
        self.state = snapshot.state;
        self.turns = snapshot.turns;
        self.history = Vector::new();
        Ok(())
    }
}

impl<R: Rules + Clone> Game<R> {
    /// Independent copy with the same RNG position.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Independent copy with a forked RNG, for divergent rollouts.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let state = self.state.fork();
        Self {
            state,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AreaId, ResourceId, RoundLimit};
    use std::fmt;

    const TOKEN: ResourceId = ResourceId::new(0);
    const POOL: AreaId = AreaId::new(0);
    const TAKEN: AreaId = AreaId::new(1);

    /// Take one token per turn; three tokens win.
    #[derive(Clone, Debug)]
    struct TokenRace;

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    struct Take;

    impl fmt::Display for Take {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Take")
        }
    }

    impl Action for Take {
        fn execute(&self, state: &mut GameState, player: PlayerId) -> bool {
            state.move_resource(player, TOKEN, POOL, TAKEN)
        }
    }

    impl Rules for TokenRace {
        type Action = Take;

        fn setup(&self, _config: &GameConfig, state: &mut GameState) {
            for player in PlayerId::all(state.player_count()) {
                state.add_resource(player, TOKEN, POOL, 5);
            }
        }

        fn legal_actions(&self, _state: &GameState, _turns: &TurnOrder) -> Vec<Take> {
            vec![Take]
        }

        fn after_action(&self, state: &mut GameState, turns: &mut TurnOrder, player: PlayerId, _action: &Take) {
            if state.resource(player, TOKEN, TAKEN) >= 3 {
                state.end_game(GameResult::Winner(player));
            }
            turns.end_player_turn(state);
        }
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert_eq!(
            Game::new(GameConfig::new(0), TokenRace).unwrap_err(),
            ConfigError::InvalidPlayerCount(0)
        );
    }

    #[test]
    fn test_apply_advances_turns_and_history() {
        let mut game = Game::new(GameConfig::new(2), TokenRace).unwrap();

        assert!(game.apply(&Take));
        assert_eq!(game.current_player(), PlayerId::new(1));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].player, PlayerId::new(0));
    }

    #[test]
    fn test_game_ends_and_rejects_further_actions() {
        let mut game = Game::new(GameConfig::new(2), TokenRace).unwrap();

        assert_eq!(game.random_playout(100), 5);
        assert_eq!(game.result(), Some(&GameResult::Winner(PlayerId::new(0))));
        assert!(!game.apply(&Take));
        assert!(game.legal_actions().is_empty());
    }

    #[test]
    fn test_round_limit_ends_game() {
        let config = GameConfig::new(2).with_round_limit(RoundLimit::Rounds(1));
        let mut game = Game::new(config, TokenRace).unwrap();

        game.apply(&Take);
        game.apply(&Take);

        assert_eq!(game.result(), Some(&GameResult::RoundLimitReached));
    }

    #[test]
    fn test_copy_and_reset() {
        let mut game = Game::new(GameConfig::new(3), TokenRace).unwrap();
        game.apply(&Take);

        let mut copy = game.copy();
        copy.apply(&Take);
        assert_eq!(game.history().len(), 1);
        assert_eq!(copy.history().len(), 2);

        game.reset();
        assert!(game.history().is_empty());
        assert_eq!(game.turns().turn_counter(), 0);
        assert_eq!(game.state().resource(PlayerId::new(0), TOKEN, TAKEN), 0);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut game = Game::new(GameConfig::new(2), TokenRace).unwrap();
        game.apply(&Take);
        let snapshot = game.snapshot();

        game.apply(&Take);
        game.restore(snapshot.clone()).unwrap();

        assert_eq!(game.state(), &snapshot.state);
        assert_eq!(game.turns(), &snapshot.turns);
    }

    /// Offers one action that always fails.
    #[derive(Clone, Debug)]
    struct Jammed;

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    struct Stuck;

    impl fmt::Display for Stuck {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Stuck")
        }
    }

    impl Action for Stuck {
        fn execute(&self, _state: &mut GameState, _player: PlayerId) -> bool {
            false
        }
    }

    impl Rules for Jammed {
        type Action = Stuck;

        fn setup(&self, _config: &GameConfig, _state: &mut GameState) {}

        fn legal_actions(&self, _state: &GameState, _turns: &TurnOrder) -> Vec<Stuck> {
            vec![Stuck]
        }

        fn after_action(&self, _state: &mut GameState, _turns: &mut TurnOrder, _player: PlayerId, _action: &Stuck) {}
    }

    #[test]
    fn test_playout_stops_on_failing_action() {
        let mut game = Game::new(GameConfig::new(2), Jammed).unwrap();

        assert_eq!(game.random_playout(10), 0);
        assert!(!game.is_over());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_restore_rejects_foreign_snapshot() {
        let mut small = Game::new(GameConfig::new(2), TokenRace).unwrap();
        let big = Game::new(GameConfig::new(4), TokenRace).unwrap();
        small.apply(&Take);
        let before = small.snapshot();

        assert!(matches!(
            small.restore(big.snapshot()),
            Err(ConfigError::SnapshotMismatch(_))
        ));
        assert_eq!(small.snapshot(), before);
        assert_eq!(small.history().len(), 1);
    }
}
