//! Monastery rules.

use serde::{Deserialize, Serialize};

use super::actions::{Good, MonasteryAction, BEER, GRAIN, HONEY, MEAD, SILVER, STOREROOM, SUPPLY};
use crate::core::{GameConfig, GameResult, GameState, PlayerId, ResourceKey};
use crate::rules::Rules;
use crate::turn::TurnOrder;

/// Starting stock and victory target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonasteryRules {
    /// Silver that wins the game.
    pub silver_target: u32,
    /// Grain each seat starts with.
    pub starting_grain: u32,
    /// Honey each seat starts with.
    pub starting_honey: u32,
    /// Units of each good in the general supply at setup.
    pub supply_stock: u32,
}

impl Default for MonasteryRules {
    fn default() -> Self {
        Self {
            silver_target: 6,
            starting_grain: 2,
            starting_honey: 1,
            supply_stock: 30,
        }
    }
}

impl MonasteryRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_silver_target(mut self, target: u32) -> Self {
        self.silver_target = target;
        self
    }

    /// Silver in `player`'s storeroom.
    #[must_use]
    pub fn silver(&self, state: &GameState, player: PlayerId) -> u32 {
        state.resource(player, SILVER, STOREROOM)
    }

    /// Seats with the most silver.
    #[must_use]
    pub fn leaders(&self, state: &GameState) -> Vec<PlayerId> {
        let players: Vec<_> = PlayerId::all(state.player_count()).collect();
        let best = players.iter().map(|&p| self.silver(state, p)).max().unwrap_or(0);
        players
            .into_iter()
            .filter(|&p| self.silver(state, p) == best)
            .collect()
    }
}

const ALL_ACTIONS: [MonasteryAction; 6] = [
    MonasteryAction::HarvestGrain,
    MonasteryAction::BrewBeer,
    MonasteryAction::BrewMead,
    MonasteryAction::Sell(Good::Beer),
    MonasteryAction::Sell(Good::Mead),
    MonasteryAction::Pass,
];

impl Rules for MonasteryRules {
    type Action = MonasteryAction;

    fn setup(&self, _config: &GameConfig, state: &mut GameState) {
        for resource in [GRAIN, BEER, MEAD, SILVER] {
            state.add(ResourceKey::shared(resource, SUPPLY), self.supply_stock);
        }
        for player in PlayerId::all(state.player_count()) {
            state.add_resource(player, GRAIN, STOREROOM, self.starting_grain);
            state.add_resource(player, HONEY, STOREROOM, self.starting_honey);
        }
    }

    fn legal_actions(&self, state: &GameState, turns: &TurnOrder) -> Vec<MonasteryAction> {
        let player = turns.current_player();
        if !state.is_eligible(player) {
            return Vec::new();
        }
        ALL_ACTIONS
            .into_iter()
            .filter(|a| a.is_affordable(state, player))
            .collect()
    }

    fn after_action(
        &self,
        state: &mut GameState,
        turns: &mut TurnOrder,
        player: PlayerId,
        _action: &MonasteryAction,
    ) {
        if self.silver(state, player) >= self.silver_target {
            state.end_game(GameResult::Winner(player));
            return;
        }
        turns.end_player_turn(state);
    }
}
