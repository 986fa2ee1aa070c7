//! Monastery actions.
//!
//! Goods a seat owns sit in its storeroom; the general supply is the
//! shared pool. Brewing returns the raw good to the supply and takes the
//! brewed good from it, selling does the same with silver.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Action, AreaId, GameState, PlayerId, ResourceId, ResourceKey};

pub const GRAIN: ResourceId = ResourceId::new(0);
pub const BEER: ResourceId = ResourceId::new(1);
pub const HONEY: ResourceId = ResourceId::new(2);
pub const MEAD: ResourceId = ResourceId::new(3);
pub const SILVER: ResourceId = ResourceId::new(4);

/// Shared general supply.
pub const SUPPLY: AreaId = AreaId::new(0);
/// A seat's own storeroom.
pub const STOREROOM: AreaId = AreaId::new(1);

/// Goods that can be sold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Good {
    Beer,
    Mead,
}

impl Good {
    #[must_use]
    pub const fn resource(self) -> ResourceId {
        match self {
            Good::Beer => BEER,
            Good::Mead => MEAD,
        }
    }

    /// Silver paid per unit.
    #[must_use]
    pub const fn price(self) -> u32 {
        match self {
            Good::Beer => 1,
            Good::Mead => 2,
        }
    }
}

/// Everything a seat can do on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonasteryAction {
    /// Take one grain from the supply.
    HarvestGrain,
    /// One grain back to the supply for one beer.
    BrewBeer,
    /// One honey back to the supply for one mead.
    BrewMead,
    /// One good back to the supply for its price in silver.
    Sell(Good),
    Pass,
}

fn storeroom(player: PlayerId, resource: ResourceId) -> ResourceKey {
    ResourceKey::player(player, resource, STOREROOM)
}

fn supply(resource: ResourceId) -> ResourceKey {
    ResourceKey::shared(resource, SUPPLY)
}

/// Swap `give` of the seat's `spent` for `take` of `gained` from the
/// supply. Checks both sides first so a failed exchange changes nothing.
fn exchange(
    state: &mut GameState,
    player: PlayerId,
    spent: ResourceId,
    give: u32,
    gained: ResourceId,
    take: u32,
) -> bool {
    if state.amount(storeroom(player, spent)) < give || state.amount(supply(gained)) < take {
        return false;
    }
    state.transfer(storeroom(player, spent), supply(spent), give)
        && state.transfer(supply(gained), storeroom(player, gained), take)
}

impl MonasteryAction {
    /// Can `player` carry this out in `state`?
    #[must_use]
    pub fn is_affordable(&self, state: &GameState, player: PlayerId) -> bool {
        let has = |key: ResourceKey, n: u32| state.amount(key) >= n;
        match self {
            MonasteryAction::HarvestGrain => has(supply(GRAIN), 1),
            MonasteryAction::BrewBeer => has(storeroom(player, GRAIN), 1) && has(supply(BEER), 1),
            MonasteryAction::BrewMead => has(storeroom(player, HONEY), 1) && has(supply(MEAD), 1),
            MonasteryAction::Sell(good) => {
                has(storeroom(player, good.resource()), 1) && has(supply(SILVER), good.price())
            }
            MonasteryAction::Pass => true,
        }
    }
}

impl Action for MonasteryAction {
    fn execute(&self, state: &mut GameState, player: PlayerId) -> bool {
        match *self {
            MonasteryAction::HarvestGrain => {
                state.transfer(supply(GRAIN), storeroom(player, GRAIN), 1)
            }
            MonasteryAction::BrewBeer => exchange(state, player, GRAIN, 1, BEER, 1),
            MonasteryAction::BrewMead => exchange(state, player, HONEY, 1, MEAD, 1),
            MonasteryAction::Sell(good) => {
                exchange(state, player, good.resource(), 1, SILVER, good.price())
            }
            MonasteryAction::Pass => true,
        }
    }
}

impl fmt::Display for MonasteryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonasteryAction::HarvestGrain => write!(f, "Harvest Grain"),
            MonasteryAction::BrewBeer => write!(f, "Brew Beer"),
            MonasteryAction::BrewMead => write!(f, "Brew Mead"),
            MonasteryAction::Sell(good) => write!(f, "Sell {good:?}"),
            MonasteryAction::Pass => write!(f, "Pass"),
        }
    }
}
