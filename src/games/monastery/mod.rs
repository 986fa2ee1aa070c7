//! Dice Monastery, reduced to its brewing economy.
//!
//! Each seat starts with grain and honey in its storeroom. On a turn a
//! seat takes exactly one action:
//! - harvest a grain from the supply
//! - brew beer from grain, or mead from honey
//! - sell beer (1 silver) or mead (2 silver)
//! - pass
//!
//! The first seat to hold the silver target wins. A round-bounded game
//! that runs out of rounds ends with `GameResult::RoundLimitReached`.
//!
//! ```
//! use tabletop::core::{GameConfig, RoundLimit};
//! use tabletop::game::Game;
//! use tabletop::games::monastery::{MonasteryAction, MonasteryRules};
//!
//! let config = GameConfig::new(3).with_round_limit(RoundLimit::Rounds(8));
//! let mut game = Game::new(config, MonasteryRules::new())?;
//!
//! assert!(game.apply(&MonasteryAction::BrewBeer));
//! game.random_playout(100);
//! assert!(game.is_over());
//! # Ok::<(), tabletop::error::ConfigError>(())
//! ```

mod actions;
mod game;

pub use actions::{Good, MonasteryAction, BEER, GRAIN, HONEY, MEAD, SILVER, STOREROOM, SUPPLY};
pub use game::MonasteryRules;
