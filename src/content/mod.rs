//! Game content: boards, figures, decks, monsters, and quests.
//!
//! Content is read once from JSON by the [`ContentLoader`] into an
//! immutable [`Catalog`], which game instances share. Anything a game
//! changes (a deck it deals from, a quest it tracks) is handed out as a
//! copy.

pub mod catalog;
pub mod components;
pub mod loader;
pub mod monster;
pub mod properties;
pub mod quest;

pub use catalog::{Catalog, Registry};
pub use components::{Card, Deck, GraphBoard, GridBoard, Named, Token};
pub use loader::{parse_records, ContentLoader, LoadPolicy, LoadReport, LoaderConfig};
pub use monster::{MonsterDefinition, MONSTER_KEYS};
pub use properties::{Properties, PropertyValue};
pub use quest::{Coord, MonsterGroup, Quest};
