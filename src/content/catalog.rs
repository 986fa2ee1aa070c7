//! Immutable content catalogs.
//!
//! A `Catalog` is built once by the loader and then shared between game
//! instances behind an `Arc`. Lookups are case-insensitive and return
//! `None` on a miss. Decks and quests come back as copies so one game
//! dealing from a deck never changes what the next game sees.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::components::{fold_name, same_name, Deck, GraphBoard, GridBoard, Named, Token};
use super::monster::MonsterDefinition;
use super::quest::Quest;

/// Named entries in insertion order with a case-folded name index.
#[derive(Clone, Debug)]
pub struct Registry<T> {
    entries: Vec<T>,
    index: FxHashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<T: Named> Registry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. A later entry with the same name (ignoring case)
    /// replaces the earlier one in place.
    pub fn register(&mut self, entry: T) {
        let key = fold_name(entry.name());
        match self.index.get(&key) {
            Some(&slot) => {
                warn!(name = entry.name(), "duplicate content name, replacing earlier entry");
                self.entries[slot] = entry;
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.index
            .get(&fold_name(name))
            .map(|&slot| &self.entries[slot])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&fold_name(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T: Named> Extend<T> for Registry<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for entry in iter {
            self.register(entry);
        }
    }
}

/// Everything a game can look up during setup.
///
/// ## Example
///
/// ```
/// use tabletop::content::{Catalog, Deck, Token};
///
/// let catalog = Catalog::new()
///     .with_token(Token::new("Avric Albright", "hero"))
///     .with_deck(Deck::new("Healer"));
///
/// assert!(catalog.find_token("avric albright").is_some());
/// assert!(catalog.find_deck("HEALER").is_some());
/// assert!(catalog.find_deck("Knight").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    grid_boards: Registry<GridBoard>,
    graph_boards: Registry<GraphBoard>,
    tokens: Registry<Token>,
    monsters: Registry<MonsterDefinition>,
    decks: Registry<Deck>,
    quests: Registry<Quest>,
    side_quests: Registry<Quest>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Building ===

    pub fn add_grid_board(&mut self, board: GridBoard) {
        self.grid_boards.register(board);
    }

    pub fn add_graph_board(&mut self, board: GraphBoard) {
        self.graph_boards.register(board);
    }

    pub fn add_token(&mut self, token: Token) {
        self.tokens.register(token);
    }

    pub fn add_monster(&mut self, monster: MonsterDefinition) {
        self.monsters.register(monster);
    }

    pub fn add_deck(&mut self, deck: Deck) {
        self.decks.register(deck);
    }

    pub fn add_quest(&mut self, quest: Quest) {
        self.quests.register(quest);
    }

    pub fn add_side_quest(&mut self, quest: Quest) {
        self.side_quests.register(quest);
    }

    #[must_use]
    pub fn with_token(mut self, token: Token) -> Self {
        self.add_token(token);
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.add_deck(deck);
        self
    }

    #[must_use]
    pub fn with_quest(mut self, quest: Quest) -> Self {
        self.add_quest(quest);
        self
    }

    // === Lookups ===

    #[must_use]
    pub fn find_grid_board(&self, name: &str) -> Option<&GridBoard> {
        self.grid_boards.get(name)
    }

    #[must_use]
    pub fn find_graph_board(&self, name: &str) -> Option<&GraphBoard> {
        self.graph_boards.get(name)
    }

    #[must_use]
    pub fn find_token(&self, name: &str) -> Option<&Token> {
        self.tokens.get(name)
    }

    #[must_use]
    pub fn find_monster(&self, name: &str) -> Option<&MonsterDefinition> {
        self.monsters.get(name)
    }

    /// Copy of the named deck, ready to shuffle and deal.
    #[must_use]
    pub fn find_deck(&self, name: &str) -> Option<Deck> {
        self.decks.get(name).map(Deck::copy)
    }

    /// Copy of the named main quest.
    #[must_use]
    pub fn find_quest(&self, name: &str) -> Option<Quest> {
        self.quests.get(name).map(Quest::copy)
    }

    /// Copy of the named side quest.
    #[must_use]
    pub fn find_side_quest(&self, name: &str) -> Option<Quest> {
        self.side_quests.get(name).map(Quest::copy)
    }

    /// Copies of every hero whose `archetype` matches (case-insensitive).
    #[must_use]
    pub fn find_heroes(&self, archetype: &str) -> Vec<Token> {
        self.tokens
            .iter()
            .filter(|t| t.is_kind("hero"))
            .filter(|t| {
                t.properties
                    .get_text("archetype")
                    .is_some_and(|a| same_name(a, archetype))
            })
            .cloned()
            .collect()
    }

    // === Listing ===

    pub fn grid_boards(&self) -> impl Iterator<Item = &GridBoard> {
        self.grid_boards.iter()
    }

    pub fn graph_boards(&self) -> impl Iterator<Item = &GraphBoard> {
        self.graph_boards.iter()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn monsters(&self) -> impl Iterator<Item = &MonsterDefinition> {
        self.monsters.iter()
    }

    pub fn decks(&self) -> impl Iterator<Item = &Deck> {
        self.decks.iter()
    }

    pub fn quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    pub fn side_quests(&self) -> impl Iterator<Item = &Quest> {
        self.side_quests.iter()
    }

    /// Total entries across all registries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grid_boards.len()
            + self.graph_boards.len()
            + self.tokens.len()
            + self.monsters.len()
            + self.decks.len()
            + self.quests.len()
            + self.side_quests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
