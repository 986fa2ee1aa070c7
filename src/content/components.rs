//! Content components: tokens, cards, decks, and boards.
//!
//! Each deserializes straight from one JSON record. Boards validate their
//! shape during deserialization, so a malformed board is a record error
//! rather than a panic later.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::properties::Properties;
use crate::core::GameRng;

/// Anything stored in a catalog under a name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Case-folded form of a name. Every case-insensitive comparison in the
/// content layer goes through this, so "ÉLAN" and "élan" are one name.
pub(crate) fn fold_name(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).collect()
}

/// Do two names match ignoring case?
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// A figure or marker: heroes, monsters, tokens.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Token {
    #[serde(rename = "id", alias = "name")]
    pub name: String,

    /// Token category ("hero", "monster", ...).
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(flatten)]
    pub properties: Properties,
}

impl Token {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            properties: Properties::new(),
        }
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Does this token belong to `kind` (case-insensitive)?
    #[must_use]
    pub fn is_kind(&self, kind: &str) -> bool {
        same_name(&self.kind, kind)
    }
}

impl Named for Token {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A single card.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Card {
    #[serde(alias = "id")]
    pub name: String,

    #[serde(flatten)]
    pub properties: Properties,
}

impl Card {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Properties::new(),
        }
    }
}

/// An ordered pile of cards. The top of the deck is the end of the list.
///
/// Catalog decks are masters: games receive copies and deal from those.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Deck {
    pub name: String,

    #[serde(default)]
    cards: Vec<Card>,
}

impl Deck {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    /// Put a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Independent copy for dealing.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl Named for Deck {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A rectangular tile of cells. `None` cells are off the board.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawGridBoard")]
pub struct GridBoard {
    pub name: String,
    width: usize,
    height: usize,
    cells: Vec<Option<String>>,
    pub properties: Properties,
}

#[derive(Deserialize)]
struct RawGridBoard {
    #[serde(alias = "id")]
    name: String,
    grid: Vec<Vec<Option<String>>>,
    #[serde(flatten)]
    properties: Properties,
}

impl TryFrom<RawGridBoard> for GridBoard {
    type Error = String;

    fn try_from(raw: RawGridBoard) -> Result<Self, Self::Error> {
        let height = raw.grid.len();
        let width = raw.grid.first().map_or(0, Vec::len);
        if let Some(row) = raw.grid.iter().position(|r| r.len() != width) {
            return Err(format!(
                "grid board {} row {row} has {} cells, expected {width}",
                raw.name,
                raw.grid[row].len()
            ));
        }

        Ok(Self {
            name: raw.name,
            width,
            height,
            cells: raw.grid.into_iter().flatten().collect(),
            properties: raw.properties,
        })
    }
}

impl GridBoard {
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell contents at column `x`, row `y`; `None` off the board or for
    /// empty cells.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<&str> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x].as_deref()
    }
}

impl Named for GridBoard {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A board of named nodes joined by undirected edges.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawGraphBoard")]
pub struct GraphBoard {
    pub name: String,
    nodes: Vec<String>,
    adjacency: FxHashMap<String, Vec<String>>,
    pub properties: Properties,
}

#[derive(Deserialize)]
struct RawGraphBoard {
    #[serde(alias = "id")]
    name: String,
    nodes: Vec<String>,
    #[serde(default)]
    edges: Vec<(String, String)>,
    #[serde(flatten)]
    properties: Properties,
}

impl TryFrom<RawGraphBoard> for GraphBoard {
    type Error = String;

    fn try_from(raw: RawGraphBoard) -> Result<Self, Self::Error> {
        let mut adjacency: FxHashMap<String, Vec<String>> =
            raw.nodes.iter().map(|n| (n.clone(), Vec::new())).collect();

        for (a, b) in raw.edges {
            if !adjacency.contains_key(&a) || !adjacency.contains_key(&b) {
                return Err(format!("graph board {} edge {a}-{b} names an unknown node", raw.name));
            }
            if let Some(list) = adjacency.get_mut(&a) {
                list.push(b.clone());
            }
            if let Some(list) = adjacency.get_mut(&b) {
                list.push(a);
            }
        }

        Ok(Self {
            name: raw.name,
            nodes: raw.nodes,
            adjacency,
            properties: raw.properties,
        })
    }
}

impl GraphBoard {
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Nodes joined to `node`; empty for unknown nodes.
    #[must_use]
    pub fn neighbours(&self, node: &str) -> &[String] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Named for GraphBoard {
    fn name(&self) -> &str {
        &self.name
    }
}
