//! Quest definitions.
//!
//! A quest record names the boards it is played on, where heroes may
//! start on each board, and which monster groups appear:
//!
//! ```json
//! { "id": "First Blood", "act": 1,
//!   "boards": ["entrance", "cave"],
//!   "starting-locations": [[[0, 0], [0, 1]], [[4, 4]]],
//!   "monsters": [["goblin archer", "entrance"], ["ettin", "cave", "master"]] }
//! ```
//!
//! `starting-locations` lists one set of coordinates per board, in the
//! same order as `boards`. A missing `act` means act 1.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use smallvec::SmallVec;

use super::components::Named;

/// Board coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "[i32; 2]")]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Coord {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

/// One monster group entry, e.g. `["goblin archer", "entrance"]`.
pub type MonsterGroup = SmallVec<[String; 3]>;

/// A playable scenario.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawQuest")]
pub struct Quest {
    pub name: String,
    pub act: u32,
    /// Boards in play order.
    pub boards: Vec<String>,
    /// Hero start positions per board name.
    pub starting_locations: FxHashMap<String, Vec<Coord>>,
    pub monsters: Vec<MonsterGroup>,
}

impl Quest {
    /// Start positions on `board`; empty when none are listed.
    #[must_use]
    pub fn starting_locations_on(&self, board: &str) -> &[Coord] {
        self.starting_locations
            .get(board)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Independent copy for a game instance.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl Named for Quest {
    fn name(&self) -> &str {
        &self.name
    }
}

fn first_act() -> u32 {
    1
}

#[derive(Deserialize)]
struct RawQuest {
    id: String,
    #[serde(default = "first_act")]
    act: u32,
    #[serde(default)]
    boards: Vec<String>,
    #[serde(rename = "starting-locations", default)]
    starting_locations: Vec<Vec<Coord>>,
    #[serde(default)]
    monsters: Vec<MonsterGroup>,
}

impl TryFrom<RawQuest> for Quest {
    type Error = String;

    fn try_from(raw: RawQuest) -> Result<Self, Self::Error> {
        if raw.starting_locations.len() > raw.boards.len() {
            return Err(format!(
                "quest {} lists starting locations for {} boards but only {} boards",
                raw.id,
                raw.starting_locations.len(),
                raw.boards.len()
            ));
        }

        let starting_locations = raw
            .boards
            .iter()
            .cloned()
            .zip(raw.starting_locations)
            .collect();

        Ok(Self {
            name: raw.id,
            act: raw.act,
            boards: raw.boards,
            starting_locations,
            monsters: raw.monsters,
        })
    }
}
