//! Monster definitions.
//!
//! One monster record carries a shared "super" profile plus a minion and a
//! master profile for each act:
//!
//! ```json
//! { "id": "Goblin Archer", "size": [1, 1], "traits": ["cave"],
//!   "act1": [{ "health": 2 }, { "health": 5 }],
//!   "act2": [{ "health": 4 }, { "health": 7 }] }
//! ```
//!
//! Every definition exposes exactly the keys in [`MONSTER_KEYS`].

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::components::{Named, Token};
use super::properties::Properties;

pub const MINION_ACT_1: &str = "1-minion";
pub const MASTER_ACT_1: &str = "1-master";
pub const MINION_ACT_2: &str = "2-minion";
pub const MASTER_ACT_2: &str = "2-master";
pub const SUPER: &str = "super";

/// Keys of every monster definition, in display order.
pub const MONSTER_KEYS: [&str; 5] = [MINION_ACT_1, MASTER_ACT_1, MINION_ACT_2, MASTER_ACT_2, SUPER];

/// All variants of one monster type.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawMonster")]
pub struct MonsterDefinition {
    pub name: String,
    variants: FxHashMap<&'static str, Token>,
}

#[derive(Deserialize)]
struct RawMonster {
    id: String,
    act1: (Properties, Properties),
    act2: (Properties, Properties),
    #[serde(flatten)]
    rest: Properties,
}

impl TryFrom<RawMonster> for MonsterDefinition {
    type Error = String;

    fn try_from(raw: RawMonster) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err("monster record has an empty id".to_string());
        }

        let token = |properties: Properties| {
            Token::new(raw.id.clone(), "monster").with_properties(properties)
        };
        let (minion_1, master_1) = raw.act1;
        let (minion_2, master_2) = raw.act2;

        let mut variants = FxHashMap::default();
        variants.insert(MINION_ACT_1, token(minion_1));
        variants.insert(MASTER_ACT_1, token(master_1));
        variants.insert(MINION_ACT_2, token(minion_2));
        variants.insert(MASTER_ACT_2, token(master_2));
        variants.insert(SUPER, token(raw.rest));

        Ok(Self {
            name: raw.id,
            variants,
        })
    }
}

impl MonsterDefinition {
    /// Variant by key (`"1-minion"`, ..., `"super"`).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Token> {
        self.variants.get(key)
    }

    /// Keys present, in [`MONSTER_KEYS`] order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        MONSTER_KEYS.into_iter().filter(|k| self.variants.contains_key(k))
    }

    /// Minion profile for act 1 or 2.
    #[must_use]
    pub fn minion(&self, act: u32) -> Option<&Token> {
        match act {
            1 => self.get(MINION_ACT_1),
            2 => self.get(MINION_ACT_2),
            _ => None,
        }
    }

    /// Master profile for act 1 or 2.
    #[must_use]
    pub fn master(&self, act: u32) -> Option<&Token> {
        match act {
            1 => self.get(MASTER_ACT_1),
            2 => self.get(MASTER_ACT_2),
            _ => None,
        }
    }

    /// Act-independent profile: every top-level field except the acts.
    #[must_use]
    pub fn super_token(&self) -> Option<&Token> {
        self.get(SUPER)
    }
}

impl Named for MonsterDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}
