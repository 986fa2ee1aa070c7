//! Shared game state.
//!
//! `GameState` is the value every action mutates:
//! - game status (ongoing or ended with a result)
//! - per-seat participation (`PlayerStatus`)
//! - a resource ledger keyed by owner, resource kind, and area
//! - the deterministic RNG
//!
//! The turn order reads `status` and seat eligibility from here but never
//! decides victory itself; rules set the ended status.
//!
//! ## Copies
//!
//! The ledger is an `im` persistent map, so `copy()` is O(1) and the copy
//! shares no mutable structure with the original: writes on either side
//! leave the other untouched.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use super::config::{AreaId, ResourceId};
use super::player::{PlayerId, PlayerMap, PlayerStatus};
use super::rng::GameRng;

/// Outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Shared victory.
    Winners(Vec<PlayerId>),
    /// Nobody won.
    Draw,
    /// A round-bounded game ran out of rounds before the rules decided.
    RoundLimitReached,
}

impl GameResult {
    /// Did `player` win?
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw | GameResult::RoundLimitReached => false,
        }
    }
}

/// Whether the game is still being played.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Ended(GameResult),
}

/// Ledger coordinate: who holds the resource, what it is, where it sits.
///
/// `owner: None` is the shared pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub owner: Option<PlayerId>,
    pub resource: ResourceId,
    pub area: AreaId,
}

impl ResourceKey {
    /// A seat's resource in an area.
    #[must_use]
    pub const fn player(owner: PlayerId, resource: ResourceId, area: AreaId) -> Self {
        Self { owner: Some(owner), resource, area }
    }

    /// A shared-pool resource in an area.
    #[must_use]
    pub const fn shared(resource: ResourceId, area: AreaId) -> Self {
        Self { owner: None, resource, area }
    }

    /// Same owner and resource, different area.
    #[must_use]
    pub const fn in_area(self, area: AreaId) -> Self {
        Self { area, ..self }
    }
}

/// Complete state of one game instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    player_count: usize,
    status: GameStatus,
    players: PlayerMap<PlayerStatus>,
    /// Zero counts are never stored.
    ledger: ImHashMap<ResourceKey, u32>,
    /// Deterministic RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create an ongoing game with every seat active and an empty ledger.
    #[must_use]
    pub fn new(player_count: usize, seed: u64) -> Self {
        Self {
            player_count,
            status: GameStatus::Ongoing,
            players: PlayerMap::with_default(player_count),
            ledger: ImHashMap::new(),
            rng: GameRng::new(seed),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Seats with a stored status. Equals `player_count` for any state
    /// built through `new`.
    #[must_use]
    pub(crate) fn seat_count(&self) -> usize {
        self.players.player_count()
    }

    // === Status ===

    #[must_use]
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    #[must_use]
    pub fn is_ongoing(&self) -> bool {
        self.status == GameStatus::Ongoing
    }

    /// The result, once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        match &self.status {
            GameStatus::Ongoing => None,
            GameStatus::Ended(result) => Some(result),
        }
    }

    /// End the game.
    ///
    /// The first result sticks: returns false and changes nothing if the
    /// game had already ended.
    pub fn end_game(&mut self, result: GameResult) -> bool {
        if !self.is_ongoing() {
            return false;
        }
        tracing::debug!(?result, "game ended");
        self.status = GameStatus::Ended(result);
        true
    }

    // === Seats ===

    #[must_use]
    pub fn player_status(&self, player: PlayerId) -> PlayerStatus {
        self.players[player]
    }

    /// Can `player` take the next turn?
    #[must_use]
    pub fn is_eligible(&self, player: PlayerId) -> bool {
        player.index() < self.player_count && self.players[player].is_eligible()
    }

    /// Seats that can currently take turns, in seat order.
    pub fn eligible_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(|(_, status)| status.is_eligible())
            .map(|(player, _)| player)
    }

    /// Remove a seat from rotation permanently.
    pub fn eliminate(&mut self, player: PlayerId) {
        self.players[player] = PlayerStatus::Eliminated;
    }

    /// Pass over a seat until it is reinstated. Eliminated seats stay out.
    pub fn skip(&mut self, player: PlayerId) {
        if self.players[player] == PlayerStatus::Active {
            self.players[player] = PlayerStatus::Skipped;
        }
    }

    /// Return a skipped seat to rotation. Eliminated seats stay out.
    pub fn reinstate(&mut self, player: PlayerId) {
        if self.players[player] == PlayerStatus::Skipped {
            self.players[player] = PlayerStatus::Active;
        }
    }

    // === Resources ===

    /// Amount held at a ledger coordinate.
    #[must_use]
    pub fn amount(&self, key: ResourceKey) -> u32 {
        self.ledger.get(&key).copied().unwrap_or(0)
    }

    /// Amount a seat holds of `resource` in `area`.
    #[must_use]
    pub fn resource(&self, owner: PlayerId, resource: ResourceId, area: AreaId) -> u32 {
        self.amount(ResourceKey::player(owner, resource, area))
    }

    /// Amount a seat holds of `resource` across all areas.
    #[must_use]
    pub fn total_resource(&self, owner: PlayerId, resource: ResourceId) -> u32 {
        self.ledger
            .iter()
            .filter(|(key, _)| key.owner == Some(owner) && key.resource == resource)
            .map(|(_, amount)| *amount)
            .sum()
    }

    /// Add `amount` at a ledger coordinate.
    pub fn add(&mut self, key: ResourceKey, amount: u32) {
        if amount == 0 {
            return;
        }
        let entry = self.ledger.entry(key).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Take `amount` from a ledger coordinate.
    ///
    /// Returns false and changes nothing if fewer than `amount` are held.
    pub fn remove(&mut self, key: ResourceKey, amount: u32) -> bool {
        let held = self.amount(key);
        if held < amount {
            return false;
        }
        if held == amount {
            self.ledger.remove(&key);
        } else {
            self.ledger.insert(key, held - amount);
        }
        true
    }

    /// Move `amount` from one coordinate to another, all or nothing.
    pub fn transfer(&mut self, from: ResourceKey, to: ResourceKey, amount: u32) -> bool {
        if !self.remove(from, amount) {
            return false;
        }
        self.add(to, amount);
        true
    }

    /// Add `amount` of a seat's resource to an area.
    pub fn add_resource(&mut self, owner: PlayerId, resource: ResourceId, area: AreaId, amount: u32) {
        self.add(ResourceKey::player(owner, resource, area), amount);
    }

    /// Take `amount` of a seat's resource from an area, all or nothing.
    pub fn remove_resource(&mut self, owner: PlayerId, resource: ResourceId, area: AreaId, amount: u32) -> bool {
        self.remove(ResourceKey::player(owner, resource, area), amount)
    }

    /// Move one unit of a seat's resource between areas.
    pub fn move_resource(&mut self, owner: PlayerId, resource: ResourceId, from: AreaId, to: AreaId) -> bool {
        self.move_resources(owner, resource, from, to, 1)
    }

    /// Move `amount` units of a seat's resource between areas, all or nothing.
    pub fn move_resources(
        &mut self,
        owner: PlayerId,
        resource: ResourceId,
        from: AreaId,
        to: AreaId,
        amount: u32,
    ) -> bool {
        let key = ResourceKey::player(owner, resource, from);
        self.transfer(key, key.in_area(to), amount)
    }

    // === Copies ===

    /// Independent snapshot with the same RNG position.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Independent snapshot whose RNG has been forked, so rollouts from
    /// the copy draw different numbers than the original.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let rng = self.rng.fork();
        Self { rng, ..self.clone() }
    }
}
