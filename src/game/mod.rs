//! Game instances: the outer loop and snapshots.

mod game;
pub mod snapshot;

pub use game::Game;
pub use snapshot::Snapshot;
