//! Rules trait for game implementations.
//!
//! The core engine calls into `Rules` but never interprets game-specific
//! concepts directly.

pub mod engine;

pub use engine::Rules;
