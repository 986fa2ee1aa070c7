//! Game implementations.

pub mod monastery;
