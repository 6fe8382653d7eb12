//! Core types shared by the rules and the search: player marks and the
//! deterministic RNG.

pub mod player;
pub mod rng;

pub use player::Player;
pub use rng::{GameRng, GameRngState};
