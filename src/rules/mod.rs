//! Rules engine trait for game implementations.
//!
//! The search calls into `RulesEngine` for legal moves, move application and
//! terminal evaluation, but never interprets the board itself.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
