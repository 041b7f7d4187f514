//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer tick time only (one tick per frame callback)
//! - Seeded RNG only
//! - Stable gate order (spawn order)
//! - No rendering or platform dependencies

pub mod judge;
pub mod particles;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use judge::Verdict;
pub use state::{
    DifficultyState, GameColor, GameEvent, GamePhase, GameState, Gate, Particle, Player,
    ScoreState,
};
pub use tick::{TickInput, tick};
