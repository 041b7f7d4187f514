//! Chroma Rush - a color-matching reflex arcade game
//!
//! Core modules:
//! - `sim`: Deterministic tick-stepped simulation (spawning, judgement, scoring, particles)
//! - `viewport`: Logical-to-display mapping and device classification
//! - `platform`: Web portal integration (ad broker, debounced timers)
//! - `render`: Canvas 2D drawing (wasm only)
//! - `audio`: Procedural sound effects (wasm only)

pub mod highscore;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use settings::Settings;
pub use sim::{GameColor, GameEvent, GamePhase, GameState, TickInput};
pub use viewport::{DeviceClass, ViewportConfig};

/// Game configuration constants
pub mod consts {
    /// Logical arena width; gameplay and rendering share this 4:3 space
    pub const LOGICAL_WIDTH: f32 = 800.0;
    pub const LOGICAL_HEIGHT: f32 = 600.0;

    /// Player orb anchor - fixed for the whole run
    pub const PLAYER_X: f32 = 400.0;
    pub const PLAYER_Y: f32 = 500.0;
    /// Baseline orb radius; the viewport mapper overrides it per device class
    pub const PLAYER_BASE_RADIUS: f32 = 30.0;

    /// Judgement band half-height around the player's y
    pub const JUDGEMENT_BAND: f32 = 50.0;

    /// Gate geometry - gates spawn above the arena and are culled below it
    pub const GATE_HEIGHT: f32 = 20.0;
    pub const GATE_MIN_WIDTH: f32 = 120.0;
    pub const GATE_MAX_WIDTH: f32 = 200.0;
    pub const GATE_SPAWN_Y: f32 = -100.0;
    pub const GATE_CULL_Y: f32 = 700.0;

    /// Scroll speed ramp: +0.3 every 600 ticks, capped
    pub const BASE_SPEED: f32 = 3.0;
    pub const MAX_SPEED: f32 = 8.0;
    pub const SPEED_INCREMENT: f32 = 0.3;
    pub const SPEED_RAMP_TICKS: u64 = 600;

    /// Spawn interval ramp: -0.5 per spawn, floored
    pub const BASE_SPAWN_INTERVAL: f32 = 120.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 80.0;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.5;

    /// Combo staircase: x1.5 at 5, x2 at 10
    pub const COMBO_TIER_ONE: u32 = 5;
    pub const COMBO_TIER_TWO: u32 = 10;
    pub const MULTIPLIER_BASE: f32 = 1.0;
    pub const MULTIPLIER_TIER_ONE: f32 = 1.5;
    pub const MULTIPLIER_TIER_TWO: f32 = 2.0;

    /// Success burst
    pub const BURST_COUNT: usize = 15;
    pub const PARTICLE_LIFE_TICKS: u32 = 60;
    pub const PARTICLE_MIN_SPEED: f32 = 2.0;
    pub const PARTICLE_MAX_SPEED: f32 = 5.0;

    /// Chance of requesting an interstitial ad on game over
    pub const INTERSTITIAL_CHANCE: f32 = 0.2;

    /// Resize debounce delay (ms)
    pub const RESIZE_DEBOUNCE_MS: i32 = 100;
}
