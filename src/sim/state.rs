//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here; the browser shell only
//! reads it (rendering) or reacts to drained events (ads, storage, audio).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first activate
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a restart activate
    GameOver,
}

/// The three gate/player colors, cycled in a fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameColor {
    Red,
    Blue,
    Yellow,
}

impl GameColor {
    pub const ALL: [GameColor; 3] = [GameColor::Red, GameColor::Blue, GameColor::Yellow];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Position in the fixed cycle order
    pub fn index(self) -> usize {
        match self {
            GameColor::Red => 0,
            GameColor::Blue => 1,
            GameColor::Yellow => 2,
        }
    }

    /// Next color in the activate-cycle order (Red -> Blue -> Yellow -> Red)
    pub fn next(self) -> Self {
        match self {
            GameColor::Red => GameColor::Blue,
            GameColor::Blue => GameColor::Yellow,
            GameColor::Yellow => GameColor::Red,
        }
    }

    /// Canvas fill color
    pub fn hex(self) -> &'static str {
        match self {
            GameColor::Red => "#FF0040",
            GameColor::Blue => "#00F0FF",
            GameColor::Yellow => "#FFE000",
        }
    }

    /// HUD label
    pub fn label(self) -> &'static str {
        match self {
            GameColor::Red => "RED",
            GameColor::Blue => "BLUE",
            GameColor::Yellow => "YELLOW",
        }
    }
}

/// The player orb - fixed position, cycling color
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
    /// Logical radius; the viewport mapper scales it per device class
    pub radius: f32,
    pub color: GameColor,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_Y),
            radius: PLAYER_BASE_RADIUS,
            color: GameColor::Red,
        }
    }
}

/// A scrolling gate; `pos.y` is the top edge
#[derive(Debug, Clone, Copy)]
pub struct Gate {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: GameColor,
    /// Set once scored; passed gates are never re-judged
    pub passed: bool,
}

impl Gate {
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// A burst particle (visual only, never gameplay-affecting)
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks; removed at 0
    pub life: u32,
    pub color: GameColor,
}

/// Score, combo and the derived multiplier
#[derive(Debug, Clone, Copy)]
pub struct ScoreState {
    pub score: u32,
    pub combo: u32,
    pub multiplier: f32,
    /// Best score across runs; persisted by the shell
    pub high_score: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            multiplier: MULTIPLIER_BASE,
            high_score: 0,
        }
    }
}

impl ScoreState {
    /// Reset for a new run; the high score survives
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.multiplier = MULTIPLIER_BASE;
    }
}

/// Difficulty ramp state; resets wholesale on run start
#[derive(Debug, Clone, Copy)]
pub struct DifficultyState {
    /// Gate scroll speed (logical units per tick)
    pub speed: f32,
    /// Ticks between spawns; shrinks per spawn down to the floor
    pub spawn_interval: f32,
    /// Ticks elapsed in the current run
    pub elapsed_ticks: u64,
    /// Tick of the most recent spawn
    pub last_spawn_tick: u64,
}

impl Default for DifficultyState {
    fn default() -> Self {
        Self {
            speed: BASE_SPEED,
            spawn_interval: BASE_SPAWN_INTERVAL,
            elapsed_ticks: 0,
            last_spawn_tick: 0,
        }
    }
}

/// Side effects the shell performs after a tick; the sim only records them
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A run began (Menu/GameOver -> Playing)
    RunStarted,
    /// A gate was passed successfully
    GatePassed { score: u32, combo: u32 },
    /// The run ended (Playing -> GameOver)
    RunEnded {
        score: u32,
        high_score: u32,
        beat_high_score: bool,
        /// Result of the interstitial probability roll
        show_interstitial: bool,
    },
}

/// Complete game state (deterministic given seed + input script)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub gates: Vec<Gate>,
    pub particles: Vec<Particle>,
    pub score: ScoreState,
    pub difficulty: DifficultyState,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game at the menu with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            player: Player::default(),
            gates: Vec::new(),
            particles: Vec::new(),
            score: ScoreState::default(),
            difficulty: DifficultyState::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Begin a fresh run: clear entities, reset score and difficulty.
    /// The high score and the player radius (viewport-owned) survive.
    pub fn start_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.gates.clear();
        self.particles.clear();
        self.player.color = GameColor::Red;
        self.score.reset_run();
        self.difficulty = DifficultyState::default();
        self.events.push(GameEvent::RunStarted);
    }

    /// End the run: update the high score and roll the interstitial chance
    /// on the seeded RNG so the rate is reproducible.
    pub fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        let beat_high_score = self.score.score > self.score.high_score;
        if beat_high_score {
            self.score.high_score = self.score.score;
        }
        let show_interstitial = self.rng.random::<f32>() < INTERSTITIAL_CHANCE;
        self.events.push(GameEvent::RunEnded {
            score: self.score.score,
            high_score: self.score.high_score,
            beat_high_score,
            show_interstitial,
        });
    }

    /// Cycle the player orb to the next color
    pub fn cycle_color(&mut self) {
        self.player.color = self.player.color.next();
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
