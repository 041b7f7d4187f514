//! Procedural gate spawning
//!
//! Spawns are interval-driven against the run's tick counter. Each spawn
//! tightens the interval toward its floor; together with the speed ramp this
//! is the whole difficulty curve.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::state::{GameColor, GameState, Gate};

/// Spawn a gate once the interval has strictly elapsed, then tighten the
/// interval for the next one.
pub fn maybe_spawn(state: &mut GameState) {
    let since_last = (state.difficulty.elapsed_ticks - state.difficulty.last_spawn_tick) as f32;
    if since_last <= state.difficulty.spawn_interval {
        return;
    }
    let gate = make_gate(&mut state.rng);
    state.gates.push(gate);
    state.difficulty.last_spawn_tick = state.difficulty.elapsed_ticks;
    state.difficulty.spawn_interval =
        (state.difficulty.spawn_interval - SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL);
}

/// Build one gate: uniform color, uniform width, horizontally centered,
/// placed above the visible arena.
fn make_gate(rng: &mut impl Rng) -> Gate {
    let color = GameColor::from_index(rng.random_range(0..GameColor::ALL.len()));
    let width = rng.random_range(GATE_MIN_WIDTH..GATE_MAX_WIDTH);
    Gate {
        pos: Vec2::new(LOGICAL_WIDTH / 2.0 - width / 2.0, GATE_SPAWN_Y),
        width,
        height: GATE_HEIGHT,
        color,
        passed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_run();
        state.drain_events();
        state
    }

    #[test]
    fn test_spawn_waits_for_the_interval_to_strictly_elapse() {
        let mut state = playing_state(5);

        state.difficulty.elapsed_ticks = 120;
        maybe_spawn(&mut state);
        assert!(state.gates.is_empty());

        state.difficulty.elapsed_ticks = 121;
        maybe_spawn(&mut state);
        assert_eq!(state.gates.len(), 1);
        assert_eq!(state.difficulty.last_spawn_tick, 121);
    }

    #[test]
    fn test_gate_geometry_and_color_spread() {
        let mut state = playing_state(11);
        for _ in 0..50 {
            state.difficulty.elapsed_ticks += 200;
            maybe_spawn(&mut state);
        }
        assert_eq!(state.gates.len(), 50);

        for gate in &state.gates {
            assert!(gate.width >= GATE_MIN_WIDTH && gate.width < GATE_MAX_WIDTH);
            assert!((gate.center_x() - LOGICAL_WIDTH / 2.0).abs() < 1e-3);
            assert_eq!(gate.pos.y, GATE_SPAWN_Y);
            assert_eq!(gate.height, GATE_HEIGHT);
            assert!(!gate.passed);
        }
        for color in GameColor::ALL {
            assert!(state.gates.iter().any(|g| g.color == color));
        }
    }

    #[test]
    fn test_interval_ramps_down_and_floors_at_eighty() {
        let mut state = playing_state(2);

        // 120 -> 80 in 0.5 steps takes 80 spawns
        for _ in 0..80 {
            state.difficulty.elapsed_ticks += 200;
            maybe_spawn(&mut state);
        }
        assert_eq!(state.difficulty.spawn_interval, MIN_SPAWN_INTERVAL);

        state.difficulty.elapsed_ticks += 200;
        maybe_spawn(&mut state);
        assert_eq!(state.difficulty.spawn_interval, MIN_SPAWN_INTERVAL);
        assert_eq!(state.gates.len(), 81);
    }

    #[test]
    fn test_spawns_are_deterministic_per_seed() {
        let mut a = playing_state(99);
        let mut b = playing_state(99);
        for _ in 0..10 {
            a.difficulty.elapsed_ticks += 150;
            b.difficulty.elapsed_ticks += 150;
            maybe_spawn(&mut a);
            maybe_spawn(&mut b);
        }
        assert_eq!(a.gates.len(), b.gates.len());
        for (ga, gb) in a.gates.iter().zip(&b.gates) {
            assert_eq!(ga.width, gb.width);
            assert_eq!(ga.color, gb.color);
        }
    }
}
