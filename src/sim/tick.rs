//! Per-frame simulation step
//!
//! Exactly one `tick` runs per animation frame; every tuning constant is a
//! per-tick quantity, so there is no dt or accumulator anywhere in the core.

use crate::consts::*;
use crate::sim::state::{DifficultyState, GamePhase, GameState};
use crate::sim::{judge, particles, spawn};

/// One frame of latched input
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Unified activate signal (click / touch / Space); one-shot
    pub activate: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            // An activate that causes a transition is consumed by it:
            // no color cycle, no gameplay step on the same tick
            if input.activate {
                state.start_run();
            }
        }
        GamePhase::Playing => {
            if input.activate {
                state.cycle_color();
            }
            step_run(state);
        }
    }
}

/// One tick of active gameplay, in fixed order: clock, spawn, scroll,
/// judge, cull, particles, speed ramp.
fn step_run(state: &mut GameState) {
    state.difficulty.elapsed_ticks += 1;
    spawn::maybe_spawn(state);
    advance_gates(state);

    if judge::resolve_gates(state).is_some() {
        state.end_run();
    }

    // The ending tick still finishes its bookkeeping; entities freeze
    // afterwards because the phase is no longer Playing
    state.gates.retain(|g| g.pos.y <= GATE_CULL_Y);
    particles::integrate(&mut state.particles);
    ramp_speed(&mut state.difficulty);
}

/// Scroll every gate down by the current speed
fn advance_gates(state: &mut GameState) {
    let speed = state.difficulty.speed;
    for gate in &mut state.gates {
        gate.pos.y += speed;
    }
}

/// Step the speed ramp once per interval, up to the cap
fn ramp_speed(difficulty: &mut DifficultyState) {
    if difficulty.elapsed_ticks % SPEED_RAMP_TICKS == 0 {
        difficulty.speed = (difficulty.speed + SPEED_INCREMENT).min(MAX_SPEED);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::{GameColor, GameEvent, Gate};

    fn activate() -> TickInput {
        TickInput { activate: true }
    }

    fn run_ticks(state: &mut GameState, n: u64) {
        let idle = TickInput::default();
        for _ in 0..n {
            tick(state, &idle);
        }
    }

    fn parked_gate(x: f32, y: f32, width: f32, color: GameColor) -> Gate {
        Gate {
            pos: Vec2::new(x, y),
            width,
            height: GATE_HEIGHT,
            color,
            passed: false,
        }
    }

    /// Snap the orb to the oldest unpassed gate's color before a tick
    fn snap_color(state: &mut GameState) {
        if let Some(g) = state.gates.iter().find(|g| !g.passed) {
            state.player.color = g.color;
        }
    }

    #[test]
    fn test_activate_starts_a_run_from_the_menu() {
        let mut state = GameState::new(1);
        tick(&mut state, &activate());
        assert_eq!(state.phase, GamePhase::Playing);
        // Transition consumed the activate: no cycle, no gameplay step
        assert_eq!(state.player.color, GameColor::Red);
        assert_eq!(state.difficulty.elapsed_ticks, 0);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_idle_menu_never_advances_the_run() {
        let mut state = GameState::new(1);
        run_ticks(&mut state, 50);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.difficulty.elapsed_ticks, 0);
        assert!(state.gates.is_empty());
    }

    #[test]
    fn test_activate_cycles_color_during_play() {
        let mut state = GameState::new(1);
        tick(&mut state, &activate());
        tick(&mut state, &activate());
        assert_eq!(state.player.color, GameColor::Blue);
        // The cycling tick still advances the run
        assert_eq!(state.difficulty.elapsed_ticks, 1);
    }

    #[test]
    fn test_first_gate_spawns_after_the_base_interval() {
        let mut state = GameState::new(4);
        tick(&mut state, &activate());
        run_ticks(&mut state, 120);
        assert!(state.gates.is_empty());
        run_ticks(&mut state, 1);
        assert_eq!(state.gates.len(), 1);
        // Spawned at the top, then scrolled once on the same tick
        assert_eq!(state.gates[0].pos.y, GATE_SPAWN_Y + BASE_SPEED);
    }

    #[test]
    fn test_wrong_color_gate_ends_the_run() {
        let mut state = GameState::new(4);
        tick(&mut state, &activate());
        state.drain_events();
        // Contained, mismatched, one scroll step above the band
        state.gates.push(parked_gate(300.0, 449.0, 200.0, GameColor::Blue));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(matches!(
            state.drain_events().last(),
            Some(GameEvent::RunEnded { score: 0, .. })
        ));
    }

    #[test]
    fn test_missed_gate_ends_the_run_only_below_the_player() {
        let mut state = GameState::new(4);
        tick(&mut state, &activate());
        // Far off to the side; containment is impossible
        state.gates.push(parked_gate(600.0, 449.0, 120.0, GameColor::Red));

        let mut survived = 0;
        while state.phase == GamePhase::Playing {
            tick(&mut state, &TickInput::default());
            survived += 1;
            assert!(survived < 40, "miss never resolved");
        }
        assert!(survived > 1, "miss resolved while still above the player");
        assert!(state.gates[0].pos.y > PLAYER_Y);
    }

    #[test]
    fn test_bot_run_reaches_combo_twenty_one_with_score_thirty_two() {
        let mut state = GameState::new(1234);
        tick(&mut state, &activate());
        let idle = TickInput::default();
        while state.score.combo < 21 {
            snap_color(&mut state);
            tick(&mut state, &idle);
            assert_eq!(state.phase, GamePhase::Playing);
            assert!(state.difficulty.elapsed_ticks < 50_000, "bot stalled");
        }
        // 5 passes at x1, 5 at floor(1.5), 11 at x2
        assert_eq!(state.score.score, 32);
        assert_eq!(state.score.multiplier, 2.0);
    }

    #[test]
    fn test_speed_ramps_every_interval_and_caps() {
        let mut state = GameState::new(77);
        tick(&mut state, &activate());
        let idle = TickInput::default();

        for _ in 0..(SPEED_RAMP_TICKS - 1) {
            snap_color(&mut state);
            tick(&mut state, &idle);
        }
        assert_eq!(state.difficulty.speed, BASE_SPEED);
        snap_color(&mut state);
        tick(&mut state, &idle);
        assert!((state.difficulty.speed - (BASE_SPEED + SPEED_INCREMENT)).abs() < 1e-6);

        // 17 ramp intervals saturate the cap; the bot stays alive throughout
        for _ in 0..(17 * SPEED_RAMP_TICKS) {
            snap_color(&mut state);
            tick(&mut state, &idle);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.difficulty.speed, MAX_SPEED);
    }

    #[test]
    fn test_gates_cull_below_the_arena() {
        let mut state = GameState::new(9);
        tick(&mut state, &activate());
        let mut g = parked_gate(300.0, 699.0, 200.0, GameColor::Blue);
        g.passed = true;
        state.gates.push(g);

        tick(&mut state, &TickInput::default());
        assert!(state.gates.is_empty());
    }

    #[test]
    fn test_game_over_activate_starts_a_fresh_run() {
        let mut state = GameState::new(4);
        tick(&mut state, &activate());
        state.score.score = 9;
        state.gates.push(parked_gate(300.0, 449.0, 200.0, GameColor::Blue));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &activate());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.score, 0);
        assert_eq!(state.score.high_score, 9);
        assert!(state.gates.is_empty());
        assert_eq!(state.difficulty.spawn_interval, BASE_SPAWN_INTERVAL);
    }

    #[test]
    fn test_full_run_emits_events_in_order() {
        let mut state = GameState::new(5);
        tick(&mut state, &activate());
        let mut events = state.drain_events();

        // One matching gate entering the band, then an uncontained one
        state.gates.push(parked_gate(300.0, 449.0, 200.0, GameColor::Red));
        tick(&mut state, &TickInput::default());
        events.extend(state.drain_events());

        state.gates.push(parked_gate(0.0, 501.0, 50.0, GameColor::Red));
        tick(&mut state, &TickInput::default());
        events.extend(state.drain_events());

        match events.as_slice() {
            [
                GameEvent::RunStarted,
                GameEvent::GatePassed { score: 1, combo: 1 },
                GameEvent::RunEnded {
                    score: 1,
                    beat_high_score: true,
                    ..
                },
            ] => {}
            other => panic!("unexpected event sequence: {other:?}"),
        }
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_determinism_same_seed_same_script() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        for i in 0..3000u64 {
            // Periodic activates: start, cycle mid-run, restart after deaths
            let input = TickInput {
                activate: i % 97 == 0,
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
            assert_eq!(a.phase, b.phase);
            assert_eq!(a.score.score, b.score.score);
            assert_eq!(a.drain_events(), b.drain_events());
        }
        assert_eq!(a.difficulty.elapsed_ticks, b.difficulty.elapsed_ticks);
        assert_eq!(a.gates.len(), b.gates.len());
        assert_eq!(a.particles.len(), b.particles.len());
    }
}
