//! Gate judgement
//!
//! A gate is judged while its top edge is inside the band around the
//! player's row. Passing requires the whole orb inside the gap
//! horizontally plus a color match; drifting below the player without
//! ever being contained is a miss.

use glam::Vec2;

use crate::consts::*;
use crate::sim::state::{GameEvent, GameState, Gate, Player};
use crate::sim::{particles, scoring};

/// Outcome of judging one gate against the player on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not resolved this tick; checked again next tick
    Pending,
    /// Contained and color-matched
    Success,
    /// Contained but the colors differ; ends the run
    WrongColor,
    /// Never contained and now past the player; ends the run
    Missed,
}

impl Verdict {
    pub fn is_terminal(self) -> bool {
        matches!(self, Verdict::WrongColor | Verdict::Missed)
    }
}

/// Judge a single unpassed gate against the player.
///
/// The band test is an open interval on the gate's top edge; containment is
/// inclusive, so an exact-fit gap counts. Both checks are ordered the same
/// way every tick, which makes the first resolving tick well defined.
pub fn judge(gate: &Gate, player: &Player) -> Verdict {
    let in_band = gate.pos.y > player.pos.y - JUDGEMENT_BAND
        && gate.pos.y < player.pos.y + JUDGEMENT_BAND;
    if !in_band {
        return Verdict::Pending;
    }

    let contained =
        player.pos.x - player.radius >= gate.left() && player.pos.x + player.radius <= gate.right();
    if contained {
        if gate.color == player.color {
            Verdict::Success
        } else {
            Verdict::WrongColor
        }
    } else if gate.pos.y > player.pos.y {
        Verdict::Missed
    } else {
        Verdict::Pending
    }
}

/// Judge every unpassed gate in spawn order. Successes are scored and burst
/// immediately; the pass stops at the first terminal verdict, which the
/// caller turns into a game over.
pub fn resolve_gates(state: &mut GameState) -> Option<Verdict> {
    for i in 0..state.gates.len() {
        if state.gates[i].passed {
            continue;
        }
        match judge(&state.gates[i], &state.player) {
            Verdict::Success => {
                state.gates[i].passed = true;
                let origin = Vec2::new(state.gates[i].center_x(), state.gates[i].pos.y);
                let color = state.gates[i].color;
                scoring::apply_gate_success(&mut state.score);
                particles::spawn_burst(
                    &mut state.particles,
                    origin,
                    color,
                    BURST_COUNT,
                    &mut state.rng,
                );
                state.push_event(GameEvent::GatePassed {
                    score: state.score.score,
                    combo: state.score.combo,
                });
            }
            v @ (Verdict::WrongColor | Verdict::Missed) => return Some(v),
            Verdict::Pending => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameColor;

    fn gate(x: f32, y: f32, width: f32, color: GameColor) -> Gate {
        Gate {
            pos: Vec2::new(x, y),
            width,
            height: GATE_HEIGHT,
            color,
            passed: false,
        }
    }

    fn player(color: GameColor) -> Player {
        Player {
            color,
            ..Player::default()
        }
    }

    #[test]
    fn test_matched_and_contained_gate_passes() {
        // Orb spans [370, 430]; gap spans [325, 475]
        let verdict = judge(&gate(325.0, 470.0, 150.0, GameColor::Red), &player(GameColor::Red));
        assert_eq!(verdict, Verdict::Success);
    }

    #[test]
    fn test_wrong_color_inside_the_gap_is_terminal() {
        let verdict = judge(&gate(325.0, 470.0, 150.0, GameColor::Blue), &player(GameColor::Red));
        assert_eq!(verdict, Verdict::WrongColor);
        assert!(verdict.is_terminal());
    }

    #[test]
    fn test_partial_overlap_is_not_containment() {
        // Gap spans [390, 510]; orb left edge 370 pokes out
        let g = gate(390.0, 470.0, 120.0, GameColor::Red);
        assert_eq!(judge(&g, &player(GameColor::Red)), Verdict::Pending);

        // Same gate below the player row becomes a miss
        let g = gate(390.0, 510.0, 120.0, GameColor::Red);
        assert_eq!(judge(&g, &player(GameColor::Red)), Verdict::Missed);
    }

    #[test]
    fn test_gate_far_to_the_side_misses_once_past_the_player() {
        let above = gate(600.0, 480.0, 120.0, GameColor::Red);
        assert_eq!(judge(&above, &player(GameColor::Red)), Verdict::Pending);

        let below = gate(600.0, 510.0, 120.0, GameColor::Red);
        assert_eq!(judge(&below, &player(GameColor::Red)), Verdict::Missed);
    }

    #[test]
    fn test_band_edges_are_exclusive() {
        let p = player(GameColor::Red);
        // Top edge exactly on either band boundary is not judged that tick
        assert_eq!(judge(&gate(325.0, 450.0, 150.0, GameColor::Red), &p), Verdict::Pending);
        assert_eq!(judge(&gate(325.0, 550.0, 150.0, GameColor::Red), &p), Verdict::Pending);
        // Just inside resolves
        assert_eq!(judge(&gate(325.0, 450.5, 150.0, GameColor::Red), &p), Verdict::Success);
    }

    #[test]
    fn test_containment_is_inclusive_at_exact_fit() {
        // Gap [370, 430] exactly matches the orb span
        let verdict = judge(&gate(370.0, 470.0, 60.0, GameColor::Red), &player(GameColor::Red));
        assert_eq!(verdict, Verdict::Success);
    }

    #[test]
    fn test_success_scores_bursts_and_flags_the_gate() {
        let mut state = GameState::new(8);
        state.start_run();
        state.drain_events();
        state.gates.push(gate(325.0, 470.0, 150.0, GameColor::Red));

        assert_eq!(resolve_gates(&mut state), None);
        assert!(state.gates[0].passed);
        assert_eq!(state.score.score, 1);
        assert_eq!(state.score.combo, 1);
        assert_eq!(state.particles.len(), BURST_COUNT);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GatePassed { score: 1, combo: 1 }]
        );
    }

    #[test]
    fn test_passed_gates_are_never_rejudged() {
        let mut state = GameState::new(8);
        state.start_run();
        state.drain_events();
        // Wrong color, but already scored on an earlier tick
        let mut g = gate(325.0, 470.0, 150.0, GameColor::Blue);
        g.passed = true;
        state.gates.push(g);

        assert_eq!(resolve_gates(&mut state), None);
        assert_eq!(state.score.score, 0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_terminal_verdict_stops_the_pass() {
        let mut state = GameState::new(8);
        state.start_run();
        state.drain_events();
        state.gates.push(gate(325.0, 470.0, 150.0, GameColor::Yellow));

        assert_eq!(resolve_gates(&mut state), Some(Verdict::WrongColor));
        assert_eq!(state.score.score, 0);
        assert!(state.particles.is_empty());
        assert!(!state.gates[0].passed);
    }
}
