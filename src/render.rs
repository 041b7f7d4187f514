//! Canvas 2D rendering
//!
//! Draws the scene in logical 800x600 coordinates; CSS scaling maps the
//! canvas to the display size chosen by the viewport mapper. Draw errors
//! are swallowed so a misbehaving canvas can never take down the loop.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::sim::{GamePhase, GameState};
use crate::viewport::ViewportConfig;

/// Renders the full scene for whichever phase the game is in
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    viewport: ViewportConfig,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, viewport: ViewportConfig) -> Self {
        Self { ctx, viewport }
    }

    /// Adopt a new display mapping after a resize
    pub fn set_viewport(&mut self, viewport: ViewportConfig) {
        self.viewport = viewport;
    }

    /// Draw one frame
    pub fn render(&self, state: &GameState) {
        self.ctx.set_fill_style_str("#000000");
        self.ctx
            .fill_rect(0.0, 0.0, LOGICAL_WIDTH as f64, LOGICAL_HEIGHT as f64);

        match state.phase {
            GamePhase::Playing => {
                self.draw_tunnel(state);
                self.draw_gates(state);
                self.draw_particles(state);
                self.draw_player(state);
                self.draw_hud(state);
            }
            GamePhase::Menu => self.draw_menu(),
            GamePhase::GameOver => self.draw_game_over(state),
        }
    }

    /// Perspective grid; horizontal lines scroll with the gate speed
    fn draw_tunnel(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str("#1A1A2E");
        ctx.set_line_width(1.0);

        // Vertical lines converging on the bottom center
        for i in 0..6 {
            let x = 150.0 + i as f64 * 100.0;
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(400.0, 600.0);
            ctx.stroke();
        }

        // Horizontal lines scrolling downward
        let ticks = state.difficulty.elapsed_ticks as f64;
        let offset = (ticks * state.difficulty.speed as f64 * 0.5) % 60.0;
        for i in 0..10 {
            let y = i as f64 * 60.0;
            ctx.begin_path();
            ctx.move_to(150.0, y - offset);
            ctx.line_to(650.0, y - offset);
            ctx.stroke();
        }
    }

    fn draw_gates(&self, state: &GameState) {
        let ctx = &self.ctx;
        for gate in &state.gates {
            // Glow pad around the body
            ctx.set_fill_style_str(&format!("{}40", gate.color.hex()));
            ctx.fill_rect(
                (gate.pos.x - 20.0) as f64,
                (gate.pos.y - 20.0) as f64,
                (gate.width + 40.0) as f64,
                (gate.height + 40.0) as f64,
            );

            ctx.set_fill_style_str(gate.color.hex());
            ctx.fill_rect(
                gate.pos.x as f64,
                gate.pos.y as f64,
                gate.width as f64,
                gate.height as f64,
            );
        }
    }

    fn draw_particles(&self, state: &GameState) {
        let ctx = &self.ctx;
        for particle in &state.particles {
            let alpha = (particle.life as f32 / PARTICLE_LIFE_TICKS as f32 * 255.0) as u8;
            ctx.begin_path();
            let _ = ctx.arc(particle.pos.x as f64, particle.pos.y as f64, 3.0, 0.0, TAU);
            ctx.set_fill_style_str(&format!("{}{alpha:02x}", particle.color.hex()));
            ctx.fill();
        }
    }

    fn draw_player(&self, state: &GameState) {
        let ctx = &self.ctx;
        let x = state.player.pos.x as f64;
        let y = state.player.pos.y as f64;
        let radius = state.player.radius as f64;
        let hex = state.player.color.hex();

        // Outer glow
        if let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, radius * 2.0) {
            let _ = gradient.add_color_stop(0.0, &format!("{hex}80"));
            let _ = gradient.add_color_stop(0.5, &format!("{hex}40"));
            let _ = gradient.add_color_stop(1.0, &format!("{hex}00"));
            ctx.set_fill_style_canvas_gradient(&gradient);
            ctx.fill_rect(
                x - radius * 2.0,
                y - radius * 2.0,
                radius * 4.0,
                radius * 4.0,
            );
        }

        // Main orb
        ctx.begin_path();
        let _ = ctx.arc(x, y, radius, 0.0, TAU);
        ctx.set_fill_style_str(hex);
        ctx.fill();

        // Inner highlight
        ctx.begin_path();
        let _ = ctx.arc(x - 8.0, y - 8.0, radius * 0.4, 0.0, TAU);
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.6)");
        ctx.fill();

        // Pulsing ring
        let pulse = (state.difficulty.elapsed_ticks as f64 * 0.1).sin() * 5.0;
        ctx.begin_path();
        let _ = ctx.arc(x, y, radius + 10.0 + pulse, 0.0, TAU);
        ctx.set_stroke_style_str(hex);
        ctx.set_line_width(3.0);
        ctx.stroke();
    }

    fn draw_hud(&self, state: &GameState) {
        let ctx = &self.ctx;
        let hud = self.viewport.hud_font;

        // Score, top left
        ctx.set_font(&format!("bold {hud}px Arial"));
        ctx.set_fill_style_str("#FFFFFF");
        ctx.set_shadow_color("#FFFFFF");
        ctx.set_shadow_blur(10.0);
        let _ = ctx.fill_text(&state.score.score.to_string(), 20.0, 50.0);

        // Multiplier, top right
        if state.score.multiplier > 1.0 {
            ctx.set_font(&format!("bold {}px Arial", hud * 0.75));
            ctx.set_fill_style_str("#FFE000");
            let x = if self.viewport.mobile { 750.0 } else { 720.0 };
            let _ = ctx.fill_text(&format!("x{:.1}", state.score.multiplier), x, 50.0);
        }

        // Current color label, bottom center
        ctx.set_font(&format!("bold {}px Arial", hud * 0.5));
        ctx.set_fill_style_str(state.player.color.hex());
        ctx.set_text_align("center");
        let _ = ctx.fill_text(state.player.color.label(), 400.0, 580.0);
        ctx.set_text_align("left");

        ctx.set_shadow_blur(0.0);
    }

    fn draw_menu(&self) {
        let ctx = &self.ctx;
        let menu = self.viewport.menu_font;

        ctx.set_font(&format!("bold {menu}px Arial"));
        ctx.set_fill_style_str("#FFFFFF");
        ctx.set_text_align("center");
        ctx.set_shadow_color("#00F0FF");
        ctx.set_shadow_blur(20.0);
        let _ = ctx.fill_text("TAP TO START", 400.0, 300.0);

        ctx.set_font(&format!("{}px Arial", menu * 0.35));
        ctx.set_fill_style_str("#AAAAAA");
        ctx.set_shadow_blur(0.0);
        let _ = ctx.fill_text("Match your color to the gates", 400.0, 340.0);

        if self.viewport.mobile {
            ctx.set_font(&format!("{}px Arial", menu * 0.3));
            ctx.set_fill_style_str("#666666");
            let _ = ctx.fill_text("Tap anywhere to change color", 400.0, 380.0);
        }

        ctx.set_text_align("left");
    }

    fn draw_game_over(&self, state: &GameState) {
        let ctx = &self.ctx;
        let go = self.viewport.game_over_font;

        // Dim overlay
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
        ctx.fill_rect(0.0, 0.0, LOGICAL_WIDTH as f64, LOGICAL_HEIGHT as f64);

        ctx.set_font(&format!("bold {}px Arial", go * 0.7));
        ctx.set_fill_style_str("#FF0040");
        ctx.set_text_align("center");
        ctx.set_shadow_color("#FF0040");
        ctx.set_shadow_blur(20.0);
        let _ = ctx.fill_text("GAME OVER", 400.0, 200.0);

        ctx.set_font(&format!("bold {go}px Arial"));
        ctx.set_fill_style_str("#FFFFFF");
        ctx.set_shadow_blur(10.0);
        let _ = ctx.fill_text(&state.score.score.to_string(), 400.0, 280.0);

        ctx.set_font(&format!("{}px Arial", go * 0.4));
        ctx.set_fill_style_str("#AAAAAA");
        ctx.set_shadow_blur(0.0);
        let _ = ctx.fill_text(
            &format!("High Score: {}", state.score.high_score),
            400.0,
            320.0,
        );

        // Tick count holds still after game over, so the prompt alpha is steady
        ctx.set_font(&format!("bold {}px Arial", go * 0.5));
        ctx.set_fill_style_str("#00F0FF");
        ctx.set_shadow_color("#00F0FF");
        ctx.set_shadow_blur(15.0);
        let pulse = 0.7 + (state.difficulty.elapsed_ticks as f64 * 0.1).sin() * 0.3;
        ctx.set_global_alpha(pulse);
        let _ = ctx.fill_text("TAP TO RETRY", 400.0, 400.0);
        ctx.set_global_alpha(1.0);

        ctx.set_text_align("left");
        ctx.set_shadow_blur(0.0);
    }
}
