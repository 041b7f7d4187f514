//! Viewport mapping
//!
//! The arena is a fixed 800x600 logical space. The canvas keeps that internal
//! resolution forever; only its CSS size changes, so gameplay arithmetic never
//! sees the real screen. `resolve` is pure, which keeps the fitting rules
//! testable without a DOM.

use crate::consts::*;

/// Coarse device bucket, classified from the fitted display width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Tablet,
    LargeMobile,
    SmallMobile,
}

impl DeviceClass {
    /// Classify from the fitted display width (CSS px)
    pub fn from_display_width(width: f32) -> Self {
        if width >= 1024.0 {
            DeviceClass::Desktop
        } else if width >= 768.0 {
            DeviceClass::Tablet
        } else if width >= 480.0 {
            DeviceClass::LargeMobile
        } else {
            DeviceClass::SmallMobile
        }
    }

    /// Player orb radius in logical units
    pub fn player_radius(self) -> f32 {
        match self {
            DeviceClass::Desktop => 30.0,
            DeviceClass::Tablet => 28.0,
            DeviceClass::LargeMobile => 26.0,
            DeviceClass::SmallMobile => 24.0,
        }
    }

    /// (hud, menu, game over) font sizes in logical px
    pub fn font_sizes(self) -> (f32, f32, f32) {
        match self {
            DeviceClass::Desktop => (40.0, 60.0, 60.0),
            DeviceClass::Tablet => (36.0, 52.0, 56.0),
            DeviceClass::LargeMobile => (32.0, 48.0, 52.0),
            DeviceClass::SmallMobile => (28.0, 42.0, 48.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceClass::Desktop => "desktop",
            DeviceClass::Tablet => "tablet",
            DeviceClass::LargeMobile => "large-mobile",
            DeviceClass::SmallMobile => "small-mobile",
        }
    }
}

/// Result of fitting the logical arena into a container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// CSS size of the canvas element
    pub display_width: f32,
    pub display_height: f32,
    pub device_class: DeviceClass,
    /// Compact HUD layout below the tablet threshold
    pub mobile: bool,
    /// Player orb radius in logical units for this class
    pub player_radius: f32,
    /// Font sizes in logical px
    pub hud_font: f32,
    pub menu_font: f32,
    pub game_over_font: f32,
}

/// Fit the logical arena into a container: width-first, height fallback,
/// then clamp each axis to min(98% of the container, 1.5x logical),
/// re-deriving the other axis so 4:3 is preserved.
pub fn resolve(container_width: f32, container_height: f32) -> ViewportConfig {
    // Degenerate containers (zero, negative, non-finite) act as 1px
    let cw = sanitize(container_width);
    let ch = sanitize(container_height);

    let aspect = LOGICAL_WIDTH / LOGICAL_HEIGHT;

    let mut display_width = cw;
    let mut display_height = display_width / aspect;
    if display_height > ch {
        display_height = ch;
        display_width = display_height * aspect;
    }

    let max_width = (cw * 0.98).min(LOGICAL_WIDTH * 1.5);
    let max_height = (ch * 0.98).min(LOGICAL_HEIGHT * 1.5);
    if display_width > max_width {
        display_width = max_width;
        display_height = display_width / aspect;
    }
    if display_height > max_height {
        display_height = max_height;
        display_width = display_height * aspect;
    }

    let device_class = DeviceClass::from_display_width(display_width);
    let (hud_font, menu_font, game_over_font) = device_class.font_sizes();
    ViewportConfig {
        display_width,
        display_height,
        device_class,
        mobile: display_width < 768.0,
        player_radius: device_class.player_radius(),
        hud_font,
        menu_font,
        game_over_font,
    }
}

fn sanitize(dim: f32) -> f32 {
    if dim.is_finite() && dim > 0.0 { dim } else { 1.0 }
}
