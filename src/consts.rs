//! Shared numeric constants.

use std::f64::consts::PI;

// ── Curve ───────────────────────────────────────────────────────

/// Total angular travel mapped across the full scroll range (300 turns of the
/// primary arm).
pub const MAX_THETA: f64 = 600.0 * PI;

/// Angular step between polyline vertices, in radians.
pub const THETA_STEP: f64 = 0.03;

/// Rotation rate of the second arm relative to the first.
pub const SECOND_ARM_RATE: f64 = PI;

/// Maximum reach of the two unit arms.
pub const CURVE_REACH: f64 = 2.0;

// ── Layout ──────────────────────────────────────────────────────

/// Canvas edge as a fraction of the smaller viewport dimension.
pub const CANVAS_VIEWPORT_FRACTION: f64 = 0.85;

/// Pixels per curve unit as a fraction of the half canvas. `0.45 * 2` keeps
/// the curve inside 90% of the half-width.
pub const SCALE_FRACTION: f64 = 0.45;

/// Glyph font size as a fraction of the canvas edge.
pub const GLYPH_FONT_FRACTION: f64 = 0.15;

// ── Fades ───────────────────────────────────────────────────────

/// Glyph fade: `1 - (GLYPH_FADE_RATE * p)^GLYPH_FADE_EXPONENT`.
pub const GLYPH_FADE_RATE: f64 = 12.0;
pub const GLYPH_FADE_EXPONENT: f64 = 1.5;

/// Opacity at or below which the glyph is not drawn.
pub const GLYPH_VISIBLE_THRESHOLD: f64 = 0.01;

/// Scroll hint fade: `1 - HINT_FADE_RATE * p`.
pub const HINT_FADE_RATE: f64 = 15.0;

// ── Strokes ─────────────────────────────────────────────────────

pub const TRAIL_ALPHA: f64 = 0.4;
pub const TRAIL_WIDTH: f64 = 1.5;
pub const BOUNDARY_WIDTH: f64 = 1.0;
pub const ARM_WIDTH: f64 = 2.0;

pub const HUB_RADIUS: f64 = 2.5;
pub const JOINT_RADIUS: f64 = 3.0;
pub const PEN_RADIUS: f64 = 5.0;
pub const PEN_GLOW_BLUR: f64 = 15.0;

// ── Menu ────────────────────────────────────────────────────────

/// Delay between revealed characters, in milliseconds.
pub const REVEAL_INTERVAL_MS: u32 = 25;
