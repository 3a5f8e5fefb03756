//! Fixed gameplay constants.
//!
//! All distances are in play-field units (the classic 288×512 canvas), all
//! rates are per tick. Nothing here is runtime-configurable: physics is
//! integrated without delta-time scaling, so changing the tick rate changes
//! how the game feels.

use std::time::Duration;

// ── Play field ──────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: f32 = 288.0;
pub const FIELD_HEIGHT: f32 = 512.0;
/// Top of the ground strip.
pub const GROUND_Y: f32 = 400.0;

// ── Bird ────────────────────────────────────────────────────────────────────

pub const BIRD_X: f32 = 50.0;
pub const BIRD_START_Y: f32 = FIELD_HEIGHT / 2.0;
pub const BIRD_WIDTH: f32 = 34.0;
pub const BIRD_HEIGHT: f32 = 24.0;
/// Lowest centre position the bird can reach before touching the ground.
pub const BIRD_FLOOR_Y: f32 = GROUND_Y - BIRD_HEIGHT / 2.0;

pub const GRAVITY: f32 = 0.5;
/// Velocity set (not added) by a flap. Negative is upward.
pub const FLAP_VELOCITY: f32 = -5.0;

pub const ANIM_INTERVAL: u32 = 5;
pub const ANIM_FRAMES: u8 = 4;

// ── Pipes ───────────────────────────────────────────────────────────────────

pub const PIPE_WIDTH: f32 = 52.0;
pub const PIPE_SPEED: f32 = 2.0;
pub const GAP_HEIGHT: f32 = 100.0;
/// Half-open range the gap top is drawn from.
pub const GAP_TOP_MIN: f32 = 100.0;
pub const GAP_TOP_MAX: f32 = 300.0;
pub const SPAWN_INTERVAL: u64 = 100;

// ── Timing ──────────────────────────────────────────────────────────────────

pub const TICKS_PER_SECOND: u32 = 60;

pub const fn tick_duration() -> Duration {
    Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64)
}
