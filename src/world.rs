//! World state: the bird, the live pipes, score and the game-over flag.
//!
//! These are plain data plus small helpers. The per-tick rules live in
//! [`crate::sim`]; the renderer only ever reads from here.

use crate::config::*;
use crate::geom::Rect;
use rand::Rng;

/// The player. `x`/`y` is the centre of its collision box.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    /// Positive is downward.
    pub velocity: f32,
    /// Sprite pose, 0..ANIM_FRAMES. Not used by physics.
    pub anim_frame: u8,
    pub anim_timer: u32,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            x: BIRD_X,
            y: BIRD_START_Y,
            velocity: 0.0,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    /// Hard velocity reset, not an impulse.
    pub fn flap(&mut self) {
        self.velocity = FLAP_VELOCITY;
    }

    /// One explicit Euler step at the fixed tick rate.
    pub fn integrate(&mut self) {
        self.velocity += GRAVITY;
        self.y += self.velocity;
    }

    /// Clamps the bird onto the ground. Returns true if it had sunk into it.
    pub fn land(&mut self) -> bool {
        if self.y > BIRD_FLOOR_Y {
            self.y = BIRD_FLOOR_Y;
            true
        } else {
            false
        }
    }

    pub fn animate(&mut self) {
        self.anim_timer += 1;
        if self.anim_timer >= ANIM_INTERVAL {
            self.anim_frame = (self.anim_frame + 1) % ANIM_FRAMES;
            self.anim_timer = 0;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x - BIRD_WIDTH / 2.0,
            self.y - BIRD_HEIGHT / 2.0,
            BIRD_WIDTH,
            BIRD_HEIGHT,
        )
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// One upper + lower pipe pair. `x` is the pair's vertical centre line.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub x: f32,
    /// Bottom edge of the upper segment.
    pub gap_top: f32,
    /// Top edge of the lower segment.
    pub gap_bottom: f32,
    pub scored: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            gap_top,
            gap_bottom: gap_top + GAP_HEIGHT,
            scored: false,
        }
    }

    /// A fresh pipe at the right edge with a uniformly random gap.
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        Self::new(FIELD_WIDTH, rng.gen_range(GAP_TOP_MIN..GAP_TOP_MAX))
    }

    pub fn advance(&mut self) {
        self.x -= PIPE_SPEED;
    }

    pub fn left(&self) -> f32 {
        self.x - PIPE_WIDTH / 2.0
    }

    pub fn upper_rect(&self) -> Rect {
        Rect::new(self.left(), 0.0, PIPE_WIDTH, self.gap_top)
    }

    pub fn lower_rect(&self) -> Rect {
        Rect::new(
            self.left(),
            self.gap_bottom,
            PIPE_WIDTH,
            GROUND_Y - self.gap_bottom,
        )
    }

    pub fn hits(&self, bird: &Rect) -> bool {
        bird.overlaps(&self.upper_rect()) || bird.overlaps(&self.lower_rect())
    }

    pub fn is_offscreen(&self) -> bool {
        self.x < -PIPE_WIDTH
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Everything the simulation mutates. Owned by the frame driver.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    pub bird: Bird,
    /// Spawn order, which is also left-to-right order.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub game_over: bool,
}

impl WorldState {
    pub fn new() -> Self {
        Self {
            bird: Bird::new(),
            pipes: Vec::new(),
            score: 0,
            game_over: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else {
            Phase::Playing
        }
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}
