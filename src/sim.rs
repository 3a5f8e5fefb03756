//! Per-tick game update.
//!
//! [`step`] is the only function that advances the game. The frame driver
//! calls it exactly once per fixed tick with the latched flap input.

use crate::config::SPAWN_INTERVAL;
use crate::world::{Pipe, WorldState};
use log::{debug, info, trace};
use rand::Rng;

/// What ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crash {
    Ground,
    Pipe,
}

/// What happened during one tick. Purely informational (sound, logging).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub flapped: bool,
    pub spawned: bool,
    /// Points gained this tick.
    pub scored: u32,
    /// Pipes retired this tick.
    pub removed: usize,
    /// Set on the tick that moved the game to game over.
    pub crash: Option<Crash>,
}

/// Advance the world by one tick.
///
/// `frame` is the driver's monotonically increasing tick counter and decides
/// spawn timing. Once `world.game_over` is set this is a no-op. The tick on
/// which the bird crashes still runs to completion, so pipes move and can
/// score on that same tick.
pub fn step<R: Rng>(world: &mut WorldState, frame: u64, flap: bool, rng: &mut R) -> StepReport {
    let mut report = StepReport::default();
    if world.game_over {
        return report;
    }

    if flap {
        world.bird.flap();
        report.flapped = true;
    }

    world.bird.integrate();
    if world.bird.land() {
        world.game_over = true;
        report.crash = Some(Crash::Ground);
    }

    world.bird.animate();

    if frame % SPAWN_INTERVAL == 0 {
        let pipe = Pipe::spawn(rng);
        debug!("frame {frame}: spawned pipe with gap at {:.1}", pipe.gap_top);
        world.pipes.push(pipe);
        report.spawned = true;
    }

    // Walk backwards so removal never skips the next pipe.
    let bird_x = world.bird.x;
    for i in (0..world.pipes.len()).rev() {
        let pipe = &mut world.pipes[i];
        pipe.advance();

        if pipe.hits(&world.bird.rect()) {
            if !world.game_over {
                report.crash = Some(Crash::Pipe);
            }
            world.game_over = true;
        }

        if bird_x > pipe.x && !pipe.scored {
            pipe.scored = true;
            world.score += 1;
            report.scored += 1;
            debug!("frame {frame}: score {}", world.score);
        }

        if pipe.is_offscreen() {
            world.pipes.remove(i);
            report.removed += 1;
        }
    }

    if let Some(crash) = report.crash {
        info!("game over at frame {frame}: {crash:?}, score {}", world.score);
    }
    trace!(
        "frame {frame}: y={:.2} v={:.2} pipes={}",
        world.bird.y,
        world.bird.velocity,
        world.pipes.len()
    );

    report
}
