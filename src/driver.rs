//! Frame driver: owns the world and turns commands and wall time into ticks.
//!
//! Kept free of terminal I/O so the whole play loop can be exercised in tests.

use crate::config::tick_duration;
use crate::input::{Command, FlapLatch};
use crate::sim::{self, StepReport};
use crate::timestep::FixedTimestep;
use crate::world::WorldState;
use log::info;
use rand::Rng;
use std::time::Duration;

const MAX_TICKS_PER_FRAME: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Driver<R: Rng> {
    pub world: WorldState,
    /// Number of the last tick run. The first tick of a run is 1.
    frame: u64,
    latch: FlapLatch,
    timestep: FixedTimestep,
    rng: R,
}

impl<R: Rng> Driver<R> {
    pub fn new(rng: R) -> Self {
        Self {
            world: WorldState::new(),
            frame: 0,
            latch: FlapLatch::default(),
            timestep: FixedTimestep::new(tick_duration(), MAX_TICKS_PER_FRAME),
            rng,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn handle(&mut self, cmd: Command) -> Control {
        match cmd {
            Command::Flap => {
                if !self.world.game_over {
                    self.latch.press();
                }
            }
            Command::Restart => {
                if self.world.game_over {
                    info!("restart after score {}", self.world.score);
                    self.restart();
                }
            }
            Command::Quit => return Control::Quit,
        }
        Control::Continue
    }

    fn restart(&mut self) {
        self.world.reset();
        self.frame = 0;
        self.latch.clear();
        self.timestep.reset();
    }

    /// Run exactly one tick with whatever flap is latched.
    pub fn tick(&mut self) -> StepReport {
        self.frame += 1;
        let flap = self.latch.take();
        sim::step(&mut self.world, self.frame, flap, &mut self.rng)
    }

    /// Spend `elapsed` wall time on as many fixed ticks as are due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<StepReport> {
        let due = self.timestep.advance(elapsed);
        (0..due).map(|_| self.tick()).collect()
    }
}
