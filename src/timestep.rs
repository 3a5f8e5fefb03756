//! Fixed-timestep accumulator.
//!
//! Physics is integrated per tick without delta-time scaling, so the driver
//! must run ticks at a constant rate no matter how long a terminal frame
//! takes. Wall time is accumulated and spent in whole ticks.

use std::time::Duration;

/// Longest frame the accumulator will account for (e.g. after a suspend).
const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    tick: Duration,
    accumulated: Duration,
    max_ticks_per_frame: u32,
}

impl FixedTimestep {
    pub fn new(tick: Duration, max_ticks_per_frame: u32) -> Self {
        Self {
            tick,
            accumulated: Duration::ZERO,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
        }
    }

    /// Add elapsed wall time and return how many ticks are now due.
    ///
    /// Leftover time carries into the next call. When more ticks are due than
    /// the per-frame cap the surplus is dropped rather than replayed later.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed.min(MAX_FRAME_TIME);

        let mut due = 0;
        while self.accumulated >= self.tick && due < self.max_ticks_per_frame {
            self.accumulated -= self.tick;
            due += 1;
        }
        if due == self.max_ticks_per_frame && self.accumulated >= self.tick {
            self.accumulated = Duration::ZERO;
        }
        due
    }

    /// Forget any partial tick, e.g. after a restart.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut ts = FixedTimestep::new(ms(16), 5);
        assert_eq!(ts.advance(ms(10)), 0);
        assert_eq!(ts.advance(ms(10)), 1);
        // 4ms carried over
        assert_eq!(ts.advance(ms(12)), 1);
        assert_eq!(ts.advance(ms(1)), 0);
    }

    #[test]
    fn test_long_frame_runs_several_ticks() {
        let mut ts = FixedTimestep::new(ms(16), 5);
        assert_eq!(ts.advance(ms(50)), 3);
        // 2ms left over
        assert_eq!(ts.advance(ms(14)), 1);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut ts = FixedTimestep::new(ms(10), 3);
        assert_eq!(ts.advance(ms(95)), 3);
        // Surplus was dropped
        assert_eq!(ts.advance(ms(5)), 0);
    }

    #[test]
    fn test_huge_frame_clamped() {
        let mut ts = FixedTimestep::new(ms(10), 100);
        assert_eq!(ts.advance(Duration::from_secs(30)), 10);
    }

    #[test]
    fn test_reset_drops_partial_tick() {
        let mut ts = FixedTimestep::new(ms(16), 5);
        ts.advance(ms(15));
        ts.reset();
        assert_eq!(ts.advance(ms(15)), 0);
    }
}
