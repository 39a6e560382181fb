use std::time::{Duration, Instant};

use crate::config::FPS;

/// Monotonic time and tick pacing for the game loop
pub trait Clock {
    /// Milliseconds since the clock was created
    fn now_ms(&self) -> u64;

    /// Blocks until the next tick is due, capping the loop at [`FPS`]
    fn wait_for_tick(&mut self);

    /// Blocks for a fixed duration (the game-over screen)
    fn hold(&mut self, ms: u64);
}

/// Wall clock backed by [`Instant`]
pub struct SystemClock {
    start: Instant,
    last_tick: Instant,
    tick: Duration,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            tick: Duration::from_secs(1) / FPS,
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn wait_for_tick(&mut self) {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.tick {
            std::thread::sleep(self.tick - elapsed);
        }
        self.last_tick = Instant::now();
    }

    fn hold(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Deterministic clock that only moves when told to.
///
/// `wait_for_tick` advances by exactly one tick (1/60 s, tracked in microseconds so
/// sixty ticks add up to a full second).
#[derive(Debug, Default)]
pub struct ManualClock {
    now_us: u64,
}

impl ManualClock {
    pub const TICK_US: u64 = 1_000_000 / FPS as u64;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u64) -> Self {
        Self {
            now_us: ms * 1000,
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_us += ms * 1000;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_us / 1000
    }

    fn wait_for_tick(&mut self) {
        self.now_us += Self::TICK_US;
    }

    fn hold(&mut self, ms: u64) {
        self.advance(ms);
    }
}
