use super::EntityId;
use crate::config::EXPLOSION_FRAMES;
use crate::geometry::Point;
use crate::timers;

/// Explosion size class, picked by what caused it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionSize {
    /// Enemy shot down
    Small,
    /// Enemy rammed the player
    Tiny,
}

impl ExplosionSize {
    pub fn pixels(&self) -> i32 {
        match self {
            ExplosionSize::Small => 30,
            ExplosionSize::Tiny => 10,
        }
    }
}

/// Frame-by-frame explosion animation anchored on a fixed center
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: EntityId,
    pub center: Point,
    pub frame: usize,
    pub size: ExplosionSize,
    pub last_frame: u64,
}

impl Explosion {
    pub fn new(center: Point, size: ExplosionSize, now: u64) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            center,
            frame: 0,
            size,
            last_frame: now,
        }
    }

    pub fn advance(&mut self, now: u64) {
        if !self.is_expired() && timers::explosion_frame_due(self.last_frame, now) {
            self.last_frame = now;
            self.frame += 1;
        }
    }

    /// Past the last frame
    pub fn is_expired(&self) -> bool {
        self.frame >= EXPLOSION_FRAMES
    }
}
