use super::EntityId;
use crate::config::{POWERUP_SPEED, SCREEN_HEIGHT};
use crate::geometry::{Bounds, Point};
use crate::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Shield,
    Power,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 2] = [PowerupKind::Shield, PowerupKind::Power];

    pub fn random(rng: &mut dyn RandomSource) -> Self {
        Self::ALL[rng.range(0, Self::ALL.len() as i32) as usize]
    }
}

#[derive(Debug, Clone)]
pub struct Powerup {
    pub id: EntityId,
    pub bounds: Bounds,
    pub speed_y: i32,
    pub kind: PowerupKind,
}

impl Powerup {
    pub fn new(center: Point, size: (i32, i32), kind: PowerupKind) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            bounds: Bounds::centered_on(center, size.0, size.1),
            speed_y: POWERUP_SPEED,
            kind,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn advance(&mut self) {
        self.bounds.y += self.speed_y;
    }

    /// Fully below the bottom of the screen
    pub fn is_expired(&self) -> bool {
        self.bounds.top() > SCREEN_HEIGHT
    }
}
