use super::EntityId;
use crate::config::BULLET_SPEED;
use crate::geometry::{Bounds, Point};

#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: EntityId,
    pub bounds: Bounds,
    pub speed_y: i32,
}

impl Bullet {
    /// Bullet centred on `origin.x` with its bottom edge at `origin.y`.
    ///
    /// The id is assigned when the world takes ownership.
    pub fn new(origin: Point, size: (i32, i32)) -> Self {
        let mut bounds = Bounds::new(0, 0, size.0, size.1);
        bounds.set_center_x(origin.x);
        bounds.set_bottom(origin.y);
        Self {
            id: EntityId::UNASSIGNED,
            bounds,
            speed_y: -BULLET_SPEED,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn advance(&mut self) {
        self.bounds.y += self.speed_y;
    }

    /// Fully above the top of the screen
    pub fn is_expired(&self) -> bool {
        self.bounds.bottom() < 0
    }
}
