use super::EntityId;
use crate::config::{
    ENEMY_BOTTOM_MARGIN, ENEMY_RECYCLE_Y, ENEMY_SIDE_MARGIN, ENEMY_SPAWN_Y, ENEMY_SPEED_X,
    ENEMY_SPEED_Y, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::geometry::Bounds;
use crate::random::RandomSource;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    /// Which of the enemy images this one uses
    pub variant: usize,
    pub bounds: Bounds,
    pub speed_x: i32,
    pub speed_y: i32,
}

impl Enemy {
    /// New enemy above the top of the screen. `sizes` holds one entry per enemy image.
    pub fn spawn(rng: &mut dyn RandomSource, sizes: &[(i32, i32)]) -> Self {
        let variant = rng.range(0, sizes.len() as i32) as usize;
        let (width, height) = sizes[variant];
        let x = rng.range(0, SCREEN_WIDTH - width);
        let y = rng.range(ENEMY_SPAWN_Y.0, ENEMY_SPAWN_Y.1);
        let speed_y = rng.range(ENEMY_SPEED_Y.0, ENEMY_SPEED_Y.1);
        let speed_x = rng.range(ENEMY_SPEED_X.0, ENEMY_SPEED_X.1);

        Self {
            id: EntityId::UNASSIGNED,
            variant,
            bounds: Bounds::new(x, y, width, height),
            speed_x,
            speed_y,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Moves one tick, recycling to the top after leaving the bottom and bouncing off the
    /// side margins
    pub fn advance(&mut self, rng: &mut dyn RandomSource) {
        self.bounds.y += self.speed_y;
        self.bounds.x += self.speed_x;

        if self.bounds.top() > SCREEN_HEIGHT + ENEMY_BOTTOM_MARGIN {
            self.bounds.x = rng.range(0, SCREEN_WIDTH - self.bounds.width);
            self.bounds.y = rng.range(ENEMY_RECYCLE_Y.0, ENEMY_RECYCLE_Y.1);
            self.speed_y = rng.range(ENEMY_SPEED_Y.0, ENEMY_SPEED_Y.1);
        }

        if self.bounds.left() < -ENEMY_SIDE_MARGIN
            || self.bounds.right() > SCREEN_WIDTH + ENEMY_SIDE_MARGIN
        {
            self.speed_x = -self.speed_x;
        }
    }
}
