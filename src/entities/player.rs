use super::bullet::Bullet;
use crate::config::{
    HIDDEN_OFFSET, MAX_SHIELD, PLAYER_BOTTOM_MARGIN, PLAYER_SPEED, PLAYER_START_LIVES,
    SCREEN_HEIGHT, SCREEN_WIDTH, TWIN_SHOT_INSET,
};
use crate::geometry::{Bounds, Point};
use crate::timers;

/// Which ship image the player is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerLook {
    Base,
    Powered,
}

/// Held movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
}

impl Steering {
    /// Horizontal velocity; opposite keys cancel out
    pub fn velocity(&self) -> i32 {
        match (self.left, self.right) {
            (true, false) => -PLAYER_SPEED,
            (false, true) => PLAYER_SPEED,
            _ => 0,
        }
    }
}

/// What happened to the player as a result of taking damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Absorbed,
    LifeLost,
    OutOfLives,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub bounds: Bounds,
    pub speed_x: i32,
    pub shield: u32,
    pub lives: u32,
    pub hidden: bool,
    pub hide_start: u64,
    pub power_level: u32,
    pub power_start: u64,
    pub look: PlayerLook,
}

impl Player {
    /// New ship of the given image size at the spawn point
    pub fn new(width: i32, height: i32) -> Self {
        let mut player = Self {
            bounds: Bounds::new(0, 0, width, height),
            speed_x: 0,
            shield: MAX_SHIELD,
            lives: PLAYER_START_LIVES,
            hidden: false,
            hide_start: 0,
            power_level: 1,
            power_start: 0,
            look: PlayerLook::Base,
        };
        player.move_to_spawn();
        player
    }

    fn move_to_spawn(&mut self) {
        self.bounds.set_center_x(SCREEN_WIDTH / 2);
        self.bounds.set_bottom(SCREEN_HEIGHT - PLAYER_BOTTOM_MARGIN);
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Timers first, then movement from this tick's held keys
    pub fn advance(&mut self, steering: Steering, now: u64) {
        if timers::hide_expired(self.hidden, self.hide_start, now) {
            self.hidden = false;
            self.move_to_spawn();
        }

        if let Some((level, stamp)) = timers::power_decay(self.power_level, self.power_start, now)
        {
            self.power_level = level;
            self.power_start = stamp;
            if self.power_level == 1 {
                self.look = PlayerLook::Base;
            }
        }

        self.speed_x = steering.velocity();
        self.bounds.x += self.speed_x;

        if self.bounds.left() < 0 {
            self.bounds.x = 0;
        }
        if self.bounds.right() > SCREEN_WIDTH {
            self.bounds.x = SCREEN_WIDTH - self.bounds.width;
        }
    }

    /// Spawn points for this shot, empty while hidden
    pub fn shot_origins(&self) -> Vec<Point> {
        if self.hidden {
            return vec![];
        }

        let top = self.bounds.top();
        if self.power_level >= 2 {
            vec![
                Point::new(self.bounds.left() + TWIN_SHOT_INSET, top),
                Point::new(self.bounds.right() - TWIN_SHOT_INSET, top),
            ]
        } else {
            vec![Point::new(self.bounds.center_x(), top)]
        }
    }

    /// Fires one or two bullets depending on power level
    pub fn shoot(&self, bullet_size: (i32, i32)) -> Vec<Bullet> {
        self.shot_origins()
            .into_iter()
            .map(|origin| Bullet::new(origin, bullet_size))
            .collect()
    }

    /// Drops the player off-screen until the hide timer runs out
    pub fn hide(&mut self, now: u64) {
        self.hidden = true;
        self.hide_start = now;
        self.bounds
            .set_center(Point::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT + HIDDEN_OFFSET));
    }

    /// Subtracts from the shield. An empty shield costs a life, refills and hides the ship.
    pub fn take_damage(&mut self, amount: u32, now: u64) -> DamageOutcome {
        self.shield = self.shield.saturating_sub(amount);
        if self.shield > 0 {
            return DamageOutcome::Absorbed;
        }

        self.lives = self.lives.saturating_sub(1);
        self.shield = MAX_SHIELD;
        self.hide(now);
        if self.lives == 0 {
            DamageOutcome::OutOfLives
        } else {
            DamageOutcome::LifeLost
        }
    }

    pub fn restore_shield(&mut self, amount: u32) {
        self.shield = (self.shield + amount).min(MAX_SHIELD);
    }

    pub fn power_up(&mut self, now: u64) {
        self.power_level += 1;
        self.power_start = now;
        self.look = PlayerLook::Powered;
    }

    pub fn is_targetable(&self) -> bool {
        !self.hidden
    }
}
