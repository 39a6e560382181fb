use tracing::debug;

use crate::assets::Sprites;
use crate::collision::GameEvent;
use crate::config::{BANNER_DURATION_MS, KILL_SCORE, SHIELD_PICKUP, WAVE_SIZE};
use crate::entities::{
    Bullet, Enemy, EntityId, Explosion, ExplosionSize, Player, Powerup, PowerupKind, Steering,
};
use crate::geometry::Point;
use crate::random::RandomSource;
use crate::timers;

/// Pixel sizes of every spawnable thing, taken from their images
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySizes {
    pub player: (i32, i32),
    pub bullet: (i32, i32),
    /// One entry per enemy image
    pub enemies: Vec<(i32, i32)>,
    pub powerup_shield: (i32, i32),
    pub powerup_power: (i32, i32),
}

impl EntitySizes {
    pub fn from_sprites(sprites: &Sprites) -> Self {
        Self {
            player: sprites.player.size(),
            bullet: sprites.bullet.size(),
            enemies: sprites.enemies.iter().map(|e| e.size()).collect(),
            powerup_shield: sprites.powerup_shield.size(),
            powerup_power: sprites.powerup_power.size(),
        }
    }

    /// Everything the same size
    pub fn uniform(width: i32, height: i32) -> Self {
        Self {
            player: (width, height),
            bullet: (width, height),
            enemies: vec![(width, height); 3],
            powerup_shield: (width, height),
            powerup_power: (width, height),
        }
    }

    pub fn powerup(&self, kind: PowerupKind) -> (i32, i32) {
        match kind {
            PowerupKind::Shield => self.powerup_shield,
            PowerupKind::Power => self.powerup_power,
        }
    }
}

/// Every live entity in a session, plus the score.
///
/// Mutated only by [`WorldState::advance`] and [`WorldState::apply`], both of which run
/// inside a single tick.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub powerups: Vec<Powerup>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// When the "Power Up!" banner stops showing
    pub banner_until: Option<u64>,
    sizes: EntitySizes,
    next_id: u64,
}

impl WorldState {
    /// Fresh session: player at the spawn point and a full wave of enemies
    pub fn new(sizes: EntitySizes, rng: &mut dyn RandomSource) -> Self {
        let (width, height) = sizes.player;
        let mut world = Self::empty(Player::new(width, height), sizes);
        for _ in 0..WAVE_SIZE {
            world.spawn_enemy(rng);
        }
        world
    }

    /// A world with no enemies
    pub fn empty(player: Player, sizes: EntitySizes) -> Self {
        Self {
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            banner_until: None,
            sizes,
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_enemy(&mut self, rng: &mut dyn RandomSource) -> EntityId {
        let enemy = Enemy::spawn(rng, &self.sizes.enemies);
        self.add_enemy(enemy)
    }

    /// Takes ownership of an already-built enemy
    pub fn add_enemy(&mut self, mut enemy: Enemy) -> EntityId {
        enemy.id = self.allocate_id();
        let id = enemy.id;
        self.enemies.push(enemy);
        id
    }

    pub fn add_bullets(&mut self, bullets: Vec<Bullet>) {
        for mut bullet in bullets {
            bullet.id = self.allocate_id();
            self.bullets.push(bullet);
        }
    }

    pub fn add_powerup(&mut self, center: Point, kind: PowerupKind) -> EntityId {
        let mut powerup = Powerup::new(center, self.sizes.powerup(kind), kind);
        powerup.id = self.allocate_id();
        let id = powerup.id;
        self.powerups.push(powerup);
        id
    }

    pub fn add_explosion(&mut self, center: Point, size: ExplosionSize, now: u64) {
        let mut explosion = Explosion::new(center, size, now);
        explosion.id = self.allocate_id();
        self.explosions.push(explosion);
    }

    /// Player shoots with whatever the current power level allows.
    ///
    /// Returns how many bullets were fired.
    pub fn player_shoot(&mut self) -> usize {
        let bullets = self.player.shoot(self.sizes.bullet);
        let fired = bullets.len();
        self.add_bullets(bullets);
        fired
    }

    /// Moves every entity one tick and drops the ones that expired
    pub fn advance(&mut self, steering: Steering, now: u64, rng: &mut dyn RandomSource) {
        self.player.advance(steering, now);

        for enemy in &mut self.enemies {
            enemy.advance(rng);
        }

        for bullet in &mut self.bullets {
            bullet.advance();
        }
        self.bullets.retain(|b| !b.is_expired());

        for powerup in &mut self.powerups {
            powerup.advance();
        }
        self.powerups.retain(|p| !p.is_expired());

        for explosion in &mut self.explosions {
            explosion.advance(now);
        }
        self.explosions.retain(|e| !e.is_expired());
    }

    /// Applies the resolver's events in order
    pub fn apply(&mut self, events: &[GameEvent], now: u64, rng: &mut dyn RandomSource) {
        for event in events {
            match event {
                GameEvent::EnemyShot {
                    enemy,
                    bullets,
                    center,
                } => {
                    self.remove_enemy(*enemy);
                    self.bullets.retain(|b| !bullets.contains(&b.id));
                    self.score += KILL_SCORE;
                    self.add_explosion(*center, ExplosionSize::Small, now);
                }
                GameEvent::EnemyRammed { enemy, center } => {
                    self.remove_enemy(*enemy);
                    self.add_explosion(*center, ExplosionSize::Tiny, now);
                }
                GameEvent::SpawnEnemy => {
                    self.spawn_enemy(rng);
                }
                GameEvent::SpawnPowerup { center, kind } => {
                    self.add_powerup(*center, *kind);
                }
                GameEvent::PlayerDamaged {
                    amount,
                    outcome: expected,
                } => {
                    let outcome = self.player.take_damage(*amount, now);
                    debug_assert_eq!(outcome, *expected);
                    debug!(
                        ?outcome,
                        shield = self.player.shield,
                        lives = self.player.lives,
                        "player hit"
                    );
                }
                GameEvent::PowerupCollected { powerup, kind } => {
                    self.powerups.retain(|p| p.id != *powerup);
                    match kind {
                        PowerupKind::Shield => self.player.restore_shield(SHIELD_PICKUP),
                        PowerupKind::Power => {
                            self.player.power_up(now);
                            self.banner_until = Some(now + BANNER_DURATION_MS);
                            debug!(level = self.player.power_level, "power level increased");
                        }
                    }
                }
                GameEvent::GameOver { .. } => {}
            }
        }
    }

    fn remove_enemy(&mut self, id: EntityId) {
        self.enemies.retain(|e| e.id != id);
    }

    pub fn banner_active(&self, now: u64) -> bool {
        timers::banner_active(self.banner_until, now)
    }
}
