mod bullet;
mod enemy;
mod explosion;
mod player;
mod powerup;

// Re-export all public types
pub use bullet::Bullet;
pub use enemy::Enemy;
pub use explosion::{Explosion, ExplosionSize};
pub use player::{DamageOutcome, Player, PlayerLook, Steering};
pub use powerup::{Powerup, PowerupKind};

/// Identity of an entity within one session's world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Placeholder for entities not yet owned by a world
    pub const UNASSIGNED: EntityId = EntityId(0);
}
