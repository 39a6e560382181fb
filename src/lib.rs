// Library exports for the binary and tests
pub use app::{App, GameState, SessionEnd, TickOutcome};
pub use collision::GameEvent;
pub use entities::{
    Bullet, DamageOutcome, Enemy, EntityId, Explosion, ExplosionSize, Player, PlayerLook,
    Powerup, PowerupKind, Steering,
};
pub use world::{EntitySizes, WorldState};

pub mod app;
pub mod assets;
pub mod audio;
pub mod clock;
pub mod collision;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod random;
pub mod renderer;
pub mod timers;
pub mod world;
