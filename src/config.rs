//! Gameplay constants and runtime configuration.

use color_eyre::{Result, eyre::WrapErr};
use std::path::PathBuf;

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;

/// Simulation ticks per second
pub const FPS: u32 = 60;

/// Number of enemies kept alive at all times
pub const WAVE_SIZE: usize = 8;

// Player
pub const PLAYER_SPEED: i32 = 8;
pub const PLAYER_START_LIVES: u32 = 3;
pub const MAX_SHIELD: u32 = 100;
/// Distance between the player's bottom edge and the bottom of the screen at spawn
pub const PLAYER_BOTTOM_MARGIN: i32 = 10;
/// How far below the screen a hidden player is parked
pub const HIDDEN_OFFSET: i32 = 200;
pub const HIDE_DURATION_MS: u64 = 1000;
pub const POWER_DURATION_MS: u64 = 5000;
/// Horizontal inset of the twin bullets from the player's edges
pub const TWIN_SHOT_INSET: i32 = 10;

// Combat
pub const RAM_DAMAGE: u32 = 20;
pub const SHIELD_PICKUP: u32 = 20;
pub const KILL_SCORE: u32 = 10;
/// A powerup drops when the random draw is above this
pub const POWERUP_DROP_THRESHOLD: f64 = 0.5;

// Enemy
pub const ENEMY_SPAWN_Y: (i32, i32) = (-150, -100);
pub const ENEMY_RECYCLE_Y: (i32, i32) = (-100, -40);
pub const ENEMY_SPEED_Y: (i32, i32) = (1, 8);
pub const ENEMY_SPEED_X: (i32, i32) = (-3, 3);
pub const ENEMY_BOTTOM_MARGIN: i32 = 10;
pub const ENEMY_SIDE_MARGIN: i32 = 25;

pub const BULLET_SPEED: i32 = 10;
pub const POWERUP_SPEED: i32 = 4;

// Effects
pub const EXPLOSION_FRAMES: usize = 5;
pub const EXPLOSION_FRAME_MS: u64 = 50;
pub const BANNER_DURATION_MS: u64 = 300;
pub const GAME_OVER_HOLD_MS: u64 = 3000;

/// Size of the stand-in image used when an asset cannot be loaded
pub const PLACEHOLDER_SIZE: u32 = 30;

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Fixed RNG seed, `None` seeds from the OS
    pub seed: Option<u64>,
    /// Root directory holding `images/` and `sounds/`
    pub asset_dir: PathBuf,
    pub audio: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            asset_dir: PathBuf::from("assets"),
            audio: true,
        }
    }
}

impl GameConfig {
    pub const SEED_VAR: &'static str = "SPACE_ADVENTURE_SEED";
    pub const ASSETS_VAR: &'static str = "SPACE_ADVENTURE_ASSETS";
    pub const MUTE_VAR: &'static str = "SPACE_ADVENTURE_MUTE";

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(Self::SEED_VAR) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .wrap_err_with(|| format!("{} must be an unsigned integer, got {raw:?}", Self::SEED_VAR))?;
            config.seed = Some(seed);
        }

        if let Some(dir) = lookup(Self::ASSETS_VAR) {
            config.asset_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(Self::MUTE_VAR) {
            config.audio = !matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}
