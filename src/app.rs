use color_eyre::Result;
use tracing::{info, trace};

use crate::assets::Sprites;
use crate::audio::{AudioManager, SoundEffect};
use crate::clock::Clock;
use crate::collision::{self, GameEvent};
use crate::config::GAME_OVER_HOLD_MS;
use crate::entities::PowerupKind;
use crate::input::{InputSource, TickInput};
use crate::random::RandomSource;
use crate::renderer::{self, Renderer};
use crate::world::{EntitySizes, WorldState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    /// Terminal: the session is over
    GameOver { final_score: u32 },
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
    GameOver { final_score: u32 },
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    GameOver { score: u32 },
}

/// The game loop controller. Owns the world and drives it one tick at a time.
pub struct App {
    game_state: GameState,
    world: WorldState,
    sprites: Sprites,
    rng: Box<dyn RandomSource>,
    audio: AudioManager,
    frame_count: u64,
}

impl App {
    /// Construct a new session with a full enemy wave.
    pub fn new(sprites: Sprites, mut rng: Box<dyn RandomSource>, audio: AudioManager) -> Self {
        let world = WorldState::new(EntitySizes::from_sprites(&sprites), rng.as_mut());
        Self::with_world(world, sprites, rng, audio)
    }

    /// Session over a prepared world
    pub fn with_world(
        world: WorldState,
        sprites: Sprites,
        rng: Box<dyn RandomSource>,
        audio: AudioManager,
    ) -> Self {
        Self {
            game_state: GameState::Running,
            world,
            sprites,
            rng,
            audio,
            frame_count: 0,
        }
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run the application's main loop until quit or game over.
    pub fn run(
        mut self,
        input: &mut dyn InputSource,
        clock: &mut dyn Clock,
        renderer: &mut dyn Renderer,
    ) -> Result<SessionEnd> {
        info!(enemies = self.world.enemies.len(), "session started");
        loop {
            clock.wait_for_tick();
            let tick_input = input.poll()?;

            match self.tick(tick_input, clock.now_ms(), renderer)? {
                TickOutcome::Continue => {}
                TickOutcome::Quit => {
                    info!(score = self.world.score, "quit requested");
                    return Ok(SessionEnd::Quit);
                }
                TickOutcome::GameOver { final_score } => {
                    renderer::draw_game_over(renderer, final_score);
                    renderer.present()?;
                    clock.hold(GAME_OVER_HOLD_MS);
                    return Ok(SessionEnd::GameOver { score: final_score });
                }
            }
        }
    }

    /// One fixed-rate step: input, movement, collisions, render.
    ///
    /// Once the game is over every further call is a no-op that reports the final score.
    pub fn tick(
        &mut self,
        input: TickInput,
        now: u64,
        renderer: &mut dyn Renderer,
    ) -> Result<TickOutcome> {
        if let GameState::GameOver { final_score } = self.game_state {
            return Ok(TickOutcome::GameOver { final_score });
        }
        if input.quit {
            return Ok(TickOutcome::Quit);
        }

        self.frame_count += 1;

        if input.shoot && self.world.player_shoot() > 0 {
            self.audio.play(SoundEffect::Shot);
        }

        self.world.advance(input.steering, now, self.rng.as_mut());

        let events = collision::resolve(&self.world, self.rng.as_mut(), now);
        self.world.apply(&events, now, self.rng.as_mut());
        self.process_events(&events);

        trace!(
            frame = self.frame_count,
            enemies = self.world.enemies.len(),
            bullets = self.world.bullets.len(),
            powerups = self.world.powerups.len(),
            "tick"
        );

        renderer::draw_scene(renderer, &self.world, &self.sprites, now);
        renderer.present()?;

        Ok(match self.game_state {
            GameState::Running => TickOutcome::Continue,
            GameState::GameOver { final_score } => TickOutcome::GameOver { final_score },
        })
    }

    /// Side effects of events beyond the world itself
    fn process_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::PowerupCollected {
                    kind: PowerupKind::Power,
                    ..
                } => self.audio.play(SoundEffect::PowerUp),
                GameEvent::GameOver { final_score } => {
                    info!(final_score, frames = self.frame_count, "game over");
                    self.game_state = GameState::GameOver {
                        final_score: *final_score,
                    };
                }
                _ => {}
            }
        }
    }
}
