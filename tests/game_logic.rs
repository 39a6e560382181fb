/// Integration tests for game logic
///
/// These tests drive whole ticks through the public API: entities move, collisions
/// resolve, events apply, and frames render, all against a manual clock and scripted
/// randomness.
use proptest::prelude::*;
use space_adventure::assets::{AssetProvider, Drawable, Sprites};
use space_adventure::audio::AudioManager;
use space_adventure::clock::{Clock, ManualClock};
use space_adventure::collision::resolve;
use space_adventure::config::WAVE_SIZE;
use space_adventure::geometry::{Bounds, Point};
use space_adventure::input::{ScriptedInput, TickInput};
use space_adventure::random::{RandomSource, SeededRandom};
use space_adventure::renderer::RecordingRenderer;
use space_adventure::{
    App, Bullet, Enemy, EntityId, EntitySizes, ExplosionSize, GameState, Player, PowerupKind,
    SessionEnd, Steering, TickOutcome, WorldState,
};

/// Every image missing, so every sprite is a 30x30 placeholder
struct NoFiles;

impl AssetProvider for NoFiles {
    fn load_image(&self, name: &str) -> Drawable {
        Drawable::placeholder(name)
    }
}

/// Replays fixed draws, repeating the last one
struct Scripted {
    units: Vec<f64>,
}

impl RandomSource for Scripted {
    fn range(&mut self, low: i32, _high: i32) -> i32 {
        low
    }

    fn unit(&mut self) -> f64 {
        if self.units.len() > 1 {
            self.units.remove(0)
        } else {
            self.units.first().copied().unwrap_or(0.0)
        }
    }
}

fn still_enemy(x: i32, y: i32) -> Enemy {
    Enemy {
        id: EntityId::UNASSIGNED,
        variant: 0,
        bounds: Bounds::new(x, y, 30, 30),
        speed_x: 0,
        speed_y: 0,
    }
}

fn empty_world() -> WorldState {
    WorldState::empty(Player::new(30, 30), EntitySizes::uniform(30, 30))
}

fn app_with(world: WorldState, units: &[f64]) -> App {
    App::with_world(
        world,
        Sprites::load(&NoFiles),
        Box::new(Scripted {
            units: units.to_vec(),
        }),
        AudioManager::disabled(),
    )
}

#[test]
fn test_bullet_kill_with_powerup_drop() {
    let mut world = empty_world();
    world.add_enemy(still_enemy(100, 100));
    // after one tick of movement the bullet spans y 105..115, inside the enemy
    world.add_bullets(vec![Bullet::new(Point::new(115, 125), (4, 10))]);
    let mut app = app_with(world, &[0.75]);
    let mut renderer = RecordingRenderer::new();

    let outcome = app.tick(TickInput::default(), 16, &mut renderer).unwrap();

    assert_eq!(outcome, TickOutcome::Continue);
    let world = app.world();
    assert_eq!(world.score, 10);
    assert_eq!(world.enemies.len(), 1);
    assert!(world.bullets.is_empty());
    assert_eq!(world.explosions.len(), 1);
    assert_eq!(world.explosions[0].center, Point::new(115, 115));
    assert_eq!(world.explosions[0].size, ExplosionSize::Small);
    assert_eq!(world.powerups.len(), 1);
    assert_eq!(world.powerups[0].bounds.center(), Point::new(115, 115));
}

#[test]
fn test_bullet_kill_without_powerup_drop() {
    let mut world = empty_world();
    world.add_enemy(still_enemy(100, 100));
    world.add_bullets(vec![Bullet::new(Point::new(115, 125), (4, 10))]);
    let mut app = app_with(world, &[0.25]);
    let mut renderer = RecordingRenderer::new();

    app.tick(TickInput::default(), 16, &mut renderer).unwrap();

    assert_eq!(app.world().score, 10);
    assert_eq!(app.world().enemies.len(), 1);
    assert!(app.world().powerups.is_empty());
}

#[test]
fn test_single_and_twin_shots() {
    let mut world = empty_world();
    assert_eq!(world.player_shoot(), 1);
    assert_eq!(world.bullets.len(), 1);

    world.bullets.clear();
    world.player.power_up(0);
    assert_eq!(world.player_shoot(), 2);
    let center = world.player.bounds().center_x();
    let left = world.bullets[0].bounds.center_x();
    let right = world.bullets[1].bounds.center_x();
    assert_eq!(center - left, right - center);
}

#[test]
fn test_shield_pickup_clamps_at_full() {
    let mut world = empty_world();
    let mut rng = SeededRandom::from_seed(0);
    world.player.shield = 90;
    let at = world.player.bounds().center();
    world.add_powerup(at, PowerupKind::Shield);

    let events = resolve(&world, &mut rng, 0);
    world.apply(&events, 0, &mut rng);
    assert_eq!(world.player.shield, 100);

    world.add_powerup(at, PowerupKind::Shield);
    let events = resolve(&world, &mut rng, 0);
    world.apply(&events, 0, &mut rng);
    assert_eq!(world.player.shield, 100);
    assert!(world.powerups.is_empty());
}

#[test]
fn test_ram_with_low_shield_costs_a_life() {
    let mut world = empty_world();
    world.player.shield = 10;
    let p = world.player.bounds();
    world.add_enemy(still_enemy(p.x, p.y));
    let mut app = app_with(world, &[0.0]);
    let mut renderer = RecordingRenderer::new();

    app.tick(TickInput::default(), 500, &mut renderer).unwrap();

    let player = &app.world().player;
    assert_eq!(player.lives, 2);
    assert_eq!(player.shield, 100);
    assert!(player.hidden);
    assert_eq!(player.hide_start, 500);
    assert_eq!(app.world().enemies.len(), 1);
    assert_eq!(app.world().explosions[0].size, ExplosionSize::Tiny);
    assert_eq!(app.game_state(), GameState::Running);
}

#[test]
fn test_hidden_player_respawns_after_a_second() {
    let mut world = empty_world();
    world.player.hide(0);
    let mut app = app_with(world, &[0.0]);
    let mut renderer = RecordingRenderer::new();

    app.tick(TickInput::default(), 1000, &mut renderer).unwrap();
    assert!(app.world().player.hidden);

    app.tick(TickInput::default(), 1001, &mut renderer).unwrap();
    let player = &app.world().player;
    assert!(!player.hidden);
    assert_eq!(player.bounds().center_x(), 400);
    assert_eq!(player.bounds().bottom(), 590);
}

#[test]
fn test_last_life_ends_the_game() {
    let mut world = empty_world();
    world.player.lives = 1;
    world.player.shield = 20;
    world.score = 130;
    let p = world.player.bounds();
    world.add_enemy(still_enemy(p.x, p.y));
    let mut app = app_with(world, &[0.0]);
    let mut renderer = RecordingRenderer::new();

    let outcome = app.tick(TickInput::default(), 16, &mut renderer).unwrap();
    assert_eq!(outcome, TickOutcome::GameOver { final_score: 130 });
    assert_eq!(app.game_state(), GameState::GameOver { final_score: 130 });
    assert_eq!(app.world().player.lives, 0);

    // nothing moves after the transition
    let frames = renderer.frames.len();
    let enemy_positions: Vec<_> = app.world().enemies.iter().map(|e| e.bounds).collect();
    let shoot = TickInput {
        shoot: true,
        steering: Steering {
            left: true,
            right: false,
        },
        quit: false,
    };
    let outcome = app.tick(shoot, 5000, &mut renderer).unwrap();
    assert_eq!(outcome, TickOutcome::GameOver { final_score: 130 });
    assert_eq!(renderer.frames.len(), frames);
    assert!(app.world().bullets.is_empty());
    let after: Vec<_> = app.world().enemies.iter().map(|e| e.bounds).collect();
    assert_eq!(enemy_positions, after);
}

#[test]
fn test_run_shows_game_over_screen_and_holds() {
    let mut world = empty_world();
    world.player.lives = 1;
    world.player.shield = 20;
    world.score = 40;
    let p = world.player.bounds();
    world.add_enemy(still_enemy(p.x, p.y));
    let app = app_with(world, &[0.0]);

    let mut input = ScriptedInput::new(vec![TickInput::default(); 10]);
    let mut clock = ManualClock::new();
    let mut renderer = RecordingRenderer::new();
    let end = app.run(&mut input, &mut clock, &mut renderer).unwrap();

    assert_eq!(end, SessionEnd::GameOver { score: 40 });
    // the gameplay frame, then the game over screen
    assert_eq!(renderer.frames.len(), 2);
    assert_eq!(renderer.last_frame_texts(), vec!["GAME OVER", "Score: 40"]);
    assert!(clock.now_ms() >= 3000);
}

#[test]
fn test_explosion_lasts_exactly_250ms() {
    let mut world = empty_world();
    let mut rng = SeededRandom::from_seed(9);
    world.add_explosion(Point::new(200, 200), ExplosionSize::Small, 0);

    for now in [50, 100, 150, 200, 249] {
        world.advance(Steering::default(), now, &mut rng);
        assert_eq!(world.explosions.len(), 1, "gone early at {now}ms");
    }
    assert_eq!(world.explosions[0].frame, 4);

    world.advance(Steering::default(), 250, &mut rng);
    assert!(world.explosions.is_empty());
}

/// A full wave where `parked` of the enemies sit still on top of the player
fn wave_parked_on_player(
    seed: u64,
    parked: usize,
    lives: u32,
    shield: u32,
) -> (WorldState, SeededRandom) {
    let mut rng = SeededRandom::from_seed(seed);
    let mut world = WorldState::new(EntitySizes::uniform(30, 30), &mut rng);
    world.player.lives = lives;
    world.player.shield = shield;
    world.enemies.truncate(WAVE_SIZE - parked);
    let p = world.player.bounds();
    for _ in 0..parked {
        world.add_enemy(still_enemy(p.x, p.y));
    }
    (world, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_wave_and_player_invariants_under_fire(
        seed in any::<u64>(),
        parked in 1..=WAVE_SIZE,
        lives in 1u32..=3,
        shield in 1u32..=100,
        script in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..240)
    ) {
        let (world, rng) = wave_parked_on_player(seed, parked, lives, shield);
        let mut app = App::with_world(
            world,
            Sprites::load(&NoFiles),
            Box::new(rng),
            AudioManager::disabled(),
        );
        let mut clock = ManualClock::new();
        let mut renderer = RecordingRenderer::new();
        let mut last_score = 0;

        for (tick, (left, right, shoot)) in script.into_iter().enumerate() {
            clock.wait_for_tick();
            let input = TickInput {
                steering: Steering { left, right },
                shoot,
                quit: false,
            };
            let outcome = app.tick(input, clock.now_ms(), &mut renderer).unwrap();

            let world = app.world();
            if tick == 0 {
                // the parked enemies ram on the very first tick
                prop_assert!(world.player.lives < lives || world.player.shield < shield);
            }
            prop_assert_eq!(world.enemies.len(), WAVE_SIZE);
            prop_assert!(world.player.shield <= 100);
            prop_assert!(world.score >= last_score);
            last_score = world.score;

            let over = matches!(outcome, TickOutcome::GameOver { .. });
            prop_assert_eq!(world.player.lives == 0, over);
            if over {
                prop_assert_eq!(outcome, TickOutcome::GameOver { final_score: world.score });
                break;
            }
        }
    }
}

#[test]
fn test_same_seed_same_session() {
    let play = |seed: u64| {
        let mut app = App::new(
            Sprites::load(&NoFiles),
            Box::new(SeededRandom::from_seed(seed)),
            AudioManager::disabled(),
        );
        let mut renderer = RecordingRenderer::new();
        for tick in 1..=600u64 {
            let input = TickInput {
                shoot: tick % 5 == 0,
                ..TickInput::default()
            };
            app.tick(input, tick * 16, &mut renderer).unwrap();
        }
        let world = app.world();
        (
            world.score,
            world.player.shield,
            world.player.lives,
            world.enemies.iter().map(|e| e.bounds).collect::<Vec<_>>(),
        )
    };

    assert_eq!(play(77), play(77));
}
