//! Per-tick collision checks.
//!
//! [`resolve`] only reads the world and returns the events that follow from this tick's
//! overlaps; [`WorldState::apply`](crate::world::WorldState::apply) carries them out. The
//! checks run in a fixed order (shots, rams, pickups) and track score and player state as
//! they go, so an event that depends on an earlier one in the same tick sees its effect.
//!
//! Overlap is a discrete bounding-box test on positions after movement. Fast objects can
//! pass through each other between ticks; that approximation is accepted.

use std::collections::HashSet;

use crate::config::{KILL_SCORE, POWERUP_DROP_THRESHOLD, RAM_DAMAGE};
use crate::entities::{DamageOutcome, EntityId, PowerupKind};
use crate::geometry::Point;
use crate::random::RandomSource;
use crate::world::WorldState;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// An enemy and every bullet touching it are destroyed
    EnemyShot {
        enemy: EntityId,
        bullets: Vec<EntityId>,
        center: Point,
    },
    /// An enemy flew into the player
    EnemyRammed { enemy: EntityId, center: Point },
    /// Replaces a destroyed enemy to keep the wave at full strength
    SpawnEnemy,
    SpawnPowerup { center: Point, kind: PowerupKind },
    PlayerDamaged {
        amount: u32,
        outcome: DamageOutcome,
    },
    PowerupCollected { powerup: EntityId, kind: PowerupKind },
    /// Last life lost. Nothing after this is resolved.
    GameOver { final_score: u32 },
}

pub fn resolve(world: &WorldState, rng: &mut dyn RandomSource, now: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut score = world.score;

    // Bullets hitting enemies
    let mut spent: HashSet<EntityId> = HashSet::new();
    let mut destroyed: HashSet<EntityId> = HashSet::new();
    for enemy in &world.enemies {
        let bounds = enemy.bounds();
        let hits: Vec<EntityId> = world
            .bullets
            .iter()
            .filter(|b| !spent.contains(&b.id) && b.bounds().intersects(&bounds))
            .map(|b| b.id)
            .collect();
        if hits.is_empty() {
            continue;
        }

        spent.extend(hits.iter().copied());
        destroyed.insert(enemy.id);
        score += KILL_SCORE;
        let center = bounds.center();
        events.push(GameEvent::EnemyShot {
            enemy: enemy.id,
            bullets: hits,
            center,
        });
        if rng.unit() > POWERUP_DROP_THRESHOLD {
            events.push(GameEvent::SpawnPowerup {
                center,
                kind: PowerupKind::random(rng),
            });
        }
        events.push(GameEvent::SpawnEnemy);
    }

    // Enemies ramming the player. A scratch copy of the player takes the damage so life
    // loss and hiding apply to later checks this tick.
    let mut player = world.player.clone();
    if player.is_targetable() {
        let target = player.bounds();
        let rammers = world
            .enemies
            .iter()
            .filter(|e| !destroyed.contains(&e.id) && e.bounds().intersects(&target));
        for enemy in rammers {
            events.push(GameEvent::EnemyRammed {
                enemy: enemy.id,
                center: enemy.bounds().center(),
            });
            events.push(GameEvent::SpawnEnemy);

            let outcome = player.take_damage(RAM_DAMAGE, now);
            events.push(GameEvent::PlayerDamaged {
                amount: RAM_DAMAGE,
                outcome,
            });
            if outcome == DamageOutcome::OutOfLives {
                events.push(GameEvent::GameOver { final_score: score });
                return events;
            }
        }
    }

    // Player collecting powerups
    if player.is_targetable() {
        let target = player.bounds();
        for powerup in world.powerups.iter().filter(|p| p.bounds().intersects(&target)) {
            events.push(GameEvent::PowerupCollected {
                powerup: powerup.id,
                kind: powerup.kind,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bullet, Enemy, Player};
    use crate::geometry::Bounds;
    use crate::world::EntitySizes;

    /// Replays fixed draws, repeating the last one
    struct Scripted {
        units: Vec<f64>,
        ranges: Vec<i32>,
    }

    impl RandomSource for Scripted {
        fn range(&mut self, low: i32, high: i32) -> i32 {
            let value = if self.ranges.len() > 1 {
                self.ranges.remove(0)
            } else {
                self.ranges.first().copied().unwrap_or(low)
            };
            value.clamp(low, (high - 1).max(low))
        }

        fn unit(&mut self) -> f64 {
            if self.units.len() > 1 {
                self.units.remove(0)
            } else {
                self.units.first().copied().unwrap_or(0.0)
            }
        }
    }

    fn scripted(units: &[f64]) -> Scripted {
        Scripted {
            units: units.to_vec(),
            ranges: vec![0],
        }
    }

    fn empty_world() -> WorldState {
        WorldState::empty(Player::new(50, 40), EntitySizes::uniform(20, 20))
    }

    fn enemy_at(x: i32, y: i32) -> Enemy {
        Enemy {
            id: EntityId::UNASSIGNED,
            variant: 0,
            bounds: Bounds::new(x, y, 20, 20),
            speed_x: 0,
            speed_y: 1,
        }
    }

    /// Enemy placed right on top of the player
    fn enemy_on_player(world: &WorldState) -> Enemy {
        let p = world.player.bounds();
        enemy_at(p.x + 5, p.y + 5)
    }

    #[test]
    fn test_no_overlap_no_events() {
        let mut world = empty_world();
        world.add_enemy(enemy_at(100, 100));
        world.add_bullets(vec![Bullet::new(Point::new(300, 300), (4, 10))]);
        assert!(resolve(&world, &mut scripted(&[0.9]), 0).is_empty());
    }

    #[test]
    fn test_shot_without_drop() {
        let mut world = empty_world();
        let enemy = world.add_enemy(enemy_at(100, 100));
        world.add_bullets(vec![Bullet::new(Point::new(110, 115), (4, 10))]);
        let bullet = world.bullets[0].id;

        let events = resolve(&world, &mut scripted(&[0.5]), 0);
        assert_eq!(
            events,
            vec![
                GameEvent::EnemyShot {
                    enemy,
                    bullets: vec![bullet],
                    center: Point::new(110, 110),
                },
                GameEvent::SpawnEnemy,
            ]
        );
    }

    #[test]
    fn test_shot_with_drop() {
        let mut world = empty_world();
        world.add_enemy(enemy_at(100, 100));
        world.add_bullets(vec![Bullet::new(Point::new(110, 115), (4, 10))]);

        let events = resolve(&world, &mut scripted(&[0.51]), 0);
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[1],
            GameEvent::SpawnPowerup {
                center: Point::new(110, 110),
                kind: PowerupKind::Shield,
            }
        );
    }

    #[test]
    fn test_bullet_only_kills_one_enemy() {
        let mut world = empty_world();
        world.add_enemy(enemy_at(100, 100));
        world.add_enemy(enemy_at(105, 100));
        world.add_bullets(vec![Bullet::new(Point::new(112, 115), (4, 10))]);

        let events = resolve(&world, &mut scripted(&[0.0]), 0);
        let kills = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyShot { .. }))
            .count();
        assert_eq!(kills, 1);
    }

    #[test]
    fn test_ram_damages_player() {
        let mut world = empty_world();
        let enemy = enemy_on_player(&world);
        world.add_enemy(enemy);

        let events = resolve(&world, &mut scripted(&[0.0]), 0);
        assert!(matches!(events[0], GameEvent::EnemyRammed { .. }));
        assert_eq!(events[1], GameEvent::SpawnEnemy);
        assert_eq!(
            events[2],
            GameEvent::PlayerDamaged {
                amount: 20,
                outcome: DamageOutcome::Absorbed,
            }
        );
    }

    #[test]
    fn test_hidden_player_is_not_a_target() {
        let mut world = empty_world();
        let enemy = enemy_on_player(&world);
        world.add_enemy(enemy);
        world.player.hide(0);
        let p = world.player.bounds();
        world.add_enemy(enemy_at(p.x, p.y));

        assert!(resolve(&world, &mut scripted(&[0.0]), 0).is_empty());
    }

    #[test]
    fn test_hidden_player_collects_nothing() {
        let mut world = empty_world();
        world.player.hide(0);
        let p = world.player.bounds().center();
        world.add_powerup(p, PowerupKind::Shield);
        world.add_powerup(p, PowerupKind::Power);

        assert!(resolve(&world, &mut scripted(&[0.0]), 0).is_empty());
    }

    #[test]
    fn test_rams_after_life_loss_still_land() {
        let mut world = empty_world();
        world.player.shield = 20;
        let first = enemy_on_player(&world);
        world.add_enemy(first);
        let second = enemy_on_player(&world);
        world.add_enemy(second);

        let mut rng = scripted(&[0.0]);
        let events = resolve(&world, &mut rng, 0);
        let outcomes: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::PlayerDamaged { outcome, .. } => Some(*outcome),
                _ => None,
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![DamageOutcome::LifeLost, DamageOutcome::Absorbed]
        );

        world.apply(&events, 0, &mut rng);
        assert!(world.player.hidden);
        assert_eq!(world.player.lives, 2);
        assert_eq!(world.player.shield, 80);
    }

    #[test]
    fn test_game_over_stops_resolution() {
        let mut world = empty_world();
        world.player.lives = 1;
        world.player.shield = 20;
        world.score = 70;
        let first = enemy_on_player(&world);
        world.add_enemy(first);
        let second = enemy_on_player(&world);
        world.add_enemy(second);
        let p = world.player.bounds().center();
        world.add_powerup(p, PowerupKind::Shield);

        let events = resolve(&world, &mut scripted(&[0.0]), 0);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 70 }));
        let rams = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyRammed { .. }))
            .count();
        assert_eq!(rams, 1);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::PowerupCollected { .. }))
        );
    }

    #[test]
    fn test_final_score_includes_kills_this_tick() {
        let mut world = empty_world();
        world.player.lives = 1;
        world.player.shield = 20;
        world.add_enemy(enemy_at(100, 100));
        world.add_bullets(vec![Bullet::new(Point::new(110, 115), (4, 10))]);
        let rammer = enemy_on_player(&world);
        world.add_enemy(rammer);

        let events = resolve(&world, &mut scripted(&[0.0]), 0);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 10 }));
    }

    #[test]
    fn test_life_lost_skips_pickups() {
        let mut world = empty_world();
        world.player.shield = 20;
        let rammer = enemy_on_player(&world);
        world.add_enemy(rammer);
        let p = world.player.bounds().center();
        world.add_powerup(p, PowerupKind::Power);

        let events = resolve(&world, &mut scripted(&[0.0]), 0);
        assert!(events.contains(&GameEvent::PlayerDamaged {
            amount: 20,
            outcome: DamageOutcome::LifeLost,
        }));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::PowerupCollected { .. }))
        );
    }

    #[test]
    fn test_pickup() {
        let mut world = empty_world();
        let p = world.player.bounds().center();
        let id = world.add_powerup(p, PowerupKind::Power);

        let events = resolve(&world, &mut scripted(&[0.0]), 0);
        assert_eq!(
            events,
            vec![GameEvent::PowerupCollected {
                powerup: id,
                kind: PowerupKind::Power,
            }]
        );
    }
}
