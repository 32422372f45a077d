//! Demo driver
//!
//! Plays the game by synthesizing input snapshots: back away from the
//! nearest enemy while shooting at it, drift toward the middle when nothing
//! is close, and take the first upgrade offered.

use glam::Vec2;

use crate::sim::{GamePhase, InputSnapshot, Key, World};

/// Enemies farther than this are not worth running from
const DANGER_RADIUS: f32 = 220.0;
/// Stay this far from the walls
const WALL_MARGIN: f32 = 60.0;
/// Minimum axis component before a direction key is pressed
const KEY_THRESHOLD: f32 = 0.3;

/// Input for the next frame
pub fn drive(world: &World) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    if world.phase != GamePhase::Playing {
        return input;
    }
    if world.progression.is_choosing() {
        input.keys.insert(Key::Choice1);
        return input;
    }

    let me = world.player.pos;
    let nearest = world
        .enemies
        .iter()
        .min_by(|a, b| me.distance_squared(a.pos).total_cmp(&me.distance_squared(b.pos)));

    let mut want = Vec2::ZERO;
    if let Some(enemy) = nearest {
        input.pointer = enemy.pos;
        input.pointer_down = true;
        let gap = me.distance(enemy.pos) - enemy.radius - world.player.radius;
        if gap < DANGER_RADIUS {
            want += (me - enemy.pos).normalize_or_zero();
        }
    }

    // Keep off the walls so we don't get pinned
    let arena = &world.arena;
    let near_wall = me.x < WALL_MARGIN
        || me.x > arena.width - WALL_MARGIN
        || me.y < WALL_MARGIN
        || me.y > arena.height - WALL_MARGIN;
    if near_wall || want == Vec2::ZERO {
        want += (arena.center() - me).normalize_or_zero() * 0.6;
    }

    let want = want.normalize_or_zero();
    for (active, key) in [
        (want.x > KEY_THRESHOLD, Key::Right),
        (want.x < -KEY_THRESHOLD, Key::Left),
        (want.y > KEY_THRESHOLD, Key::Down),
        (want.y < -KEY_THRESHOLD, Key::Up),
    ] {
        if active {
            input.keys.insert(key);
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Arena, Enemy, LevelState, UpgradeId, tick};
    use crate::tuning::Tuning;

    fn playing() -> World {
        let mut world = World::new(8, Tuning::default(), Arena::new(800.0, 600.0));
        world.start_run();
        tick(&mut world, &InputSnapshot::default(), 0.0);
        world
    }

    #[test]
    fn test_idle_outside_play() {
        let world = World::new(8, Tuning::default(), Arena::new(800.0, 600.0));
        let input = drive(&world);
        assert!(input.keys.is_empty());
        assert!(!input.pointer_down);
    }

    #[test]
    fn test_flees_and_shoots_nearest() {
        let mut world = playing();
        let tuning = world.tuning.enemy.clone();
        let mut rng = rand_pcg::Pcg32::new(1, 1);
        let mut close = Enemy::spawn_normal(&world.arena, &tuning, &mut rng);
        close.pos = Vec2::new(500.0, 300.0);
        let mut far = close.clone();
        far.pos = Vec2::new(50.0, 50.0);
        world.enemies = vec![far, close];

        let input = drive(&world);
        assert!(input.pointer_down);
        assert_eq!(input.pointer, Vec2::new(500.0, 300.0));
        assert!(input.is_down(Key::Left));
        assert!(!input.is_down(Key::Right));
    }

    #[test]
    fn test_picks_first_upgrade() {
        let mut world = playing();
        world.progression.state = LevelState::ChoosingUpgrade {
            choices: [UpgradeId::MaxHpUp, UpgradeId::DamageUp, UpgradeId::MultiShot],
        };
        assert_eq!(drive(&world).upgrade_choice(), Some(0));
    }

    #[test]
    fn test_demo_run_makes_progress() {
        let mut world = playing();
        for _ in 0..60 * 40 {
            let input = drive(&world);
            tick(&mut world, &input, 1.0 / 60.0);
            if world.run_over() {
                break;
            }
        }
        assert!(world.stats.kills > 0);
    }
}
