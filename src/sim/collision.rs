//! Circle collision tests and hit resolution
//!
//! Every entity is a circle, so every test is a squared-distance compare.
//! Resolution functions mutate the pools and report what happened; score,
//! XP and feedback are applied by the caller.

use glam::Vec2;

use super::entities::{Enemy, EnemyKind, Player, Projectile};

/// True if two circles touch or overlap (boundary inclusive)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) <= r * r
}

/// An enemy's HP reached zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub kind: EnemyKind,
    pub pos: Vec2,
}

/// Resolve player bullets against enemies.
///
/// Each bullet damages at most the first enemy it overlaps and is consumed.
/// Enemies whose HP drops to zero or below are removed and reported.
pub fn resolve_bullet_hits(
    bullets: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
    damage: i32,
) -> Vec<Kill> {
    let mut kills = Vec::new();

    bullets.retain(|b| {
        let Some(idx) = enemies
            .iter()
            .position(|e| circles_overlap(b.pos, b.radius, e.pos, e.radius))
        else {
            return true;
        };

        enemies[idx].hp -= damage;
        if enemies[idx].hp <= 0 {
            let dead = enemies.remove(idx);
            kills.push(Kill {
                kind: dead.kind,
                pos: dead.pos,
            });
        }
        false
    });

    kills
}

/// True if any enemy body overlaps the player
pub fn enemy_contact(player: &Player, enemies: &[Enemy]) -> bool {
    enemies
        .iter()
        .any(|e| circles_overlap(player.pos, player.radius, e.pos, e.radius))
}

/// Consume the first enemy bullet touching the player, if any
pub fn take_enemy_bullet(player: &Player, bullets: &mut Vec<Projectile>) -> bool {
    match bullets
        .iter()
        .position(|b| circles_overlap(player.pos, player.radius, b.pos, b.radius))
    {
        Some(idx) => {
            bullets.remove(idx);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Arena;
    use crate::tuning::{EnemyTuning, PlayerTuning};
    use proptest::prelude::*;

    fn bullet(x: f32, y: f32) -> Projectile {
        Projectile {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius: 4.0,
            life: 1.0,
        }
    }

    fn normal_enemy(x: f32, y: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            radius: 14.0,
            speed: 150.0,
            hp: 2,
            max_hp: 2,
            kind: EnemyKind::Normal,
        }
    }

    #[test]
    fn test_overlap_boundary_inclusive() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 3.0, Vec2::new(5.0, 0.0), 2.0));
        assert!(!circles_overlap(a, 3.0, Vec2::new(5.001, 0.0), 2.0));
    }

    #[test]
    fn test_bullet_damages_without_kill() {
        let mut bullets = vec![bullet(100.0, 100.0)];
        let mut enemies = vec![normal_enemy(105.0, 100.0)];
        let kills = resolve_bullet_hits(&mut bullets, &mut enemies, 1);
        assert!(kills.is_empty());
        assert!(bullets.is_empty());
        assert_eq!(enemies[0].hp, 1);
    }

    #[test]
    fn test_bullet_kills_at_most_one_enemy() {
        let mut bullets = vec![bullet(100.0, 100.0)];
        let mut enemies = vec![normal_enemy(100.0, 100.0), normal_enemy(101.0, 100.0)];
        let kills = resolve_bullet_hits(&mut bullets, &mut enemies, 5);
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].kind, EnemyKind::Normal);
        assert_eq!(kills[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn test_two_bullets_two_kills() {
        let mut bullets = vec![bullet(100.0, 100.0), bullet(300.0, 300.0), bullet(600.0, 10.0)];
        let mut enemies = vec![normal_enemy(100.0, 100.0), normal_enemy(300.0, 300.0)];
        let kills = resolve_bullet_hits(&mut bullets, &mut enemies, 2);
        assert_eq!(kills.len(), 2);
        assert!(enemies.is_empty());
        assert_eq!(bullets.len(), 1);
    }

    #[test]
    fn test_contact_and_enemy_bullet() {
        let arena = Arena::new(800.0, 600.0);
        let player = Player::new(&arena, &PlayerTuning::default());
        let boss = Enemy::spawn_boss(&arena, &EnemyTuning::default());
        assert!(!enemy_contact(&player, &[boss]));
        assert!(enemy_contact(&player, &[normal_enemy(420.0, 300.0)]));

        let mut shots = vec![bullet(405.0, 300.0), bullet(400.0, 310.0)];
        assert!(take_enemy_bullet(&player, &mut shots));
        assert_eq!(shots.len(), 1);
        assert!(take_enemy_bullet(&player, &mut shots));
        assert!(!take_enemy_bullet(&player, &mut shots));
    }

    proptest! {
        #[test]
        fn prop_touching_circles_collide(
            r1 in 0.5f32..50.0,
            r2 in 0.5f32..50.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            // Scale slightly inward so float rounding of cos/sin cannot push past r1 + r2
            let d = (r1 + r2) * 0.9999;
            let b = Vec2::new(angle.cos(), angle.sin()) * d;
            prop_assert!(circles_overlap(Vec2::ZERO, r1, b, r2));
            let far = Vec2::new(angle.cos(), angle.sin()) * (r1 + r2) * 1.001;
            prop_assert!(!circles_overlap(Vec2::ZERO, r1, far, r2));
        }
    }
}
