//! Player weapon: fire cooldown and multi-shot fan-out

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Projectile;
use crate::tuning::WeaponTuning;

/// Current combat stats; upgrades mutate these in place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    /// Shots per second
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    /// 0 = single, 1 = three bullets, 2 = five bullets
    pub multi_shot: u8,
    /// Seconds until the next shot is allowed
    pub cooldown: f32,
    bullet_radius: f32,
    bullet_life: f32,
    spread_triple: f32,
    spread_five: f32,
    multishot_max: u8,
}

impl Weapon {
    pub fn new(tuning: &WeaponTuning) -> Self {
        Self {
            fire_rate: tuning.fire_rate,
            bullet_speed: tuning.bullet_speed,
            bullet_damage: tuning.bullet_damage,
            multi_shot: 0,
            cooldown: 0.0,
            bullet_radius: tuning.bullet_radius,
            bullet_life: tuning.bullet_life,
            spread_triple: tuning.spread_triple,
            spread_five: tuning.spread_five,
            multishot_max: tuning.multishot_max,
        }
    }

    /// Bump multi-shot one level, saturating at the cap
    pub fn add_multishot(&mut self) {
        self.multi_shot = (self.multi_shot + 1).min(self.multishot_max);
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Bullet headings for the current multi-shot level around `base`
    pub fn fan_angles(&self, base: f32) -> Vec<f32> {
        match self.multi_shot {
            0 => vec![base],
            1 => {
                let s = self.spread_triple;
                vec![base - s, base, base + s]
            }
            _ => {
                let s = self.spread_five;
                vec![base - 2.0 * s, base - s, base, base + s, base + 2.0 * s]
            }
        }
    }

    /// Fire from `from` toward `aim` if the trigger is held and the cooldown
    /// has run out. A zero-length aim vector fires nothing and leaves the
    /// cooldown untouched.
    pub fn try_fire(&mut self, from: Vec2, aim: Vec2, trigger: bool) -> Vec<Projectile> {
        if !trigger || self.cooldown != 0.0 {
            return Vec::new();
        }
        let delta = aim - from;
        if delta.length_squared() == 0.0 {
            return Vec::new();
        }

        let (speed, radius, life) = (self.bullet_speed, self.bullet_radius, self.bullet_life);
        let shots: Vec<Projectile> = if self.multi_shot == 0 {
            Projectile::aimed(from, aim, speed, radius, life)
                .into_iter()
                .collect()
        } else {
            let base = delta.y.atan2(delta.x);
            self.fan_angles(base)
                .into_iter()
                .map(|a| Projectile::at_angle(from, a, speed, radius, life))
                .collect()
        };

        if !shots.is_empty() {
            self.cooldown = 1.0 / self.fire_rate;
        }
        shots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon() -> Weapon {
        Weapon::new(&WeaponTuning::default())
    }

    #[test]
    fn test_single_shot_then_cooldown_blocks() {
        let mut w = weapon();
        let from = Vec2::new(100.0, 100.0);
        let aim = Vec2::new(200.0, 100.0);

        assert_eq!(w.try_fire(from, aim, true).len(), 1);
        assert!((w.cooldown - 0.1).abs() < 1e-6);

        // Not enough time elapsed for another shot
        w.tick_cooldown(0.05);
        assert!(w.try_fire(from, aim, true).is_empty());
        w.tick_cooldown(0.04);
        assert!(w.try_fire(from, aim, true).is_empty());

        w.tick_cooldown(0.02);
        assert_eq!(w.cooldown, 0.0);
        assert_eq!(w.try_fire(from, aim, true).len(), 1);
    }

    #[test]
    fn test_no_trigger_no_shot() {
        let mut w = weapon();
        assert!(w.try_fire(Vec2::ZERO, Vec2::X, false).is_empty());
        assert_eq!(w.cooldown, 0.0);
    }

    #[test]
    fn test_degenerate_aim_is_noop() {
        let mut w = weapon();
        w.multi_shot = 2;
        let at = Vec2::new(50.0, 50.0);
        assert!(w.try_fire(at, at, true).is_empty());
        assert_eq!(w.cooldown, 0.0);
    }

    #[test]
    fn test_fan_counts_and_spread() {
        let mut w = weapon();
        w.add_multishot();
        let angles = w.fan_angles(0.0);
        assert_eq!(angles, vec![-0.18, 0.0, 0.18]);

        w.add_multishot();
        w.add_multishot();
        assert_eq!(w.multi_shot, 2);
        let angles = w.fan_angles(1.0);
        assert_eq!(angles.len(), 5);
        assert!((angles[0] - (1.0 - 0.56)).abs() < 1e-6);
        assert!((angles[4] - (1.0 + 0.56)).abs() < 1e-6);

        let shots = w.try_fire(Vec2::ZERO, Vec2::new(0.0, 10.0), true);
        assert_eq!(shots.len(), 5);
        for s in &shots {
            assert!((s.vel.length() - w.bullet_speed).abs() < 1e-2);
        }
    }
}
