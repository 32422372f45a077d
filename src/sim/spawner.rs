//! Time-driven enemy and boss spawning
//!
//! Normal enemies arrive on a shrinking interval. Bosses arrive on their own
//! cadence, one at a time, and shoot at the player while alive.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::{Arena, Enemy, Projectile};
use crate::tuning::EnemyTuning;

/// Spawn timers for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub spawn_timer: f32,
    /// Current normal-enemy interval (seconds)
    pub spawn_every: f32,
    pub difficulty_timer: f32,
    /// Accumulates only while no boss is alive
    pub boss_timer: f32,
    pub boss_shoot_timer: f32,
    /// Boss warning banner time remaining (0 = hidden)
    pub boss_warning: f32,
}

impl Spawner {
    pub fn new(tuning: &EnemyTuning) -> Self {
        Self {
            spawn_timer: 0.0,
            spawn_every: tuning.spawn_every,
            difficulty_timer: 0.0,
            boss_timer: 0.0,
            boss_shoot_timer: 0.0,
            boss_warning: 0.0,
        }
    }

    pub fn boss_warning_visible(&self) -> bool {
        self.boss_warning > 0.0
    }

    pub fn tick_warning(&mut self, dt: f32) {
        self.boss_warning = (self.boss_warning - dt).max(0.0);
    }

    /// Advance the normal spawn timer and the difficulty ramp
    pub fn update_normal<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        arena: &Arena,
        tuning: &EnemyTuning,
        rng: &mut R,
    ) -> Option<Enemy> {
        self.spawn_timer += dt;
        let spawned = if self.spawn_timer >= self.spawn_every {
            self.spawn_timer = 0.0;
            Some(Enemy::spawn_normal(arena, tuning, rng))
        } else {
            None
        };

        self.difficulty_timer += dt;
        if self.difficulty_timer >= tuning.ramp_interval {
            self.difficulty_timer = 0.0;
            self.spawn_every = (self.spawn_every * tuning.ramp_factor).max(tuning.spawn_every_min);
            log::debug!("Spawn interval now {:.3}s", self.spawn_every);
        }

        spawned
    }

    /// Advance the boss cadence. Spawns a boss (and raises the warning banner)
    /// when the timer fills; does nothing while one is alive.
    pub fn update_boss(
        &mut self,
        dt: f32,
        boss_alive: bool,
        arena: &Arena,
        tuning: &EnemyTuning,
    ) -> Option<Enemy> {
        if boss_alive {
            return None;
        }
        self.boss_timer += dt;
        if self.boss_timer < tuning.boss_every {
            return None;
        }

        self.boss_timer = 0.0;
        self.boss_warning = tuning.boss_warning_secs;
        self.boss_shoot_timer = 0.0;
        log::info!("Boss incoming");
        Some(Enemy::spawn_boss(arena, tuning))
    }

    /// Boss fires one aimed shot every `boss_shoot_every` seconds
    pub fn update_boss_attack(
        &mut self,
        dt: f32,
        boss: Option<&Enemy>,
        target: Vec2,
        tuning: &EnemyTuning,
    ) -> Option<Projectile> {
        let boss = boss?;
        self.boss_shoot_timer += dt;
        if self.boss_shoot_timer < tuning.boss_shoot_every {
            return None;
        }
        self.boss_shoot_timer = 0.0;
        Projectile::aimed(
            boss.pos,
            target,
            tuning.boss_bullet_speed,
            tuning.boss_bullet_radius,
            tuning.boss_bullet_life,
        )
    }
}
