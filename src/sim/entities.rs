//! Entity types and their per-frame motion
//!
//! Player, projectiles, enemies and particles. Each entity owns its own
//! kinematics; collisions and side effects live elsewhere.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::angle_to_dir;
use crate::tuning::{EnemyTuning, PlayerTuning};

/// Rectangular play area in arena-local coordinates (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(
            crate::consts::DEFAULT_ARENA_WIDTH,
            crate::consts::DEFAULT_ARENA_HEIGHT,
        )
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if `pos` lies within the arena grown by `margin` on every side
    pub fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }
}

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per second
    pub speed: f32,
    pub hp: u32,
    pub max_hp: u32,
    /// Seconds of invulnerability remaining
    pub invuln: f32,
}

impl Player {
    /// Fresh player at the arena center
    pub fn new(arena: &Arena, tuning: &PlayerTuning) -> Self {
        Self {
            pos: arena.center(),
            radius: tuning.radius,
            speed: tuning.speed,
            hp: tuning.max_hp,
            max_hp: tuning.max_hp,
            invuln: 0.0,
        }
    }

    /// Move along `dir` (expected unit or zero) and keep the whole body inside the arena
    pub fn step(&mut self, dir: Vec2, dt: f32, arena: &Arena) {
        self.pos += dir * self.speed * dt;
        // max-then-min rather than clamp: a degenerate arena must not panic
        self.pos.x = self.pos.x.max(self.radius).min(arena.width - self.radius);
        self.pos.y = self.pos.y.max(self.radius).min(arena.height - self.radius);
    }

    pub fn tick_invuln(&mut self, dt: f32) {
        self.invuln = (self.invuln - dt).max(0.0);
    }

    pub fn is_vulnerable(&self) -> bool {
        self.invuln == 0.0
    }

    /// Apply one point of damage and start the invulnerability window.
    /// Returns true if this hit was fatal.
    pub fn take_hit(&mut self, invuln: f32) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.invuln = invuln;
        self.hp == 0
    }

    /// Raise max HP and heal by the same amount, never above the new max
    pub fn grow_max_hp(&mut self, amount: u32) {
        self.max_hp += amount;
        self.hp = (self.hp + amount).min(self.max_hp);
    }
}

/// A bullet, fired either by the player or by a boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds left before it fizzles
    pub life: f32,
}

impl Projectile {
    /// Projectile from `from` toward `to`. `None` when the two points coincide.
    pub fn aimed(from: Vec2, to: Vec2, speed: f32, radius: f32, life: f32) -> Option<Self> {
        let dir = (to - from).try_normalize()?;
        Some(Self {
            pos: from,
            vel: dir * speed,
            radius,
            life,
        })
    }

    /// Projectile travelling along `angle` (radians)
    pub fn at_angle(from: Vec2, angle: f32, speed: f32, radius: f32, life: f32) -> Self {
        Self {
            pos: from,
            vel: angle_to_dir(angle) * speed,
            radius,
            life,
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life -= dt;
    }

    pub fn is_dead(&self, arena: &Arena, margin: f32) -> bool {
        self.life <= 0.0 || !arena.contains_with_margin(self.pos, margin)
    }
}

/// Advance a projectile pool and drop expired or off-bounds bullets
pub fn update_projectiles(pool: &mut Vec<Projectile>, dt: f32, arena: &Arena, margin: f32) {
    for p in pool.iter_mut() {
        p.step(dt);
    }
    pool.retain(|p| !p.is_dead(arena, margin));
}

/// Enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Normal,
    Boss,
}

/// A hostile that chases the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub kind: EnemyKind,
}

impl Enemy {
    /// Normal enemy just outside a random arena edge
    pub fn spawn_normal<R: Rng + ?Sized>(arena: &Arena, tuning: &EnemyTuning, rng: &mut R) -> Self {
        let margin = tuning.spawn_margin;
        let along: f32 = rng.random();
        let pos = match rng.random_range(0..4u32) {
            0 => Vec2::new(along * arena.width, -margin),
            1 => Vec2::new(arena.width + margin, along * arena.height),
            2 => Vec2::new(along * arena.width, arena.height + margin),
            _ => Vec2::new(-margin, along * arena.height),
        };
        let speed = tuning.min_speed + rng.random::<f32>() * (tuning.max_speed - tuning.min_speed);

        Self {
            pos,
            radius: tuning.radius,
            speed,
            hp: tuning.hp,
            max_hp: tuning.hp,
            kind: EnemyKind::Normal,
        }
    }

    /// Boss at its fixed top-center entry point
    pub fn spawn_boss(arena: &Arena, tuning: &EnemyTuning) -> Self {
        Self {
            pos: Vec2::new(arena.width / 2.0, tuning.boss_spawn_y),
            radius: tuning.boss_radius,
            speed: tuning.boss_speed,
            hp: tuning.boss_hp,
            max_hp: tuning.boss_hp,
            kind: EnemyKind::Boss,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }

    /// Steer straight at `target` this frame
    pub fn pursue(&mut self, target: Vec2, dt: f32) {
        let dir = (target - self.pos).normalize_or_zero();
        self.pos += dir * self.speed * dt;
    }

    /// Remaining HP as a 0-1 fraction, for HP bars
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

/// Purely cosmetic death-burst fragment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub life: f32,
}

/// Life at which a particle is drawn fully opaque
const PARTICLE_FULL_ALPHA_LIFE: f32 = 0.6;

impl Particle {
    pub fn step(&mut self, dt: f32, damping: f32) {
        self.pos += self.vel * dt;
        self.vel *= damping;
        self.life -= dt;
    }

    pub fn alpha(&self) -> f32 {
        (self.life / PARTICLE_FULL_ALPHA_LIFE).clamp(0.0, 1.0)
    }
}

/// Scatter `count` particles from `at`, stopping at `max_alive`
pub fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    at: Vec2,
    count: usize,
    max_alive: usize,
    rng: &mut R,
) {
    let room = max_alive.saturating_sub(particles.len());
    for _ in 0..count.min(room) {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = 60.0 + rng.random::<f32>() * 240.0;
        particles.push(Particle {
            pos: at,
            vel: angle_to_dir(angle) * speed,
            radius: 2.0 + rng.random::<f32>() * 2.0,
            life: 0.35 + rng.random::<f32>() * 0.25,
        });
    }
}

pub fn update_particles(particles: &mut Vec<Particle>, dt: f32, damping: f32) {
    for p in particles.iter_mut() {
        p.step(dt, damping);
    }
    particles.retain(|p| p.life > 0.0);
}
