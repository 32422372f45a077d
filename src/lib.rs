//! Arena Survivor - a top-down arena survival shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, spawning, combat, progression, phases)
//! - `render`: Read-only snapshot of world state for whatever draws it
//! - `tuning`: Data-driven game balance
//! - `game`: Thin scheduler shell around the simulation
//! - `highscores`, `settings`, `audio`: Shell-side persistence and sound gating

pub mod audio;
pub mod autopilot;
pub mod game;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Default arena size, used until the shell reports a real viewport
    pub const DEFAULT_ARENA_WIDTH: f32 = 900.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 550.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    pub const PLAYER_MAX_HP: u32 = 5;
    /// Invulnerability granted after taking a hit (seconds)
    pub const PLAYER_INVULN: f32 = 1.0;

    /// Weapon defaults
    pub const FIRE_RATE: f32 = 10.0; // bullets/sec
    pub const BULLET_SPEED: f32 = 650.0;
    pub const BULLET_DAMAGE: i32 = 1;
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_LIFE: f32 = 1.2;
    /// Bullets are culled once this far outside the arena
    pub const OFFSCREEN_MARGIN: f32 = 50.0;
    /// Multi-shot fan spread (radians) for levels 1 and 2
    pub const MULTISHOT_SPREAD_1: f32 = 0.18;
    pub const MULTISHOT_SPREAD_2: f32 = 0.28;
    pub const MULTISHOT_MAX_LEVEL: u8 = 2;

    /// Normal enemy
    pub const ENEMY_HP: i32 = 2;
    pub const ENEMY_RADIUS: f32 = 14.0;
    pub const ENEMY_MIN_SPEED: f32 = 120.0;
    pub const ENEMY_MAX_SPEED: f32 = 180.0;
    /// Distance outside the arena edge where enemies appear
    pub const ENEMY_SPAWN_MARGIN: f32 = 40.0;

    /// Boss
    pub const BOSS_HP: i32 = 80;
    pub const BOSS_RADIUS: f32 = 38.0;
    pub const BOSS_SPEED: f32 = 70.0;
    pub const BOSS_SPAWN_Y: f32 = 90.0;
    pub const BOSS_EVERY: f32 = 30.0;
    pub const BOSS_WARNING_SECS: f32 = 3.0;
    pub const BOSS_SHOOT_EVERY: f32 = 1.2;
    pub const BOSS_BULLET_SPEED: f32 = 380.0;
    pub const BOSS_BULLET_RADIUS: f32 = 7.0;
    pub const BOSS_BULLET_LIFE: f32 = 2.5;
    pub const BOSSES_TO_WIN: u32 = 3;

    /// Spawn cadence and difficulty ramp
    pub const SPAWN_EVERY: f32 = 0.9;
    pub const SPAWN_RAMP_INTERVAL: f32 = 6.0;
    pub const SPAWN_RAMP_FACTOR: f32 = 0.92;
    pub const SPAWN_EVERY_MIN: f32 = 0.25;

    /// Rewards
    pub const NORMAL_SCORE: u64 = 1;
    pub const NORMAL_XP: u32 = 1;
    pub const BOSS_SCORE: u64 = 20;
    pub const BOSS_XP: u32 = 10;

    /// Experience curve
    pub const XP_TO_FIRST_LEVEL: u32 = 5;
    pub const XP_GROWTH: f64 = 1.35;

    /// Death burst particle counts
    pub const NORMAL_BURST: usize = 18;
    pub const BOSS_BURST: usize = 45;
    /// Per-frame particle velocity damping
    pub const PARTICLE_DAMPING: f32 = 0.9;
    /// Maximum particles alive at once
    pub const MAX_PARTICLES: usize = 1024;

    /// Screen shake impulse on player hit and its linear decay per second
    pub const SHAKE_ON_HIT: f32 = 12.0;
    pub const SHAKE_DECAY: f32 = 40.0;
}

/// Unit vector for an angle in radians
#[inline]
pub fn angle_to_dir(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
