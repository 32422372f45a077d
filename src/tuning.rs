//! Data-driven game balance
//!
//! Every number that shapes a run lives here. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Player body and movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub radius: f32,
    pub speed: f32,
    pub max_hp: u32,
    /// Invulnerability after a hit (seconds)
    pub invuln_on_hit: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            max_hp: PLAYER_MAX_HP,
            invuln_on_hit: PLAYER_INVULN,
        }
    }
}

/// Player weapon at the start of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub bullet_radius: f32,
    pub bullet_life: f32,
    pub offscreen_margin: f32,
    /// Fan spread for multi-shot level 1 (3 bullets)
    pub spread_triple: f32,
    /// Fan step for multi-shot level 2 (5 bullets)
    pub spread_five: f32,
    pub multishot_max: u8,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            fire_rate: FIRE_RATE,
            bullet_speed: BULLET_SPEED,
            bullet_damage: BULLET_DAMAGE,
            bullet_radius: BULLET_RADIUS,
            bullet_life: BULLET_LIFE,
            offscreen_margin: OFFSCREEN_MARGIN,
            spread_triple: MULTISHOT_SPREAD_1,
            spread_five: MULTISHOT_SPREAD_2,
            multishot_max: MULTISHOT_MAX_LEVEL,
        }
    }
}

/// Enemy and boss stats plus spawn pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub hp: i32,
    pub radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub spawn_margin: f32,
    pub spawn_every: f32,
    pub ramp_interval: f32,
    pub ramp_factor: f32,
    pub spawn_every_min: f32,

    pub boss_hp: i32,
    pub boss_radius: f32,
    pub boss_speed: f32,
    pub boss_spawn_y: f32,
    pub boss_every: f32,
    pub boss_warning_secs: f32,
    pub boss_shoot_every: f32,
    pub boss_bullet_speed: f32,
    pub boss_bullet_radius: f32,
    pub boss_bullet_life: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            hp: ENEMY_HP,
            radius: ENEMY_RADIUS,
            min_speed: ENEMY_MIN_SPEED,
            max_speed: ENEMY_MAX_SPEED,
            spawn_margin: ENEMY_SPAWN_MARGIN,
            spawn_every: SPAWN_EVERY,
            ramp_interval: SPAWN_RAMP_INTERVAL,
            ramp_factor: SPAWN_RAMP_FACTOR,
            spawn_every_min: SPAWN_EVERY_MIN,
            boss_hp: BOSS_HP,
            boss_radius: BOSS_RADIUS,
            boss_speed: BOSS_SPEED,
            boss_spawn_y: BOSS_SPAWN_Y,
            boss_every: BOSS_EVERY,
            boss_warning_secs: BOSS_WARNING_SECS,
            boss_shoot_every: BOSS_SHOOT_EVERY,
            boss_bullet_speed: BOSS_BULLET_SPEED,
            boss_bullet_radius: BOSS_BULLET_RADIUS,
            boss_bullet_life: BOSS_BULLET_LIFE,
        }
    }
}

/// Rewards, XP curve and win condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTuning {
    pub normal_score: u64,
    pub normal_xp: u32,
    pub boss_score: u64,
    pub boss_xp: u32,
    pub xp_to_first_level: u32,
    pub xp_growth: f64,
    pub bosses_to_win: u32,
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            normal_score: NORMAL_SCORE,
            normal_xp: NORMAL_XP,
            boss_score: BOSS_SCORE,
            boss_xp: BOSS_XP,
            xp_to_first_level: XP_TO_FIRST_LEVEL,
            xp_growth: XP_GROWTH,
            bosses_to_win: BOSSES_TO_WIN,
        }
    }
}

/// Cosmetic feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeelTuning {
    pub normal_burst: usize,
    pub boss_burst: usize,
    pub particle_damping: f32,
    pub max_particles: usize,
    pub shake_on_hit: f32,
    pub shake_decay: f32,
}

impl Default for FeelTuning {
    fn default() -> Self {
        Self {
            normal_burst: NORMAL_BURST,
            boss_burst: BOSS_BURST,
            particle_damping: PARTICLE_DAMPING,
            max_particles: MAX_PARTICLES,
            shake_on_hit: SHAKE_ON_HIT,
            shake_decay: SHAKE_DECAY,
        }
    }
}

/// Complete balance table for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub weapon: WeaponTuning,
    pub enemy: EnemyTuning,
    pub progression: ProgressionTuning,
    pub feel: FeelTuning,
    /// Frame delta clamp applied by the scheduler
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            weapon: WeaponTuning::default(),
            enemy: EnemyTuning::default(),
            progression: ProgressionTuning::default(),
            feel: FeelTuning::default(),
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        if tuning.max_frame_dt <= 0.0 {
            tuning.max_frame_dt = MAX_FRAME_DT;
        }
        Ok(tuning)
    }

    /// Load tuning from a file, falling back to defaults when unreadable
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
