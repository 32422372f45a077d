//! Outbound events produced by a simulation step
//!
//! The step never calls back into the shell; it returns these instead and
//! the shell drains them once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::EnemyKind;
use super::progression::UpgradeId;
use super::state::{GamePhase, RunOutcome, RunSummary};

/// Symbolic sound ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    Shoot,
    EnemyDie,
    LevelUp,
    BossSpawn,
    PlayerHit,
    GameOver,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::EnemyDie => "enemy_die",
            SoundEffect::LevelUp => "level_up",
            SoundEffect::BossSpawn => "boss_spawn",
            SoundEffect::PlayerHit => "player_hit",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Request to play a sound, with an optional re-trigger guard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundRequest {
    pub effect: SoundEffect,
    /// Ignore this request if the same effect played less than this many seconds ago
    pub min_interval: f32,
    pub volume_mul: f32,
}

impl SoundRequest {
    pub fn new(effect: SoundEffect) -> Self {
        Self {
            effect,
            min_interval: 0.0,
            volume_mul: 1.0,
        }
    }

    pub fn shoot() -> Self {
        Self {
            effect: SoundEffect::Shoot,
            min_interval: 0.035,
            volume_mul: 0.7,
        }
    }

    pub fn enemy_die(kind: EnemyKind) -> Self {
        Self {
            effect: SoundEffect::EnemyDie,
            min_interval: 0.025,
            volume_mul: match kind {
                EnemyKind::Normal => 0.9,
                EnemyKind::Boss => 1.1,
            },
        }
    }

    pub fn player_hit() -> Self {
        Self {
            effect: SoundEffect::PlayerHit,
            min_interval: 0.12,
            volume_mul: 1.0,
        }
    }
}

/// Something the shell may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Run state was reinitialized
    RunStarted,
    /// Phase transition (already applied to the world)
    PhaseChanged { from: GamePhase, to: GamePhase },
    Sound(SoundRequest),
    Kill { kind: EnemyKind, pos: Vec2 },
    PlayerDamaged { hp: u32 },
    BossSpawned,
    LevelUp { level: u32, choices: [UpgradeId; 3] },
    UpgradeChosen(UpgradeId),
    /// Emitted exactly once per run
    RunEnded {
        outcome: RunOutcome,
        summary: RunSummary,
    },
}
