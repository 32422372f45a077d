//! Sound trigger gate
//!
//! The simulation only asks for sounds by id. This decides which requests
//! actually play (mute, per-effect re-trigger interval) and at what volume;
//! the platform layer does the mixing.

use std::collections::HashMap;

use crate::settings::DEFAULT_SFX_VOLUME;
use crate::sim::{SoundEffect, SoundRequest};

/// Sample file for each effect, relative to the asset root
pub fn asset_path(effect: SoundEffect) -> &'static str {
    match effect {
        SoundEffect::Shoot => "sfx/shoot.wav",
        SoundEffect::EnemyDie => "sfx/enemy_die.wav",
        SoundEffect::LevelUp => "sfx/level_up.wav",
        SoundEffect::BossSpawn => "sfx/boss_spawn.wav",
        SoundEffect::PlayerHit => "sfx/player_hit.wav",
        SoundEffect::GameOver => "sfx/game_over.wav",
    }
}

/// A sound cleared to play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub effect: SoundEffect,
    pub path: &'static str,
    /// Final volume (0.0 - 1.0)
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    volume: f32,
    muted: bool,
    /// Last accepted play time per effect (seconds)
    last_play: HashMap<SoundEffect, f64>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            volume: DEFAULT_SFX_VOLUME,
            muted: false,
            last_play: HashMap::new(),
        }
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Gate a request at time `now` (seconds, monotonic).
    ///
    /// Muted requests are dropped without touching the re-trigger clock.
    pub fn play(&mut self, request: SoundRequest, now: f64) -> Option<Playback> {
        if self.muted {
            return None;
        }

        if let Some(&last) = self.last_play.get(&request.effect) {
            if now - last < request.min_interval as f64 {
                log::debug!("Dropped {} (re-trigger)", request.effect.as_str());
                return None;
            }
        }
        self.last_play.insert(request.effect, now);

        Some(Playback {
            effect: request.effect,
            path: asset_path(request.effect),
            volume: (self.volume * request.volume_mul).clamp(0.0, 1.0),
        })
    }
}
