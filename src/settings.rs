//! Player preferences
//!
//! Persisted separately from the high score as a small JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default sound effect volume
pub const DEFAULT_SFX_VOLUME: f32 = 0.6;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub sfx_muted: bool,

    // === Visual Effects ===
    /// Screen shake when the player is hit
    pub screen_shake: bool,
    /// Death-burst particles
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_volume: DEFAULT_SFX_VOLUME,
            sfx_muted: false,
            screen_shake: true,
            particles: true,
        }
    }
}

impl Settings {
    /// Set volume, clamped to 0-1
    pub fn set_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    pub fn toggle_mute(&mut self) {
        self.sfx_muted = !self.sfx_muted;
    }

    /// Load settings from disk, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if let Ok(json) = std::fs::read_to_string(path) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&json) {
                settings.set_volume(settings.sfx_volume);
                log::info!("Loaded settings from {}", path.display());
                return settings;
            }
            log::warn!("Invalid settings file {}, using defaults", path.display());
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
