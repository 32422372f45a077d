//! Scheduler shell around the simulation
//!
//! Owns the world plus everything the simulation deliberately knows nothing
//! about: wall-clock timing, the sound gate, settings and the best-run
//! record. Storage failures become a notice string; they never touch the run.

use std::path::PathBuf;

use glam::Vec2;

use crate::audio::{AudioManager, Playback};
use crate::highscores::HighScore;
use crate::render::RenderSnapshot;
use crate::settings::Settings;
use crate::sim::{Arena, GameEvent, GamePhase, InputSnapshot, RunSummary, World, tick};
use crate::tuning::Tuning;

const SETTINGS_FILE: &str = "settings.json";
const HIGH_SCORE_FILE: &str = "highscore.json";

/// Game instance holding all state
pub struct Game {
    pub world: World,
    pub settings: Settings,
    pub high_score: HighScore,
    /// Summary of the last finished run, for the end screen
    pub last_summary: Option<RunSummary>,
    /// True if the last finished run set a new best
    pub new_best: bool,
    /// User-visible message about degraded shell behavior
    pub notice: Option<String>,
    audio: AudioManager,
    /// Directory for settings and high score; `None` keeps everything in memory
    storage: Option<PathBuf>,
    /// Timestamp of the previous frame (ms), `None` before the first frame
    last_time: Option<f64>,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, arena: Arena) -> Self {
        Self {
            world: World::new(seed, tuning, arena),
            settings: Settings::default(),
            high_score: HighScore::default(),
            last_summary: None,
            new_best: false,
            notice: None,
            audio: AudioManager::new(),
            storage: None,
            last_time: None,
        }
    }

    /// Persist settings and the high score under `dir`, loading what is there
    pub fn with_storage(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.settings = Settings::load_from(&dir.join(SETTINGS_FILE));
        self.high_score = HighScore::load_from(&dir.join(HIGH_SCORE_FILE));
        self.storage = Some(dir);
        self.apply_audio_settings();
        self
    }

    /// Run one frame at wall-clock `time` (ms). Returns the sounds to play.
    pub fn frame(&mut self, time: f64, input: &InputSnapshot) -> Vec<Playback> {
        let dt = match self.last_time {
            Some(last) => ((time - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time);
        let dt = dt.min(self.world.tuning.max_frame_dt);

        let events = tick(&mut self.world, input, dt);
        self.handle_events(events, time / 1000.0)
    }

    fn handle_events(&mut self, events: Vec<GameEvent>, now: f64) -> Vec<Playback> {
        let mut sounds = Vec::new();
        for event in events {
            match event {
                GameEvent::Sound(request) => {
                    if let Some(playback) = self.audio.play(request, now) {
                        sounds.push(playback);
                    }
                }
                GameEvent::RunStarted => {
                    self.last_summary = None;
                    self.new_best = false;
                }
                GameEvent::RunEnded { summary, .. } => {
                    self.new_best = self.high_score.consider(HighScore::from(&summary));
                    if self.new_best {
                        self.save_high_score();
                    }
                    self.last_summary = Some(summary);
                }
                _ => {}
            }
        }
        sounds
    }

    /// Start (or restart) a run from any screen
    pub fn start(&mut self) {
        self.notice = None;
        self.world.start_run();
    }

    /// Pause button; ignored unless actively playing
    pub fn pause(&mut self) {
        if self.world.phase == GamePhase::Playing && !self.world.progression.is_choosing() {
            self.world.set_phase(GamePhase::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.world.phase == GamePhase::Paused {
            self.world.set_phase(GamePhase::Playing);
        }
    }

    pub fn quit_to_menu(&mut self) {
        self.world.set_phase(GamePhase::Menu);
    }

    /// Viewport changed; the next frame clamps against the new bounds
    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.arena = Arena::new(width, height);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.settings.set_volume(volume);
        self.apply_audio_settings();
        self.save_settings();
    }

    pub fn toggle_mute(&mut self) {
        self.settings.toggle_mute();
        self.apply_audio_settings();
        self.save_settings();
    }

    pub fn snapshot(&self, pointer: Vec2) -> RenderSnapshot<'_> {
        RenderSnapshot::new(&self.world, pointer, &self.settings)
    }

    fn apply_audio_settings(&mut self) {
        self.audio.set_volume(self.settings.sfx_volume);
        self.audio.set_muted(self.settings.sfx_muted);
    }

    fn save_settings(&mut self) {
        let Some(dir) = &self.storage else { return };
        if let Err(e) = self.settings.save_to(&dir.join(SETTINGS_FILE)) {
            log::warn!("Could not save settings: {e}");
            self.notice = Some("Settings could not be saved".to_string());
        }
    }

    fn save_high_score(&mut self) {
        let Some(dir) = &self.storage else { return };
        if let Err(e) = self.high_score.save_to(&dir.join(HIGH_SCORE_FILE)) {
            log::warn!("Could not save high score: {e}");
            self.notice = Some("High score could not be saved".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Projectile, SoundEffect};

    fn game() -> Game {
        let mut tuning = Tuning::default();
        tuning.enemy.spawn_every = f32::MAX;
        Game::new(21, tuning, Arena::new(800.0, 600.0))
    }

    fn lethal_bullet(at: Vec2) -> Projectile {
        Projectile {
            pos: at,
            vel: Vec2::ZERO,
            radius: 4.0,
            life: 1.0,
        }
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut g = game();
        g.start();
        g.frame(5000.0, &InputSnapshot::default());
        assert_eq!(g.world.stats.run_time, 0.0);
        g.frame(5010.0, &InputSnapshot::default());
        assert!((g.world.stats.run_time - 0.01).abs() < 1e-5);
        // Hitch is clamped
        g.frame(7000.0, &InputSnapshot::default());
        assert!((g.world.stats.run_time - 0.043).abs() < 1e-5);
    }

    #[test]
    fn test_run_end_records_summary_and_best() {
        let mut g = game();
        g.start();
        g.frame(0.0, &InputSnapshot::default());
        g.world.stats.score = 15;
        g.world.player.hp = 1;
        let at = g.world.player.pos;
        g.world.enemy_bullets.push(lethal_bullet(at));

        let sounds = g.frame(16.0, &InputSnapshot::default());
        assert!(sounds.iter().any(|s| s.effect == SoundEffect::GameOver));
        assert_eq!(g.world.phase, GamePhase::GameOver);
        assert_eq!(g.last_summary.as_ref().map(|s| s.final_score), Some(15));
        assert!(g.new_best);
        assert_eq!(g.high_score.best_score, 15);

        // Restart clears the end-screen state
        g.start();
        g.frame(32.0, &InputSnapshot::default());
        assert!(g.last_summary.is_none());
        assert!(!g.new_best);
        assert_eq!(g.high_score.best_score, 15);
    }

    #[test]
    fn test_muted_game_plays_nothing() {
        let mut g = game();
        g.toggle_mute();
        g.start();
        g.frame(0.0, &InputSnapshot::default());
        let input = InputSnapshot {
            pointer: Vec2::new(700.0, 300.0),
            pointer_down: true,
            ..Default::default()
        };
        assert!(g.frame(16.0, &input).is_empty());
        assert_eq!(g.world.bullets.len(), 1);
    }

    #[test]
    fn test_pause_resume_and_quit() {
        let mut g = game();
        g.pause();
        assert_eq!(g.world.phase, GamePhase::Menu);
        g.start();
        g.frame(0.0, &InputSnapshot::default());
        g.pause();
        assert_eq!(g.world.phase, GamePhase::Paused);
        assert_eq!(
            g.world.outbox,
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Playing,
                to: GamePhase::Paused,
            }]
        );
        g.resume();
        assert_eq!(g.world.phase, GamePhase::Playing);
        g.quit_to_menu();
        assert_eq!(g.world.phase, GamePhase::Menu);
        assert!(g.snapshot(Vec2::ZERO).hud.is_none());
    }

    #[test]
    fn test_unwritable_storage_sets_notice() {
        let missing = std::env::temp_dir()
            .join(format!("arena_survivor_missing_{}", std::process::id()))
            .join("nested");
        let mut g = game().with_storage(&missing);
        assert!(g.notice.is_none());
        g.set_volume(0.3);
        assert_eq!(g.notice.as_deref(), Some("Settings could not be saved"));
        assert_eq!(g.settings.sfx_volume, 0.3);
        assert_eq!(g.world.phase, GamePhase::Menu);
    }

    #[test]
    fn test_storage_round_trip() {
        let dir = std::env::temp_dir().join(format!("arena_survivor_store_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut g = game().with_storage(&dir);
        g.set_volume(0.25);
        g.start();
        g.frame(0.0, &InputSnapshot::default());
        g.world.stats.score = 3;
        g.world.player.hp = 1;
        let at = g.world.player.pos;
        g.world.enemy_bullets.push(lethal_bullet(at));
        g.frame(16.0, &InputSnapshot::default());
        assert!(g.notice.is_none());

        let reloaded = game().with_storage(&dir);
        assert_eq!(reloaded.settings.sfx_volume, 0.25);
        assert_eq!(reloaded.high_score.best_score, 3);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
