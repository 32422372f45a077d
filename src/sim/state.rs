//! World state for a run
//!
//! Everything a run mutates lives in [`World`]; restarting rebuilds it
//! wholesale rather than patching individual fields.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Arena, Enemy, Particle, Player, Projectile};
use super::events::GameEvent;
use super::input::EdgeTrigger;
use super::progression::{Progression, UpgradeId};
use super::spawner::Spawner;
use super::weapon::Weapon;
use crate::tuning::Tuning;

/// Top-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Start screen, nothing simulates
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player died
    GameOver,
    /// Required bosses defeated
    Victory,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOutcome {
    Defeat,
    Victory,
}

impl RunOutcome {
    pub fn phase(&self) -> GamePhase {
        match self {
            RunOutcome::Defeat => GamePhase::GameOver,
            RunOutcome::Victory => GamePhase::Victory,
        }
    }
}

/// Counters accumulated over a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub score: u64,
    /// Seconds of active play
    pub run_time: f32,
    /// Normal enemies killed
    pub kills: u32,
    pub boss_kills: u32,
    /// Upgrades picked, in order (repeats allowed)
    pub upgrades: Vec<UpgradeId>,
}

/// Statistics of a finished run, captured once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub time_survived_sec: f32,
    pub kills: u32,
    pub boss_kills: u32,
    pub final_score: u64,
    pub final_level: u32,
    /// Upgrade titles in pick order
    pub upgrades: Vec<String>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    /// Base seed; each run derives its own stream from it
    pub seed: u64,
    pub tuning: Tuning,
    pub arena: Arena,
    pub phase: GamePhase,

    pub player: Player,
    /// Player-owned bullets
    pub bullets: Vec<Projectile>,
    /// Boss-owned bullets
    pub enemy_bullets: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,

    pub weapon: Weapon,
    pub spawner: Spawner,
    pub progression: Progression,
    pub stats: RunStats,
    /// Screen shake magnitude (pixels)
    pub shake: f32,
    /// Set once when the run ends; doubles as the one-shot guard
    pub summary: Option<RunSummary>,

    pub(crate) rng: Pcg32,
    pub(crate) pause_key: EdgeTrigger,
    pub(crate) restart_key: EdgeTrigger,
    /// Events raised outside `tick`, delivered with the next tick's events
    pub(crate) outbox: Vec<GameEvent>,
    runs_started: u64,
    start_requested: bool,
}

impl World {
    /// New world sitting in the menu
    pub fn new(seed: u64, tuning: Tuning, arena: Arena) -> Self {
        Self {
            seed,
            player: Player::new(&arena, &tuning.player),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            weapon: Weapon::new(&tuning.weapon),
            spawner: Spawner::new(&tuning.enemy),
            progression: Progression::new(&tuning.progression),
            stats: RunStats::default(),
            shake: 0.0,
            summary: None,
            rng: Pcg32::seed_from_u64(seed),
            pause_key: EdgeTrigger::default(),
            restart_key: EdgeTrigger::default(),
            outbox: Vec::new(),
            runs_started: 0,
            start_requested: false,
            phase: GamePhase::Menu,
            tuning,
            arena,
        }
    }

    /// Ask for a full reset at the top of the next tick
    pub fn request_start(&mut self) {
        self.start_requested = true;
    }

    /// Leave the menu (or an end screen) and begin a fresh run next tick
    pub fn start_run(&mut self) {
        self.request_start();
        self.set_phase(GamePhase::Playing);
    }

    /// Shell-driven phase change (pause button, quit to menu).
    /// Reported as `PhaseChanged` by the next tick.
    pub fn set_phase(&mut self, phase: GamePhase) {
        let from = self.phase;
        if from == phase {
            return;
        }
        self.phase = phase;
        log::debug!("Phase {:?} -> {:?} (shell)", from, phase);
        self.outbox.push(GameEvent::PhaseChanged { from, to: phase });
    }

    pub(crate) fn take_start_request(&mut self) -> bool {
        std::mem::take(&mut self.start_requested)
    }

    /// Reinitialize every piece of run state for a new run
    pub fn reset(&mut self) {
        self.runs_started += 1;
        let tuning = &self.tuning;
        self.player = Player::new(&self.arena, &tuning.player);
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.weapon = Weapon::new(&tuning.weapon);
        self.spawner = Spawner::new(&tuning.enemy);
        self.progression = Progression::new(&tuning.progression);
        self.stats = RunStats::default();
        self.shake = 0.0;
        self.summary = None;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.runs_started));
        log::info!("Run {} started (seed {})", self.runs_started, self.seed);
    }

    /// The live boss, if any
    pub fn boss(&self) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.is_boss())
    }

    pub fn boss_alive(&self) -> bool {
        self.boss().is_some()
    }

    /// True once the run has ended and its summary is captured
    pub fn run_over(&self) -> bool {
        self.summary.is_some()
    }

    /// Snapshot of the current run's statistics
    pub fn build_summary(&self) -> RunSummary {
        RunSummary {
            time_survived_sec: self.stats.run_time,
            kills: self.stats.kills,
            boss_kills: self.stats.boss_kills,
            final_score: self.stats.score,
            final_level: self.progression.level,
            upgrades: self
                .stats
                .upgrades
                .iter()
                .map(|u| u.title().to_string())
                .collect(),
        }
    }
}
