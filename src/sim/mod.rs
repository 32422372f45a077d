//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Advances only through [`tick`] with a caller-supplied delta
//! - Seeded RNG only (same seed + same inputs = same run)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entities;
pub mod events;
pub mod input;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod weapon;

pub use collision::{Kill, circles_overlap};
pub use entities::{Arena, Enemy, EnemyKind, Particle, Player, Projectile};
pub use events::{GameEvent, SoundEffect, SoundRequest};
pub use input::{EdgeTrigger, InputSnapshot, Key};
pub use progression::{CHOICES_PER_LEVEL, LevelState, Progression, Upgrade, UpgradeId};
pub use spawner::Spawner;
pub use state::{GamePhase, RunOutcome, RunStats, RunSummary, World};
pub use tick::tick;
pub use weapon::Weapon;
