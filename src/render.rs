//! Read-only view of the world for drawing
//!
//! The simulation never draws. Whatever renders a frame builds a
//! [`RenderSnapshot`] and reads positions, HUD numbers and overlays from it.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{Enemy, GamePhase, Player, Projectile, RunSummary, World};

/// Boss warning fades in over this long after it appears (seconds)
const WARNING_FADE_IN: f32 = 0.25;
/// ...and fades out over its last this-many seconds
const WARNING_FADE_OUT: f32 = 0.5;

/// HUD numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub hp: u32,
    pub max_hp: u32,
    pub score: u64,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub multi_shot: u8,
}

/// Boss HP bar, present while a boss is alive
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BossBar {
    /// Never negative
    pub hp: i32,
    pub max_hp: i32,
    /// Bar fill, 0-1
    pub fraction: f32,
}

/// "Boss incoming" banner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BossWarning {
    /// Seconds until the banner hides
    pub remaining: f32,
    pub alpha: f32,
}

/// One offered upgrade on the level-up overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChoiceCard {
    /// Key that picks it (1-based)
    pub key: u8,
    pub title: &'static str,
    pub description: &'static str,
}

/// A death-burst particle ready to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub radius: f32,
    /// Opacity from remaining life, 0-1
    pub alpha: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot<'a> {
    pub phase: GamePhase,
    pub width: f32,
    pub height: f32,
    pub player: &'a Player,
    pub bullets: &'a [Projectile],
    pub enemy_bullets: &'a [Projectile],
    pub enemies: &'a [Enemy],
    /// Empty when particles are disabled in settings
    pub particles: Vec<ParticleSprite>,
    /// Shake magnitude in pixels (0 when disabled)
    pub shake: f32,
    /// Player to pointer, hidden in the menu
    pub aim_line: Option<(Vec2, Vec2)>,
    /// Hidden in the menu
    pub hud: Option<Hud>,
    pub boss_bar: Option<BossBar>,
    pub boss_warning: Option<BossWarning>,
    /// Present only while an upgrade pick is pending during play
    pub level_up: Option<Vec<ChoiceCard>>,
    /// End-of-run stats on the game over / victory screens
    pub summary: Option<&'a RunSummary>,
}

impl<'a> RenderSnapshot<'a> {
    pub fn new(world: &'a World, pointer: Vec2, settings: &Settings) -> Self {
        let in_game = world.phase != GamePhase::Menu;

        let hud = in_game.then(|| Hud {
            hp: world.player.hp,
            max_hp: world.player.max_hp,
            score: world.stats.score,
            level: world.progression.level,
            xp: world.progression.xp,
            xp_to_next: world.progression.xp_to_next,
            multi_shot: world.weapon.multi_shot,
        });

        let boss_bar = world.boss().map(|boss| BossBar {
            hp: boss.hp.max(0),
            max_hp: boss.max_hp,
            fraction: boss.hp_fraction(),
        });

        let boss_warning = world.spawner.boss_warning_visible().then(|| BossWarning {
            remaining: world.spawner.boss_warning,
            alpha: warning_alpha(
                world.spawner.boss_warning,
                world.tuning.enemy.boss_warning_secs,
            ),
        });

        let level_up = match (world.phase, world.progression.choices()) {
            (GamePhase::Playing, Some(choices)) => Some(
                choices
                    .iter()
                    .zip(1u8..)
                    .map(|(id, key)| {
                        let upgrade = id.upgrade();
                        ChoiceCard {
                            key,
                            title: upgrade.title,
                            description: upgrade.description,
                        }
                    })
                    .collect(),
            ),
            _ => None,
        };

        Self {
            phase: world.phase,
            width: world.arena.width,
            height: world.arena.height,
            player: &world.player,
            bullets: &world.bullets,
            enemy_bullets: &world.enemy_bullets,
            enemies: &world.enemies,
            particles: if settings.particles {
                world
                    .particles
                    .iter()
                    .map(|p| ParticleSprite {
                        pos: p.pos,
                        radius: p.radius,
                        alpha: p.alpha(),
                    })
                    .collect()
            } else {
                Vec::new()
            },
            shake: if settings.screen_shake { world.shake } else { 0.0 },
            aim_line: in_game.then_some((world.player.pos, pointer)),
            hud,
            boss_bar,
            boss_warning,
            level_up,
            summary: world.summary.as_ref(),
        }
    }

    /// Random camera offset for this frame's shake
    pub fn shake_offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        if self.shake <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        ) * self.shake
    }
}

/// Banner opacity given the time left and the banner's full duration
pub fn warning_alpha(remaining: f32, duration: f32) -> f32 {
    let shown = duration - remaining;
    let alpha = if shown < WARNING_FADE_IN {
        shown / WARNING_FADE_IN
    } else if remaining < WARNING_FADE_OUT {
        remaining / WARNING_FADE_OUT
    } else {
        1.0
    };
    alpha.clamp(0.0, 1.0)
}
