//! Per-frame simulation step
//!
//! Reads the phase once at the top, handles edge-triggered pause/restart and
//! the upgrade pick, then advances the world if play is active. Everything
//! the shell should react to comes back as [`GameEvent`]s.

use super::collision::{Kill, enemy_contact, resolve_bullet_hits, take_enemy_bullet};
use super::entities::{EnemyKind, spawn_burst, update_particles, update_projectiles};
use super::events::{GameEvent, SoundEffect, SoundRequest};
use super::input::{InputSnapshot, Key};
use super::progression::{CHOICES_PER_LEVEL, UpgradeId};
use super::state::{GamePhase, RunOutcome, World};

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &InputSnapshot, dt: f32) -> Vec<GameEvent> {
    // Shell-driven transitions since the last tick come first
    let mut events = std::mem::take(&mut world.outbox);
    let dt = dt.clamp(0.0, world.tuning.max_frame_dt);

    if world.take_start_request() {
        world.reset();
        events.push(GameEvent::RunStarted);
    }

    let phase = world.phase;

    // ESC toggles pause (on press, not while held)
    if world.pause_key.update(input.is_down(Key::Pause)) {
        match phase {
            GamePhase::Playing if !world.progression.is_choosing() => {
                transition(world, GamePhase::Paused, &mut events);
            }
            GamePhase::Paused => transition(world, GamePhase::Playing, &mut events),
            _ => {}
        }
    }

    // R restarts from any in-game phase; the reset lands next tick
    if world.restart_key.update(input.is_down(Key::Restart)) && phase != GamePhase::Menu {
        world.request_start();
        transition(world, GamePhase::Playing, &mut events);
    }

    if phase == GamePhase::Playing && world.progression.is_choosing() {
        if let Some(upgrade) = input
            .upgrade_choice()
            .and_then(|i| world.progression.choose(i))
        {
            upgrade.apply(&mut world.weapon, &mut world.player);
            world.stats.upgrades.push(upgrade);
            log::debug!("Picked upgrade {}", upgrade.title());
            events.push(GameEvent::UpgradeChosen(upgrade));

            // XP banked while choosing may already cover the next level
            if let Some(choices) = world.progression.check_level_up(&mut world.rng) {
                push_level_up(world, choices, &mut events);
            }
        }
    }

    if phase == GamePhase::Playing && !world.progression.is_choosing() {
        simulate(world, input, dt, &mut events);
    }

    events
}

/// One active-play step
fn simulate(world: &mut World, input: &InputSnapshot, dt: f32, events: &mut Vec<GameEvent>) {
    world.stats.run_time += dt;
    world.player.tick_invuln(dt);
    world.spawner.tick_warning(dt);

    world.player.step(input.move_dir(), dt, &world.arena);

    // Boss cadence
    let boss_alive = world.boss_alive();
    if let Some(boss) = world
        .spawner
        .update_boss(dt, boss_alive, &world.arena, &world.tuning.enemy)
    {
        world.enemies.push(boss);
        events.push(GameEvent::BossSpawned);
        events.push(GameEvent::Sound(SoundRequest::new(SoundEffect::BossSpawn)));
    }

    // Shooting
    world.weapon.tick_cooldown(dt);
    let shots = world
        .weapon
        .try_fire(world.player.pos, input.pointer, input.pointer_down);
    if !shots.is_empty() {
        world.bullets.extend(shots);
        events.push(GameEvent::Sound(SoundRequest::shoot()));
    }
    let margin = world.tuning.weapon.offscreen_margin;
    update_projectiles(&mut world.bullets, dt, &world.arena, margin);

    // Normal spawns and pursuit
    if let Some(enemy) =
        world
            .spawner
            .update_normal(dt, &world.arena, &world.tuning.enemy, &mut world.rng)
    {
        world.enemies.push(enemy);
    }
    let target = world.player.pos;
    for enemy in &mut world.enemies {
        enemy.pursue(target, dt);
    }

    // Boss attack
    let boss = world.enemies.iter().find(|e| e.is_boss());
    if let Some(shot) = world
        .spawner
        .update_boss_attack(dt, boss, target, &world.tuning.enemy)
    {
        world.enemy_bullets.push(shot);
    }
    update_projectiles(&mut world.enemy_bullets, dt, &world.arena, margin);

    // Player bullets vs enemies
    let kills = resolve_bullet_hits(
        &mut world.bullets,
        &mut world.enemies,
        world.weapon.bullet_damage,
    );
    for kill in kills {
        on_kill(world, kill, events);
        if world.run_over() {
            return;
        }
    }

    let damping = world.tuning.feel.particle_damping;
    update_particles(&mut world.particles, dt, damping);

    // Enemy bodies vs player
    if world.player.is_vulnerable() && enemy_contact(&world.player, &world.enemies) {
        damage_player(world, events);
        if world.run_over() {
            return;
        }
    }

    // Boss bullets vs player, at most one per frame
    if world.player.is_vulnerable() && take_enemy_bullet(&world.player, &mut world.enemy_bullets) {
        damage_player(world, events);
        if world.run_over() {
            return;
        }
    }

    world.shake = (world.shake - world.tuning.feel.shake_decay * dt).max(0.0);
}

/// Score, XP, feedback and win check for one kill
fn on_kill(world: &mut World, kill: Kill, events: &mut Vec<GameEvent>) {
    let feel = &world.tuning.feel;
    let burst = match kill.kind {
        EnemyKind::Normal => feel.normal_burst,
        EnemyKind::Boss => feel.boss_burst,
    };
    spawn_burst(
        &mut world.particles,
        kill.pos,
        burst,
        feel.max_particles,
        &mut world.rng,
    );
    events.push(GameEvent::Sound(SoundRequest::enemy_die(kill.kind)));
    events.push(GameEvent::Kill {
        kind: kill.kind,
        pos: kill.pos,
    });

    let rewards = &world.tuning.progression;
    let xp = match kill.kind {
        EnemyKind::Boss => {
            world.stats.boss_kills += 1;
            log::info!("Boss down ({} total)", world.stats.boss_kills);
            if world.stats.boss_kills >= rewards.bosses_to_win {
                finish_run(world, RunOutcome::Victory, events);
                return;
            }
            world.stats.score += rewards.boss_score;
            rewards.boss_xp
        }
        EnemyKind::Normal => {
            world.stats.kills += 1;
            world.stats.score += rewards.normal_score;
            rewards.normal_xp
        }
    };

    if let Some(choices) = world.progression.gain_xp(xp, &mut world.rng) {
        push_level_up(world, choices, events);
    }
}

fn push_level_up(
    world: &World,
    choices: [UpgradeId; CHOICES_PER_LEVEL],
    events: &mut Vec<GameEvent>,
) {
    events.push(GameEvent::LevelUp {
        level: world.progression.level,
        choices,
    });
    events.push(GameEvent::Sound(SoundRequest::new(SoundEffect::LevelUp)));
}

fn damage_player(world: &mut World, events: &mut Vec<GameEvent>) {
    let fatal = world.player.take_hit(world.tuning.player.invuln_on_hit);
    world.shake = world.tuning.feel.shake_on_hit;
    events.push(GameEvent::Sound(SoundRequest::player_hit()));
    events.push(GameEvent::PlayerDamaged {
        hp: world.player.hp,
    });
    if fatal {
        finish_run(world, RunOutcome::Defeat, events);
    }
}

/// Capture the run summary (once) and move to the end screen
fn finish_run(world: &mut World, outcome: RunOutcome, events: &mut Vec<GameEvent>) {
    if world.run_over() {
        return;
    }
    let summary = world.build_summary();
    world.summary = Some(summary.clone());
    log::info!(
        "Run ended ({:?}): score {}, level {}, {:.1}s",
        outcome,
        summary.final_score,
        summary.final_level,
        summary.time_survived_sec
    );

    if outcome == RunOutcome::Defeat {
        events.push(GameEvent::Sound(SoundRequest::new(SoundEffect::GameOver)));
    }
    transition(world, outcome.phase(), events);
    events.push(GameEvent::RunEnded { outcome, summary });
}

fn transition(world: &mut World, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = world.phase;
    if from == to {
        return;
    }
    world.phase = to;
    log::debug!("Phase {:?} -> {:?}", from, to);
    events.push(GameEvent::PhaseChanged { from, to });
}
