//! Per-frame simulation step
//!
//! Core game loop: applies player commands, then runs motion, collisions,
//! wave bookkeeping and logistics in that order.

use glam::Vec2;

use super::collision;
use super::economy::TurretUpgrade;
use super::events::{GameEvent, SoundCue};
use super::logistics;
use super::motion;
use super::state::{ArcadePhase, Autopilot, GameState, PlayerMissile, RunStatus};
use super::waves;
use crate::consts::*;
use crate::distance;
use crate::error::FireError;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Launch from a launcher toward a point
    pub fire: Option<(usize, Vec2)>,
    /// Leave the wave break (Arcade)
    pub continue_wave: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by `dt_ms` of game time
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    // Handle pause toggle
    if input.pause {
        match state.status {
            RunStatus::Running => {
                state.status = RunStatus::Paused;
                log::debug!("Paused");
                return;
            }
            RunStatus::Paused => {
                state.status = RunStatus::Running;
                log::debug!("Resumed");
            }
            RunStatus::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.status != RunStatus::Running {
        return;
    }

    let before = (state.score, state.economy.scrap, state.economy.science);
    state.time_ms += dt_ms as f64;

    let mut input = input.clone();
    if input.idle_mode {
        autoplay(state, &mut input);
    }

    if let Some((launcher, target)) = input.fire {
        if let Err(err) = fire_missile(state, launcher, target) {
            log::trace!("Launch rejected: {}", err);
        }
    }
    if input.continue_wave {
        waves::continue_wave(state);
    }

    motion::update(state, dt_ms);
    collision::resolve(state);

    if state.city_count() == 0 {
        game_over(state);
        return;
    }

    waves::update(state, dt_ms);
    logistics::update(state, dt_ms);

    if before != (state.score, state.economy.scrap, state.economy.science) {
        state.emit_resources();
    }
}

/// Launch a player missile toward `target` (clamped to the playfield)
///
/// Empty and cooling launchers cue a sound and reject the launch.
pub fn fire_missile(state: &mut GameState, index: usize, target: Vec2) -> Result<u32, FireError> {
    if state.status != RunStatus::Running {
        return Err(FireError::NotRunning);
    }
    if index >= state.launchers.len() {
        return Err(FireError::InvalidLauncher(index));
    }
    if !state.is_launcher_alive(index) {
        return Err(FireError::LauncherDestroyed(index));
    }

    let now = state.time_ms;
    let launcher = &state.launchers[index];
    if launcher.missiles == 0 {
        state.emit(GameEvent::Sound(SoundCue::EmptyAmmo));
        return Err(FireError::OutOfAmmo(index));
    }
    let remaining_ms = launcher.cooldown_remaining(now);
    if remaining_ms > 0.0 {
        state.emit(GameEvent::Sound(SoundCue::Cooldown));
        return Err(FireError::CoolingDown {
            launcher: index,
            remaining_ms,
        });
    }

    let target = Vec2::new(
        target.x.clamp(0.0, CANVAS_WIDTH),
        target.y.clamp(0.0, GROUND_Y - MIN_TARGET_CLEARANCE),
    );

    let tuning = &state.tuning;
    let upgrades = &launcher.upgrades;
    let speed_steps = upgrades.level(TurretUpgrade::Speed).saturating_sub(1) as f32;
    let blast_steps = upgrades.level(TurretUpgrade::Explosion).saturating_sub(1) as f32;
    let guidance_steps = upgrades.level(TurretUpgrade::Autopilot).saturating_sub(1) as f32;

    let speed = tuning.player_missile_speed * (1.0 + tuning.player_speed_per_level * speed_steps);
    let explosion_radius =
        tuning.explosion_radius * (1.0 + tuning.explosion_radius_per_level * blast_steps);
    let autopilot = (guidance_steps > 0.0).then(|| Autopilot {
        enabled: true,
        strength: (tuning.autopilot_strength_per_level * guidance_steps).min(1.0),
        range: tuning.autopilot_range + tuning.autopilot_range_per_level * guidance_steps,
        time_alive_ms: 0.0,
        max_lifetime_ms: tuning.autopilot_max_lifetime_ms,
        max_deviation: tuning.autopilot_max_deviation,
        original_target: target,
    });
    let origin = launcher.muzzle();

    let launcher = &mut state.launchers[index];
    launcher.missiles -= 1;
    launcher.last_fire = Some(now);

    let id = state.next_entity_id();
    state.player_missiles.push(PlayerMissile {
        id,
        launcher: index,
        origin,
        pos: origin,
        vel: (target - origin).normalize_or_zero() * speed,
        speed,
        target,
        explosion_radius,
        autopilot,
    });
    state.emit(GameEvent::Sound(SoundCue::Launch));
    state.emit_ammo_changed(index);
    Ok(id)
}

fn game_over(state: &mut GameState) {
    state.status = RunStatus::GameOver;
    state.run_stats.best_wave = state.run_stats.best_wave.max(state.wave);
    state.achievements.best_wave = state.achievements.best_wave.max(state.wave);
    collision::unlock_achievements(state);

    let engines: Vec<u32> = state.planes.iter().map(|p| p.id).collect();
    for plane_id in engines {
        state.emit(GameEvent::Sound(SoundCue::PlaneEngineStop { plane_id }));
    }

    log::info!("Game over: score {} on wave {}", state.score, state.wave);
    state.emit(GameEvent::Sound(SoundCue::GameOver));
    state.emit(GameEvent::GameOver {
        score: state.score,
        wave: state.wave,
    });
    state.emit(GameEvent::AchievementProgress(state.run_stats));
}

/// Demo player: intercepts the lowest incoming threat and continues waves
fn autoplay(state: &GameState, input: &mut TickInput) {
    if state.phase() == Some(ArcadePhase::WaveBreak) {
        input.continue_wave = true;
        return;
    }

    // Something already on its way to this point
    let covered = |p: Vec2| {
        state
            .player_missiles
            .iter()
            .any(|m| distance(m.target, p) < 60.0)
            || state
                .explosions
                .iter()
                .any(|e| e.is_player && distance(e.pos, p) < e.max_radius)
    };

    let threat = state
        .enemy_missiles
        .iter()
        .filter(|m| state.is_threatening(m))
        .map(|m| (m.pos, m.vel))
        .chain(state.planes.iter().map(|p| (p.pos, p.vel)))
        .filter(|(pos, _)| pos.y > 40.0 && !covered(*pos))
        .max_by(|a, b| a.0.y.partial_cmp(&b.0.y).unwrap_or(std::cmp::Ordering::Equal));
    let Some((pos, vel)) = threat else {
        return;
    };

    let now = state.time_ms;
    let launcher = (0..state.launchers.len())
        .filter(|&i| {
            let l = &state.launchers[i];
            state.is_launcher_alive(i) && l.missiles > 0 && l.cooldown_remaining(now) <= 0.0
        })
        .min_by(|&a, &b| {
            let da = (state.launchers[a].pos.x - pos.x).abs();
            let db = (state.launchers[b].pos.x - pos.x).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
    let Some(index) = launcher else {
        return;
    };

    // Lead the target by the interceptor's flight time (in frames)
    let muzzle = state.launchers[index].muzzle();
    let frames = distance(muzzle, pos) / state.tuning.player_missile_speed;
    input.fire = Some((index, pos + vel * frames));
}
