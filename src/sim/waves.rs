//! Wave lifecycle and enemy spawning
//!
//! Arcade runs discrete waves through `ArcadePhase`; Command runs a
//! continuous difficulty ramp with periodic resource harvests.

use glam::Vec2;
use rand::Rng;

use super::economy::{self, city_productivity};
use super::events::{GameEvent, SoundCue, WaveSummary, Waveform, colors};
use super::logistics;
use super::state::{
    ArcadePhase, ArcadeState, EnemyMissile, GameMode, GameState, ModeState, Plane,
    ProductionMode, RunStatus, SplitPlan,
};
use crate::consts::*;
use crate::frame_scale;

/// Time each launcher is shown during the missile bonus (ms)
pub const MISSILE_BONUS_INTERVAL_MS: f32 = 300.0;
/// Time each city is shown during the city bonus (ms)
pub const CITY_BONUS_INTERVAL_MS: f32 = 500.0;
/// Score for each surviving city, multiplied by the wave number
pub const CITY_BONUS_SCORE_PER_WAVE: u64 = 100;
/// Lump scrap at the end of a wave, multiplied by the wave number
pub const WAVE_BONUS_SCRAP_PER_WAVE: u32 = 5;
/// Command difficulty steps up every this many ms
pub const DIFFICULTY_STEP_MS: f32 = 30_000.0;
pub const DIFFICULTY_STEP: f32 = 0.2;

/// Advance spawning and phase bookkeeping for one frame
pub fn update(state: &mut GameState, dt_ms: f32) {
    match state.game_mode() {
        GameMode::Arcade => update_arcade(state, dt_ms),
        GameMode::Command => update_command(state, dt_ms),
    }
}

// === Spawning ===

/// Random live ground target, or a random ground point if nothing is left
fn pick_target(state: &mut GameState) -> Vec2 {
    let targets = state.live_targets();
    if targets.is_empty() {
        return Vec2::new(state.rng.random_range(0.0..CANVAS_WIDTH), GROUND_Y);
    }
    targets[state.rng.random_range(0..targets.len())]
}

/// Launch an enemy missile from the top edge, rolling for seeker or splitter
pub fn spawn_enemy_missile(state: &mut GameState) -> u32 {
    let origin = Vec2::new(state.rng.random_range(0.0..CANVAS_WIDTH), 0.0);
    let target = pick_target(state);
    let wave = state.wave;
    let speed = state.tuning.enemy_speed(wave);
    let id = state.next_entity_id();
    let mut missile = EnemyMissile::new(id, origin, target, speed);

    // One roll so a missile is never both seeker and splitter
    let roll: f32 = state.rng.random();
    let tuning = &state.tuning;
    if wave >= tuning.seeker_start_wave && roll < tuning.seeker_chance {
        missile.is_seeker = true;
        missile.retarget_timer_ms = tuning.retarget_cooldown_ms;
    } else if wave >= tuning.splitter_start_wave
        && roll < tuning.seeker_chance + tuning.splitter_chance
    {
        let children = tuning.split_child_count(wave);
        let (min, max) = (tuning.split_fraction_min, tuning.split_fraction_max);
        missile.split = Some(SplitPlan {
            at_fraction: state.rng.random_range(min..=max),
            children,
        });
    }

    state.enemy_missiles.push(missile);
    id
}

/// Drop a bomb from a plane onto a random live target
pub fn spawn_bomb(state: &mut GameState, origin: Vec2) -> u32 {
    let target = pick_target(state);
    let speed = state.tuning.enemy_speed(state.wave);
    let id = state.next_entity_id();
    state
        .enemy_missiles
        .push(EnemyMissile::new(id, origin, target, speed));
    id
}

/// Send a plane across the sky from a random side
pub fn spawn_plane(state: &mut GameState) -> u32 {
    let from_left = state.rng.random_bool(0.5);
    let y = state.rng.random_range(100.0..=300.0);
    let (x, vx) = if from_left {
        (-40.0, state.tuning.plane_speed)
    } else {
        (CANVAS_WIDTH + 40.0, -state.tuning.plane_speed)
    };
    let hp = state.tuning.plane_hp_base + state.wave.saturating_sub(5) / 5;
    let id = state.next_entity_id();
    state.planes.push(Plane {
        id,
        pos: Vec2::new(x, y),
        vel: Vec2::new(vx, 0.0),
        hp,
        from_left,
        fire_timer_ms: 0.0,
        hit_by: Vec::new(),
        trail: Vec::new(),
    });
    state.emit(GameEvent::Sound(SoundCue::PlaneEngineStart { plane_id: id }));
    log::debug!("Plane {} inbound ({} hp)", id, hp);
    id
}

// === Arcade ===

fn update_arcade(state: &mut GameState, dt_ms: f32) {
    let Some(phase) = state.phase() else {
        return;
    };
    match phase {
        ArcadePhase::Spawning => {
            if let Some(arcade) = state.arcade_mut() {
                arcade.wave_timer_ms += dt_ms;
            }
            spawn_arcade(state, dt_ms);
            check_wave_complete(state);
        }
        ArcadePhase::MissileBonus { index, timer_ms } => {
            advance_missile_bonus(state, index, timer_ms + dt_ms)
        }
        ArcadePhase::CityBonus { index, timer_ms } => {
            advance_city_bonus(state, index, timer_ms + dt_ms)
        }
        ArcadePhase::WaveBreak => {}
    }
}

fn spawn_arcade(state: &mut GameState, dt_ms: f32) {
    let scale = frame_scale(dt_ms);
    let wave = state.wave;
    let Some(arcade) = state.arcade() else {
        return;
    };
    let enemies_left = arcade.enemies_to_spawn > 0;
    let planes_left = planes_pending(state);
    if !enemies_left && !planes_left {
        return;
    }

    let enemy_chance = state.tuning.enemy_spawn_chance(wave) * scale;
    if enemies_left && state.rng.random::<f32>() < enemy_chance {
        spawn_enemy_missile(state);
        if let Some(arcade) = state.arcade_mut() {
            arcade.enemies_to_spawn -= 1;
            arcade.enemies_spawned += 1;
        }
    }

    let plane_chance = state.tuning.plane_spawn_chance(wave) * scale;
    if planes_left && state.rng.random::<f32>() < plane_chance {
        spawn_plane(state);
        if let Some(arcade) = state.arcade_mut() {
            arcade.planes_spawned += 1;
        }
    }
}

/// Planes the wave still owes. A wave whose tuning never rolls planes owes none.
fn planes_pending(state: &GameState) -> bool {
    state.arcade().is_some_and(|a| a.planes_spawned < a.planes_to_spawn)
        && state.tuning.plane_spawn_chance(state.wave) > 0.0
}

/// End the wave if everything has cleared. Does nothing unless spawning is
/// finished and the field is quiet, so it is safe to call at any time.
pub fn check_wave_complete(state: &mut GameState) -> bool {
    let Some(arcade) = state.arcade() else {
        return false;
    };
    if arcade.phase != ArcadePhase::Spawning || arcade.enemies_to_spawn > 0 {
        return false;
    }
    if planes_pending(state) {
        return false;
    }
    if !state.player_missiles.is_empty() || !state.explosions.is_empty() || !state.planes.is_empty()
    {
        return false;
    }
    if state.enemy_missiles.iter().any(|m| state.is_threatening(m)) {
        return false;
    }

    // Stragglers aimed at rubble are not worth waiting for
    state.enemy_missiles.clear();

    let wave = state.wave;
    if let Some(arcade) = state.arcade_mut() {
        arcade.phase = ArcadePhase::MissileBonus {
            index: 0,
            timer_ms: 0.0,
        };
        arcade.summary = WaveSummary {
            wave,
            ..Default::default()
        };
    }
    log::info!("Wave {} cleared", wave);
    state.emit(GameEvent::WaveCleared { wave });
    state.emit(GameEvent::MissileBonusStarted);
    true
}

fn set_phase(state: &mut GameState, phase: ArcadePhase) {
    if let Some(arcade) = state.arcade_mut() {
        arcade.phase = phase;
    }
}

fn advance_missile_bonus(state: &mut GameState, index: usize, timer_ms: f32) {
    if timer_ms < MISSILE_BONUS_INTERVAL_MS {
        set_phase(state, ArcadePhase::MissileBonus { index, timer_ms });
        return;
    }
    award_missile_bonus(state, index);

    let next = index + 1;
    if next >= state.launchers.len() {
        set_phase(
            state,
            ArcadePhase::CityBonus {
                index: 0,
                timer_ms: 0.0,
            },
        );
        state.emit(GameEvent::CityBonusStarted);
    } else {
        set_phase(
            state,
            ArcadePhase::MissileBonus {
                index: next,
                timer_ms: timer_ms - MISSILE_BONUS_INTERVAL_MS,
            },
        );
    }
}

fn award_missile_bonus(state: &mut GameState, index: usize) {
    if !state.is_launcher_alive(index) {
        return;
    }
    let launcher = &state.launchers[index];
    let (remaining, pos) = (launcher.missiles, launcher.pos);
    if remaining == 0 {
        return;
    }

    state.economy.scrap = state.economy.scrap.saturating_add(remaining);
    if let Some(arcade) = state.arcade_mut() {
        arcade.summary.missile_bonus_scrap += remaining;
    }
    state.emit(GameEvent::FloatingText {
        pos: pos - Vec2::new(0.0, 40.0),
        text: format!("+{} scrap", remaining),
        color: colors::SCRAP,
        life_ms: 800.0,
    });
    state.emit(GameEvent::Sound(SoundCue::BonusTone {
        frequency: 440.0 + 110.0 * index as f32,
        duration_ms: 120.0,
        waveform: Waveform::Square,
        volume: 0.3,
    }));
}

fn advance_city_bonus(state: &mut GameState, index: usize, timer_ms: f32) {
    if timer_ms < CITY_BONUS_INTERVAL_MS {
        set_phase(state, ArcadePhase::CityBonus { index, timer_ms });
        return;
    }
    award_city_bonus(state, index);

    let next = index + 1;
    if next >= state.cities.len() {
        finish_wave(state);
    } else {
        set_phase(
            state,
            ArcadePhase::CityBonus {
                index: next,
                timer_ms: timer_ms - CITY_BONUS_INTERVAL_MS,
            },
        );
    }
}

fn award_city_bonus(state: &mut GameState, index: usize) {
    if !state.is_city_alive(index) {
        return;
    }
    let city = &state.cities[index];
    let (level, pos) = (city.upgrade_level, city.pos);
    let score = CITY_BONUS_SCORE_PER_WAVE * state.wave as u64;
    let scrap = economy::city_bonus_scrap(level);

    state.score += score;
    state.economy.scrap = state.economy.scrap.saturating_add(scrap);
    if let Some(arcade) = state.arcade_mut() {
        arcade.summary.city_bonus_score += score;
        arcade.summary.city_bonus_scrap += scrap;
        arcade.summary.cities_saved += 1;
    }
    state.emit(GameEvent::FloatingText {
        pos: pos - Vec2::new(0.0, 50.0),
        text: format!("+{}", score),
        color: colors::BONUS,
        life_ms: 1000.0,
    });
    state.emit(GameEvent::Sound(SoundCue::BonusTone {
        frequency: 523.0 + 65.0 * index as f32,
        duration_ms: 180.0,
        waveform: Waveform::Sine,
        volume: 0.4,
    }));
}

fn finish_wave(state: &mut GameState) {
    state.respawn_launchers();

    let wave = state.wave;
    let bonus = WAVE_BONUS_SCRAP_PER_WAVE * wave;
    state.economy.scrap = state.economy.scrap.saturating_add(bonus);

    let mut summary = None;
    if let Some(arcade) = state.arcade_mut() {
        arcade.summary.wave_bonus_scrap = bonus;
        arcade.phase = ArcadePhase::WaveBreak;
        summary = Some(arcade.summary.clone());
    }

    state.run_stats.waves_completed += 1;
    state.run_stats.best_wave = state.run_stats.best_wave.max(wave);
    state.achievements.waves_completed += 1;
    state.achievements.best_wave = state.achievements.best_wave.max(wave);
    super::collision::unlock_achievements(state);

    if let Some(summary) = summary {
        log::info!(
            "Wave {} break: {} scrap earned, {} cities saved",
            wave,
            summary.total_scrap(),
            summary.cities_saved
        );
        state.emit(GameEvent::WaveBreak(summary));
    }
}

/// Leave the wave break and start the next wave. Returns false outside a break.
pub fn continue_wave(state: &mut GameState) -> bool {
    if state.status != RunStatus::Running || state.phase() != Some(ArcadePhase::WaveBreak) {
        return false;
    }
    state.wave += 1;
    let wave = state.wave;
    let enemies = economy::enemies_for_wave(wave);
    let planes = economy::planes_for_wave(wave);
    if let Some(arcade) = state.arcade_mut() {
        *arcade = ArcadeState {
            enemies_to_spawn: enemies,
            planes_to_spawn: planes,
            ..ArcadeState::first_wave()
        };
    }
    state.destroyed_launchers.clear();

    log::info!("Wave {} starting: {} missiles, {} planes", wave, enemies, planes);
    state.emit(GameEvent::WaveStarted {
        wave,
        enemies,
        planes,
    });
    true
}

// === Command ===

/// Difficulty multiplier after `game_time_ms` of continuous play
pub fn command_difficulty(game_time_ms: f32) -> f32 {
    1.0 + (game_time_ms / DIFFICULTY_STEP_MS).floor() * DIFFICULTY_STEP
}

fn update_command(state: &mut GameState, dt_ms: f32) {
    let ModeState::Command(command) = &mut state.mode else {
        return;
    };
    command.game_time_ms += dt_ms;
    command.spawn_timer_ms += dt_ms;
    command.resource_timer_ms += dt_ms;

    let difficulty = command_difficulty(command.game_time_ms);
    let ramped = difficulty != command.difficulty;
    command.difficulty = difficulty;
    let game_time = command.game_time_ms;

    if ramped {
        // Wave number tracks difficulty steps so speeds and variants scale
        state.wave = 1 + (game_time / DIFFICULTY_STEP_MS) as u32;
        log::info!("Difficulty now {:.1}", difficulty);
        state.emit(GameEvent::DifficultyChanged { difficulty });
    }

    let interval = state.tuning.command_spawn_interval_ms / difficulty;
    let resource_interval = state.tuning.resource_interval_ms;
    let (spawn_due, harvest_due) = match &mut state.mode {
        ModeState::Command(command) => {
            let spawn_due = command.spawn_timer_ms >= interval;
            if spawn_due {
                command.spawn_timer_ms -= interval;
            }
            let harvest_due = command.resource_timer_ms >= resource_interval;
            if harvest_due {
                command.resource_timer_ms -= resource_interval;
            }
            (spawn_due, harvest_due)
        }
        ModeState::Arcade(_) => (false, false),
    };

    if spawn_due {
        spawn_enemy_missile(state);
        if state.rng.random::<f32>() < state.tuning.command_plane_chance {
            spawn_plane(state);
        }
    }

    accrue_production(state, dt_ms);
    if harvest_due {
        harvest(state);
        logistics::auto_dispatch(state);
    }
}

/// Grow population and accumulate production in every live city
fn accrue_production(state: &mut GameState, dt_ms: f32) {
    let seconds = dt_ms / 1000.0;
    let tuning = &state.tuning;
    for (index, city) in state.cities.iter_mut().enumerate() {
        if state.destroyed_cities.contains(&index) {
            continue;
        }
        city.population = (city.population + tuning.population_growth * seconds)
            .min(tuning.population_cap);
        let rate = match city.production {
            ProductionMode::Scrap => tuning.scrap_rate,
            ProductionMode::Science => tuning.science_rate,
            ProductionMode::Ammo => tuning.ammo_rate,
        };
        // A full city produces twice as fast as an empty one
        let crowd = 1.0 + city.population / tuning.population_cap;
        city.accrued += rate * city_productivity(city.upgrade_level) * crowd * seconds;
    }
}

/// Move whole units of accrued production into the treasury or stockpile
pub fn harvest(state: &mut GameState) {
    let cap = state.tuning.ammo_stockpile_cap;
    let mut scrap = 0;
    let mut science = 0;
    for (index, city) in state.cities.iter_mut().enumerate() {
        if state.destroyed_cities.contains(&index) {
            continue;
        }
        let whole = city.accrued.floor();
        city.accrued -= whole;
        let amount = whole as u32;
        match city.production {
            ProductionMode::Scrap => scrap += amount,
            ProductionMode::Science => science += amount,
            ProductionMode::Ammo => {
                city.ammo_stockpile = (city.ammo_stockpile + amount).min(cap);
            }
        }
    }
    state.economy.scrap = state.economy.scrap.saturating_add(scrap);
    state.economy.science = state.economy.science.saturating_add(science);
    if scrap + science > 0 {
        log::debug!("Harvest: {} scrap, {} science", scrap, science);
    }
}
