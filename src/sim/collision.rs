//! Collision resolution
//!
//! Runs once per frame after motion, in a fixed order:
//!
//! 1. Player missiles that reached their target detonate.
//! 2. Enemy missiles at ground level impact and may destroy a city or launcher.
//! 3. Player explosions destroy overlapping enemy missiles.
//! 4. Player explosions damage overlapping planes.
//!
//! Each pass works on a snapshot of the explosions that existed when it
//! started, so blasts spawned by a kill never chain within the same frame.
//! Enemy-side explosions are cosmetic and never collide with anything.

use glam::Vec2;

use super::economy::{
    MISSILE_KILL_SCORE, MISSILE_KILL_SCRAP, PLANE_KILL_SCORE, PLANE_KILL_SCRAP,
    PLANE_KILL_SCRAP_SALVAGE, SEEKER_KILL_SCORE, SEEKER_KILL_SCRAP,
};
use super::economy::GlobalUpgrade;
use super::events::{GameEvent, HapticPattern, SoundCue, colors};
use super::state::{
    EnemyMissile, Explosion, ExplosionKind, GameState, Plane, KILL_EXPLOSION_RADIUS,
};
use crate::consts::*;
use crate::distance;

/// A player blast as it stood at the start of a pass
#[derive(Debug, Clone, Copy)]
struct Blast {
    id: u32,
    pos: Vec2,
    radius: f32,
    launcher: Option<usize>,
}

fn player_blasts(state: &GameState) -> Vec<Blast> {
    state
        .explosions
        .iter()
        .filter(|e| e.is_player && e.radius > 0.0)
        .map(|e| Blast {
            id: e.id,
            pos: e.pos,
            radius: e.radius,
            launcher: e.launcher,
        })
        .collect()
}

/// Run all collision passes for this frame
pub fn resolve(state: &mut GameState) {
    detonate_arrived(state);
    resolve_ground_impacts(state);
    resolve_missile_hits(state);
    resolve_plane_hits(state);
}

/// Pass 1: player missiles within hit radius of their target explode there
fn detonate_arrived(state: &mut GameState) {
    let mut arrived = Vec::new();
    state.player_missiles.retain(|m| {
        if distance(m.pos, m.target) < HIT_RADIUS {
            arrived.push((m.target, m.explosion_radius, m.launcher));
            false
        } else {
            true
        }
    });

    let growth = state.tuning.explosion_growth;
    for (pos, radius, launcher) in arrived {
        let id = state.next_entity_id();
        state
            .explosions
            .push(Explosion::player(id, pos, radius, growth, launcher));
        state.emit(GameEvent::Sound(SoundCue::Explosion { player: true }));
    }
}

/// Pass 2: enemy missiles reaching the ground
fn resolve_ground_impacts(state: &mut GameState) {
    let mut impacts = Vec::new();
    state.enemy_missiles.retain(|m| {
        if m.pos.y >= GROUND_Y {
            impacts.push((m.pos.x, m.is_fragment));
            false
        } else {
            true
        }
    });

    for (x, is_fragment) in impacts {
        let point = Vec2::new(x, GROUND_Y);
        let kind = if is_fragment {
            ExplosionKind::Splitter
        } else {
            ExplosionKind::Normal
        };
        let id = state.next_entity_id();
        state
            .explosions
            .push(Explosion::hostile(id, point, kind, kind.preset_radius()));
        state.emit(GameEvent::Sound(SoundCue::Explosion { player: false }));
        state.emit(GameEvent::ScreenShake {
            intensity: 3.0,
            duration_ms: 150.0,
        });

        for index in 0..state.cities.len() {
            let city = state.cities[index].pos;
            if state.is_city_alive(index)
                && (city.x - point.x).abs() < CITY_HIT_TOLERANCE
                && point.y >= CITY_DESTRUCTION_Y
            {
                lose_city(state, index);
            }
        }

        for index in 0..state.launchers.len() {
            let launcher = state.launchers[index].pos;
            if state.is_launcher_alive(index)
                && (launcher.x - point.x).abs() < LAUNCHER_HIT_TOLERANCE
                && point.y >= LAUNCHER_DESTRUCTION_Y
                && state.destroy_launcher(index)
            {
                state.emit(GameEvent::LauncherDestroyed { index });
                state.emit_ammo_changed(index);
            }
        }
    }
}

fn lose_city(state: &mut GameState, index: usize) {
    if !state.destroy_city(index) {
        return;
    }
    let pos = state.cities[index].pos;
    let id = state.next_entity_id();
    state.explosions.push(Explosion::hostile(
        id,
        pos,
        ExplosionKind::City,
        ExplosionKind::City.preset_radius(),
    ));
    state.emit(GameEvent::CityDestroyed { index });
    state.emit(GameEvent::ScreenShake {
        intensity: 10.0,
        duration_ms: 500.0,
    });
    state.emit(GameEvent::Haptic(HapticPattern::Heavy));
    state.emit(GameEvent::Sound(SoundCue::CityLost));
}

/// Pass 3: player blasts against enemy missiles
fn resolve_missile_hits(state: &mut GameState) {
    let blasts = player_blasts(state);
    let mut killed: Vec<(EnemyMissile, Option<usize>)> = Vec::new();

    for blast in &blasts {
        let mut i = 0;
        while i < state.enemy_missiles.len() {
            if distance(state.enemy_missiles[i].pos, blast.pos) < blast.radius {
                let missile = state.enemy_missiles.remove(i);
                killed.push((missile, blast.launcher));
            } else {
                i += 1;
            }
        }
    }

    for (missile, launcher) in killed {
        reward_missile_kill(state, &missile, launcher);
    }
}

fn credit_launcher(state: &mut GameState, launcher: Option<usize>) {
    if let Some(l) = launcher.and_then(|i| state.launchers.get_mut(i)) {
        l.kills += 1;
    }
}

fn reward_missile_kill(state: &mut GameState, missile: &EnemyMissile, launcher: Option<usize>) {
    let (score, scrap) = if missile.is_seeker {
        (SEEKER_KILL_SCORE, SEEKER_KILL_SCRAP)
    } else {
        (MISSILE_KILL_SCORE, MISSILE_KILL_SCRAP)
    };
    state.score += score;
    state.economy.award_kill_scrap(scrap);
    credit_launcher(state, launcher);

    let id = state.next_entity_id();
    state.explosions.push(Explosion::hostile(
        id,
        missile.pos,
        ExplosionKind::Normal,
        KILL_EXPLOSION_RADIUS,
    ));
    state.emit(GameEvent::ScreenShake {
        intensity: 2.0,
        duration_ms: 100.0,
    });
    state.emit(GameEvent::Haptic(HapticPattern::Light));

    state.run_stats.missiles_destroyed += 1;
    state.achievements.missiles_destroyed += 1;
    if missile.is_seeker {
        state.run_stats.seekers_destroyed += 1;
        state.achievements.seekers_destroyed += 1;
    }
    unlock_achievements(state);
}

/// Pass 4: player blasts against planes, one hit point per blast
fn resolve_plane_hits(state: &mut GameState) {
    let blasts = player_blasts(state);
    let mut downed: Vec<(Plane, Option<usize>)> = Vec::new();

    for blast in &blasts {
        let mut i = 0;
        while i < state.planes.len() {
            let plane = &mut state.planes[i];
            if !plane.hit_by.contains(&blast.id) && distance(plane.pos, blast.pos) < blast.radius {
                plane.hit_by.push(blast.id);
                plane.hp = plane.hp.saturating_sub(1);
                if plane.hp == 0 {
                    downed.push((state.planes.remove(i), blast.launcher));
                    continue;
                }
            }
            i += 1;
        }
    }

    for (plane, launcher) in downed {
        reward_plane_kill(state, &plane, launcher);
    }
}

fn reward_plane_kill(state: &mut GameState, plane: &Plane, launcher: Option<usize>) {
    let scrap = if state.economy.has(GlobalUpgrade::Salvage) {
        PLANE_KILL_SCRAP_SALVAGE
    } else {
        PLANE_KILL_SCRAP
    };
    state.score += PLANE_KILL_SCORE;
    state.economy.award_kill_scrap(scrap);
    credit_launcher(state, launcher);
    log::debug!("Plane {} shot down", plane.id);

    let id = state.next_entity_id();
    state.explosions.push(Explosion::hostile(
        id,
        plane.pos,
        ExplosionKind::Plane,
        ExplosionKind::Plane.preset_radius(),
    ));
    state.emit(GameEvent::Sound(SoundCue::PlaneEngineStop { plane_id: plane.id }));
    state.emit(GameEvent::ScreenShake {
        intensity: 5.0,
        duration_ms: 300.0,
    });
    state.emit(GameEvent::Haptic(HapticPattern::Medium));
    state.emit(GameEvent::FloatingText {
        pos: plane.pos,
        text: format!("+{}", PLANE_KILL_SCORE),
        color: colors::SCORE,
        life_ms: 1000.0,
    });

    state.run_stats.planes_destroyed += 1;
    state.achievements.planes_destroyed += 1;
    unlock_achievements(state);
}

pub(crate) fn unlock_achievements(state: &mut GameState) {
    for achievement in state.achievements.check() {
        log::info!("Achievement unlocked: {}", achievement.title());
        state.emit(GameEvent::AchievementUnlocked(achievement));
    }
}
