//! Per-frame motion and targeting
//!
//! Integrates every projectile, plane and explosion by `dt`. Velocities are
//! in units per 60 Hz frame, so positions advance by `vel * dt / FRAME_MS`.

use glam::Vec2;
use rand::Rng;

use super::events::{GameEvent, SoundCue};
use super::state::{record_trail, EnemyMissile, GameState, PlayerMissile};
use super::waves;
use crate::consts::*;
use crate::{distance, distance_to_segment, frame_scale};

/// Advance all moving entities by one step
pub fn update(state: &mut GameState, dt_ms: f32) {
    update_player_missiles(state, dt_ms);
    update_enemy_missiles(state, dt_ms);
    update_planes(state, dt_ms);
    update_explosions(state, dt_ms);
}

fn update_player_missiles(state: &mut GameState, dt_ms: f32) {
    let scale = frame_scale(dt_ms);
    let threats: Vec<Vec2> = state.enemy_missiles.iter().map(|m| m.pos).collect();

    for missile in &mut state.player_missiles {
        steer_autopilot(missile, &threats, dt_ms);

        let step = missile.speed * scale;
        let to_target = missile.target - missile.pos;
        if to_target.length() <= step {
            // Arrives this frame; the resolver detonates it
            missile.pos = missile.target;
        } else {
            missile.pos += missile.vel * scale;
        }
    }
}

/// Bend an autopilot missile toward the nearest threat inside its envelope
fn steer_autopilot(missile: &mut PlayerMissile, threats: &[Vec2], dt_ms: f32) {
    let Some(autopilot) = missile.autopilot.as_mut() else {
        return;
    };
    if !autopilot.enabled {
        return;
    }

    autopilot.time_alive_ms += dt_ms;
    if autopilot.time_alive_ms > autopilot.max_lifetime_ms {
        // Out of guidance time: continue unguided to the original target
        autopilot.enabled = false;
        let original = autopilot.original_target;
        missile.target = original;
        missile.vel = (original - missile.pos).normalize_or_zero() * missile.speed;
        return;
    }

    let (range, max_deviation, strength, original) = (
        autopilot.range,
        autopilot.max_deviation,
        autopilot.strength,
        autopilot.original_target,
    );
    let pos = missile.pos;
    let heading = missile.vel;
    let nearest = threats
        .iter()
        .copied()
        .filter(|&t| distance(pos, t) <= range)
        // Threats already passed are left for other interceptors
        .filter(|&t| (t - pos).dot(heading) >= 0.0)
        .filter(|&t| distance_to_segment(t, missile.origin, original) <= max_deviation)
        .min_by(|a, b| {
            distance(pos, *a)
                .partial_cmp(&distance(pos, *b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(threat) = nearest {
        let desired = (threat - pos).normalize_or_zero();
        let current = missile.vel.normalize_or_zero();
        let blended = (current * (1.0 - strength) + desired * strength).normalize_or_zero();
        if blended != Vec2::ZERO {
            missile.vel = blended * missile.speed;
        }
        missile.target = threat;
    } else if missile.target != original {
        // Lost the threat: resume the original course
        missile.target = original;
        missile.vel = (original - pos).normalize_or_zero() * missile.speed;
    }
}

fn nearest_point(points: &[Vec2], from: Vec2) -> Option<Vec2> {
    points.iter().copied().min_by(|a, b| {
        distance(from, *a)
            .partial_cmp(&distance(from, *b))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

fn update_enemy_missiles(state: &mut GameState, dt_ms: f32) {
    let scale = frame_scale(dt_ms);
    let targets = state.live_targets();
    let cooldown = state.tuning.retarget_cooldown_ms;

    for missile in &mut state.enemy_missiles {
        if missile.is_seeker {
            missile.retarget_timer_ms -= dt_ms;
            if missile.retarget_timer_ms <= 0.0 {
                missile.retarget_timer_ms = cooldown;
                // No live target left: keep flying at the old one
                if let Some(target) = nearest_point(&targets, missile.pos) {
                    if target != missile.target {
                        missile.aim_at(target);
                    }
                }
            }
        }

        record_trail(&mut missile.trail, missile.pos);
        let step = missile.vel * scale;
        missile.pos += step;
        missile.traveled += step.length();
    }

    split_missiles(state);
}

/// Replace splitters that reached their split point with child warheads
fn split_missiles(state: &mut GameState) {
    let mut parents: Vec<EnemyMissile> = Vec::new();
    state.enemy_missiles.retain(|m| match m.split {
        Some(plan) if m.path_progress() >= plan.at_fraction && m.pos.y < GROUND_Y => {
            parents.push(m.clone());
            false
        }
        _ => true,
    });

    let spread = state.tuning.split_spread;
    for parent in parents {
        let children = parent.split.map(|p| p.children).unwrap_or(0);
        log::debug!("Missile {} split into {}", parent.id, children);
        for _ in 0..children {
            let offset = state.rng.random_range(-spread..=spread);
            let target = Vec2::new((parent.target.x + offset).clamp(0.0, CANVAS_WIDTH), GROUND_Y);
            let id = state.next_entity_id();
            let mut child = EnemyMissile::new(id, parent.pos, target, parent.speed);
            child.is_fragment = true;
            child.trail = parent.trail.clone();
            state.enemy_missiles.push(child);
        }
        state.emit(GameEvent::Sound(SoundCue::Split));
    }
}

fn update_planes(state: &mut GameState, dt_ms: f32) {
    let scale = frame_scale(dt_ms);
    let interval = state.tuning.plane_fire_interval_ms;
    let mut bomb_origins = Vec::new();

    for plane in &mut state.planes {
        record_trail(&mut plane.trail, plane.pos);
        plane.pos += plane.vel * scale;
        plane.fire_timer_ms += dt_ms;
        let on_screen = (0.0..=CANVAS_WIDTH).contains(&plane.pos.x);
        if plane.fire_timer_ms >= interval && on_screen {
            plane.fire_timer_ms = 0.0;
            bomb_origins.push(plane.pos + Vec2::new(0.0, 10.0));
        }
    }

    for origin in bomb_origins {
        waves::spawn_bomb(state, origin);
    }

    let mut exited = Vec::new();
    state.planes.retain(|p| {
        if p.has_exited() {
            exited.push(p.id);
            false
        } else {
            true
        }
    });
    for plane_id in exited {
        state.emit(GameEvent::Sound(SoundCue::PlaneEngineStop { plane_id }));
    }
}

fn update_explosions(state: &mut GameState, dt_ms: f32) {
    let scale = frame_scale(dt_ms);
    let fade = state.tuning.explosion_fade;

    for explosion in &mut state.explosions {
        if explosion.growing {
            explosion.radius = (explosion.radius + explosion.growth * scale).min(explosion.max_radius);
            if explosion.radius >= explosion.max_radius {
                explosion.growing = false;
            }
        } else {
            explosion.alpha = (explosion.alpha - fade * scale).max(0.0);
        }
    }
    state.explosions.retain(|e| !e.is_finished());
}
