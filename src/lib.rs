//! Silo Defense - A Missile Command style arcade/strategy game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, waves, economy, logistics)
//! - `platform`: Pause-aware frame timing
//! - `persistence`: Versioned profile save/load over a key/value store
//! - `tuning`: Data-driven game balance
//! - `achievements`, `highscores`, `settings`: Player progress and preferences

pub mod achievements;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use achievements::{Achievement, AchievementProgress};
pub use error::{ConfigError, DispatchError, FireError, PersistError, PurchaseError};
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical canvas resolution
    pub const CANVAS_WIDTH: f32 = 1200.0;
    pub const CANVAS_HEIGHT: f32 = 900.0;
    /// Enemy missiles at or below this y have hit the ground
    pub const GROUND_Y: f32 = 800.0;

    /// Velocities are expressed in units per frame at 60 Hz
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Longest frame delta accepted by the time manager (ms)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Player missiles detonate within this distance of their target
    pub const HIT_RADIUS: f32 = 10.0;
    /// Horizontal tolerance for a ground impact to destroy a city
    pub const CITY_HIT_TOLERANCE: f32 = 50.0;
    /// Horizontal tolerance for a ground impact to destroy a launcher
    pub const LAUNCHER_HIT_TOLERANCE: f32 = 40.0;

    /// City ground positions (x). Cities sit on the ground line.
    pub const CITY_X: [f32; 6] = [220.0, 330.0, 440.0, 760.0, 870.0, 980.0];
    pub const CITY_Y: f32 = 780.0;
    /// Impacts at or below this y can destroy a city (top of the skyline)
    pub const CITY_DESTRUCTION_Y: f32 = CITY_Y - 20.0;

    /// Launcher positions (x). Launchers sit on small mounds.
    pub const LAUNCHER_X: [f32; 3] = [100.0, 600.0, 1100.0];
    pub const LAUNCHER_Y: f32 = 770.0;
    /// Impacts at or below this y can destroy a launcher (top of the mound)
    pub const LAUNCHER_DESTRUCTION_Y: f32 = LAUNCHER_Y - 20.0;

    /// Player targets are clamped to stay this far above ground
    pub const MIN_TARGET_CLEARANCE: f32 = 20.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Shortest distance from `p` to the segment `a`-`b`
#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return distance(p, a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    distance(p, a + ab * t)
}

/// Scale factor turning a millisecond delta into frame units
#[inline]
pub fn frame_scale(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let d = distance(Vec2::new(300.0, 400.0), Vec2::new(320.0, 410.0));
        assert!((d - 22.36).abs() < 0.01);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 0.0);
        assert!((distance_to_segment(Vec2::new(50.0, 30.0), a, b) - 30.0).abs() < 1e-4);
        // Beyond the end clamps to the endpoint
        assert!((distance_to_segment(Vec2::new(130.0, 40.0), a, b) - 50.0).abs() < 1e-4);
        // Degenerate segment
        assert!((distance_to_segment(Vec2::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-4);
    }
}
