//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Wall-clock to game-time conversion (pause-aware, clamped)

pub mod time;

pub use time::TimeManager;
