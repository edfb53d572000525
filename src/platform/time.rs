//! Frame timing
//!
//! Turns host wall-clock readings into game-time deltas. Time spent paused
//! or hidden never reaches the simulation, and a long stall (tab switch,
//! debugger) is clamped so entities cannot tunnel through each other.

use crate::consts::MAX_FRAME_MS;

#[derive(Debug, Clone, Default)]
pub struct TimeManager {
    last_ms: Option<f64>,
    paused_at: Option<f64>,
    paused_total_ms: f64,
}

impl TimeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta for a frame observed at `now_ms`; zero while paused
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        if self.paused_at.is_some() {
            return 0.0;
        }
        let delta = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        (delta as f32).min(MAX_FRAME_MS)
    }

    pub fn pause(&mut self, now_ms: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now_ms);
        }
    }

    /// Resume, excluding the paused span from the next delta
    pub fn resume(&mut self, now_ms: f64) {
        let Some(at) = self.paused_at.take() else {
            return;
        };
        let paused = (now_ms - at).max(0.0);
        self.paused_total_ms += paused;
        if let Some(last) = self.last_ms.as_mut() {
            *last += paused;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Total wall time spent paused (ms)
    pub fn paused_total_ms(&self) -> f64 {
        self.paused_total_ms
    }
}
