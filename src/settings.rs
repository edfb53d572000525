//! Player preferences
//!
//! Stored in the profile next to high scores. The host passes drained
//! events through `Settings::allows` before forwarding them to effects.

use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, GameMode, SoundCue};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Feedback ===
    /// Screen shake on impacts and kills
    pub screen_shake: bool,
    /// Vibration on supported devices
    pub haptics: bool,
    /// Floating score and bonus text
    pub floating_text: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Reduced motion (no shake, no vibration)
    pub reduced_motion: bool,

    /// Mode picked last time, preselected on the title screen
    pub last_mode: GameMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            haptics: true,
            floating_text: true,

            master_volume: 0.8,
            sfx_volume: 1.0,

            reduced_motion: false,

            last_mode: GameMode::Arcade,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective haptics (respects reduced_motion)
    pub fn effective_haptics(&self) -> bool {
        self.haptics && !self.reduced_motion
    }

    /// Final gain for sound effects
    pub fn sfx_gain(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Whether an event should reach its collaborator
    pub fn allows(&self, event: &GameEvent) -> bool {
        match event {
            GameEvent::ScreenShake { .. } => self.effective_screen_shake(),
            GameEvent::Haptic(_) => self.effective_haptics(),
            GameEvent::FloatingText { .. } => self.floating_text,
            // Engine stops always pass so no loop is left running
            GameEvent::Sound(SoundCue::PlaneEngineStop { .. }) => true,
            GameEvent::Sound(_) => self.sfx_gain() > 0.0,
            _ => true,
        }
    }

    /// Keep only the events these settings let through
    pub fn filter(&self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        events.into_iter().filter(|e| self.allows(e)).collect()
    }

    /// Clamp values a hand-edited save may have pushed out of range
    pub fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }
}
