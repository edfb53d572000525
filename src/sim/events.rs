//! Notifications emitted by the simulation
//!
//! The core never talks to audio, rendering, haptics or storage directly.
//! It queues `GameEvent`s on the state; the host drains them after each tick
//! and forwards them to whatever collaborators it has.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::achievements::{Achievement, ProgressDelta};

/// Oscillator shape for synthesized tones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// Sound cues the audio collaborator must be able to play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SoundCue {
    Launch,
    EmptyAmmo,
    Cooldown,
    Explosion { player: bool },
    BonusTone {
        frequency: f32,
        duration_ms: f32,
        waveform: Waveform,
        volume: f32,
    },
    PlaneEngineStart { plane_id: u32 },
    PlaneEngineStop { plane_id: u32 },
    Split,
    CityLost,
    GameOver,
}

/// Vibration patterns for devices that support it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticPattern {
    Light,
    Medium,
    Heavy,
}

/// Totals shown when a wave break starts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveSummary {
    pub wave: u32,
    pub missile_bonus_scrap: u32,
    pub city_bonus_score: u64,
    pub city_bonus_scrap: u32,
    pub wave_bonus_scrap: u32,
    pub cities_saved: u32,
}

impl WaveSummary {
    /// All scrap earned during the bonus phases
    pub fn total_scrap(&self) -> u32 {
        self.missile_bonus_scrap + self.city_bonus_scrap + self.wave_bonus_scrap
    }
}

/// Everything the simulation tells the outside world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    /// Floating text (score popups, bonus counts)
    FloatingText {
        pos: Vec2,
        text: String,
        color: u32,
        life_ms: f32,
    },
    ScreenShake { intensity: f32, duration_ms: f32 },
    Haptic(HapticPattern),
    CityDestroyed { index: usize },
    CityRepaired { index: usize },
    LauncherDestroyed { index: usize },
    /// Launcher ammo changed (fire, delivery, refill, capacity upgrade)
    AmmoChanged { launcher: usize, missiles: u32, max: u32 },
    /// Score or economy totals changed during the tick
    ResourcesChanged { score: u64, scrap: u32, science: u32 },
    WaveCleared { wave: u32 },
    MissileBonusStarted,
    CityBonusStarted,
    WaveBreak(WaveSummary),
    WaveStarted { wave: u32, enemies: u32, planes: u32 },
    DifficultyChanged { difficulty: f32 },
    AchievementUnlocked(Achievement),
    /// Run totals to add to the persisted achievement counters
    AchievementProgress(ProgressDelta),
    GameOver { score: u64, wave: u32 },
}

/// Floating text colors (0xRRGGBB)
pub mod colors {
    pub const SCORE: u32 = 0xffff66;
    pub const SCRAP: u32 = 0x66ccff;
    pub const BONUS: u32 = 0x66ff66;
}
