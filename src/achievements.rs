//! Achievement tracking
//!
//! Counters are cumulative across runs and persisted with the profile. The
//! simulation bumps them as things die and asks for newly unlocked entries.

use serde::{Deserialize, Serialize};

/// Unlockable achievements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Achievement {
    FirstBlood,
    Centurion,
    Exterminator,
    SeekerHunter,
    Flak,
    Ace,
    Survivor,
    Veteran,
}

impl Achievement {
    pub const ALL: [Achievement; 8] = [
        Achievement::FirstBlood,
        Achievement::Centurion,
        Achievement::Exterminator,
        Achievement::SeekerHunter,
        Achievement::Flak,
        Achievement::Ace,
        Achievement::Survivor,
        Achievement::Veteran,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstBlood => "First Blood",
            Achievement::Centurion => "Centurion",
            Achievement::Exterminator => "Exterminator",
            Achievement::SeekerHunter => "Seeker Hunter",
            Achievement::Flak => "Flak",
            Achievement::Ace => "Ace",
            Achievement::Survivor => "Survivor",
            Achievement::Veteran => "Veteran",
        }
    }

    fn is_met(&self, p: &AchievementProgress) -> bool {
        match self {
            Achievement::FirstBlood => p.missiles_destroyed >= 1,
            Achievement::Centurion => p.missiles_destroyed >= 100,
            Achievement::Exterminator => p.missiles_destroyed >= 1000,
            Achievement::SeekerHunter => p.seekers_destroyed >= 25,
            Achievement::Flak => p.planes_destroyed >= 1,
            Achievement::Ace => p.planes_destroyed >= 10,
            Achievement::Survivor => p.best_wave >= 10,
            Achievement::Veteran => p.waves_completed >= 50,
        }
    }
}

/// Counters accumulated during a single run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressDelta {
    pub missiles_destroyed: u32,
    pub seekers_destroyed: u32,
    pub planes_destroyed: u32,
    pub waves_completed: u32,
    pub best_wave: u32,
}

impl ProgressDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Cumulative achievement counters and unlocked set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementProgress {
    pub missiles_destroyed: u32,
    pub seekers_destroyed: u32,
    pub planes_destroyed: u32,
    pub waves_completed: u32,
    pub best_wave: u32,
    pub unlocked: Vec<Achievement>,
}

impl AchievementProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    /// Fold a run delta into the cumulative counters
    pub fn apply(&mut self, delta: &ProgressDelta) {
        self.missiles_destroyed = self.missiles_destroyed.saturating_add(delta.missiles_destroyed);
        self.seekers_destroyed = self.seekers_destroyed.saturating_add(delta.seekers_destroyed);
        self.planes_destroyed = self.planes_destroyed.saturating_add(delta.planes_destroyed);
        self.waves_completed = self.waves_completed.saturating_add(delta.waves_completed);
        self.best_wave = self.best_wave.max(delta.best_wave);
    }

    /// Unlock everything whose condition now holds, returning the new ones
    pub fn check(&mut self) -> Vec<Achievement> {
        let mut newly = Vec::new();
        for achievement in Achievement::ALL {
            if !self.is_unlocked(achievement) && achievement.is_met(self) {
                self.unlocked.push(achievement);
                newly.push(achievement);
            }
        }
        newly
    }
}
