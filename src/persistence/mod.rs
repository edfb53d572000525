//! Player profile persistence
//!
//! Features:
//! - Versioned JSON document behind a `Storage` backend
//! - Migration of older documents before decoding
//! - Backup rotation (old profile → backup on every save)
//! - Corruption fallback (primary → backup → fresh profile)

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::achievements::AchievementProgress;
use crate::error::PersistError;
use crate::highscores::HighScores;
use crate::settings::Settings;

pub const PROFILE_KEY: &str = "silo_defense_profile";
pub const BACKUP_KEY: &str = "silo_defense_profile_backup";
pub const PROFILE_VERSION: u32 = 2;

/// Everything that survives between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    pub version: u32,
    pub saved_at: f64,
    pub high_scores: HighScores,
    pub achievements: AchievementProgress,
    pub settings: Settings,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            saved_at: 0.0,
            high_scores: HighScores::default(),
            achievements: AchievementProgress::default(),
            settings: Settings::default(),
        }
    }
}

/// Bring an older document up to the current layout
///
/// Version 1 kept the last mode at the top level instead of in settings.
fn migrate(value: &mut Value) -> Result<(), String> {
    let table = value
        .as_object_mut()
        .ok_or_else(|| "profile root must be a JSON object".to_string())?;

    let version = match table.get("version") {
        None => 1,
        Some(v) => v
            .as_u64()
            .ok_or_else(|| "profile version is not a number".to_string())?,
    };
    if version > PROFILE_VERSION as u64 {
        return Err(format!(
            "unsupported profile version {} (expected at most {})",
            version, PROFILE_VERSION
        ));
    }

    if version < 2 {
        let last_mode = table.remove("last_mode");
        let settings = table
            .entry("settings")
            .or_insert_with(|| Value::Object(Default::default()));
        if let (Some(mode), Some(settings)) = (last_mode, settings.as_object_mut()) {
            settings.entry("last_mode").or_insert(mode);
        }
    }

    for key in ["high_scores", "achievements", "settings"] {
        if !table.contains_key(key) {
            table.insert(key.to_string(), Value::Object(Default::default()));
        }
    }
    if let Some(scores) = table.get_mut("high_scores").and_then(Value::as_object_mut) {
        scores
            .entry("entries")
            .or_insert_with(|| Value::Array(Vec::new()));
    }
    table
        .entry("saved_at")
        .or_insert_with(|| Value::from(0.0));
    table.insert("version".to_string(), Value::from(PROFILE_VERSION));
    Ok(())
}

/// Decode a stored profile, migrating it first
pub fn parse_profile(contents: &str) -> Result<ProfileData, String> {
    let mut value: Value =
        serde_json::from_str(contents).map_err(|err| format!("failed to parse profile: {err}"))?;
    migrate(&mut value)?;
    let mut profile: ProfileData = serde_json::from_value(value)
        .map_err(|err| format!("failed to decode migrated profile: {err}"))?;
    profile.high_scores.normalize();
    profile.settings.sanitize();
    Ok(profile)
}

fn read_key(storage: &dyn Storage, key: &str) -> Option<ProfileData> {
    let contents = match storage.get(key) {
        Ok(Some(contents)) => contents,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("Failed to read {}: {}", key, err);
            return None;
        }
    };
    match parse_profile(&contents) {
        Ok(profile) => Some(profile),
        Err(err) => {
            log::warn!("Ignoring {}: {}", key, err);
            None
        }
    }
}

/// Load the profile, falling back to the backup and then to defaults
pub fn load_profile(storage: &dyn Storage) -> ProfileData {
    if let Some(profile) = read_key(storage, PROFILE_KEY) {
        log::info!("Loaded profile ({} high scores)", profile.high_scores.entries.len());
        return profile;
    }
    if let Some(profile) = read_key(storage, BACKUP_KEY) {
        log::warn!("Profile unreadable, restored from backup");
        return profile;
    }
    log::info!("No profile found, starting fresh");
    ProfileData::default()
}

/// Save the profile, keeping the previous one as a backup
pub fn save_profile(
    storage: &mut dyn Storage,
    profile: &ProfileData,
    now: f64,
) -> Result<(), PersistError> {
    let document = ProfileData {
        version: PROFILE_VERSION,
        saved_at: now,
        ..profile.clone()
    };
    let json = serde_json::to_string(&document)?;

    if let Some(previous) = storage.get(PROFILE_KEY)? {
        // Only rotate a profile that still parses
        if parse_profile(&previous).is_ok() {
            storage.set(BACKUP_KEY, &previous)?;
        }
    }
    storage.set(PROFILE_KEY, &json)?;
    log::debug!("Profile saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameMode;

    fn sample_profile() -> ProfileData {
        let mut profile = ProfileData::default();
        profile
            .high_scores
            .add_score(1200, 4, 1000.0, GameMode::Arcade);
        profile.achievements.missiles_destroyed = 77;
        profile.settings.last_mode = GameMode::Command;
        profile
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        save_profile(&mut storage, &sample_profile(), 5.0).unwrap();
        let loaded = load_profile(&storage);
        assert_eq!(loaded.high_scores.top_score(), Some(1200));
        assert_eq!(loaded.achievements.missiles_destroyed, 77);
        assert_eq!(loaded.settings.last_mode, GameMode::Command);
        assert_eq!(loaded.saved_at, 5.0);
    }

    #[test]
    fn test_missing_profile_is_default() {
        let storage = MemoryStorage::new();
        assert_eq!(load_profile(&storage), ProfileData::default());
    }

    #[test]
    fn test_corrupt_profile_falls_back_to_backup() {
        let mut storage = MemoryStorage::new();
        save_profile(&mut storage, &sample_profile(), 1.0).unwrap();
        // Second save rotates the first into the backup
        save_profile(&mut storage, &ProfileData::default(), 2.0).unwrap();
        storage.set(PROFILE_KEY, "{ not json").unwrap();

        let loaded = load_profile(&storage);
        assert_eq!(loaded.high_scores.top_score(), Some(1200));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut storage = MemoryStorage::new();
        storage
            .set(PROFILE_KEY, r#"{ "version": 99, "high_scores": { "entries": [] } }"#)
            .unwrap();
        assert_eq!(load_profile(&storage), ProfileData::default());
    }

    #[test]
    fn test_version_one_migrates_last_mode() {
        let v1 = r#"{
            "high_scores": { "entries": [ { "score": 500, "wave": 3, "timestamp": 0.0 } ] },
            "achievements": { "missiles_destroyed": 12, "seekers_destroyed": 0,
                              "planes_destroyed": 0, "waves_completed": 2, "best_wave": 3 },
            "last_mode": "Command"
        }"#;
        let profile = parse_profile(v1).unwrap();
        assert_eq!(profile.version, PROFILE_VERSION);
        assert_eq!(profile.settings.last_mode, GameMode::Command);
        assert_eq!(profile.high_scores.entries[0].mode, GameMode::Arcade);
        assert_eq!(profile.achievements.waves_completed, 2);
    }
}
