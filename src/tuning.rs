//! Data-driven game balance
//!
//! Values the designers tweak live here rather than in `consts`. Every field
//! has a default, so a JSON override only needs the keys it changes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Balance knobs for spawning, projectiles, and Command mode production
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arcade spawning (chances are per 60 Hz frame) ===
    pub enemy_spawn_chance_base: f32,
    pub enemy_spawn_chance_per_wave: f32,
    pub enemy_spawn_chance_max: f32,
    pub plane_start_wave: u32,
    pub plane_spawn_chance_base: f32,
    pub plane_spawn_chance_per_wave: f32,
    pub plane_spawn_chance_max: f32,

    // === Enemy missiles (units per frame) ===
    pub enemy_speed_base: f32,
    pub enemy_speed_per_wave: f32,
    pub enemy_speed_max: f32,
    pub seeker_start_wave: u32,
    pub seeker_chance: f32,
    pub splitter_start_wave: u32,
    pub splitter_chance: f32,
    pub split_children: u32,
    pub split_children_max: u32,
    pub split_fraction_min: f32,
    pub split_fraction_max: f32,
    /// Max horizontal scatter of split children around the parent target
    pub split_spread: f32,
    pub retarget_cooldown_ms: f32,

    // === Player missiles and explosions ===
    pub player_missile_speed: f32,
    /// Fractional speed gain per speed level above 1
    pub player_speed_per_level: f32,
    pub explosion_radius: f32,
    /// Fractional radius gain per explosion level above 1
    pub explosion_radius_per_level: f32,
    /// Radius growth per frame
    pub explosion_growth: f32,
    /// Alpha lost per frame once fully grown
    pub explosion_fade: f32,
    pub autopilot_range: f32,
    pub autopilot_range_per_level: f32,
    pub autopilot_strength_per_level: f32,
    pub autopilot_max_deviation: f32,
    pub autopilot_max_lifetime_ms: f32,

    // === Planes ===
    pub plane_hp_base: u32,
    pub plane_speed: f32,
    pub plane_fire_interval_ms: f32,

    // === Command mode ===
    pub command_spawn_interval_ms: f32,
    pub command_plane_chance: f32,
    pub resource_interval_ms: f32,
    /// Production per city per second at upgrade level 0
    pub scrap_rate: f32,
    pub science_rate: f32,
    pub ammo_rate: f32,
    /// Population gained per second
    pub population_growth: f32,
    pub population_cap: f32,
    /// Stockpiled truckloads a city can hold
    pub ammo_stockpile_cap: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_spawn_chance_base: 0.02,
            enemy_spawn_chance_per_wave: 0.004,
            enemy_spawn_chance_max: 0.06,
            plane_start_wave: 5,
            plane_spawn_chance_base: 0.003,
            plane_spawn_chance_per_wave: 0.0005,
            plane_spawn_chance_max: 0.008,

            enemy_speed_base: 0.8,
            enemy_speed_per_wave: 0.08,
            enemy_speed_max: 2.6,
            seeker_start_wave: 3,
            seeker_chance: 0.15,
            splitter_start_wave: 4,
            splitter_chance: 0.12,
            split_children: 2,
            split_children_max: 3,
            split_fraction_min: 0.35,
            split_fraction_max: 0.6,
            split_spread: 80.0,
            retarget_cooldown_ms: 500.0,

            player_missile_speed: 6.0,
            player_speed_per_level: 0.2,
            explosion_radius: 50.0,
            explosion_radius_per_level: 0.15,
            explosion_growth: 1.5,
            explosion_fade: 0.03,
            autopilot_range: 150.0,
            autopilot_range_per_level: 30.0,
            autopilot_strength_per_level: 0.06,
            autopilot_max_deviation: 120.0,
            autopilot_max_lifetime_ms: 4000.0,

            plane_hp_base: 2,
            plane_speed: 1.6,
            plane_fire_interval_ms: 2500.0,

            command_spawn_interval_ms: 2200.0,
            command_plane_chance: 0.08,
            resource_interval_ms: 3000.0,
            scrap_rate: 1.0,
            science_rate: 0.5,
            ammo_rate: 0.34,
            population_growth: 0.5,
            population_cap: 50.0,
            ammo_stockpile_cap: 10,
        }
    }
}

impl Tuning {
    /// Parse a JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        if let Err(err) = tuning.validate() {
            log::warn!("Rejected tuning override: {}", err);
            return Err(err);
        }
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chances = [
            ("enemy_spawn_chance_max", self.enemy_spawn_chance_max),
            ("plane_spawn_chance_max", self.plane_spawn_chance_max),
            ("seeker_chance", self.seeker_chance),
            ("splitter_chance", self.splitter_chance),
            ("command_plane_chance", self.command_plane_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not a probability"),
                });
            }
        }

        let positive = [
            ("enemy_speed_base", self.enemy_speed_base),
            ("player_missile_speed", self.player_missile_speed),
            ("explosion_radius", self.explosion_radius),
            ("explosion_growth", self.explosion_growth),
            ("explosion_fade", self.explosion_fade),
            ("retarget_cooldown_ms", self.retarget_cooldown_ms),
            ("plane_fire_interval_ms", self.plane_fire_interval_ms),
            ("command_spawn_interval_ms", self.command_spawn_interval_ms),
            ("resource_interval_ms", self.resource_interval_ms),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} must be positive"),
                });
            }
        }

        if self.split_spread < 0.0 {
            return Err(ConfigError::Invalid {
                field: "split_spread",
                reason: format!("{} must not be negative", self.split_spread),
            });
        }
        if !(0.0 < self.split_fraction_min && self.split_fraction_min < self.split_fraction_max)
            || self.split_fraction_max >= 1.0
        {
            return Err(ConfigError::Invalid {
                field: "split_fraction_min",
                reason: "split fractions must satisfy 0 < min < max < 1".to_string(),
            });
        }
        if self.split_children < 2 || self.split_children_max < self.split_children {
            return Err(ConfigError::Invalid {
                field: "split_children",
                reason: "need at least 2 children and max >= base".to_string(),
            });
        }
        if self.plane_hp_base == 0 {
            return Err(ConfigError::Invalid {
                field: "plane_hp_base",
                reason: "planes need at least 1 hp".to_string(),
            });
        }
        Ok(())
    }

    /// Per-frame enemy spawn chance in Arcade mode
    pub fn enemy_spawn_chance(&self, wave: u32) -> f32 {
        (self.enemy_spawn_chance_base + wave as f32 * self.enemy_spawn_chance_per_wave)
            .min(self.enemy_spawn_chance_max)
    }

    /// Per-frame plane spawn chance in Arcade mode (zero before the start wave)
    pub fn plane_spawn_chance(&self, wave: u32) -> f32 {
        if wave < self.plane_start_wave {
            return 0.0;
        }
        let waves_in = (wave - self.plane_start_wave) as f32;
        (self.plane_spawn_chance_base + waves_in * self.plane_spawn_chance_per_wave)
            .min(self.plane_spawn_chance_max)
    }

    /// Enemy missile speed for a wave
    pub fn enemy_speed(&self, wave: u32) -> f32 {
        (self.enemy_speed_base + wave as f32 * self.enemy_speed_per_wave).min(self.enemy_speed_max)
    }

    /// Number of children a splitter produces at this wave
    pub fn split_child_count(&self, wave: u32) -> u32 {
        let extra = wave.saturating_sub(self.splitter_start_wave) / 4;
        (self.split_children + extra).min(self.split_children_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "seeker_chance": 0.5 }"#).unwrap();
        assert_eq!(tuning.seeker_chance, 0.5);
        assert_eq!(tuning.explosion_radius, Tuning::default().explosion_radius);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "splitter_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "splitter_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_split_spread() {
        let err = Tuning::from_json(r#"{ "split_spread": -5.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "split_spread",
                ..
            }
        ));
        // Zero spread stacks every child on the parent's target
        assert!(Tuning::from_json(r#"{ "split_spread": 0.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_spawn_chance_caps() {
        let tuning = Tuning::default();
        assert!(tuning.enemy_spawn_chance(1) < tuning.enemy_spawn_chance(5));
        assert_eq!(tuning.enemy_spawn_chance(100), tuning.enemy_spawn_chance_max);
        assert_eq!(tuning.plane_spawn_chance(4), 0.0);
        assert!(tuning.plane_spawn_chance(5) > 0.0);
    }

    #[test]
    fn test_split_children_grow_with_wave() {
        let tuning = Tuning::default();
        assert_eq!(tuning.split_child_count(4), 2);
        assert_eq!(tuning.split_child_count(8), 3);
        assert_eq!(tuning.split_child_count(40), 3);
    }
}
