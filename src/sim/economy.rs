//! Scrap/science accounting, upgrade cost curves and purchases
//!
//! Purchases are atomic: either every check passes and the scrap, level,
//! cost and immediate effect all change together, or nothing changes.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::state::{GameMode, GameState, ProductionMode};
use crate::error::PurchaseError;

/// Shortest allowed launcher cooldown (ms)
pub const MIN_FIRE_RATE: f32 = 200.0;
pub const BASE_FIRE_RATE: f32 = 1000.0;
pub const BASE_CAPACITY: u32 = 10;
/// Turret upgrade costs grow x1.5 per purchase (numerator, denominator)
pub const TURRET_COST_GROWTH: (u32, u32) = (3, 2);
/// Multi-level global upgrade costs grow x1.4 per purchase
pub const GLOBAL_COST_GROWTH: (u32, u32) = (7, 5);
/// Turret upgrades cost 85% once Efficiency is owned
pub const EFFICIENCY_DISCOUNT: (u32, u32) = (85, 100);
/// Kill scrap x1.5 once Scrap Multiplier is owned
pub const SCRAP_MULTIPLIER: (u32, u32) = (3, 2);
pub const MAX_TURRET_LEVEL: u32 = 10;
pub const MAX_CITY_LEVEL: u32 = 3;
/// Productivity gain per city level
pub const CITY_LEVEL_BONUS: f32 = 0.5;
pub const BASE_TRUCKS_PER_CITY: u32 = 1;

pub const CITY_UPGRADE_BASE_COST: u32 = 40;
pub const CITY_REPAIR_BASE_COST: u32 = 75;
pub const CITY_REPAIR_COST_STEP: u32 = 25;
pub const LAUNCHER_REBUILD_COST: u32 = 50;

// Kill rewards
pub const MISSILE_KILL_SCORE: u64 = 10;
pub const MISSILE_KILL_SCRAP: u32 = 2;
pub const SEEKER_KILL_SCORE: u64 = 25;
pub const SEEKER_KILL_SCRAP: u32 = 5;
pub const PLANE_KILL_SCORE: u64 = 50;
pub const PLANE_KILL_SCRAP: u32 = 5;
pub const PLANE_KILL_SCRAP_SALVAGE: u32 = 8;

/// Launcher cooldown for a rate level: `max(200, floor(1000 / 1.5^(level-1)))`
pub fn fire_rate_for_level(level: u32) -> f32 {
    let rate = (BASE_FIRE_RATE / 1.5f32.powi(level.saturating_sub(1) as i32)).floor();
    rate.max(MIN_FIRE_RATE)
}

/// Launcher capacity for a capacity level: `floor(10 * 1.2^(level-1))`
pub fn capacity_for_level(level: u32) -> u32 {
    (BASE_CAPACITY as f32 * 1.2f32.powi(level.saturating_sub(1) as i32)).floor() as u32
}

/// Enemy missiles in an Arcade wave: `floor(4 + 1.5w + 0.2w^2)`
pub fn enemies_for_wave(wave: u32) -> u32 {
    let w = wave as f32;
    (4.0 + 1.5 * w + 0.2 * w * w).floor() as u32
}

/// Planes in an Arcade wave: none before wave 5, then `floor(1 + 0.5(w-5))`
pub fn planes_for_wave(wave: u32) -> u32 {
    if wave < 5 {
        return 0;
    }
    (1.0 + 0.5 * (wave - 5) as f32).floor() as u32
}

/// Resource multiplier for a city level
pub fn city_productivity(level: u32) -> f32 {
    1.0 + CITY_LEVEL_BONUS * level as f32
}

/// Scrap a surviving city earns during the city bonus
pub fn city_bonus_scrap(level: u32) -> u32 {
    (5.0 * city_productivity(level)).floor() as u32
}

/// Per-launcher upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TurretUpgrade {
    Speed,
    Explosion,
    Rate,
    Capacity,
    Autopilot,
}

impl TurretUpgrade {
    pub const ALL: [TurretUpgrade; 5] = [
        TurretUpgrade::Speed,
        TurretUpgrade::Explosion,
        TurretUpgrade::Rate,
        TurretUpgrade::Capacity,
        TurretUpgrade::Autopilot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TurretUpgrade::Speed => "speed",
            TurretUpgrade::Explosion => "explosion",
            TurretUpgrade::Rate => "rate",
            TurretUpgrade::Capacity => "capacity",
            TurretUpgrade::Autopilot => "autopilot",
        }
    }

    pub fn base_cost(&self) -> u32 {
        match self {
            TurretUpgrade::Speed => 15,
            TurretUpgrade::Explosion => 25,
            TurretUpgrade::Rate => 20,
            TurretUpgrade::Capacity => 25,
            TurretUpgrade::Autopilot => 40,
        }
    }

    pub fn max_level(&self) -> u32 {
        match self {
            TurretUpgrade::Autopilot => 5,
            _ => MAX_TURRET_LEVEL,
        }
    }
}

impl FromStr for TurretUpgrade {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TurretUpgrade::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| PurchaseError::UnknownUpgrade(s.to_string()))
    }
}

/// Upgrades that affect the whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GlobalUpgrade {
    /// Kill scrap x1.5 (one-time)
    ScrapMultiplier,
    /// Extra scrap from plane kills (one-time)
    Salvage,
    /// Turret upgrades 15% cheaper (one-time)
    Efficiency,
    /// One more truck per city per level
    TruckFleet,
}

impl GlobalUpgrade {
    pub const ALL: [GlobalUpgrade; 4] = [
        GlobalUpgrade::ScrapMultiplier,
        GlobalUpgrade::Salvage,
        GlobalUpgrade::Efficiency,
        GlobalUpgrade::TruckFleet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalUpgrade::ScrapMultiplier => "scrapMultiplier",
            GlobalUpgrade::Salvage => "salvage",
            GlobalUpgrade::Efficiency => "efficiency",
            GlobalUpgrade::TruckFleet => "truckFleet",
        }
    }

    pub fn base_cost(&self) -> u32 {
        match self {
            GlobalUpgrade::ScrapMultiplier => 100,
            GlobalUpgrade::Salvage => 60,
            GlobalUpgrade::Efficiency => 80,
            GlobalUpgrade::TruckFleet => 50,
        }
    }

    pub fn max_level(&self) -> u32 {
        match self {
            GlobalUpgrade::TruckFleet => 3,
            _ => 1,
        }
    }

    pub fn is_one_time(&self) -> bool {
        self.max_level() == 1
    }
}

impl FromStr for GlobalUpgrade {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GlobalUpgrade::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| PurchaseError::UnknownUpgrade(s.to_string()))
    }
}

/// Either kind of upgrade, parsed from a UI key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKey {
    Turret(TurretUpgrade),
    Global(GlobalUpgrade),
}

impl FromStr for UpgradeKey {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(turret) = s.parse::<TurretUpgrade>() {
            return Ok(UpgradeKey::Turret(turret));
        }
        s.parse::<GlobalUpgrade>().map(UpgradeKey::Global)
    }
}

/// Level and next-purchase cost of one upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeTrack {
    pub level: u32,
    pub cost: u32,
}

impl UpgradeTrack {
    fn bump(&mut self, (num, den): (u32, u32)) {
        self.level += 1;
        self.cost = self.cost * num / den;
    }
}

/// Upgrade levels of a single launcher (all start at level 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurretUpgrades {
    tracks: BTreeMap<TurretUpgrade, UpgradeTrack>,
}

impl Default for TurretUpgrades {
    fn default() -> Self {
        let tracks = TurretUpgrade::ALL
            .into_iter()
            .map(|kind| {
                (
                    kind,
                    UpgradeTrack {
                        level: 1,
                        cost: kind.base_cost(),
                    },
                )
            })
            .collect();
        Self { tracks }
    }
}

impl TurretUpgrades {
    pub fn track(&self, kind: TurretUpgrade) -> UpgradeTrack {
        self.tracks.get(&kind).copied().unwrap_or(UpgradeTrack {
            level: 1,
            cost: kind.base_cost(),
        })
    }

    pub fn level(&self, kind: TurretUpgrade) -> u32 {
        self.track(kind).level
    }

    pub fn cost(&self, kind: TurretUpgrade) -> u32 {
        self.track(kind).cost
    }

    fn bump(&mut self, kind: TurretUpgrade) {
        let mut track = self.track(kind);
        track.bump(TURRET_COST_GROWTH);
        self.tracks.insert(kind, track);
    }
}

/// Global resources and upgrades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Economy {
    pub scrap: u32,
    pub science: u32,
    globals: BTreeMap<GlobalUpgrade, UpgradeTrack>,
    /// Cities repaired so far (repair cost escalates)
    pub repairs: u32,
}

impl Default for Economy {
    fn default() -> Self {
        let globals = GlobalUpgrade::ALL
            .into_iter()
            .map(|kind| {
                (
                    kind,
                    UpgradeTrack {
                        level: 0,
                        cost: kind.base_cost(),
                    },
                )
            })
            .collect();
        Self {
            scrap: 0,
            science: 0,
            globals,
            repairs: 0,
        }
    }
}

impl Economy {
    pub fn global_track(&self, kind: GlobalUpgrade) -> UpgradeTrack {
        self.globals.get(&kind).copied().unwrap_or(UpgradeTrack {
            level: 0,
            cost: kind.base_cost(),
        })
    }

    pub fn global_level(&self, kind: GlobalUpgrade) -> u32 {
        self.global_track(kind).level
    }

    pub fn has(&self, kind: GlobalUpgrade) -> bool {
        self.global_level(kind) > 0
    }

    /// Kill scrap after the global multiplier (floored)
    pub fn kill_scrap(&self, base: u32) -> u32 {
        if self.has(GlobalUpgrade::ScrapMultiplier) {
            let (num, den) = SCRAP_MULTIPLIER;
            base * num / den
        } else {
            base
        }
    }

    /// Add kill scrap after the global multiplier, returning the amount added
    pub fn award_kill_scrap(&mut self, base: u32) -> u32 {
        let amount = self.kill_scrap(base);
        self.scrap = self.scrap.saturating_add(amount);
        amount
    }

    /// Turret upgrade price after the Efficiency discount
    pub fn actual_upgrade_cost(&self, cost: u32) -> u32 {
        if self.has(GlobalUpgrade::Efficiency) {
            let (num, den) = EFFICIENCY_DISCOUNT;
            cost * num / den
        } else {
            cost
        }
    }

    /// Trucks each city may have on the road
    pub fn max_trucks(&self) -> u32 {
        BASE_TRUCKS_PER_CITY + self.global_level(GlobalUpgrade::TruckFleet)
    }

    pub fn city_repair_cost(&self) -> u32 {
        CITY_REPAIR_BASE_COST + CITY_REPAIR_COST_STEP * self.repairs
    }

    fn can_afford(&self, cost: u32) -> Result<(), PurchaseError> {
        if self.scrap < cost {
            return Err(PurchaseError::InsufficientScrap {
                needed: cost,
                available: self.scrap,
            });
        }
        Ok(())
    }
}

/// Cost to raise a city from `level` to `level + 1`
pub fn city_upgrade_cost(level: u32) -> u32 {
    (CITY_UPGRADE_BASE_COST as f32 * 1.5f32.powi(level as i32)).floor() as u32
}

impl GameState {
    /// Buy a turret upgrade for one launcher, returning the new level
    pub fn purchase_turret_upgrade(
        &mut self,
        launcher: usize,
        kind: TurretUpgrade,
    ) -> Result<u32, PurchaseError> {
        let track = self
            .launchers
            .get(launcher)
            .ok_or(PurchaseError::InvalidIndex(launcher))?
            .upgrades
            .track(kind);
        if track.level >= kind.max_level() {
            return Err(PurchaseError::MaxLevel);
        }
        let cost = self.economy.actual_upgrade_cost(track.cost);
        self.economy.can_afford(cost)?;

        self.economy.scrap -= cost;
        let l = &mut self.launchers[launcher];
        l.upgrades.bump(kind);
        let level = l.upgrades.level(kind);

        // Immediate effects; the rest are read when missiles/explosions are created
        match kind {
            TurretUpgrade::Rate => {
                l.fire_rate = fire_rate_for_level(level);
            }
            TurretUpgrade::Capacity => {
                let old_max = l.max_missiles;
                l.max_missiles = capacity_for_level(level);
                let delta = l.max_missiles.saturating_sub(old_max);
                l.missiles = (l.missiles + delta).min(l.max_missiles);
            }
            TurretUpgrade::Speed | TurretUpgrade::Explosion | TurretUpgrade::Autopilot => {}
        }

        log::debug!(
            "Launcher {} bought {} level {} for {} scrap",
            launcher,
            kind.as_str(),
            level,
            cost
        );
        if kind == TurretUpgrade::Capacity {
            self.emit_ammo_changed(launcher);
        }
        self.emit_resources();
        Ok(level)
    }

    /// Buy a global upgrade, returning the new level
    pub fn purchase_global_upgrade(&mut self, kind: GlobalUpgrade) -> Result<u32, PurchaseError> {
        let track = self.economy.global_track(kind);
        if track.level >= kind.max_level() {
            return Err(if kind.is_one_time() {
                PurchaseError::AlreadyOwned
            } else {
                PurchaseError::MaxLevel
            });
        }
        self.economy.can_afford(track.cost)?;

        self.economy.scrap -= track.cost;
        let mut track = track;
        track.bump(GLOBAL_COST_GROWTH);
        self.economy.globals.insert(kind, track);

        log::debug!("Bought {} level {}", kind.as_str(), track.level);
        self.emit_resources();
        Ok(track.level)
    }

    /// Buy an upgrade by its UI key; turret keys need a launcher index
    pub fn purchase_upgrade(
        &mut self,
        key: &str,
        launcher: Option<usize>,
    ) -> Result<u32, PurchaseError> {
        match key.parse::<UpgradeKey>()? {
            UpgradeKey::Turret(kind) => {
                let index = launcher.ok_or(PurchaseError::InvalidIndex(usize::MAX))?;
                self.purchase_turret_upgrade(index, kind)
            }
            UpgradeKey::Global(kind) => self.purchase_global_upgrade(kind),
        }
    }

    /// Rebuild a destroyed city
    pub fn repair_city(&mut self, index: usize) -> Result<(), PurchaseError> {
        if index >= self.cities.len() {
            return Err(PurchaseError::InvalidIndex(index));
        }
        if self.is_city_alive(index) {
            return Err(PurchaseError::NotDestroyed);
        }
        let cost = self.economy.city_repair_cost();
        self.economy.can_afford(cost)?;

        self.economy.scrap -= cost;
        self.economy.repairs += 1;
        self.destroyed_cities.remove(&index);
        log::info!("City {} repaired for {} scrap", index, cost);
        self.emit(GameEvent::CityRepaired { index });
        self.emit_resources();
        Ok(())
    }

    /// Raise a live city's productivity level, returning the new level
    pub fn upgrade_city(&mut self, index: usize) -> Result<u32, PurchaseError> {
        if index >= self.cities.len() {
            return Err(PurchaseError::InvalidIndex(index));
        }
        if !self.is_city_alive(index) {
            return Err(PurchaseError::TargetDestroyed);
        }
        let level = self.cities[index].upgrade_level;
        if level >= MAX_CITY_LEVEL {
            return Err(PurchaseError::MaxLevel);
        }
        let cost = city_upgrade_cost(level);
        self.economy.can_afford(cost)?;

        self.economy.scrap -= cost;
        self.cities[index].upgrade_level = level + 1;
        self.emit_resources();
        Ok(level + 1)
    }

    /// Choose what a city produces (Command mode)
    pub fn set_city_production(
        &mut self,
        index: usize,
        production: ProductionMode,
    ) -> Result<(), PurchaseError> {
        if self.game_mode() != GameMode::Command {
            return Err(PurchaseError::WrongMode);
        }
        if index >= self.cities.len() {
            return Err(PurchaseError::InvalidIndex(index));
        }
        if !self.is_city_alive(index) {
            return Err(PurchaseError::TargetDestroyed);
        }
        let city = &mut self.cities[index];
        if city.production != production {
            city.production = production;
            // Partial output does not carry over to the new product
            city.accrued = 0.0;
        }
        Ok(())
    }

    /// Rebuild a destroyed launcher (Command mode; Arcade respawns them each wave)
    pub fn rebuild_launcher(&mut self, index: usize) -> Result<(), PurchaseError> {
        if self.game_mode() != GameMode::Command {
            return Err(PurchaseError::WrongMode);
        }
        if index >= self.launchers.len() {
            return Err(PurchaseError::InvalidIndex(index));
        }
        if self.is_launcher_alive(index) {
            return Err(PurchaseError::NotDestroyed);
        }
        self.economy.can_afford(LAUNCHER_REBUILD_COST)?;

        self.economy.scrap -= LAUNCHER_REBUILD_COST;
        self.destroyed_launchers.remove(&index);
        self.launchers[index].missiles = 0;
        self.launchers[index].last_fire = None;
        self.emit_ammo_changed(index);
        self.emit_resources();
        Ok(())
    }

    pub(crate) fn emit_resources(&mut self) {
        self.emit(GameEvent::ResourcesChanged {
            score: self.score,
            scrap: self.economy.scrap,
            science: self.economy.science,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actual_upgrade_cost() {
        let mut state = GameState::new(GameMode::Arcade, 1);
        assert_eq!(state.economy.actual_upgrade_cost(20), 20);
        assert_eq!(state.economy.actual_upgrade_cost(37), 37);

        state.economy.scrap = 80;
        state.purchase_global_upgrade(GlobalUpgrade::Efficiency).unwrap();
        assert_eq!(state.economy.actual_upgrade_cost(20), 17);
        assert_eq!(state.economy.actual_upgrade_cost(37), 31);
    }

    #[test]
    fn test_rate_upgrade_purchase() {
        let mut state = GameState::new(GameMode::Arcade, 1);
        state.economy.scrap = 20;
        let level = state.purchase_turret_upgrade(0, TurretUpgrade::Rate).unwrap();

        assert_eq!(level, 2);
        assert_eq!(state.economy.scrap, 0);
        assert_eq!(state.launchers[0].upgrades.cost(TurretUpgrade::Rate), 30);
        assert_eq!(state.launchers[0].fire_rate, 666.0);
        // Other launchers untouched
        assert_eq!(state.launchers[1].fire_rate, 1000.0);
    }

    #[test]
    fn test_fire_rate_floor() {
        assert_eq!(fire_rate_for_level(1), 1000.0);
        assert_eq!(fire_rate_for_level(2), 666.0);
        assert_eq!(fire_rate_for_level(3), 444.0);
        assert_eq!(fire_rate_for_level(10), MIN_FIRE_RATE);
    }

    #[test]
    fn test_capacity_upgrade_adds_delta() {
        let mut state = GameState::new(GameMode::Arcade, 1);
        state.economy.scrap = 1000;
        state.launchers[1].missiles = 4;
        state.purchase_turret_upgrade(1, TurretUpgrade::Capacity).unwrap();
        assert_eq!(state.launchers[1].max_missiles, 12);
        assert_eq!(state.launchers[1].missiles, 6);
    }

    #[test]
    fn test_insufficient_scrap_is_noop() {
        let mut state = GameState::new(GameMode::Arcade, 1);
        state.economy.scrap = 19;
        let err = state.purchase_turret_upgrade(0, TurretUpgrade::Rate).unwrap_err();
        assert_eq!(
            err,
            PurchaseError::InsufficientScrap {
                needed: 20,
                available: 19
            }
        );
        assert_eq!(state.economy.scrap, 19);
        assert_eq!(state.launchers[0].upgrades.level(TurretUpgrade::Rate), 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_invalid_launcher_index() {
        let mut state = GameState::new(GameMode::Arcade, 1);
        state.economy.scrap = 1000;
        assert_eq!(
            state.purchase_turret_upgrade(7, TurretUpgrade::Speed),
            Err(PurchaseError::InvalidIndex(7))
        );
        assert_eq!(state.economy.scrap, 1000);
    }

    #[test]
    fn test_one_time_upgrade_cannot_repeat() {
        let mut state = GameState::new(GameMode::Arcade, 1);
        state.economy.scrap = 500;
        state.purchase_global_upgrade(GlobalUpgrade::Salvage).unwrap();
        assert_eq!(state.economy.scrap, 440);
        assert_eq!(
            state.purchase_global_upgrade(GlobalUpgrade::Salvage),
            Err(PurchaseError::AlreadyOwned)
        );
        assert_eq!(state.economy.scrap, 440);
    }

    #[test]
    fn test_global_cost_growth() {
        let mut state = GameState::new(GameMode::Command, 1);
        state.economy.scrap = 1000;
        state.purchase_global_upgrade(GlobalUpgrade::TruckFleet).unwrap();
        assert_eq!(state.economy.global_track(GlobalUpgrade::TruckFleet).cost, 70);
        assert_eq!(state.economy.max_trucks(), 2);
    }

    #[test]
    fn test_upgrade_keys_are_validated() {
        assert_eq!(
            "rate".parse::<UpgradeKey>(),
            Ok(UpgradeKey::Turret(TurretUpgrade::Rate))
        );
        assert_eq!(
            "efficiency".parse::<UpgradeKey>(),
            Ok(UpgradeKey::Global(GlobalUpgrade::Efficiency))
        );
        assert!(matches!(
            "warp".parse::<UpgradeKey>(),
            Err(PurchaseError::UnknownUpgrade(_))
        ));

        let mut state = GameState::new(GameMode::Arcade, 1);
        state.economy.scrap = 100;
        assert!(state.purchase_upgrade("warp", Some(0)).is_err());
        assert_eq!(state.purchase_upgrade("speed", Some(2)), Ok(2));
        assert_eq!(state.economy.scrap, 85);
    }

    #[test]
    fn test_kill_scrap_multiplier() {
        let mut economy = Economy::default();
        assert_eq!(economy.award_kill_scrap(2), 2);
        economy.scrap = 100;
        economy.globals.insert(
            GlobalUpgrade::ScrapMultiplier,
            UpgradeTrack { level: 1, cost: 140 },
        );
        assert_eq!(economy.award_kill_scrap(5), 7);
        assert_eq!(economy.scrap, 107);
    }

    #[test]
    fn test_wave_formulas() {
        assert_eq!(enemies_for_wave(2), 7);
        assert_eq!(enemies_for_wave(5), 16);
        assert_eq!(planes_for_wave(4), 0);
        assert_eq!(planes_for_wave(5), 1);
        assert_eq!(planes_for_wave(7), 2);
        assert_eq!(city_bonus_scrap(0), 5);
        assert_eq!(city_bonus_scrap(2), 10);
    }

    #[test]
    fn test_repair_and_upgrade_city() {
        let mut state = GameState::new(GameMode::Arcade, 1);
        state.economy.scrap = 200;
        assert_eq!(state.repair_city(0), Err(PurchaseError::NotDestroyed));

        state.destroy_city(0);
        state.repair_city(0).unwrap();
        assert!(state.is_city_alive(0));
        assert_eq!(state.city_count(), 6);
        assert_eq!(state.economy.scrap, 125);
        assert_eq!(state.economy.city_repair_cost(), 100);

        assert_eq!(state.upgrade_city(0), Ok(1));
        assert_eq!(state.economy.scrap, 85);
        assert_eq!(state.upgrade_city(0), Ok(2));
        assert_eq!(state.economy.scrap, 25);
    }

    #[test]
    fn test_command_only_actions() {
        let mut arcade = GameState::new(GameMode::Arcade, 1);
        assert_eq!(
            arcade.set_city_production(0, ProductionMode::Ammo),
            Err(PurchaseError::WrongMode)
        );

        let mut command = GameState::new(GameMode::Command, 1);
        command.set_city_production(0, ProductionMode::Ammo).unwrap();
        assert_eq!(command.cities[0].production, ProductionMode::Ammo);

        command.economy.scrap = 60;
        command.destroy_launcher(2);
        command.rebuild_launcher(2).unwrap();
        assert!(command.is_launcher_alive(2));
        assert_eq!(command.launchers[2].missiles, 0);
        assert_eq!(command.economy.scrap, 10);
    }
}
