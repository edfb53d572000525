//! Game state and core simulation types
//!
//! Every entity store lives inside `GameState`; subsystems take it by `&mut`
//! and nothing in the simulation is global. Constructing a fresh state is a
//! full reset.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::economy::{self, Economy, TurretUpgrade, TurretUpgrades};
use super::events::{GameEvent, WaveSummary};
use crate::achievements::{AchievementProgress, ProgressDelta};
use crate::consts::*;
use crate::tuning::Tuning;

/// Which game is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Discrete waves with bonus counting between them
    #[default]
    Arcade,
    /// Continuous play with a difficulty ramp and city production
    Command,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Arcade => "arcade",
            GameMode::Command => "command",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arcade" => Some(GameMode::Arcade),
            "command" => Some(GameMode::Command),
            _ => None,
        }
    }
}

/// Whether the step function does anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Running,
    Paused,
    /// Terminal: no further simulation until restart
    GameOver,
}

/// Arcade wave lifecycle. Exactly one phase is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArcadePhase {
    /// Enemies spawning and being fought
    Spawning,
    /// Counting leftover ammo, one launcher per interval
    MissileBonus { index: usize, timer_ms: f32 },
    /// Counting surviving cities, one city per interval
    CityBonus { index: usize, timer_ms: f32 },
    /// Waiting for the player to continue
    WaveBreak,
}

/// Arcade-only bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcadeState {
    pub phase: ArcadePhase,
    /// Enemy missiles still to spawn this wave
    pub enemies_to_spawn: u32,
    pub enemies_spawned: u32,
    pub planes_to_spawn: u32,
    pub planes_spawned: u32,
    /// Time spent in the current wave (ms)
    pub wave_timer_ms: f32,
    /// Running totals for the current bonus count
    pub summary: WaveSummary,
}

/// Enemy count for the first Arcade wave
pub const FIRST_WAVE_ENEMIES: u32 = 6;

impl ArcadeState {
    pub fn first_wave() -> Self {
        Self {
            phase: ArcadePhase::Spawning,
            enemies_to_spawn: FIRST_WAVE_ENEMIES,
            enemies_spawned: 0,
            planes_to_spawn: economy::planes_for_wave(1),
            planes_spawned: 0,
            wave_timer_ms: 0.0,
            summary: WaveSummary::default(),
        }
    }
}

/// Command-only bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandState {
    /// Time since the run started, excluding pauses (ms)
    pub game_time_ms: f32,
    pub difficulty: f32,
    /// Time since the last enemy spawn (ms)
    pub spawn_timer_ms: f32,
    /// Time since the last resource harvest (ms)
    pub resource_timer_ms: f32,
}

impl Default for CommandState {
    fn default() -> Self {
        Self {
            game_time_ms: 0.0,
            difficulty: 1.0,
            spawn_timer_ms: 0.0,
            resource_timer_ms: 0.0,
        }
    }
}

/// Mode-specific sub-state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModeState {
    Arcade(ArcadeState),
    Command(CommandState),
}

impl ModeState {
    pub fn mode(&self) -> GameMode {
        match self {
            ModeState::Arcade(_) => GameMode::Arcade,
            ModeState::Command(_) => GameMode::Command,
        }
    }
}

/// Maximum number of trail points kept per projectile
pub const TRAIL_LENGTH: usize = 20;

/// Push a position to the front of a bounded trail (newest first)
pub fn record_trail(trail: &mut Vec<Vec2>, pos: Vec2) {
    trail.insert(0, pos);
    trail.truncate(TRAIL_LENGTH);
}

/// A player missile silo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Launcher {
    pub pos: Vec2,
    /// Current ammo, never above `max_missiles`
    pub missiles: u32,
    pub max_missiles: u32,
    /// Game time of the last successful launch (ms)
    pub last_fire: Option<f64>,
    /// Cooldown between launches (ms)
    pub fire_rate: f32,
    pub upgrades: TurretUpgrades,
    /// Kills credited to this launcher's explosions
    pub kills: u32,
}

impl Launcher {
    pub fn new(x: f32) -> Self {
        let upgrades = TurretUpgrades::default();
        let max_missiles = economy::capacity_for_level(upgrades.level(TurretUpgrade::Capacity));
        Self {
            pos: Vec2::new(x, LAUNCHER_Y),
            missiles: max_missiles,
            max_missiles,
            last_fire: None,
            fire_rate: economy::fire_rate_for_level(upgrades.level(TurretUpgrade::Rate)),
            upgrades,
            kills: 0,
        }
    }

    /// Remaining cooldown at `now` (ms), zero when ready
    pub fn cooldown_remaining(&self, now: f64) -> f32 {
        match self.last_fire {
            Some(last) => (self.fire_rate as f64 - (now - last)).max(0.0) as f32,
            None => 0.0,
        }
    }

    pub fn refill(&mut self) {
        self.missiles = self.max_missiles;
    }

    pub fn needs_ammo(&self) -> bool {
        self.missiles < self.max_missiles
    }

    /// Add ammo up to capacity, returning how much was accepted
    pub fn add_ammo(&mut self, amount: u32) -> u32 {
        let accepted = amount.min(self.max_missiles - self.missiles);
        self.missiles += accepted;
        accepted
    }

    /// Where player missiles leave the silo
    pub fn muzzle(&self) -> Vec2 {
        self.pos - Vec2::new(0.0, 15.0)
    }
}

/// Steering state for autopilot-equipped player missiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Autopilot {
    pub enabled: bool,
    /// Fraction of velocity blended toward the threat each frame
    pub strength: f32,
    pub range: f32,
    pub time_alive_ms: f32,
    pub max_lifetime_ms: f32,
    /// Max distance a steering target may sit from the original flight line
    pub max_deviation: f32,
    pub original_target: Vec2,
}

/// A player interceptor in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMissile {
    pub id: u32,
    /// Index of the launcher that fired it
    pub launcher: usize,
    pub origin: Vec2,
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    /// Detonation point
    pub target: Vec2,
    /// Explosion size decided at launch from the launcher's upgrades
    pub explosion_radius: f32,
    pub autopilot: Option<Autopilot>,
}

/// A pending mid-air split
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SplitPlan {
    /// Fraction of the original path at which the split happens
    pub at_fraction: f32,
    pub children: u32,
}

/// An incoming warhead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyMissile {
    pub id: u32,
    pub origin: Vec2,
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub target: Vec2,
    /// Render-only history (newest first)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
    pub is_seeker: bool,
    /// Time until a seeker may pick a new target (ms)
    pub retarget_timer_ms: f32,
    /// Present only on splitters that have not split yet
    pub split: Option<SplitPlan>,
    /// Spawned by a splitter
    pub is_fragment: bool,
    /// Length of the path at launch, for split progress
    pub path_length: f32,
    pub traveled: f32,
}

impl EnemyMissile {
    pub fn new(id: u32, origin: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            id,
            origin,
            pos: origin,
            vel: (target - origin).normalize_or_zero() * speed,
            speed,
            target,
            trail: Vec::with_capacity(TRAIL_LENGTH),
            is_seeker: false,
            retarget_timer_ms: 0.0,
            split: None,
            is_fragment: false,
            path_length: (target - origin).length(),
            traveled: 0.0,
        }
    }

    /// Point velocity at a new target, keeping speed
    pub fn aim_at(&mut self, target: Vec2) {
        self.target = target;
        self.vel = (target - self.pos).normalize_or_zero() * self.speed;
    }

    /// Progress along the original path (0..1)
    pub fn path_progress(&self) -> f32 {
        if self.path_length <= f32::EPSILON {
            1.0
        } else {
            self.traveled / self.path_length
        }
    }
}

/// Explosion presets (visual size only, collision rules depend on `is_player`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Normal,
    Plane,
    City,
    Splitter,
}

/// An expanding then fading blast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    /// Current radius; collisions use this, not `max_radius`
    pub radius: f32,
    pub max_radius: f32,
    /// Radius gained per frame
    pub growth: f32,
    pub growing: bool,
    pub alpha: f32,
    pub is_player: bool,
    pub kind: ExplosionKind,
    /// Launcher credited with kills (best effort)
    pub launcher: Option<usize>,
}

/// Max radius of ground impact blasts
pub const IMPACT_EXPLOSION_RADIUS: f32 = 30.0;
/// Max radius of the cosmetic blast at a kill point
pub const KILL_EXPLOSION_RADIUS: f32 = 20.0;

impl ExplosionKind {
    /// Default max radius for non-player blasts of this kind
    pub fn preset_radius(&self) -> f32 {
        match self {
            ExplosionKind::Normal => IMPACT_EXPLOSION_RADIUS,
            ExplosionKind::Plane => 60.0,
            ExplosionKind::City => 80.0,
            ExplosionKind::Splitter => 40.0,
        }
    }

    fn growth(&self) -> f32 {
        match self {
            ExplosionKind::City => 3.0,
            ExplosionKind::Plane => 2.5,
            _ => 2.0,
        }
    }
}

impl Explosion {
    /// Enemy-side or ground blast
    pub fn hostile(id: u32, pos: Vec2, kind: ExplosionKind, max_radius: f32) -> Self {
        Self {
            id,
            pos,
            radius: 0.0,
            max_radius,
            growth: kind.growth(),
            growing: true,
            alpha: 1.0,
            is_player: false,
            kind,
            launcher: None,
        }
    }

    /// Player blast credited to a launcher
    pub fn player(id: u32, pos: Vec2, max_radius: f32, growth: f32, launcher: usize) -> Self {
        Self {
            id,
            pos,
            radius: 0.0,
            max_radius,
            growth,
            growing: true,
            alpha: 1.0,
            is_player: true,
            kind: ExplosionKind::Normal,
            launcher: Some(launcher),
        }
    }

    pub fn is_finished(&self) -> bool {
        !self.growing && self.alpha <= 0.0
    }
}

/// A bomber crossing the sky
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: u32,
    pub from_left: bool,
    /// Time since the last bomb (ms)
    pub fire_timer_ms: f32,
    /// Player explosions that already took a hit point
    pub hit_by: Vec<u32>,
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Plane {
    /// Off the far edge of the canvas
    pub fn has_exited(&self) -> bool {
        if self.from_left {
            self.pos.x > CANVAS_WIDTH + 60.0
        } else {
            self.pos.x < -60.0
        }
    }
}

/// What a city produces in Command mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductionMode {
    #[default]
    Scrap,
    Science,
    Ammo,
}

/// A city to defend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub pos: Vec2,
    /// 0..=MAX_CITY_LEVEL, reset when destroyed
    pub upgrade_level: u32,
    pub production: ProductionMode,
    pub population: f32,
    /// Production accrued since the last harvest
    pub accrued: f32,
    /// Truckloads waiting for delivery
    pub ammo_stockpile: u32,
}

impl City {
    pub fn new(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, CITY_Y),
            upgrade_level: 0,
            production: ProductionMode::default(),
            population: 0.0,
            accrued: 0.0,
            ammo_stockpile: 0,
        }
    }
}

/// Leg of a truck's round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TruckStatus {
    Delivering,
    Returning,
    /// Parked at the city; dropped from the active list
    Idle,
}

/// An ammo truck shuttling between a city and a launcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoTruck {
    pub id: u32,
    pub city: usize,
    pub launcher: usize,
    pub from_x: f32,
    pub to_x: f32,
    pub ammo: u32,
    pub status: TruckStatus,
    /// Time spent on the current leg (ms)
    pub elapsed_ms: f32,
    /// Length of each leg (ms)
    pub leg_ms: f32,
}

impl AmmoTruck {
    /// Fraction of the current leg completed (0..1)
    pub fn progress(&self) -> f32 {
        if self.leg_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.leg_ms).min(1.0)
        }
    }

    /// Ground position for rendering
    pub fn pos(&self) -> Vec2 {
        let t = self.progress();
        let x = match self.status {
            TruckStatus::Delivering => self.from_x + (self.to_x - self.from_x) * t,
            TruckStatus::Returning => self.to_x + (self.from_x - self.to_x) * t,
            TruckStatus::Idle => self.from_x,
        };
        Vec2::new(x, GROUND_Y)
    }
}

/// Read-only view for UI polling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub mode: GameMode,
    pub status: RunStatus,
    pub score: u64,
    pub scrap: u32,
    pub science: u32,
    pub wave: u32,
    pub launcher_ammo: Vec<(u32, u32)>,
    pub launchers_alive: Vec<bool>,
    pub cities_alive: Vec<bool>,
    pub phase: Option<ArcadePhase>,
    pub difficulty: Option<f32>,
    pub active_trucks: usize,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub mode: ModeState,
    pub status: RunStatus,
    /// Game clock (ms); frozen while paused
    pub time_ms: f64,
    pub wave: u32,
    pub score: u64,
    pub economy: Economy,
    pub launchers: Vec<Launcher>,
    pub destroyed_launchers: BTreeSet<usize>,
    pub cities: Vec<City>,
    pub destroyed_cities: BTreeSet<usize>,
    pub player_missiles: Vec<PlayerMissile>,
    pub enemy_missiles: Vec<EnemyMissile>,
    pub explosions: Vec<Explosion>,
    pub planes: Vec<Plane>,
    pub trucks: Vec<AmmoTruck>,
    /// Cumulative counters (seeded from the profile)
    pub achievements: AchievementProgress,
    /// This run's contribution to the counters
    pub run_stats: ProgressDelta,
    /// Notifications queued for the host
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(mode: GameMode, seed: u64) -> Self {
        Self::with_tuning(mode, seed, Tuning::default())
    }

    pub fn with_tuning(mode: GameMode, seed: u64, tuning: Tuning) -> Self {
        let mode_state = match mode {
            GameMode::Arcade => ModeState::Arcade(ArcadeState::first_wave()),
            GameMode::Command => ModeState::Command(CommandState::default()),
        };
        log::info!("Starting {} game (seed {})", mode.as_str(), seed);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            mode: mode_state,
            status: RunStatus::Running,
            time_ms: 0.0,
            wave: 1,
            score: 0,
            economy: Economy::default(),
            launchers: LAUNCHER_X.iter().map(|&x| Launcher::new(x)).collect(),
            destroyed_launchers: BTreeSet::new(),
            cities: CITY_X.iter().map(|&x| City::new(x)).collect(),
            destroyed_cities: BTreeSet::new(),
            player_missiles: Vec::new(),
            enemy_missiles: Vec::new(),
            explosions: Vec::new(),
            planes: Vec::new(),
            trucks: Vec::new(),
            achievements: AchievementProgress::default(),
            run_stats: ProgressDelta::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Carry cumulative achievement counters into this run
    pub fn with_achievements(mut self, achievements: AchievementProgress) -> Self {
        self.achievements = achievements;
        self
    }

    /// Start over in the same mode with the same seed and tuning
    pub fn restart(&mut self) {
        let achievements = std::mem::take(&mut self.achievements);
        *self = Self::with_tuning(self.mode.mode(), self.seed, self.tuning.clone())
            .with_achievements(achievements);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand queued events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn game_mode(&self) -> GameMode {
        self.mode.mode()
    }

    pub fn arcade(&self) -> Option<&ArcadeState> {
        match &self.mode {
            ModeState::Arcade(arcade) => Some(arcade),
            ModeState::Command(_) => None,
        }
    }

    pub fn arcade_mut(&mut self) -> Option<&mut ArcadeState> {
        match &mut self.mode {
            ModeState::Arcade(arcade) => Some(arcade),
            ModeState::Command(_) => None,
        }
    }

    pub fn command(&self) -> Option<&CommandState> {
        match &self.mode {
            ModeState::Command(command) => Some(command),
            ModeState::Arcade(_) => None,
        }
    }

    pub fn phase(&self) -> Option<ArcadePhase> {
        self.arcade().map(|a| a.phase)
    }

    pub fn is_game_over(&self) -> bool {
        self.status == RunStatus::GameOver
    }

    pub fn is_city_alive(&self, index: usize) -> bool {
        index < self.cities.len() && !self.destroyed_cities.contains(&index)
    }

    pub fn is_launcher_alive(&self, index: usize) -> bool {
        index < self.launchers.len() && !self.destroyed_launchers.contains(&index)
    }

    /// Live city count (initial minus destroyed, repairs remove from the set)
    pub fn city_count(&self) -> usize {
        self.cities.len() - self.destroyed_cities.len()
    }

    pub fn launcher_count(&self) -> usize {
        self.launchers.len() - self.destroyed_launchers.len()
    }

    /// Ground points of every live city and launcher
    pub fn live_targets(&self) -> Vec<Vec2> {
        let cities = (0..self.cities.len())
            .filter(|&i| self.is_city_alive(i))
            .map(|i| Vec2::new(self.cities[i].pos.x, GROUND_Y));
        let launchers = (0..self.launchers.len())
            .filter(|&i| self.is_launcher_alive(i))
            .map(|i| Vec2::new(self.launchers[i].pos.x, GROUND_Y));
        cities.chain(launchers).collect()
    }

    /// A missile is threatening while its target still covers a live city or launcher
    pub fn is_threatening(&self, missile: &EnemyMissile) -> bool {
        let x = missile.target.x;
        let hits_city = (0..self.cities.len()).any(|i| {
            self.is_city_alive(i) && (self.cities[i].pos.x - x).abs() < CITY_HIT_TOLERANCE
        });
        let hits_launcher = (0..self.launchers.len()).any(|i| {
            self.is_launcher_alive(i)
                && (self.launchers[i].pos.x - x).abs() < LAUNCHER_HIT_TOLERANCE
        });
        hits_city || hits_launcher
    }

    /// Mark a city destroyed. Returns false if it already was.
    pub fn destroy_city(&mut self, index: usize) -> bool {
        if !self.is_city_alive(index) {
            return false;
        }
        self.destroyed_cities.insert(index);
        let city = &mut self.cities[index];
        city.upgrade_level = 0;
        city.accrued = 0.0;
        city.population = 0.0;
        city.ammo_stockpile = 0;
        log::info!("City {} destroyed ({} left)", index, self.city_count());
        true
    }

    /// Mark a launcher destroyed. Returns false if it already was.
    pub fn destroy_launcher(&mut self, index: usize) -> bool {
        if !self.is_launcher_alive(index) {
            return false;
        }
        self.destroyed_launchers.insert(index);
        log::info!("Launcher {} destroyed", index);
        true
    }

    /// Refill every launcher and bring destroyed ones back
    pub fn respawn_launchers(&mut self) {
        self.destroyed_launchers.clear();
        for launcher in &mut self.launchers {
            launcher.refill();
        }
        let changes: Vec<GameEvent> = self
            .launchers
            .iter()
            .enumerate()
            .map(|(i, l)| GameEvent::AmmoChanged {
                launcher: i,
                missiles: l.missiles,
                max: l.max_missiles,
            })
            .collect();
        self.events.extend(changes);
    }

    pub fn emit_ammo_changed(&mut self, index: usize) {
        if let Some(launcher) = self.launchers.get(index) {
            let event = GameEvent::AmmoChanged {
                launcher: index,
                missiles: launcher.missiles,
                max: launcher.max_missiles,
            };
            self.events.push(event);
        }
    }

    /// Poll-friendly summary for the UI layer
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            mode: self.game_mode(),
            status: self.status,
            score: self.score,
            scrap: self.economy.scrap,
            science: self.economy.science,
            wave: self.wave,
            launcher_ammo: self
                .launchers
                .iter()
                .map(|l| (l.missiles, l.max_missiles))
                .collect(),
            launchers_alive: (0..self.launchers.len())
                .map(|i| self.is_launcher_alive(i))
                .collect(),
            cities_alive: (0..self.cities.len()).map(|i| self.is_city_alive(i)).collect(),
            phase: self.phase(),
            difficulty: self.command().map(|c| c.difficulty),
            active_trucks: self.trucks.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_arcade_state() {
        let state = GameState::new(GameMode::Arcade, 1);
        assert_eq!(state.launchers.len(), 3);
        assert_eq!(state.cities.len(), 6);
        assert_eq!(state.city_count(), 6);
        assert_eq!(state.wave, 1);
        let arcade = state.arcade().unwrap();
        assert_eq!(arcade.phase, ArcadePhase::Spawning);
        assert_eq!(arcade.enemies_to_spawn, 6);
        assert_eq!(arcade.planes_to_spawn, 0);
        for launcher in &state.launchers {
            assert_eq!(launcher.missiles, 10);
            assert_eq!(launcher.max_missiles, 10);
            assert_eq!(launcher.fire_rate, 1000.0);
        }
    }

    #[test]
    fn test_destroy_city_once() {
        let mut state = GameState::new(GameMode::Arcade, 1);
        state.cities[2].upgrade_level = 2;
        assert!(state.destroy_city(2));
        assert!(!state.destroy_city(2));
        assert_eq!(state.destroyed_cities.len(), 1);
        assert_eq!(state.city_count(), 5);
        assert_eq!(state.cities[2].upgrade_level, 0);
        assert!(!state.destroy_city(99));
    }

    #[test]
    fn test_threatening_follows_target_liveness() {
        let mut state = GameState::new(GameMode::Arcade, 1);
        let city_x = state.cities[0].pos.x;
        let missile = EnemyMissile::new(1, Vec2::new(city_x, 0.0), Vec2::new(city_x, GROUND_Y), 1.0);
        assert!(state.is_threatening(&missile));
        state.destroy_city(0);
        assert!(!state.is_threatening(&missile));
    }

    #[test]
    fn test_launcher_add_ammo_caps() {
        let mut launcher = Launcher::new(100.0);
        launcher.missiles = 8;
        assert_eq!(launcher.add_ammo(5), 2);
        assert_eq!(launcher.missiles, 10);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut trail = Vec::new();
        for i in 0..50 {
            record_trail(&mut trail, Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), TRAIL_LENGTH);
        assert_eq!(trail[0].x, 49.0);
    }

    #[test]
    fn test_restart_keeps_achievements() {
        let mut state = GameState::new(GameMode::Command, 7);
        state.achievements.missiles_destroyed = 42;
        state.score = 900;
        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.game_mode(), GameMode::Command);
        assert_eq!(state.achievements.missiles_destroyed, 42);
    }
}
