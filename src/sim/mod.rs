//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each entity store)
//! - No rendering, audio or platform dependencies (everything goes out as `GameEvent`s)

pub mod collision;
pub mod economy;
pub mod events;
pub mod logistics;
pub mod motion;
pub mod state;
pub mod tick;
pub mod waves;

pub use economy::{Economy, GlobalUpgrade, TurretUpgrade, UpgradeKey};
pub use events::{GameEvent, HapticPattern, SoundCue, WaveSummary};
pub use logistics::dispatch_truck;
pub use state::{
    ArcadePhase, City, GameMode, GameState, HudSnapshot, ProductionMode, RunStatus, TruckStatus,
};
pub use tick::{TickInput, fire_missile, tick};
pub use waves::continue_wave;
