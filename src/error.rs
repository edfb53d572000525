//! Error types for player commands and configuration
//!
//! Every command that returns one of these leaves the game state untouched on
//! `Err`, so callers may treat failures as "try again later".

use thiserror::Error;

/// Rejected upgrade, repair, or production change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("not enough scrap: need {needed}, have {available}")]
    InsufficientScrap { needed: u32, available: u32 },
    #[error("one-time upgrade already owned")]
    AlreadyOwned,
    #[error("upgrade is at its maximum level")]
    MaxLevel,
    #[error("index {0} is out of range")]
    InvalidIndex(usize),
    #[error("unknown upgrade '{0}'")]
    UnknownUpgrade(String),
    #[error("target is destroyed")]
    TargetDestroyed,
    #[error("target is not destroyed")]
    NotDestroyed,
    #[error("not available in the current game mode")]
    WrongMode,
}

/// Rejected launch command
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FireError {
    #[error("launcher {0} does not exist")]
    InvalidLauncher(usize),
    #[error("launcher {0} is destroyed")]
    LauncherDestroyed(usize),
    #[error("launcher {0} is out of ammo")]
    OutOfAmmo(usize),
    #[error("launcher {launcher} is cooling down ({remaining_ms:.0}ms left)")]
    CoolingDown { launcher: usize, remaining_ms: f32 },
    #[error("game is not running")]
    NotRunning,
}

/// Rejected ammo truck dispatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("city {0} does not exist")]
    InvalidCity(usize),
    #[error("city {0} is destroyed")]
    CityDestroyed(usize),
    #[error("launcher {0} does not exist")]
    InvalidLauncher(usize),
    #[error("city {0} has no free truck")]
    NoTruckAvailable(usize),
    #[error("no turret needs ammo")]
    NoTurretNeedsAmmo,
    #[error("city {0} has no stockpiled ammo")]
    EmptyStockpile(usize),
}

/// Invalid tuning or persisted data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Failed profile read or write
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),
}
