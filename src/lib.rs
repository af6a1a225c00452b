//! Risky Spin - a spin-wheel progression engine
//!
//! Core modules:
//! - `catalog`: Authored wheel slices (read-only at runtime)
//! - `sim`: Deterministic rules (selection, progression, ledger, spin engine)
//! - `persistence`: Save/load with icon reconciliation
//! - `platform`: Browser/native storage abstraction
//! - `reveal`: Spin animation planning for the presentation layer
//! - `settings`: Tunable parameters

pub mod catalog;
pub mod persistence;
pub mod platform;
pub mod reveal;
pub mod settings;
pub mod sim;

pub use catalog::{Catalog, CatalogError, CatalogProvider, EffectRef, IconRef, SliceConfig};
pub use settings::WheelSettings;
pub use sim::{Outcome, SpinEngine, SpinError};

/// Game configuration constants
pub mod consts {
    /// Floor applied to slice weights so no slice becomes unreachable
    pub const WEIGHT_EPSILON: f64 = 0.0001;

    /// Safe zone every Nth level (bombs excluded, 1.5x payout)
    pub const SAFE_ZONE_INTERVAL: u32 = 5;
    /// Super zone every Nth level (bombs excluded, 3x payout)
    pub const SUPER_ZONE_INTERVAL: u32 = 30;
    pub const SAFE_ZONE_FACTOR: f64 = 1.5;
    pub const SUPER_ZONE_FACTOR: f64 = 3.0;
    /// Payout growth per level above 1
    pub const LEVEL_MULTIPLIER_STEP: f64 = 0.10;

    /// Levels visible in the level bar
    pub const DEFAULT_WINDOW_SIZE: u32 = 10;

    /// Ledger key for slices without a reward name
    pub const DEFAULT_REWARD_KEY: &str = "Reward";
    /// Reward key reported for bomb outcomes
    pub const BOMB_REWARD_KEY: &str = "BOMB";

    /// Spin animation defaults (presentation only)
    pub const DEFAULT_SPIN_DURATION_SECS: f32 = 2.0;
    pub const DEFAULT_EXTRA_SPINS_MIN: f32 = 3.0;
    pub const DEFAULT_EXTRA_SPINS_MAX: f32 = 5.0;

    /// Preference store records
    pub const SAVE_STORAGE_KEY: &str = "risky_spin_save";
    pub const SETTINGS_STORAGE_KEY: &str = "risky_spin_settings";
}
