//! Deterministic wheel simulation
//!
//! All game rules live here. This module must stay free of rendering and
//! timing concerns:
//! - Seeded RNG only
//! - Stable iteration order (ledger keyed by name)
//! - State changes happen synchronously at resolution

pub mod engine;
pub mod ledger;
pub mod progression;
pub mod select;

pub use engine::{Outcome, SpinEngine, SpinError};
pub use ledger::{LedgerEntry, RewardLedger};
pub use progression::{
    LevelCell, Progression, Zone, is_milestone, next_safe_zone, next_super_zone, payout_amount,
    payout_multiplier,
};
pub use select::{clamped_weight, select, selection_odds};
