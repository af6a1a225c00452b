//! Save/load of wheel progress
//!
//! Features:
//! - Plain JSON document in a single named record
//! - Icon references re-attached from the live catalog on load
//! - Corrupt or missing saves fall back to a fresh run

pub mod save;

pub use save::{RewardSave, SaveError, SaveState, load_from, restore, save_to, snapshot};
