//! Wheel settings
//!
//! Persisted separately from progress in the same preference store.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_EXTRA_SPINS_MAX, DEFAULT_EXTRA_SPINS_MIN, DEFAULT_SPIN_DURATION_SECS,
    DEFAULT_WINDOW_SIZE, SETTINGS_STORAGE_KEY,
};
use crate::platform::KeyValueStore;

/// Tunable wheel parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    // === Progression ===
    /// Number of levels shown in the level bar
    pub window_size: u32,

    // === Presentation (reveal timing only) ===
    /// Seconds the wheel spins before the result is revealed
    pub spin_duration_secs: f32,
    /// Minimum extra full rotations before landing
    pub extra_spins_min: f32,
    /// Maximum extra full rotations before landing
    pub extra_spins_max: f32,

    // === Determinism ===
    /// Fixed RNG seed; a random one is drawn when unset
    pub seed: Option<u64>,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,

            spin_duration_secs: DEFAULT_SPIN_DURATION_SECS,
            extra_spins_min: DEFAULT_EXTRA_SPINS_MIN,
            extra_spins_max: DEFAULT_EXTRA_SPINS_MAX,

            seed: None,
        }
    }
}

impl WheelSettings {
    /// Window size with the lower bound applied
    pub fn effective_window_size(&self) -> u32 {
        self.window_size.max(1)
    }

    /// Extra rotation range, ordered and non-negative
    pub fn extra_spins_range(&self) -> (f32, f32) {
        let finite_or = |v: f32, default: f32| if v.is_finite() { v } else { default };
        let lo = finite_or(self.extra_spins_min, DEFAULT_EXTRA_SPINS_MIN).max(0.0);
        let hi = finite_or(self.extra_spins_max, DEFAULT_EXTRA_SPINS_MAX).max(0.0);
        if lo <= hi { (lo, hi) } else { (hi, lo) }
    }

    /// Spin duration, never negative
    pub fn effective_spin_duration(&self) -> f32 {
        if self.spin_duration_secs.is_finite() {
            self.spin_duration_secs.max(0.0)
        } else {
            DEFAULT_SPIN_DURATION_SECS
        }
    }

    /// Configured seed or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Load settings from the store, falling back to defaults
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        if let Some(json) = store.get(SETTINGS_STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded wheel settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default wheel settings");
        Self::default()
    }

    /// Save settings to the store
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(SETTINGS_STORAGE_KEY, &json) {
                Ok(()) => log::info!("Wheel settings saved"),
                Err(e) => log::warn!("Failed to write settings: {}", e),
            },
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_defaults() {
        let s = WheelSettings::default();
        assert_eq!(s.window_size, 10);
        assert_eq!(s.extra_spins_range(), (3.0, 5.0));
        assert_eq!(s.effective_spin_duration(), 2.0);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let s: WheelSettings = serde_json::from_str(r#"{"window_size":7}"#).unwrap();
        assert_eq!(s.window_size, 7);
        assert_eq!(s.spin_duration_secs, DEFAULT_SPIN_DURATION_SECS);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_sanitized_accessors() {
        let s = WheelSettings {
            window_size: 0,
            spin_duration_secs: -1.0,
            extra_spins_min: 6.0,
            extra_spins_max: 2.0,
            seed: Some(9),
        };
        assert_eq!(s.effective_window_size(), 1);
        assert_eq!(s.effective_spin_duration(), 0.0);
        assert_eq!(s.extra_spins_range(), (2.0, 6.0));
        assert_eq!(s.resolve_seed(), 9);
    }

    #[test]
    fn test_non_finite_spin_range_uses_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(SETTINGS_STORAGE_KEY, r#"{"extra_spins_max":1e39}"#)
            .unwrap();
        let s = WheelSettings::load(&store);
        assert!(s.extra_spins_max.is_infinite());
        assert_eq!(s.extra_spins_range(), (3.0, 5.0));

        let s = WheelSettings {
            extra_spins_min: f32::NAN,
            extra_spins_max: f32::NEG_INFINITY,
            ..Default::default()
        };
        assert_eq!(s.extra_spins_range(), (3.0, 5.0));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut store = MemoryStore::new();
        let s = WheelSettings {
            window_size: 12,
            seed: Some(42),
            ..Default::default()
        };
        s.save(&mut store);
        assert_eq!(WheelSettings::load(&store), s);
    }

    #[test]
    fn test_load_garbage_is_default() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_STORAGE_KEY, "[1,2,3]").unwrap();
        assert_eq!(WheelSettings::load(&store), WheelSettings::default());
    }
}
