//! Save document, snapshot and restore

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogProvider;
use crate::consts::SAVE_STORAGE_KEY;
use crate::platform::KeyValueStore;
use crate::sim::ledger::{RewardLedger, normalize_key};
use crate::sim::progression::Progression;

/// Errors decoding a save document
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("malformed save document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One persisted ledger row (no icon)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSave {
    pub key: String,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub count: i64,
}

fn default_level() -> i64 {
    1
}

/// Persisted progress: `{ "level": .., "rewards": [..] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveState {
    #[serde(default = "default_level")]
    pub level: i64,
    #[serde(default)]
    pub rewards: Vec<RewardSave>,
}

impl Default for SaveState {
    fn default() -> Self {
        Self {
            level: default_level(),
            rewards: Vec::new(),
        }
    }
}

impl SaveState {
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Copy progress into a save document
pub fn snapshot(progression: &Progression, ledger: &RewardLedger) -> SaveState {
    SaveState {
        level: progression.level() as i64,
        rewards: ledger
            .iter()
            .map(|e| RewardSave {
                key: e.key.clone(),
                total: e.total.min(i64::MAX as u64) as i64,
                count: e.count.min(i64::MAX as u64) as i64,
            })
            .collect(),
    }
}

/// Rebuild progress from a save document, reattaching icons from `catalog`
pub fn restore<C: CatalogProvider + ?Sized>(
    save: Option<&SaveState>,
    catalog: &C,
    window_size: u32,
) -> (Progression, RewardLedger) {
    let mut ledger = RewardLedger::new();
    let Some(save) = save else {
        return (Progression::new(window_size), ledger);
    };

    let level = save.level.clamp(1, u32::MAX as i64) as u32;
    let progression = Progression::at_level(level, window_size);

    for row in &save.rewards {
        if row.total <= 0 && row.count <= 0 {
            continue;
        }
        let key = normalize_key(&row.key);
        let icon = catalog.icon_for(key).cloned();
        if icon.is_none() {
            log::debug!("No catalog icon for restored reward '{}'", key);
        }
        ledger.restore_entry(key, row.total.max(0) as u64, row.count.max(0) as u64, icon);
    }

    (progression, ledger)
}

/// Load progress from the store; anything unreadable becomes a fresh run
pub fn load_from<S, C>(store: &S, catalog: &C, window_size: u32) -> (Progression, RewardLedger)
where
    S: KeyValueStore + ?Sized,
    C: CatalogProvider + ?Sized,
{
    let save = match store.get(SAVE_STORAGE_KEY) {
        Some(json) if !json.is_empty() => match SaveState::from_json(&json) {
            Ok(save) => Some(save),
            Err(e) => {
                log::warn!("Discarding saved progress: {}", e);
                None
            }
        },
        _ => None,
    };

    match &save {
        Some(s) => log::info!("Loaded save (level {}, {} rewards)", s.level, s.rewards.len()),
        None => log::info!("No saved progress, starting fresh"),
    }

    restore(save.as_ref(), catalog, window_size)
}

/// Write a save document to the store. Failures are logged, not returned.
pub fn save_to<S: KeyValueStore + ?Sized>(store: &mut S, save: &SaveState) {
    let json = match save.to_json() {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to encode save: {}", e);
            return;
        }
    };
    match store.set(SAVE_STORAGE_KEY, &json) {
        Ok(()) => log::debug!("Progress saved (level {})", save.level),
        Err(e) => log::warn!("Failed to write save: {}", e),
    }
}
