//! Reward ledger: running totals per reward key

use std::collections::BTreeMap;

use crate::catalog::IconRef;
use crate::consts::DEFAULT_REWARD_KEY;

/// Accumulated reward for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub key: String,
    pub total: u64,
    /// Number of spins that paid out this reward
    pub count: u64,
    pub icon: Option<IconRef>,
}

impl LedgerEntry {
    fn empty(key: String) -> Self {
        Self {
            key,
            total: 0,
            count: 0,
            icon: None,
        }
    }
}

/// Blank keys collapse onto the default reward name
pub fn normalize_key(key: &str) -> &str {
    if key.is_empty() { DEFAULT_REWARD_KEY } else { key }
}

/// Keyed reward totals (iterates in key order)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardLedger {
    entries: BTreeMap<String, LedgerEntry>,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to `key`, creating the entry if needed.
    ///
    /// Negative deltas add nothing but still count as a payout. The icon slot
    /// is filled once and never overwritten.
    pub fn upsert(&mut self, key: &str, icon: Option<&IconRef>, delta: i64) -> &LedgerEntry {
        let key = normalize_key(key);
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| LedgerEntry::empty(key.to_string()));

        if entry.icon.is_none() {
            entry.icon = icon.cloned();
        }
        entry.total = entry.total.saturating_add(delta.max(0) as u64);
        entry.count = entry.count.saturating_add(1);
        entry
    }

    /// Insert a persisted entry verbatim, replacing any existing one
    pub fn restore_entry(&mut self, key: &str, total: u64, count: u64, icon: Option<IconRef>) {
        let key = normalize_key(key).to_string();
        self.entries.insert(
            key.clone(),
            LedgerEntry {
                key,
                total,
                count,
                icon,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: &str) -> Option<&LedgerEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all totals
    pub fn grand_total(&self) -> u64 {
        self.entries
            .values()
            .fold(0u64, |acc, e| acc.saturating_add(e.total))
    }
}
