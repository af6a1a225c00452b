//! Wheel catalog: the authored list of slices
//!
//! Loaded once before the first spin and never mutated afterwards. Other
//! components only see it through [`CatalogProvider`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_REWARD_KEY;

/// Opaque handle to a reward icon (sprite path, atlas id, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(pub String);

impl IconRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque handle to the visual effect played when a slice is revealed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectRef(pub String);

impl EffectRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn default_weight() -> f32 {
    1.0
}

/// One weighted cell of the wheel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceConfig {
    pub id: String,
    /// Penalty slice: wipes the run when drawn
    #[serde(default)]
    pub is_bomb: bool,
    /// Relative draw weight, authored in [0, 1]
    #[serde(default = "default_weight")]
    pub weight: f32,
    /// Ledger key for the reward (ignored for bombs)
    #[serde(default)]
    pub reward_name: String,
    /// Base payout before the level multiplier
    #[serde(default)]
    pub reward_amount: u32,
    #[serde(default)]
    pub reward_icon: Option<IconRef>,
    #[serde(default)]
    pub effect: Option<EffectRef>,
}

impl SliceConfig {
    /// Reward slice with weight 1.0 and no handles attached
    pub fn reward(id: impl Into<String>, name: impl Into<String>, amount: u32) -> Self {
        Self {
            id: id.into(),
            is_bomb: false,
            weight: default_weight(),
            reward_name: name.into(),
            reward_amount: amount,
            reward_icon: None,
            effect: None,
        }
    }

    /// Bomb slice with weight 1.0
    pub fn bomb(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_bomb: true,
            weight: default_weight(),
            reward_name: String::new(),
            reward_amount: 0,
            reward_icon: None,
            effect: None,
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.reward_icon = Some(IconRef::new(icon));
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(EffectRef::new(effect));
        self
    }

    /// Ledger key for this slice, falling back to the default reward name
    pub fn reward_key(&self) -> &str {
        if self.reward_name.is_empty() {
            DEFAULT_REWARD_KEY
        } else {
            &self.reward_name
        }
    }
}

/// Read-only view of the catalog handed to the engine and the codec
pub trait CatalogProvider {
    /// Slices in authored (wheel) order
    fn slices(&self) -> &[SliceConfig];

    /// Icon for a reward key, taken from the first non-bomb slice using it
    fn icon_for(&self, key: &str) -> Option<&IconRef>;

    fn len(&self) -> usize {
        self.slices().len()
    }

    fn is_empty(&self) -> bool {
        self.slices().is_empty()
    }
}

/// Errors raised while loading a catalog document
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog read error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    slices: Vec<SliceConfig>,
}

/// Immutable slice list plus the derived reward-name → icon lookup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    slices: Vec<SliceConfig>,
    icons: HashMap<String, IconRef>,
}

impl Catalog {
    pub fn new(slices: Vec<SliceConfig>) -> Self {
        let mut icons = HashMap::new();
        for slice in slices.iter().filter(|s| !s.is_bomb) {
            if let Some(icon) = &slice.reward_icon {
                icons
                    .entry(slice.reward_key().to_string())
                    .or_insert_with(|| icon.clone());
            }
        }
        Self { slices, icons }
    }

    /// Parse a `{ "slices": [...] }` document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        log::info!("Loaded wheel catalog ({} slices)", doc.slices.len());
        Ok(Self::new(doc.slices))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl CatalogProvider for Catalog {
    fn slices(&self) -> &[SliceConfig] {
        &self.slices
    }

    fn icon_for(&self, key: &str) -> Option<&IconRef> {
        self.icons.get(key)
    }
}
