//! Spin resolution
//!
//! Resolution is synchronous: the draw, the level change, the ledger update
//! and the save all happen inside [`SpinEngine::resolve`]. Presentation gets
//! the [`Outcome`] afterwards and reports back through
//! [`SpinEngine::finish_reveal`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ledger::RewardLedger;
use super::progression::{Progression, payout_amount};
use super::select::select;
use crate::catalog::{CatalogProvider, EffectRef, IconRef};
use crate::consts::BOMB_REWARD_KEY;
use crate::persistence::{self, SaveState};
use crate::platform::KeyValueStore;
use crate::settings::WheelSettings;

/// Why a spin request was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpinError {
    #[error("wheel catalog has no slices")]
    EmptyCatalog,

    #[error("no eligible slice at level {level}")]
    NoEligibleSlice { level: u32 },

    #[error("previous spin is still being revealed")]
    SpinInFlight,
}

/// Result of one spin, handed to presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Index of the slice the wheel lands on
    pub slice_index: usize,
    pub is_penalty: bool,
    pub reward_key: String,
    pub reward_icon: Option<IconRef>,
    /// Payout after the level multiplier (0 for bombs)
    pub amount: u64,
    pub effect: Option<EffectRef>,
    /// Level the spin was drawn at
    pub drawn_level: u32,
    /// Level after resolution
    pub level: u32,
}

/// Owns progression, ledger, RNG and the injected catalog/store
pub struct SpinEngine<C, S> {
    catalog: C,
    store: S,
    rng: Pcg32,
    progression: Progression,
    ledger: RewardLedger,
    spin_in_flight: bool,
}

impl<C: CatalogProvider, S: KeyValueStore> SpinEngine<C, S> {
    /// Build an engine, resuming from whatever progress `store` holds
    pub fn new(catalog: C, store: S, settings: &WheelSettings, rng: Pcg32) -> Self {
        let (progression, ledger) =
            persistence::load_from(&store, &catalog, settings.effective_window_size());
        if catalog.is_empty() {
            log::warn!("Wheel catalog is empty; spins will be refused");
        }
        Self {
            catalog,
            store,
            rng,
            progression,
            ledger,
            spin_in_flight: false,
        }
    }

    /// Like [`SpinEngine::new`] with the RNG seeded from `settings`
    pub fn from_settings(catalog: C, store: S, settings: &WheelSettings) -> Self {
        let seed = settings.resolve_seed();
        log::info!("Spin engine seeded with {}", seed);
        Self::new(catalog, store, settings, Pcg32::seed_from_u64(seed))
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn ledger(&self) -> &RewardLedger {
        &self.ledger
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn is_spin_in_flight(&self) -> bool {
        self.spin_in_flight
    }

    /// Accept a spin if none is being revealed, resolve it and mark it in flight
    pub fn request_spin(&mut self) -> Result<Outcome, SpinError> {
        if self.spin_in_flight {
            log::debug!("Spin request ignored, reveal still pending");
            return Err(SpinError::SpinInFlight);
        }
        let outcome = self.resolve()?;
        self.spin_in_flight = true;
        Ok(outcome)
    }

    /// Bare success signal for button wiring
    pub fn try_spin(&mut self) -> bool {
        self.request_spin().is_ok()
    }

    /// Presentation finished (or was cancelled); accept the next request
    pub fn finish_reveal(&mut self) {
        self.spin_in_flight = false;
    }

    /// Draw a slice and apply it to progression, ledger and the store
    pub fn resolve(&mut self) -> Result<Outcome, SpinError> {
        let drawn_level = self.progression.level();
        let slices = self.catalog.slices();
        if slices.is_empty() {
            log::warn!("Spin refused: {}", SpinError::EmptyCatalog);
            return Err(SpinError::EmptyCatalog);
        }
        let Some(index) = select(slices, drawn_level, &mut self.rng) else {
            let err = SpinError::NoEligibleSlice { level: drawn_level };
            log::warn!("Spin refused: {}", err);
            return Err(err);
        };
        let slice = &slices[index];

        let outcome = if slice.is_bomb {
            self.ledger.clear();
            self.progression.reset_to_default();
            log::info!("Bomb at level {}, progress reset", drawn_level);
            Outcome {
                slice_index: index,
                is_penalty: true,
                reward_key: BOMB_REWARD_KEY.to_string(),
                reward_icon: None,
                amount: 0,
                effect: slice.effect.clone(),
                drawn_level,
                level: self.progression.level(),
            }
        } else {
            let key = slice.reward_key().to_string();
            let amount = payout_amount(slice.reward_amount, drawn_level);
            let icon = slice.reward_icon.clone();
            self.progression.advance();
            self.ledger
                .upsert(&key, icon.as_ref(), amount.min(i64::MAX as u64) as i64);
            log::debug!(
                "Level {} -> {}: +{} {}",
                drawn_level,
                self.progression.level(),
                amount,
                key
            );
            Outcome {
                slice_index: index,
                is_penalty: false,
                reward_key: key,
                reward_icon: icon,
                amount,
                effect: slice.effect.clone(),
                drawn_level,
                level: self.progression.level(),
            }
        };

        self.save_now();
        Ok(outcome)
    }

    /// Current progress as a save document
    pub fn snapshot(&self) -> SaveState {
        persistence::snapshot(&self.progression, &self.ledger)
    }

    fn save_now(&mut self) {
        let save = self.snapshot();
        persistence::save_to(&mut self.store, &save);
    }
}
