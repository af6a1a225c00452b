//! Level progression: zones, payout multiplier and the level-bar window

use crate::consts::{
    DEFAULT_WINDOW_SIZE, LEVEL_MULTIPLIER_STEP, SAFE_ZONE_FACTOR, SAFE_ZONE_INTERVAL,
    SUPER_ZONE_FACTOR, SUPER_ZONE_INTERVAL,
};

/// Zone a level falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Zone {
    #[default]
    Normal,
    /// Every 5th level
    Safe,
    /// Every 30th level (wins over Safe)
    Super,
}

impl Zone {
    pub fn classify(level: u32) -> Self {
        if level % SUPER_ZONE_INTERVAL == 0 {
            Zone::Super
        } else if level % SAFE_ZONE_INTERVAL == 0 {
            Zone::Safe
        } else {
            Zone::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Normal => "Normal",
            Zone::Safe => "Safe",
            Zone::Super => "Super",
        }
    }

    /// Payout boost applied on top of the per-level multiplier
    pub fn factor(&self) -> f64 {
        match self {
            Zone::Normal => 1.0,
            Zone::Safe => SAFE_ZONE_FACTOR,
            Zone::Super => SUPER_ZONE_FACTOR,
        }
    }
}

/// Bombs are excluded from the draw on these levels
#[inline]
pub fn is_milestone(level: u32) -> bool {
    level % SAFE_ZONE_INTERVAL == 0 || level % SUPER_ZONE_INTERVAL == 0
}

pub fn next_safe_zone(level: u32) -> u32 {
    (level / SAFE_ZONE_INTERVAL + 1) * SAFE_ZONE_INTERVAL
}

pub fn next_super_zone(level: u32) -> u32 {
    (level / SUPER_ZONE_INTERVAL + 1) * SUPER_ZONE_INTERVAL
}

/// `(1 + 0.10 * (level - 1)) * zone factor`
pub fn payout_multiplier(level: u32) -> f64 {
    let steps = level.saturating_sub(1) as f64;
    (1.0 + LEVEL_MULTIPLIER_STEP * steps) * Zone::classify(level).factor()
}

/// Base reward scaled for `level`, rounded half-to-even
pub fn payout_amount(base: u32, level: u32) -> u64 {
    let scaled = base as f64 * payout_multiplier(level);
    scaled.round_ties_even().max(0.0) as u64
}

/// One cell of the level bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCell {
    pub level: u32,
    /// The player's current level
    pub active: bool,
}

/// Current level plus the sliding window shown in the level bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    level: u32,
    window_start: u32,
    window_size: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl Progression {
    /// Fresh run at level 1
    pub fn new(window_size: u32) -> Self {
        Self {
            level: 1,
            window_start: 1,
            window_size: window_size.max(1),
        }
    }

    /// Resume at `level` with the window ending on it
    pub fn at_level(level: u32, window_size: u32) -> Self {
        let window_size = window_size.max(1);
        let level = level.max(1);
        Self {
            level,
            window_start: level.saturating_sub(window_size - 1).max(1),
            window_size,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn window_start(&self) -> u32 {
        self.window_start
    }

    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    /// Last level shown in the bar
    pub fn window_end(&self) -> u32 {
        self.window_start.saturating_add(self.window_size.saturating_sub(1))
    }

    pub fn zone(&self) -> Zone {
        Zone::classify(self.level)
    }

    pub fn next_safe_zone(&self) -> u32 {
        next_safe_zone(self.level)
    }

    pub fn next_super_zone(&self) -> u32 {
        next_super_zone(self.level)
    }

    pub fn payout_multiplier(&self) -> f64 {
        payout_multiplier(self.level)
    }

    /// Slide the window so `level` stays visible
    pub fn recompute_window(&mut self, level: u32) {
        if level > self.window_end() {
            self.window_start = level.saturating_sub(self.window_size - 1);
        } else if level < self.window_start {
            self.window_start = level;
        }
        self.window_start = self.window_start.max(1);
    }

    /// Step to the next level after a reward
    pub fn advance(&mut self) {
        self.level = self.level.saturating_add(1).max(1);
        self.recompute_window(self.level);
    }

    /// Back to level 1 after a bomb
    pub fn reset_to_default(&mut self) {
        self.level = 1;
        self.window_start = 1;
    }

    /// Cells for the level bar, `window_size` of them
    pub fn window_cells(&self) -> impl Iterator<Item = LevelCell> + '_ {
        (0..self.window_size).map(move |i| {
            let level = self.window_start.saturating_add(i).max(1);
            LevelCell {
                level,
                active: level == self.level,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify() {
        assert_eq!(Zone::classify(1), Zone::Normal);
        assert_eq!(Zone::classify(5), Zone::Safe);
        assert_eq!(Zone::classify(25), Zone::Safe);
        assert_eq!(Zone::classify(30), Zone::Super);
        assert_eq!(Zone::classify(60), Zone::Super);
        assert_eq!(Zone::classify(31), Zone::Normal);
    }

    #[test]
    fn test_next_zones() {
        assert_eq!(next_safe_zone(1), 5);
        assert_eq!(next_safe_zone(5), 10);
        assert_eq!(next_safe_zone(9), 10);
        assert_eq!(next_super_zone(1), 30);
        assert_eq!(next_super_zone(30), 60);
    }

    #[test]
    fn test_payout_multiplier() {
        assert_eq!(payout_multiplier(1), 1.0);
        assert_eq!(payout_multiplier(5), (1.0 + 0.1 * 4.0) * 1.5);
        assert!((payout_multiplier(30) - 11.7).abs() < 1e-9);
        assert!((payout_multiplier(2) - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_payout_amount_rounds_half_to_even() {
        assert_eq!(payout_amount(10, 1), 10);
        // level 6 is exactly 1.5x
        assert_eq!(payout_amount(3, 6), 4);
        assert_eq!(payout_amount(5, 6), 8);
        // 100 * 11.7
        assert_eq!(payout_amount(100, 30), 1170);
        assert_eq!(payout_amount(0, 30), 0);
    }

    #[test]
    fn test_window_slides_forward() {
        let mut p = Progression::new(10);
        assert_eq!((p.window_start(), p.window_end()), (1, 10));
        for _ in 0..10 {
            p.advance();
        }
        assert_eq!(p.level(), 11);
        assert_eq!((p.window_start(), p.window_end()), (2, 11));
    }

    #[test]
    fn test_window_slides_back() {
        let mut p = Progression::at_level(40, 10);
        assert_eq!(p.window_start(), 31);
        p.recompute_window(20);
        assert_eq!(p.window_start(), 20);
    }

    #[test]
    fn test_reset_to_default() {
        let mut p = Progression::at_level(17, 10);
        p.reset_to_default();
        assert_eq!(p, Progression::new(10));
    }

    #[test]
    fn test_window_cells_mark_current_level() {
        let p = Progression::at_level(3, 5);
        let cells: Vec<_> = p.window_cells().collect();
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0].level, 1);
        assert_eq!(cells.iter().filter(|c| c.active).count(), 1);
        assert!(cells[2].active);
    }

    #[test]
    fn test_zero_window_size_clamped() {
        let mut p = Progression::new(0);
        assert_eq!(p.window_size(), 1);
        p.advance();
        assert_eq!((p.window_start(), p.level()), (2, 2));
    }

    #[test]
    fn test_window_at_max_level() {
        let mut p = Progression::at_level(u32::MAX, 10);
        assert_eq!((p.window_start(), p.window_end()), (u32::MAX - 9, u32::MAX));
        assert_eq!(p.window_cells().filter(|c| c.active).count(), 1);
        p.advance();
        assert_eq!(p.level(), u32::MAX);
        assert!(p.window_start() <= p.level() && p.level() <= p.window_end());

        let mut p = Progression::at_level(u32::MAX - 20, 10);
        for _ in 0..30 {
            p.advance();
        }
        assert_eq!((p.window_start(), p.window_end()), (u32::MAX - 9, u32::MAX));
    }

    proptest! {
        #[test]
        fn prop_window_invariant_near_max_level(
            window_size in 1u32..40,
            start in (u32::MAX - 100)..=u32::MAX,
            steps in 0usize..200,
        ) {
            let mut p = Progression::at_level(start, window_size);
            prop_assert!(p.window_start() <= p.level() && p.level() <= p.window_end());
            for _ in 0..steps {
                p.advance();
                prop_assert!(p.window_start() <= p.level());
                prop_assert!(p.level() <= p.window_end());
                prop_assert_eq!(p.window_cells().filter(|c| c.active).count(), 1);
            }
        }

        #[test]
        fn prop_window_invariant_holds(
            window_size in 1u32..40,
            start in 1u32..500,
            steps in 0usize..200,
        ) {
            let mut p = Progression::at_level(start, window_size);
            prop_assert!(p.window_start() <= p.level() && p.level() <= p.window_end());
            for _ in 0..steps {
                p.advance();
                prop_assert!(p.window_start() >= 1);
                prop_assert!(p.window_start() <= p.level());
                prop_assert!(p.level() <= p.window_end());
            }
        }
    }
}
