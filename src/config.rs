//! Configuration management.
//!
//! Provides the bonus point weights applied by the record builder and the
//! pipeline-wide settings shared by every file in a batch.

use crate::constants::{
    DEFAULT_ADV_BONUS, DEFAULT_DEV_BONUS, DEFAULT_NT_BONUS, DEFAULT_PB_BONUS,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Bonus point weights awarded on top of place points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusPoints {
    /// Swim qualified at the developing tier
    pub dev: i64,

    /// Swim qualified at the advanced tier
    pub adv: i64,

    /// Swimmer entered without a seed time
    pub nt: i64,

    /// Swimmer beat their seed time
    pub pb: i64,
}

impl Default for BonusPoints {
    fn default() -> Self {
        Self {
            dev: DEFAULT_DEV_BONUS,
            adv: DEFAULT_ADV_BONUS,
            nt: DEFAULT_NT_BONUS,
            pb: DEFAULT_PB_BONUS,
        }
    }
}

impl BonusPoints {
    /// Scoring with every bonus switched off
    pub fn none() -> Self {
        Self {
            dev: 0,
            adv: 0,
            nt: 0,
            pb: 0,
        }
    }

    pub fn with_dev(mut self, points: i64) -> Self {
        self.dev = points;
        self
    }

    pub fn with_adv(mut self, points: i64) -> Self {
        self.adv = points;
        self
    }

    pub fn with_nt(mut self, points: i64) -> Self {
        self.nt = points;
        self
    }

    pub fn with_pb(mut self, points: i64) -> Self {
        self.pb = points;
        self
    }
}

/// Global configuration for a standardize/aggregate run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Bonus weights used while standardizing
    pub bonus_points: BonusPoints,

    /// Draw progress bars while working through a batch
    pub show_progress: bool,

    /// Date assigned to meets whose file name carries no year
    pub run_date: NaiveDate,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bonus_points: BonusPoints::default(),
            show_progress: true,
            run_date: Local::now().date_naive(),
        }
    }
}

impl PipelineConfig {
    /// Use custom bonus weights
    pub fn with_bonus_points(mut self, bonus_points: BonusPoints) -> Self {
        self.bonus_points = bonus_points;
        self
    }

    /// Disable progress bars (tests, quiet mode)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Pin the fallback meet date, making output reproducible
    pub fn with_run_date(mut self, run_date: NaiveDate) -> Self {
        self.run_date = run_date;
        self
    }
}
