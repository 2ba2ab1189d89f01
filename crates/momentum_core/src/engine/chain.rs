//! Chain derivation: fixed-length day cells for completion display.
//!
//! # Invariants
//! - Cells are in ascending date order, oldest first.
//! - Output depends only on `(goal, today, mode)`; the goal is never mutated.
//! - Days before `start_date` or after `today` are never filled.

use crate::calendar::{days_in_month, DateKey};
use crate::model::goal::Goal;
use serde::{Deserialize, Serialize};

/// Default length of the rolling window.
pub const DEFAULT_ROLLING_DAYS: u32 = 30;

/// Windowing policy for chain generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ChainMode {
    /// Every day of today's calendar month.
    #[default]
    CalendarMonth,
    /// The `days` most recent days ending today.
    Rolling {
        #[serde(default = "default_rolling_days")]
        days: u32,
    },
}

fn default_rolling_days() -> u32 {
    DEFAULT_ROLLING_DAYS
}

/// One day in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainCell {
    pub date: DateKey,
    pub filled: bool,
}

/// Builds the chain for `goal` as of `today` under `mode`.
pub fn generate_chain(goal: &Goal, today: DateKey, mode: ChainMode) -> Vec<ChainCell> {
    let (first, len) = match mode {
        ChainMode::CalendarMonth => (
            today.first_of_month(),
            days_in_month(today.year(), today.month()),
        ),
        ChainMode::Rolling { days } => (today.add_days(1 - i64::from(days)), days),
    };

    (0..len)
        .map(|offset| first.add_days(i64::from(offset)))
        .map(|date| ChainCell {
            date,
            filled: date >= goal.start_date && date <= today && goal.is_completed_on(date),
        })
        .collect()
}
