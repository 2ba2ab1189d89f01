//! Backward-walk streak computation.
//!
//! # Invariants
//! - Exactly one non-completed day is tolerated before the walk halts.
//! - The walk takes at most `current + 2` steps.
//! - Computation is read-only; callers decide whether to persist a raised best.

use crate::calendar::DateKey;
use crate::model::goal::Goal;

/// Result of one streak computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakSummary {
    /// Completed days counted before the walk stopped.
    pub current: u32,
    /// `max(goal.best_streak, current)`.
    pub best: u32,
}

impl StreakSummary {
    /// Whether `best` exceeds the value stored on `goal`.
    pub fn raises_best(&self, goal: &Goal) -> bool {
        self.best > goal.best_streak
    }
}

/// Computes the current and updated best streak for `goal` as of `today`.
pub fn compute_streak(goal: &Goal, today: DateKey) -> StreakSummary {
    let mut current: u32 = 0;
    let mut missed_once = false;
    let mut cursor = Some(today);

    while let Some(day) = cursor {
        if goal.is_completed_on(day) {
            current = current.saturating_add(1);
        } else if !missed_once {
            missed_once = true;
        } else {
            break;
        }
        cursor = day.pred();
    }

    StreakSummary {
        current,
        best: goal.best_streak.max(current),
    }
}
