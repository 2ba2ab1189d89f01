//! Goal domain model.
//!
//! # Responsibility
//! - Define the persisted goal record and its completion ledger.
//! - Validate creation-time invariants.
//!
//! # Invariants
//! - `id` is stable and never reused for another goal.
//! - `name` is non-empty after trimming.
//! - `best_streak` never decreases.
//! - Absence of a `history` key means "not completed".

use crate::calendar::DateKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every goal.
pub type GoalId = Uuid;

/// Date-indexed completion ledger.
pub type History = BTreeMap<DateKey, bool>;

/// Validation errors for goal creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    EmptyStartDate,
    InvalidStartDate(String),
    FutureStartDate { start_date: DateKey, today: DateKey },
}

impl Display for GoalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "goal name cannot be empty"),
            Self::EmptyStartDate => write!(f, "start date cannot be empty"),
            Self::InvalidStartDate(value) => {
                write!(f, "invalid start date `{value}`; expected YYYY-MM-DD")
            }
            Self::FutureStartDate { start_date, today } => write!(
                f,
                "start date {start_date} cannot be in the future (today is {today})"
            ),
        }
    }
}

impl Error for GoalValidationError {}

/// A tracked goal and its completion history.
///
/// Serialized field names follow the persisted camelCase schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    /// Display-only; no semantic constraint.
    pub color: String,
    pub start_date: DateKey,
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub best_streak: u32,
}

impl Goal {
    /// Creates a goal with a generated id, empty history and zero best streak.
    ///
    /// Callers validate input first via [`validate_new_goal`].
    pub fn new(name: impl Into<String>, color: impl Into<String>, start_date: DateKey) -> Self {
        Self::with_id(Uuid::new_v4(), name, color, start_date)
    }

    /// Creates a goal with a caller-provided id.
    pub fn with_id(
        id: GoalId,
        name: impl Into<String>,
        color: impl Into<String>,
        start_date: DateKey,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            start_date,
            history: History::new(),
            best_streak: 0,
        }
    }

    /// Whether the ledger marks `day` as completed.
    pub fn is_completed_on(&self, day: DateKey) -> bool {
        self.history.get(&day).copied().unwrap_or(false)
    }

    /// Marks `day` completed. Returns `false` when it already was.
    pub fn mark_completed(&mut self, day: DateKey) -> bool {
        let previous = self.history.insert(day, true);
        previous != Some(true)
    }

    /// Marks every day from `start_date` through `until` (inclusive) completed.
    ///
    /// Returns the number of newly marked days; nothing is written when
    /// `until` precedes `start_date`.
    pub fn backfill_until(&mut self, until: DateKey) -> usize {
        let mut marked = 0;
        let mut day = self.start_date;
        while day <= until {
            if self.mark_completed(day) {
                marked += 1;
            }
            match day.add_days(1) {
                next if next > day => day = next,
                _ => break,
            }
        }
        marked
    }

    /// Raises `best_streak` to `candidate` if it is higher.
    ///
    /// Returns whether the stored value changed.
    pub fn raise_best_streak(&mut self, candidate: u32) -> bool {
        if candidate > self.best_streak {
            self.best_streak = candidate;
            return true;
        }
        false
    }
}

/// Validates add-goal input and returns the normalized name and start date.
///
/// # Errors
/// - `EmptyName` when `name` is blank after trimming.
/// - `EmptyStartDate` / `InvalidStartDate` for missing or non-canonical dates.
/// - `FutureStartDate` when the start date is after `today`.
pub fn validate_new_goal(
    name: &str,
    start_date: &str,
    today: DateKey,
) -> Result<(String, DateKey), GoalValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GoalValidationError::EmptyName);
    }

    let raw_start = start_date.trim();
    if raw_start.is_empty() {
        return Err(GoalValidationError::EmptyStartDate);
    }
    let start_date = raw_start
        .parse::<DateKey>()
        .map_err(|_| GoalValidationError::InvalidStartDate(raw_start.to_string()))?;

    if start_date > today {
        return Err(GoalValidationError::FutureStartDate { start_date, today });
    }

    Ok((name.to_string(), start_date))
}
