//! Whole-store snapshot persisted as a single record.
//!
//! # Invariants
//! - `goals` keeps insertion order.
//! - Goal ids are unique within one snapshot.

use super::goal::{Goal, GoalId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Persisted tracker record: `{ goals, theme? }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    #[serde(default)]
    pub goals: Vec<Goal>,
    /// Owned by the theme collaborator; carried through saves untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl TrackerState {
    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn goal_mut(&mut self, id: GoalId) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|goal| goal.id == id)
    }

    /// Returns the first id that appears more than once, if any.
    pub fn duplicate_id(&self) -> Option<GoalId> {
        let mut seen = HashSet::with_capacity(self.goals.len());
        self.goals
            .iter()
            .map(|goal| goal.id)
            .find(|id| !seen.insert(*id))
    }
}
