//! Tracker domain model.
//!
//! # Responsibility
//! - Define goal records, their completion ledger and the persisted snapshot.
//!
//! # Invariants
//! - Every goal is identified by a stable `GoalId`.
//! - Deletion removes the goal outright; there are no tombstones.

pub mod goal;
pub mod state;
