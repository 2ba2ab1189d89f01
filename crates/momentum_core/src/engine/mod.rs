//! Read-only derivations over a goal's completion ledger.
//!
//! # Responsibility
//! - Compute current/best streaks.
//! - Derive display chains for a calendar month or rolling window.

pub mod chain;
pub mod streak;
