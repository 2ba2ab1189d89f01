//! Persistence collaborators.
//!
//! # Responsibility
//! - Define the key-value storage contract and its implementations.
//! - Encode/decode the tracker snapshot stored under one fixed key.
//!
//! # Invariants
//! - Corrupt snapshots fail soft to an empty state.

pub mod kv_repo;
pub mod state_repo;
