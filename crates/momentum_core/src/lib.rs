//! Core domain logic for the Momentum habit tracker.
//! This crate is the single source of truth for streak and ledger rules.

pub mod calendar;
pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::{Clock, DateKey, DateKeyError, FixedClock, SystemClock};
pub use config::{ConfigError, TrackerConfig};
pub use engine::chain::{generate_chain, ChainCell, ChainMode};
pub use engine::streak::{compute_streak, StreakSummary};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::goal::{Goal, GoalId, GoalValidationError, History};
pub use model::state::TrackerState;
pub use repo::kv_repo::{KvStore, MemoryKvStore, RepoError, RepoResult, SqliteKvStore};
pub use repo::state_repo::{load_state, save_state, STATE_KEY};
pub use service::feedback::{CompletionFeedback, LazyFeedback};
pub use service::goal_service::{
    Completion, DailyScore, GoalService, GoalView, TrackerError, TrackerResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
