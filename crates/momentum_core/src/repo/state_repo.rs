//! Tracker snapshot load/save over a [`KvStore`].
//!
//! # Responsibility
//! - Serialize the whole tracker state as one JSON record.
//! - Recover from corrupt payloads by falling back to an empty state.
//!
//! # Invariants
//! - A corrupt payload is never propagated as an error; store I/O errors are.
//! - Saves always write the full snapshot under [`STATE_KEY`].

use super::kv_repo::{KvStore, RepoError, RepoResult};
use crate::model::goal::GoalId;
use crate::model::state::TrackerState;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key the tracker snapshot is stored under.
pub const STATE_KEY: &str = "momentumData";

/// Reasons a stored payload is treated as corrupt.
#[derive(Debug)]
pub enum StateCorruptError {
    Json(serde_json::Error),
    DuplicateGoalId(GoalId),
}

impl Display for StateCorruptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "unparsable tracker state: {err}"),
            Self::DuplicateGoalId(id) => write!(f, "duplicate goal id in tracker state: {id}"),
        }
    }
}

impl Error for StateCorruptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::DuplicateGoalId(_) => None,
        }
    }
}

/// Outcome of a state load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedState {
    pub state: TrackerState,
    /// Set when a stored payload was discarded as corrupt.
    pub recovered_from_corrupt: bool,
}

/// Decodes a stored payload, enforcing snapshot invariants.
pub fn decode_state(raw: &str) -> Result<TrackerState, StateCorruptError> {
    let state: TrackerState = serde_json::from_str(raw).map_err(StateCorruptError::Json)?;
    if let Some(id) = state.duplicate_id() {
        return Err(StateCorruptError::DuplicateGoalId(id));
    }
    Ok(state)
}

/// Loads the tracker state, defaulting when absent or corrupt.
///
/// # Errors
/// - Returns store errors from the underlying [`KvStore::get`].
pub fn load_state<S: KvStore>(store: &S) -> RepoResult<LoadedState> {
    let Some(raw) = store.get(STATE_KEY)? else {
        info!("event=state_load module=repo status=ok source=default goals=0");
        return Ok(LoadedState {
            state: TrackerState::default(),
            recovered_from_corrupt: false,
        });
    };

    match decode_state(&raw) {
        Ok(state) => {
            info!(
                "event=state_load module=repo status=ok source=store goals={}",
                state.goals.len()
            );
            Ok(LoadedState {
                state,
                recovered_from_corrupt: false,
            })
        }
        Err(err) => {
            warn!(
                "event=state_load module=repo status=recovered error_code=state_corrupt payload_bytes={} error={err}",
                raw.len()
            );
            Ok(LoadedState {
                state: TrackerState::default(),
                recovered_from_corrupt: true,
            })
        }
    }
}

/// Serializes and writes the full snapshot.
pub fn save_state<S: KvStore>(store: &S, state: &TrackerState) -> RepoResult<()> {
    let payload = serde_json::to_string(state).map_err(RepoError::Serialize)?;
    store.set(STATE_KEY, &payload)?;
    info!(
        "event=state_save module=repo status=ok goals={} payload_bytes={}",
        state.goals.len(),
        payload.len()
    );
    Ok(())
}
