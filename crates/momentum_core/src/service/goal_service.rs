//! Goal store and mutation use-cases.
//!
//! # Responsibility
//! - Own the in-memory tracker state for one session.
//! - Apply add/delete/mark-complete transitions and persist after each one.
//! - Expose read-only streak/chain views for rendering layers.
//!
//! # Invariants
//! - "Today" is read from the clock at the start of every operation.
//! - A mutation is staged on a copy and only becomes visible after the
//!   snapshot is saved; a failed save leaves the store unchanged.
//! - Validation and not-found failures never touch state or storage.

use crate::calendar::{Clock, DateKey, SystemClock};
use crate::config::TrackerConfig;
use crate::engine::chain::{generate_chain, ChainCell, ChainMode};
use crate::engine::streak::{compute_streak, StreakSummary};
use crate::model::goal::{validate_new_goal, Goal, GoalId, GoalValidationError};
use crate::model::state::TrackerState;
use crate::repo::kv_repo::{KvStore, RepoError};
use crate::repo::state_repo::{load_state, save_state};
use crate::service::feedback::CompletionFeedback;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Service error for tracker use-cases.
#[derive(Debug)]
pub enum TrackerError {
    /// Input rejected before any state change.
    Validation(GoalValidationError),
    /// Target goal does not exist.
    NotFound(GoalId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "goal not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<GoalValidationError> for TrackerError {
    fn from(value: GoalValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TrackerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Render-ready projection of one goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalView {
    pub goal: Goal,
    pub streak: StreakSummary,
    pub completed_today: bool,
    pub chain: Vec<ChainCell>,
}

/// Result of a mark-complete call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Goal as persisted after the call.
    pub goal: Goal,
    pub streak: StreakSummary,
    /// `false` when today was already marked.
    pub newly_completed: bool,
    /// Whether this call raised `best_streak`.
    pub best_raised: bool,
}

/// Goals completed today out of all goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyScore {
    pub completed: usize,
    pub total: usize,
}

impl Display for DailyScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} completed today", self.completed, self.total)
    }
}

/// Session-scoped goal store backed by a key-value collaborator.
pub struct GoalService<S: KvStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    config: TrackerConfig,
    state: TrackerState,
    feedback: Option<Box<dyn CompletionFeedback>>,
}

impl<S: KvStore, C: Clock> GoalService<S, C> {
    /// Loads persisted state and builds the session store.
    ///
    /// Corrupt payloads fall back to an empty store; only storage I/O
    /// failures are returned.
    pub fn open(store: S, clock: C, config: TrackerConfig) -> TrackerResult<Self> {
        let loaded = load_state(&store)?;
        if loaded.recovered_from_corrupt {
            warn!("event=store_open module=service status=recovered reason=state_corrupt");
        }
        Ok(Self {
            store,
            clock,
            config,
            state: loaded.state,
            feedback: None,
        })
    }

    /// Installs a completion feedback sink.
    pub fn with_feedback(mut self, feedback: impl CompletionFeedback + 'static) -> Self {
        self.feedback = Some(Box::new(feedback));
        self
    }

    pub fn goals(&self) -> &[Goal] {
        &self.state.goals
    }

    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.state.goal(id)
    }

    pub fn theme(&self) -> Option<&str> {
        self.state.theme.as_deref()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn chain_mode(&self) -> ChainMode {
        self.config.chain
    }

    /// Current local day according to the injected clock.
    pub fn today(&self) -> DateKey {
        self.clock.today()
    }

    /// Creates a goal, appends it and persists.
    ///
    /// # Errors
    /// - `Validation` for blank name, blank/malformed start date, or a start
    ///   date after today.
    /// - `Repo` when the snapshot cannot be saved.
    pub fn add_goal(&mut self, name: &str, color: &str, start_date: &str) -> TrackerResult<Goal> {
        let today = self.clock.today();
        let (name, start_date) = validate_new_goal(name, start_date, today).map_err(|err| {
            info!("event=goal_add module=service status=rejected reason={err}");
            err
        })?;

        let mut goal = Goal::new(name, color.trim(), start_date);
        let backfilled = if self.config.backfill_on_add {
            goal.backfill_until(today.add_days(-1))
        } else {
            0
        };

        let mut next = self.state.clone();
        next.goals.push(goal.clone());
        self.commit(next)?;

        info!(
            "event=goal_add module=service status=ok goal_id={} start_date={} backfilled_days={backfilled}",
            goal.id, goal.start_date
        );
        Ok(goal)
    }

    /// Removes a goal if present and persists.
    ///
    /// Returns whether a goal was removed; an unknown id is not an error.
    pub fn delete_goal(&mut self, id: GoalId) -> TrackerResult<bool> {
        let mut next = self.state.clone();
        let before = next.goals.len();
        next.goals.retain(|goal| goal.id != id);
        let removed = next.goals.len() != before;
        self.commit(next)?;

        info!("event=goal_delete module=service status=ok goal_id={id} removed={removed}");
        Ok(removed)
    }

    /// Marks today completed for `id`, refreshes its best streak and persists.
    ///
    /// Calling this again on the same day leaves history and streak unchanged.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `Repo` when the snapshot cannot be saved.
    pub fn mark_complete(&mut self, id: GoalId) -> TrackerResult<Completion> {
        let today = self.clock.today();
        let mut next = self.state.clone();
        let Some(goal) = next.goal_mut(id) else {
            info!("event=goal_complete module=service status=not_found goal_id={id}");
            return Err(TrackerError::NotFound(id));
        };

        let newly_completed = goal.mark_completed(today);
        let streak = compute_streak(goal, today);
        let best_raised = goal.raise_best_streak(streak.best);
        let goal = goal.clone();
        self.commit(next)?;

        info!(
            "event=goal_complete module=service status=ok goal_id={id} date={today} streak={} best={} newly_completed={newly_completed}",
            streak.current, streak.best
        );

        if newly_completed {
            if let Some(feedback) = &self.feedback {
                feedback.goal_completed(&goal);
            }
        }

        Ok(Completion {
            goal,
            streak,
            newly_completed,
            best_raised,
        })
    }

    /// Streak for one goal as of today, without persisting.
    pub fn streak(&self, id: GoalId) -> Option<StreakSummary> {
        let today = self.clock.today();
        self.state.goal(id).map(|goal| compute_streak(goal, today))
    }

    /// Read-only view of one goal as of today.
    pub fn goal_view(&self, id: GoalId) -> Option<GoalView> {
        let today = self.clock.today();
        self.state
            .goal(id)
            .map(|goal| build_view(goal, today, self.config.chain))
    }

    /// Views of all goals in store order.
    ///
    /// Raises and persists `best_streak` for every goal whose current streak
    /// exceeds it, so the returned views are always consistent with storage.
    pub fn refresh_views(&mut self) -> TrackerResult<Vec<GoalView>> {
        let today = self.clock.today();
        let mut next = self.state.clone();
        let mut raised = 0usize;
        for goal in &mut next.goals {
            let streak = compute_streak(goal, today);
            if goal.raise_best_streak(streak.best) {
                raised += 1;
                info!(
                    "event=best_streak_update module=service status=ok goal_id={} best={}",
                    goal.id, goal.best_streak
                );
            }
        }
        if raised > 0 {
            self.commit(next)?;
        }

        Ok(self
            .state
            .goals
            .iter()
            .map(|goal| build_view(goal, today, self.config.chain))
            .collect())
    }

    /// Goals completed today out of all goals.
    pub fn daily_score(&self) -> DailyScore {
        let today = self.clock.today();
        DailyScore {
            completed: self
                .state
                .goals
                .iter()
                .filter(|goal| goal.is_completed_on(today))
                .count(),
            total: self.state.goals.len(),
        }
    }

    fn commit(&mut self, next: TrackerState) -> TrackerResult<()> {
        save_state(&self.store, &next)?;
        self.state = next;
        Ok(())
    }
}

fn build_view(goal: &Goal, today: DateKey, mode: ChainMode) -> GoalView {
    GoalView {
        goal: goal.clone(),
        streak: compute_streak(goal, today),
        completed_today: goal.is_completed_on(today),
        chain: generate_chain(goal, today, mode),
    }
}
