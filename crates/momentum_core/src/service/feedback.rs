//! Completion feedback collaborator.
//!
//! # Responsibility
//! - Notify an optional sink (sound, bell, haptics) after a goal is completed.
//! - Create the underlying device lazily, on the first completion only.
//!
//! # Invariants
//! - Feedback failures never affect the completion result.
//! - A factory that fails once is not retried in the same session.

use crate::model::goal::Goal;
use log::warn;
use once_cell::unsync::OnceCell;

/// Sink invoked after a successful mark-complete.
pub trait CompletionFeedback {
    fn goal_completed(&self, goal: &Goal);
}

/// Wraps a device factory and opens the device on first use.
///
/// The factory returns `None` when no device is available, which disables
/// feedback for the rest of the session.
pub struct LazyFeedback<T, F>
where
    F: Fn() -> Option<T>,
{
    factory: F,
    device: OnceCell<Option<T>>,
}

impl<T, F> LazyFeedback<T, F>
where
    T: CompletionFeedback,
    F: Fn() -> Option<T>,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            device: OnceCell::new(),
        }
    }

    /// Whether the factory has already run.
    pub fn is_initialized(&self) -> bool {
        self.device.get().is_some()
    }
}

impl<T, F> CompletionFeedback for LazyFeedback<T, F>
where
    T: CompletionFeedback,
    F: Fn() -> Option<T>,
{
    fn goal_completed(&self, goal: &Goal) {
        let device = self.device.get_or_init(|| {
            let device = (self.factory)();
            if device.is_none() {
                warn!("event=feedback_init module=service status=unavailable");
            }
            device
        });
        if let Some(device) = device {
            device.goal_completed(goal);
        }
    }
}
