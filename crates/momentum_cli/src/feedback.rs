//! Terminal bell as completion feedback.

use log::warn;
use momentum_core::{CompletionFeedback, Goal};
use std::io::{IsTerminal, Write};

pub struct TerminalBell;

impl TerminalBell {
    /// Returns a bell only when stderr is attached to a terminal.
    pub fn open() -> Option<Self> {
        std::io::stderr().is_terminal().then_some(Self)
    }
}

impl CompletionFeedback for TerminalBell {
    fn goal_completed(&self, goal: &Goal) {
        let mut stderr = std::io::stderr();
        if let Err(err) = stderr.write_all(b"\x07").and_then(|()| stderr.flush()) {
            warn!(
                "event=feedback_play module=cli status=error goal_id={} error={err}",
                goal.id
            );
        }
    }
}
