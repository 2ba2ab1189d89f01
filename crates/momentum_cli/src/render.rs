//! Plain-text rendering of goal views.

use momentum_core::{ChainCell, GoalView};

const FILLED_CELL: char = '■';
const EMPTY_CELL: char = '·';

pub fn chain_row(chain: &[ChainCell]) -> String {
    chain
        .iter()
        .map(|cell| if cell.filled { FILLED_CELL } else { EMPTY_CELL })
        .collect()
}

/// First eight characters of the goal id, enough to address it.
pub fn short_id(view: &GoalView) -> String {
    view.goal.id.simple().to_string()[..8].to_string()
}

pub fn goal_card(view: &GoalView) -> String {
    let goal = &view.goal;
    let status = if view.completed_today {
        "✔ done today"
    } else {
        "pending"
    };
    format!(
        "{name}  [{id}]  {color}\n  Started: {started}\n  Streak: {current} day(s)   Best: {best}   {status}\n  {chain}",
        name = goal.name,
        id = short_id(view),
        color = goal.color,
        started = goal.start_date.display_date(),
        current = view.streak.current,
        best = view.streak.best,
        chain = chain_row(&view.chain),
    )
}

pub fn goal_detail(view: &GoalView) -> String {
    let mut out = goal_card(view);
    let completed = view.goal.history.values().filter(|done| **done).count();
    out.push_str(&format!("\n  Id: {}\n  Days completed: {completed}", view.goal.id));
    if let (Some(first), Some(last)) = (view.chain.first(), view.chain.last()) {
        out.push_str(&format!(
            "\n  Chain: {} .. {}",
            first.date.display_date(),
            last.date.display_date()
        ));
    }
    out
}
