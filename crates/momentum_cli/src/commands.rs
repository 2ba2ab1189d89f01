//! Subcommand handlers.

use crate::render::{goal_card, goal_detail};
use log::debug;
use momentum_core::{Clock, GoalId, GoalService, KvStore};
use std::error::Error;

type CommandResult = Result<(), Box<dyn Error>>;

/// Outcome of matching user input against stored goal ids.
#[derive(Debug, PartialEq, Eq)]
pub enum IdMatch {
    Found(GoalId),
    Missing,
    Ambiguous(usize),
}

/// Matches a full id or a unique, case-insensitive prefix of one.
pub fn match_goal_id<'a>(ids: impl IntoIterator<Item = &'a GoalId>, input: &str) -> IdMatch {
    let needle = input.trim().to_ascii_lowercase().replace('-', "");
    if needle.is_empty() {
        return IdMatch::Missing;
    }
    let matches: Vec<GoalId> = ids
        .into_iter()
        .filter(|id| id.simple().to_string().starts_with(&needle))
        .copied()
        .collect();
    match matches.as_slice() {
        [] => IdMatch::Missing,
        [id] => IdMatch::Found(*id),
        many => IdMatch::Ambiguous(many.len()),
    }
}

fn resolve<S: KvStore, C: Clock>(
    service: &GoalService<S, C>,
    input: &str,
) -> Result<GoalId, Box<dyn Error>> {
    match match_goal_id(service.goals().iter().map(|goal| &goal.id), input) {
        IdMatch::Found(id) => Ok(id),
        IdMatch::Missing => Err(format!("no goal matches `{input}`").into()),
        IdMatch::Ambiguous(count) => {
            Err(format!("`{input}` matches {count} goals; use a longer prefix").into())
        }
    }
}

pub fn add<S: KvStore, C: Clock>(
    service: &mut GoalService<S, C>,
    name: &str,
    color: &str,
    start: Option<&str>,
) -> CommandResult {
    let start = match start {
        Some(start) => start.to_string(),
        None => service.today().to_string(),
    };
    let goal = service.add_goal(name, color, &start)?;
    println!(
        "Added `{}` starting {} [{}]",
        goal.name,
        goal.start_date.display_date(),
        goal.id
    );
    Ok(())
}

pub fn delete<S: KvStore, C: Clock>(service: &mut GoalService<S, C>, input: &str) -> CommandResult {
    let id = match match_goal_id(service.goals().iter().map(|goal| &goal.id), input) {
        IdMatch::Found(id) => id,
        IdMatch::Missing => {
            println!("No goal matches `{input}`; nothing deleted.");
            return Ok(());
        }
        IdMatch::Ambiguous(count) => {
            return Err(format!("`{input}` matches {count} goals; use a longer prefix").into())
        }
    };
    let name = service
        .goal(id)
        .map(|goal| goal.name.clone())
        .unwrap_or_default();
    if service.delete_goal(id)? {
        println!("Deleted `{name}`.");
    }
    Ok(())
}

pub fn done<S: KvStore, C: Clock>(service: &mut GoalService<S, C>, input: &str) -> CommandResult {
    let id = resolve(service, input)?;
    let completion = service.mark_complete(id)?;

    if completion.newly_completed {
        println!(
            "🔥 `{}` done for {}. Streak: {} (best {})",
            completion.goal.name,
            service.today().display_date(),
            completion.streak.current,
            completion.streak.best
        );
    } else {
        println!("`{}` was already completed today.", completion.goal.name);
    }
    Ok(())
}

pub fn list<S: KvStore, C: Clock>(service: &mut GoalService<S, C>) -> CommandResult {
    let views = service.refresh_views()?;
    debug!("event=cli_list module=cli status=ok goals={}", views.len());
    if views.is_empty() {
        println!("No goals yet. Add one with `momentum add <name>`.");
        return Ok(());
    }
    for view in &views {
        println!("{}\n", goal_card(view));
    }
    println!("{}", service.daily_score());
    Ok(())
}

pub fn show<S: KvStore, C: Clock>(service: &mut GoalService<S, C>, input: &str) -> CommandResult {
    let id = resolve(service, input)?;
    let views = service.refresh_views()?;
    let view = views
        .iter()
        .find(|view| view.goal.id == id)
        .ok_or_else(|| format!("goal not found: {id}"))?;
    println!("{}", goal_detail(view));
    Ok(())
}

pub fn score<S: KvStore, C: Clock>(service: &GoalService<S, C>) -> CommandResult {
    println!("{}", service.daily_score());
    Ok(())
}
