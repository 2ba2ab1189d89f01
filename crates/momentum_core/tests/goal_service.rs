use momentum_core::db::open_db_in_memory;
use momentum_core::{
    load_state, ChainMode, CompletionFeedback, DateKey, FixedClock, Goal, GoalService,
    GoalValidationError, KvStore, MemoryKvStore, SqliteKvStore, TrackerConfig, TrackerError,
    STATE_KEY,
};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

fn key(value: &str) -> DateKey {
    value.parse().unwrap()
}

fn clock(today: &str) -> FixedClock {
    FixedClock::new(key(today))
}

#[test]
fn add_goal_appends_and_persists() {
    let store = MemoryKvStore::new();
    let mut service =
        GoalService::open(&store, clock("2024-03-10"), TrackerConfig::default()).unwrap();

    let goal = service.add_goal("  Run ", "#ff0000", "2024-03-01").unwrap();
    assert_eq!(goal.name, "Run");
    assert!(goal.history.is_empty());
    assert_eq!(goal.best_streak, 0);

    let persisted = load_state(&store).unwrap().state;
    assert_eq!(persisted.goals, vec![goal]);
}

#[test]
fn future_start_date_is_rejected_without_state_change() {
    let store = MemoryKvStore::new();
    let mut service =
        GoalService::open(&store, clock("2024-03-10"), TrackerConfig::default()).unwrap();
    service.add_goal("Walk", "#00ff00", "2024-03-01").unwrap();
    let snapshot = store.get(STATE_KEY).unwrap();

    let err = service.add_goal("Run", "#ff0000", "2099-01-01").unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Validation(GoalValidationError::FutureStartDate { .. })
    ));
    assert_eq!(service.goals().len(), 1);
    assert_eq!(store.get(STATE_KEY).unwrap(), snapshot);
}

#[test]
fn missing_name_or_start_date_is_rejected() {
    let mut service = GoalService::open(
        MemoryKvStore::new(),
        clock("2024-03-10"),
        TrackerConfig::default(),
    )
    .unwrap();

    assert!(matches!(
        service.add_goal("", "#fff", "2024-03-01"),
        Err(TrackerError::Validation(GoalValidationError::EmptyName))
    ));
    assert!(matches!(
        service.add_goal("Run", "#fff", " "),
        Err(TrackerError::Validation(GoalValidationError::EmptyStartDate))
    ));
    assert!(service.goals().is_empty());
}

#[test]
fn deleting_unknown_goal_is_a_noop() {
    let store = MemoryKvStore::new();
    let mut service =
        GoalService::open(&store, clock("2024-03-10"), TrackerConfig::default()).unwrap();
    let goal = service.add_goal("Run", "#ff0000", "2024-03-01").unwrap();

    assert!(!service.delete_goal(Uuid::new_v4()).unwrap());
    assert_eq!(service.goals().len(), 1);

    assert!(service.delete_goal(goal.id).unwrap());
    assert!(service.goals().is_empty());
    assert!(load_state(&store).unwrap().state.goals.is_empty());
}

#[test]
fn mark_complete_on_unknown_goal_fails() {
    let mut service = GoalService::open(
        MemoryKvStore::new(),
        clock("2024-03-10"),
        TrackerConfig::default(),
    )
    .unwrap();
    let id = Uuid::new_v4();

    let err = service.mark_complete(id).unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(missing) if missing == id));
}

#[test]
fn mark_complete_twice_same_day_is_idempotent() {
    let store = MemoryKvStore::new();
    let mut service =
        GoalService::open(&store, clock("2024-03-10"), TrackerConfig::default()).unwrap();
    let goal = service.add_goal("Run", "#ff0000", "2024-03-10").unwrap();

    let first = service.mark_complete(goal.id).unwrap();
    let after_first = store.get(STATE_KEY).unwrap();
    let second = service.mark_complete(goal.id).unwrap();

    assert!(first.newly_completed);
    assert!(first.best_raised);
    assert!(!second.newly_completed);
    assert!(!second.best_raised);
    assert_eq!(first.goal, second.goal);
    assert_eq!(first.streak, second.streak);
    assert_eq!(first.streak.current, 1);
    assert_eq!(store.get(STATE_KEY).unwrap(), after_first);
}

#[test]
fn today_is_reread_after_midnight() {
    let clock = clock("2024-03-10");
    let mut service =
        GoalService::open(MemoryKvStore::new(), &clock, TrackerConfig::default()).unwrap();
    let goal = service.add_goal("Run", "#ff0000", "2024-03-10").unwrap();

    service.mark_complete(goal.id).unwrap();
    clock.advance(1);
    let completion = service.mark_complete(goal.id).unwrap();

    assert!(completion.newly_completed);
    assert_eq!(completion.streak.current, 2);
    assert_eq!(completion.goal.best_streak, 2);
    assert!(completion.goal.is_completed_on(key("2024-03-11")));
}

#[test]
fn best_streak_survives_a_broken_run() {
    let clock = clock("2024-03-01");
    let mut service =
        GoalService::open(MemoryKvStore::new(), &clock, TrackerConfig::default()).unwrap();
    let goal = service.add_goal("Run", "#ff0000", "2024-03-01").unwrap();

    for _ in 0..3 {
        service.mark_complete(goal.id).unwrap();
        clock.advance(1);
    }
    clock.advance(5);
    let completion = service.mark_complete(goal.id).unwrap();

    assert_eq!(completion.streak.current, 1);
    assert_eq!(completion.streak.best, 3);
    assert_eq!(completion.goal.best_streak, 3);
}

#[test]
fn backfill_is_opt_in() {
    let config = TrackerConfig {
        backfill_on_add: true,
        ..TrackerConfig::default()
    };
    let mut service = GoalService::open(MemoryKvStore::new(), clock("2024-03-10"), config).unwrap();

    let goal = service.add_goal("Run", "#ff0000", "2024-03-07").unwrap();
    let days: Vec<String> = goal.history.keys().map(ToString::to_string).collect();
    assert_eq!(days, vec!["2024-03-07", "2024-03-08", "2024-03-09"]);
    assert_eq!(service.streak(goal.id).unwrap().current, 3);

    let mut plain = GoalService::open(
        MemoryKvStore::new(),
        clock("2024-03-10"),
        TrackerConfig::default(),
    )
    .unwrap();
    assert!(plain
        .add_goal("Run", "#ff0000", "2024-03-07")
        .unwrap()
        .history
        .is_empty());
}

#[test]
fn refresh_views_persists_raised_best_streaks() {
    let store = MemoryKvStore::new();
    let config = TrackerConfig {
        backfill_on_add: true,
        chain: ChainMode::Rolling { days: 5 },
        ..TrackerConfig::default()
    };
    let mut service = GoalService::open(&store, clock("2024-03-10"), config).unwrap();
    let goal = service.add_goal("Run", "#ff0000", "2024-03-05").unwrap();
    assert_eq!(goal.best_streak, 0);

    let views = service.refresh_views().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].streak.current, 5);
    assert_eq!(views[0].goal.best_streak, 5);
    assert!(!views[0].completed_today);
    assert_eq!(views[0].chain.len(), 5);
    assert_eq!(views[0].chain.iter().filter(|cell| cell.filled).count(), 4);

    let persisted = load_state(&store).unwrap().state;
    assert_eq!(persisted.goals[0].best_streak, 5);
}

#[test]
fn daily_score_counts_goals_done_today() {
    let mut service = GoalService::open(
        MemoryKvStore::new(),
        clock("2024-03-10"),
        TrackerConfig::default(),
    )
    .unwrap();
    let run = service.add_goal("Run", "#f00", "2024-03-01").unwrap();
    service.add_goal("Read", "#0f0", "2024-03-01").unwrap();
    service.mark_complete(run.id).unwrap();

    let score = service.daily_score();
    assert_eq!((score.completed, score.total), (1, 2));
    assert_eq!(score.to_string(), "1 / 2 completed today");
}

#[test]
fn goals_reload_in_insertion_order_from_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let names = ["Run", "Read", "Write"];
    {
        let mut service = GoalService::open(
            SqliteKvStore::new(&conn),
            clock("2024-03-10"),
            TrackerConfig::default(),
        )
        .unwrap();
        for name in names {
            service.add_goal(name, "#fff", "2024-03-01").unwrap();
        }
    }

    let reopened = GoalService::open(
        SqliteKvStore::new(&conn),
        clock("2024-03-11"),
        TrackerConfig::default(),
    )
    .unwrap();
    let loaded: Vec<&str> = reopened.goals().iter().map(|goal| goal.name.as_str()).collect();
    assert_eq!(loaded, names);
}

struct RecordingFeedback(Rc<RefCell<Vec<String>>>);

impl CompletionFeedback for RecordingFeedback {
    fn goal_completed(&self, goal: &Goal) {
        self.0.borrow_mut().push(goal.name.clone());
    }
}

#[test]
fn feedback_fires_once_per_new_completion() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut service = GoalService::open(
        MemoryKvStore::new(),
        clock("2024-03-10"),
        TrackerConfig::default(),
    )
    .unwrap()
    .with_feedback(RecordingFeedback(Rc::clone(&events)));
    let goal = service.add_goal("Run", "#f00", "2024-03-10").unwrap();

    service.mark_complete(goal.id).unwrap();
    service.mark_complete(goal.id).unwrap();
    let _ = service.mark_complete(Uuid::new_v4());

    assert_eq!(*events.borrow(), vec!["Run".to_string()]);
}
