use momentum_core::{generate_chain, ChainMode, DateKey, Goal};

fn key(value: &str) -> DateKey {
    value.parse().unwrap()
}

fn filled_dates(goal: &Goal, today: DateKey, mode: ChainMode) -> Vec<String> {
    generate_chain(goal, today, mode)
        .into_iter()
        .filter(|cell| cell.filled)
        .map(|cell| cell.date.to_string())
        .collect()
}

#[test]
fn mid_month_start_fills_only_start_day() {
    let mut goal = Goal::new("Stretch", "#0f0", key("2024-04-15"));
    goal.mark_completed(key("2024-04-15"));
    // Stray entry before the start date must not render.
    goal.history.insert(key("2024-04-10"), true);

    let today = key("2024-04-20");
    let chain = generate_chain(&goal, today, ChainMode::CalendarMonth);

    assert_eq!(chain.len(), 30);
    assert_eq!(filled_dates(&goal, today, ChainMode::CalendarMonth), vec!["2024-04-15"]);
    assert!(chain.windows(2).all(|pair| pair[0].date < pair[1].date));
}

#[test]
fn chain_is_deterministic_and_read_only() {
    let mut goal = Goal::new("Stretch", "#0f0", key("2024-01-20"));
    goal.backfill_until(key("2024-02-05"));
    let before = goal.clone();
    let today = key("2024-02-06");

    for mode in [ChainMode::CalendarMonth, ChainMode::Rolling { days: 30 }] {
        let first = generate_chain(&goal, today, mode);
        let second = generate_chain(&goal, today, mode);
        assert_eq!(first, second);
    }
    assert_eq!(goal, before);
}

#[test]
fn rolling_window_respects_start_date_and_year_boundary() {
    let mut goal = Goal::new("Stretch", "#0f0", key("2024-01-01"));
    goal.history.insert(key("2023-12-31"), true);
    goal.mark_completed(key("2024-01-01"));
    goal.mark_completed(key("2024-01-03"));

    let today = key("2024-01-03");
    let mode = ChainMode::Rolling { days: 7 };
    let chain = generate_chain(&goal, today, mode);

    assert_eq!(chain.len(), 7);
    assert_eq!(chain[0].date, key("2023-12-28"));
    assert_eq!(chain[6].date, today);
    assert_eq!(filled_dates(&goal, today, mode), vec!["2024-01-01", "2024-01-03"]);
}

#[test]
fn december_month_has_thirty_one_cells() {
    let goal = Goal::new("Stretch", "#0f0", key("2023-01-01"));
    let chain = generate_chain(&goal, key("2023-12-31"), ChainMode::CalendarMonth);
    assert_eq!(chain.len(), 31);
    assert_eq!(chain[30].date, key("2023-12-31"));
}
