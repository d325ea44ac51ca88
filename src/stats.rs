use crate::models::{Store, TaskName, TaskSummary};

/// Days covered by the weekly summary.
pub const WEEK_WINDOW: usize = 7;

/// Per-task completion over the last seven days in the order they were first recorded.
///
/// `window` is always [`WEEK_WINDOW`], even while fewer days exist.
pub fn weekly_summary(store: &Store) -> Vec<TaskSummary> {
    let skip = store.days.len().saturating_sub(WEEK_WINDOW);
    let recent: Vec<_> = store.days.values().skip(skip).collect();

    TaskName::ALL
        .into_iter()
        .map(|task| TaskSummary {
            task,
            completed: recent.iter().filter(|record| record.get(task)).count(),
            window: WEEK_WINDOW,
        })
        .collect()
}

/// Dates to display. Without both bounds only `today` is shown.
pub fn filtered_dates(
    store: &Store,
    today: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Vec<String> {
    match (start, end) {
        (Some(start), Some(end)) => store
            .days
            .keys()
            .filter(|key| start <= key.as_str() && key.as_str() <= end)
            .cloned()
            .collect(),
        _ => vec![today.to_string()],
    }
}

pub fn previous_days(store: &Store, today: &str) -> Vec<String> {
    store
        .days
        .keys()
        .filter(|key| key.as_str() != today)
        .cloned()
        .collect()
}
