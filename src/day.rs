use crate::models::{DayRecord, DayView, Store, TaskName, TaskStatus, TASK_COUNT};
use chrono::{Local, NaiveDate};

pub fn today_key() -> String {
    date_key(Local::now().date_naive())
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Inserts an all-false record for `key` unless one exists.
///
/// Returns `true` when a record was created.
pub fn ensure_day(store: &mut Store, key: &str) -> bool {
    if store.days.contains_key(key) {
        return false;
    }
    store.days.insert(key.to_string(), DayRecord::default());
    true
}

/// Flips `task` for `key` and returns the new flag. A missing day starts out all false.
pub fn toggle_task(store: &mut Store, key: &str, task: TaskName) -> bool {
    let record = store.days.entry(key.to_string()).or_default();
    let flag = record.flag_mut(task);
    *flag = !*flag;
    *flag
}

pub fn reset_day(store: &mut Store, key: &str) {
    store.days.insert(key.to_string(), DayRecord::default());
}

pub fn completion_percent(store: &Store, key: &str) -> f64 {
    if TASK_COUNT == 0 {
        return 0.0;
    }
    match store.days.get(key) {
        Some(record) => record.done_count() as f64 / TASK_COUNT as f64 * 100.0,
        None => 0.0,
    }
}

pub fn day_view(store: &Store, key: &str) -> DayView {
    let record = store.days.get(key).copied().unwrap_or_default();
    DayView {
        date: key.to_string(),
        tasks: TaskName::ALL
            .into_iter()
            .map(|task| TaskStatus {
                task,
                done: record.get(task),
            })
            .collect(),
        percent: completion_percent(store, key),
    }
}
