use crate::models::{ReportRow, Store, TaskName};
use std::fmt::Write;

/// Flattens the store into one row per date and task.
pub fn report_rows(store: &Store) -> Vec<ReportRow> {
    store
        .days
        .iter()
        .flat_map(|(date, record)| {
            TaskName::ALL.into_iter().map(move |task| ReportRow {
                date: date.clone(),
                task,
                done: record.get(task),
            })
        })
        .collect()
}

pub fn render_report_text(rows: &[ReportRow]) -> String {
    let task_width = TaskName::ALL
        .iter()
        .map(|task| task.label().len())
        .max()
        .unwrap_or(4);

    let mut out = String::from("Hair Care Progress Report\n\n");
    let _ = writeln!(out, "{:<10}  {:<task_width$}  Done", "Date", "Task");
    let _ = writeln!(out, "{}", "-".repeat(10 + 2 + task_width + 2 + 4));
    for row in rows {
        let done = if row.done { "Yes" } else { "No" };
        let _ = writeln!(out, "{:<10}  {:<task_width$}  {done}", row.date, row.task.label());
    }
    out
}
