use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of tracked tasks.
pub const TASK_COUNT: usize = TaskName::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskName {
    #[serde(rename = "Recur Tablet")]
    RecurTablet,
    #[serde(rename = "Minoxidil")]
    Minoxidil,
    #[serde(rename = "Water Intake")]
    WaterIntake,
    #[serde(rename = "Oiling")]
    Oiling,
    #[serde(rename = "Shampoo")]
    Shampoo,
}

impl TaskName {
    /// Display and summary order.
    pub const ALL: [TaskName; 5] = [
        TaskName::RecurTablet,
        TaskName::Minoxidil,
        TaskName::WaterIntake,
        TaskName::Oiling,
        TaskName::Shampoo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskName::RecurTablet => "Recur Tablet",
            TaskName::Minoxidil => "Minoxidil",
            TaskName::WaterIntake => "Water Intake",
            TaskName::Oiling => "Oiling",
            TaskName::Shampoo => "Shampoo",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            TaskName::RecurTablet => "recur_tablet",
            TaskName::Minoxidil => "minoxidil",
            TaskName::WaterIntake => "water_intake",
            TaskName::Oiling => "oiling",
            TaskName::Shampoo => "shampoo",
        }
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTask(pub String);

impl fmt::Display for UnknownTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown task '{}'", self.0)
    }
}

impl std::error::Error for UnknownTask {}

impl FromStr for TaskName {
    type Err = UnknownTask;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        TaskName::ALL
            .into_iter()
            .find(|task| task.label().eq_ignore_ascii_case(value) || task.slug() == value)
            .or(match value {
                "oil" => Some(TaskName::Oiling),
                _ => None,
            })
            .ok_or_else(|| UnknownTask(value.to_string()))
    }
}

/// Completion flags for one day. Keys missing from persisted JSON read as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DayRecord {
    #[serde(rename = "Recur Tablet")]
    pub recur_tablet: bool,
    #[serde(rename = "Minoxidil")]
    pub minoxidil: bool,
    #[serde(rename = "Water Intake")]
    pub water_intake: bool,
    #[serde(rename = "Oiling")]
    pub oiling: bool,
    #[serde(rename = "Shampoo")]
    pub shampoo: bool,
}

impl DayRecord {
    pub fn get(&self, task: TaskName) -> bool {
        match task {
            TaskName::RecurTablet => self.recur_tablet,
            TaskName::Minoxidil => self.minoxidil,
            TaskName::WaterIntake => self.water_intake,
            TaskName::Oiling => self.oiling,
            TaskName::Shampoo => self.shampoo,
        }
    }

    pub fn flag_mut(&mut self, task: TaskName) -> &mut bool {
        match task {
            TaskName::RecurTablet => &mut self.recur_tablet,
            TaskName::Minoxidil => &mut self.minoxidil,
            TaskName::WaterIntake => &mut self.water_intake,
            TaskName::Oiling => &mut self.oiling,
            TaskName::Shampoo => &mut self.shampoo,
        }
    }

    pub fn done_count(&self) -> usize {
        TaskName::ALL.iter().filter(|task| self.get(**task)).count()
    }

    pub fn open_tasks(&self) -> Vec<TaskName> {
        TaskName::ALL
            .into_iter()
            .filter(|task| !self.get(*task))
            .collect()
    }
}

/// Every observed day keyed by `YYYY-MM-DD`, kept in the order days were first seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Store {
    pub days: IndexMap<String, DayRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub task: String,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ResetRequest {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckForm {
    pub task: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct DateRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub task: TaskName,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayView {
    pub date: String,
    pub tasks: Vec<TaskStatus>,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub task: TaskName,
    pub completed: usize,
    pub window: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub date: String,
    pub task: TaskName,
    pub done: bool,
}
