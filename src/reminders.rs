//! Time-of-day reminders and the end-of-day completeness alert.
//!
//! [`ReminderEngine`] decides what to send for a given wall-clock minute and
//! never touches the store mutably. [`ReminderService`] owns the periodic task
//! that feeds it the local time and forwards results to a [`NotificationSink`].

use crate::day::date_key;
use crate::models::{Store, TaskName};
use crate::state::AppState;
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use std::{
    str::FromStr,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{sync::oneshot, task::JoinHandle};
use tracing::{debug, info, warn};

/// Local hour at which an incomplete checklist raises an alert.
pub const END_OF_DAY_HOUR: u32 = 21;

pub const TICK_PERIOD: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Default,
    Granted,
    Denied,
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Permission::Default),
            "granted" => Ok(Permission::Granted),
            "denied" => Ok(Permission::Denied),
            other => Err(format!("unknown notification permission '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Reminder,
    /// Blocking end-of-day prompt.
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    /// Local time of day, `HH:MM`.
    pub time: String,
    pub title: String,
    pub body: String,
}

impl Reminder {
    pub fn new(time: &str, title: &str, body: &str) -> Self {
        Self {
            time: time.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

pub const REMINDER_TITLE: &str = "HairCare Tracker";

pub fn default_schedule() -> Vec<Reminder> {
    vec![
        Reminder::new("08:00", REMINDER_TITLE, "Time to drink water!"),
        Reminder::new("14:00", REMINDER_TITLE, "Don't forget to apply Minoxidil!"),
        Reminder::new("19:00", REMINDER_TITLE, "Time to oil your hair!"),
    ]
}

/// Receives notifications produced by the reminder service.
pub trait NotificationSink: Send + Sync {
    fn permission(&self) -> Permission;

    /// Prompts for permission and returns the resulting state.
    fn request_permission(&self) -> Permission;

    fn notify(&self, notification: &Notification);
}

/// Writes notifications to the log.
#[derive(Debug)]
pub struct LogSink {
    permission: Mutex<Permission>,
}

impl LogSink {
    pub fn new(permission: Permission) -> Self {
        Self {
            permission: Mutex::new(permission),
        }
    }
}

impl NotificationSink for LogSink {
    fn permission(&self) -> Permission {
        *self.permission.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn request_permission(&self) -> Permission {
        let mut permission = self
            .permission
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *permission == Permission::Default {
            *permission = Permission::Granted;
        }
        *permission
    }

    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Reminder => {
                info!(title = %notification.title, "reminder: {}", notification.body)
            }
            NotificationKind::Alert => {
                warn!(title = %notification.title, "alert: {}", notification.body)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReminderEngine {
    schedule: Vec<Reminder>,
    end_of_day_hour: u32,
    last_minute: Option<(NaiveDate, u32, u32)>,
    alerted_on: Option<NaiveDate>,
}

impl Default for ReminderEngine {
    fn default() -> Self {
        Self::new(default_schedule())
    }
}

impl ReminderEngine {
    pub fn new(schedule: Vec<Reminder>) -> Self {
        Self {
            schedule,
            end_of_day_hour: END_OF_DAY_HOUR,
            last_minute: None,
            alerted_on: None,
        }
    }

    /// Notifications due at `now`.
    ///
    /// Each minute is handled once and the end-of-day alert fires once per day.
    pub fn check(&mut self, now: NaiveDateTime, store: &Store) -> Vec<Notification> {
        let mut due = Vec::new();
        let date = now.date();
        let minute = (date, now.hour(), now.minute());

        if self.last_minute != Some(minute) {
            self.last_minute = Some(minute);
            let clock = now.format("%H:%M").to_string();
            due.extend(
                self.schedule
                    .iter()
                    .filter(|reminder| reminder.time == clock)
                    .map(|reminder| Notification {
                        kind: NotificationKind::Reminder,
                        title: reminder.title.clone(),
                        body: reminder.body.clone(),
                    }),
            );
        }

        if now.hour() == self.end_of_day_hour && self.alerted_on != Some(date) {
            let open = match store.days.get(&date_key(date)) {
                Some(record) => record.open_tasks(),
                None => TaskName::ALL.to_vec(),
            };
            if !open.is_empty() {
                self.alerted_on = Some(date);
                let names: Vec<_> = open.iter().map(|task| task.label()).collect();
                due.push(Notification {
                    kind: NotificationKind::Alert,
                    title: "Checklist incomplete".to_string(),
                    body: format!("Still open today: {}", names.join(", ")),
                });
            }
        }

        due
    }
}

/// Periodic reminder task tied to the server's lifetime.
pub struct ReminderService {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl ReminderService {
    pub fn start(
        state: AppState,
        sink: Arc<dyn NotificationSink>,
        mut engine: ReminderEngine,
        period: Duration,
    ) -> Self {
        if sink.permission() == Permission::Default {
            let granted = sink.request_permission();
            info!(?granted, "notification permission requested");
        }

        let (shutdown, mut stop) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let now = Local::now().naive_local();
                        let due = {
                            let data = state.data.lock().await;
                            engine.check(now, &data)
                        };
                        deliver(sink.as_ref(), &due);
                    }
                    _ = &mut stop => break,
                }
            }
            debug!("reminder service stopped");
        });

        info!(every = ?period, "reminder service started");
        Self { shutdown, handle }
    }

    /// Cancels the timer and waits for the task to exit.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(err) = self.handle.await {
            warn!("reminder task ended abnormally: {err}");
        }
    }
}

/// Alerts are always surfaced; reminders need a granted permission.
fn deliver(sink: &dyn NotificationSink, due: &[Notification]) {
    let granted = sink.permission() == Permission::Granted;
    for notification in due {
        if notification.kind == NotificationKind::Reminder && !granted {
            debug!(title = %notification.title, "reminder skipped without permission");
            continue;
        }
        sink.notify(notification);
    }
}
