use crate::reminders::Permission;
use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;

/// Process settings read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    /// `APP_REMINDERS=off` disables the reminder service.
    pub reminders: bool,
    pub notifications: Permission,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from("data/state.json"),
            reminders: true,
            notifications: Permission::Default,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let data_path = lookup("APP_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);
        let reminders = lookup("APP_REMINDERS")
            .map(|value| {
                let value = value.trim().to_ascii_lowercase();
                !matches!(value.as_str(), "off" | "0" | "false")
            })
            .unwrap_or(defaults.reminders);
        let notifications = lookup("APP_NOTIFICATIONS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.notifications);

        Self {
            port,
            data_path,
            reminders,
            notifications,
        }
    }
}
