use crate::errors::AppError;
use crate::models::Store;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tokio::fs;
use tracing::error;

/// Where the serialized store lives.
#[derive(Debug, Clone)]
pub enum Storage {
    JsonFile(PathBuf),
    /// In-process slot, used by tests.
    Memory(Arc<Mutex<Option<Vec<u8>>>>),
}

impl Storage {
    pub fn memory() -> Self {
        Storage::Memory(Arc::new(Mutex::new(None)))
    }

    pub fn memory_with(bytes: impl Into<Vec<u8>>) -> Self {
        Storage::Memory(Arc::new(Mutex::new(Some(bytes.into()))))
    }

    /// Reads the store, falling back to an empty one when the slot is missing or malformed.
    pub async fn load(&self) -> Store {
        match self {
            Storage::JsonFile(path) => load_data(path).await,
            Storage::Memory(slot) => match snapshot(slot) {
                Some(bytes) => parse_data(&bytes),
                None => Store::default(),
            },
        }
    }

    /// Overwrites the slot with the full store.
    pub async fn persist(&self, data: &Store) -> Result<(), AppError> {
        match self {
            Storage::JsonFile(path) => persist_data(path, data).await,
            Storage::Memory(slot) => {
                let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
                *slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(payload);
                Ok(())
            }
        }
    }

    /// Raw contents of an in-memory slot.
    pub fn contents(&self) -> Option<Vec<u8>> {
        match self {
            Storage::JsonFile(_) => None,
            Storage::Memory(slot) => snapshot(slot),
        }
    }
}

fn snapshot(slot: &Mutex<Option<Vec<u8>>>) -> Option<Vec<u8>> {
    slot.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

pub async fn load_data(path: &Path) -> Store {
    match fs::read(path).await {
        Ok(bytes) => parse_data(&bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Store::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Store::default()
        }
    }
}

fn parse_data(bytes: &[u8]) -> Store {
    match serde_json::from_slice(bytes) {
        Ok(data) => data,
        Err(err) => {
            error!("failed to parse data file: {err}");
            Store::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &Store) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
