use crate::day;
use crate::errors::AppError;
use crate::models::Store;
use crate::storage::Storage;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub data: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(storage: Storage, data: Store) -> Self {
        Self {
            storage,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Applies `change` and writes the whole store back before releasing the lock.
    pub async fn update<R>(&self, change: impl FnOnce(&mut Store) -> R) -> Result<R, AppError> {
        let mut data = self.data.lock().await;
        let result = change(&mut data);
        self.storage.persist(&data).await?;
        Ok(result)
    }

    /// Creates the record for `date` if needed. The store is only written when a record was added.
    pub async fn ensure_day(&self, date: &str) -> Result<bool, AppError> {
        let mut data = self.data.lock().await;
        if !day::ensure_day(&mut data, date) {
            return Ok(false);
        }
        self.storage.persist(&data).await?;
        Ok(true)
    }

    pub async fn read<R>(&self, view: impl FnOnce(&Store) -> R) -> R {
        let data = self.data.lock().await;
        view(&data)
    }
}
