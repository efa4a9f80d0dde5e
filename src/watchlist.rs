//! Watchlist persistence behind a repository interface.
//!
//! The repository is read once when a [`Watchlist`] is opened and rewritten
//! wholesale on every mutation.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::prediction::Prediction;

#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("watchlist storage error: {0}")]
    Io(#[from] io::Error),

    #[error("watchlist is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub symbol: String,
    pub name: String,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_prediction: Option<Prediction>,
}

impl WatchlistItem {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            added_at: Utc::now(),
            last_prediction: None,
        }
    }
}

pub trait WatchlistRepository: Send + Sync {
    fn load(&self) -> Result<Vec<WatchlistItem>, WatchlistError>;

    fn save(&self, items: &[WatchlistItem]) -> Result<(), WatchlistError>;
}

#[derive(Default)]
pub struct InMemoryWatchlist {
    items: Mutex<Vec<WatchlistItem>>,
}

impl InMemoryWatchlist {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WatchlistRepository for InMemoryWatchlist {
    fn load(&self) -> Result<Vec<WatchlistItem>, WatchlistError> {
        Ok(self
            .items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, items: &[WatchlistItem]) -> Result<(), WatchlistError> {
        *self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = items.to_vec();
        Ok(())
    }
}

/// JSON array stored in a single file. A missing file is an empty list.
pub struct JsonFileWatchlist {
    path: PathBuf,
}

impl JsonFileWatchlist {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WatchlistRepository for JsonFileWatchlist {
    fn load(&self) -> Result<Vec<WatchlistItem>, WatchlistError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, items: &[WatchlistItem]) -> Result<(), WatchlistError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        debug!(path = %self.path.display(), items = items.len(), "Watchlist saved");
        Ok(())
    }
}

/// In-memory view of a repository.
pub struct Watchlist {
    repository: Box<dyn WatchlistRepository>,
    items: Mutex<Vec<WatchlistItem>>,
}

impl Watchlist {
    pub fn open(repository: Box<dyn WatchlistRepository>) -> Result<Self, WatchlistError> {
        let items = repository.load()?;
        Ok(Self {
            repository,
            items: Mutex::new(items),
        })
    }

    pub fn items(&self) -> Vec<WatchlistItem> {
        self.lock().clone()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.lock().iter().any(|item| item.symbol == symbol)
    }

    /// Returns `false` when the symbol is already present.
    pub fn add(&self, item: WatchlistItem) -> Result<bool, WatchlistError> {
        let mut items = self.lock();
        if items.iter().any(|existing| existing.symbol == item.symbol) {
            return Ok(false);
        }
        let mut updated = items.clone();
        updated.push(item);
        self.commit(&mut items, updated)?;
        Ok(true)
    }

    /// Returns `false` when the symbol was not listed.
    pub fn remove(&self, symbol: &str) -> Result<bool, WatchlistError> {
        let mut items = self.lock();
        if !items.iter().any(|item| item.symbol == symbol) {
            return Ok(false);
        }
        let updated = items.iter().filter(|item| item.symbol != symbol).cloned().collect();
        self.commit(&mut items, updated)?;
        Ok(true)
    }

    /// Cache the latest prediction on a listed symbol.
    pub fn update_prediction(&self, prediction: &Prediction) -> Result<bool, WatchlistError> {
        let mut items = self.lock();
        let Some(index) = items.iter().position(|item| item.symbol == prediction.symbol) else {
            return Ok(false);
        };
        let mut updated = items.clone();
        updated[index].last_prediction = Some(prediction.clone());
        self.commit(&mut items, updated)?;
        Ok(true)
    }

    /// Persist `updated`, then make it the in-memory list. A failed save
    /// leaves the current list untouched.
    fn commit(&self, items: &mut Vec<WatchlistItem>, updated: Vec<WatchlistItem>) -> Result<(), WatchlistError> {
        self.repository.save(&updated)?;
        *items = updated;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<WatchlistItem>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
