use crate::display::{Display, Region};
use crate::error::Result;
use crate::pipeline::Action;
use crate::render;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Durable string key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Current value of `key`, `None` when it was never written or cannot be read
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value of `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Key-value store persisted as a single JSON object file.
///
/// The file is re-read on every access so writes made by another process
/// are picked up on the next read.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(slots) => slots.get(key).and_then(Value::as_str).map(String::from),
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.read_all().unwrap_or_else(|e| {
            warn!(
                "Discarding unreadable storage file {}: {}",
                self.path.display(),
                e
            );
            Map::new()
        });
        slots.insert(key.to_string(), Value::String(value.to_string()));
        fs::write(&self.path, serde_json::to_string_pretty(&slots)?)?;
        Ok(())
    }
}

/// In-process key-value store. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One rendered favorites entry with the actions bound to its name
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteEntry {
    pub name: String,
    pub select: Action,
    pub delete: Action,
}

impl FavoriteEntry {
    fn new(name: String) -> Self {
        Self {
            select: Action::ShowSaved(name.clone()),
            delete: Action::DeleteFavorite(name.clone()),
            name,
        }
    }
}

/// What the favorites container should show
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesView {
    /// No favorites: the container is hidden entirely
    Hidden,
    Shown(Vec<FavoriteEntry>),
}

/// Ordered list of unique saved recipe names kept in one durable slot.
///
/// Nothing is cached: every operation re-reads the slot, and every
/// mutation writes the whole list back. Read-modify-write is not atomic.
pub struct FavoritesStore {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl FavoritesStore {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Saved names in insertion order; empty when the slot is missing or corrupt
    pub fn list(&self) -> Vec<String> {
        let Some(raw) = self.store.get(&self.key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => names,
            Err(e) => {
                warn!("Ignoring unparseable favorites slot '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Append `name` unless it is already saved
    pub fn add(&self, name: &str) {
        let mut names = self.list();
        if names.iter().any(|saved| saved == name) {
            debug!("'{}' is already a favorite", name);
            return;
        }
        names.push(name.to_string());
        info!("Saved '{}' to favorites", name);
        self.write(&names);
    }

    /// Drop every entry equal to `name`
    pub fn remove(&self, name: &str) {
        let names = self.list();
        let before = names.len();
        let remaining: Vec<String> = names.into_iter().filter(|saved| saved != name).collect();
        if remaining.len() != before {
            info!("Removed '{}' from favorites", name);
        }
        self.write(&remaining);
    }

    /// Current view of the favorites container
    pub fn view(&self) -> FavoritesView {
        let names = self.list();
        if names.is_empty() {
            FavoritesView::Hidden
        } else {
            FavoritesView::Shown(names.into_iter().map(FavoriteEntry::new).collect())
        }
    }

    /// Rebuild the favorites region from the durable slot
    pub fn render(&self, display: &mut dyn Display) -> FavoritesView {
        let view = self.view();
        match &view {
            FavoritesView::Hidden => display.hide(Region::Favorites),
            FavoritesView::Shown(entries) => {
                display.show(Region::Favorites, &render::favorites_html(entries))
            }
        }
        view
    }

    fn write(&self, names: &[String]) {
        let result: Result<()> = serde_json::to_string(names)
            .map_err(Into::into)
            .and_then(|encoded| self.store.set(&self.key, &encoded));
        if let Err(e) = result {
            warn!("Failed to persist favorites slot '{}': {}", self.key, e);
        }
    }
}
