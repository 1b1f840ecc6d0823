//! Per-city budget overrides. An override replaces the city's default line
//! items wholesale; clearing it restores the defaults on the next run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::budget::BudgetLineItem;
use crate::errors::TripError;

pub type Result<T> = std::result::Result<T, TripError>;

/// Read contract consumed by aggregation. `snapshot` hands the caller a
/// detached copy of the whole map, so a run never observes a half-applied
/// edit. Mutation lives on the concrete stores.
pub trait OverrideStore: Send + Sync {
    fn override_for(&self, city_id: &str) -> Option<Vec<BudgetLineItem>>;
    fn snapshot(&self) -> HashMap<String, Vec<BudgetLineItem>>;
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryOverrideStore {
    entries: Mutex<HashMap<String, Vec<BudgetLineItem>>>,
}

impl MemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_override(&self, city_id: &str, items: Vec<BudgetLineItem>) {
        let mut entries = self.entries.lock().expect("override store mutex poisoned");
        entries.insert(city_id.to_string(), items);
    }

    pub fn clear_override(&self, city_id: &str) {
        let mut entries = self.entries.lock().expect("override store mutex poisoned");
        entries.remove(city_id);
    }
}

impl OverrideStore for MemoryOverrideStore {
    fn override_for(&self, city_id: &str) -> Option<Vec<BudgetLineItem>> {
        let entries = self.entries.lock().expect("override store mutex poisoned");
        entries.get(city_id).cloned()
    }

    fn snapshot(&self) -> HashMap<String, Vec<BudgetLineItem>> {
        let entries = self.entries.lock().expect("override store mutex poisoned");
        entries.clone()
    }
}

/// File-backed store. Every edit rewrites the whole document through a
/// staging file, so a crash mid-write leaves the previous version intact.
pub struct JsonOverrideStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, Vec<BudgetLineItem>>>,
}

impl JsonOverrideStore {
    /// Opens the store at `path`, loading any existing document. A missing
    /// file is an empty store; the file is created on the first edit.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_override(&self, city_id: &str, items: Vec<BudgetLineItem>) -> Result<()> {
        let mut entries = self.entries.lock().expect("override store mutex poisoned");
        entries.insert(city_id.to_string(), items);
        self.persist(&entries)
    }

    pub fn clear_override(&self, city_id: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("override store mutex poisoned");
        if entries.remove(city_id).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn persist(&self, entries: &HashMap<String, Vec<BudgetLineItem>>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

impl OverrideStore for JsonOverrideStore {
    fn override_for(&self, city_id: &str) -> Option<Vec<BudgetLineItem>> {
        let entries = self.entries.lock().expect("override store mutex poisoned");
        entries.get(city_id).cloned()
    }

    fn snapshot(&self) -> HashMap<String, Vec<BudgetLineItem>> {
        let entries = self.entries.lock().expect("override store mutex poisoned");
        entries.clone()
    }
}
