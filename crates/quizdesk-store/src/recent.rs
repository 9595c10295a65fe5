use crate::{Store, StoreError};

/// How many entries a [`RecentList`] keeps unless told otherwise
pub const DEFAULT_CAPACITY: usize = 10;

/// A most-recently-used list of strings, newest first, stored under `recent-<name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentList {
    name: String,
    capacity: usize,
    entries: Vec<String>,
}

impl RecentList {
    /// Loads `name`, or starts an empty list
    pub fn load(store: &Store, name: &str) -> Result<RecentList, StoreError> {
        RecentList::load_with_capacity(store, name, DEFAULT_CAPACITY)
    }

    /// Loads `name`, dropping any entries beyond `capacity`
    pub fn load_with_capacity(
        store: &Store,
        name: &str,
        capacity: usize,
    ) -> Result<RecentList, StoreError> {
        let mut entries: Vec<String> = store.get(&key(name))?.unwrap_or_default();
        entries.truncate(capacity);
        Ok(RecentList {
            name: name.to_string(),
            capacity,
            entries,
        })
    }

    /// Newest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Moves `entry` to the front, adding it if new
    pub fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        self.entries.retain(|existing| *existing != entry);
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    /// Forgets the list called `name`, returning whether it existed
    pub fn clear(store: &Store, name: &str) -> Result<bool, StoreError> {
        store.remove(&key(name))
    }

    /// Writes the list back to `store`
    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        store.set(&key(&self.name), &self.entries)
    }
}

fn key(name: &str) -> String {
    format!("recent-{name}")
}
