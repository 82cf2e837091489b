use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared, mutable reference to a mapped object
///
/// Every holder of a handle observes the same object, so a refresh through the
/// identity map is visible to all of them.
pub type Handle<T> = Rc<RefCell<T>>;

/// Wrap a value in a fresh handle
pub fn new_handle<T>(value: T) -> Handle<T> {
    Rc::new(RefCell::new(value))
}

/// Identity map keyed by primary key
///
/// Guarantees at most one live handle per persisted row. There is no eviction:
/// entries stay until removed or the map is dropped. Not thread-safe (`Rc`),
/// designed for a single session on a single thread.
#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: HashMap<i64, Handle<T>>,
}

impl<T> IdentityMap<T> {
    /// Create a new empty map
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Get the live handle for a primary key, if one is registered
    pub fn get(&self, id: i64) -> Option<Handle<T>> {
        self.entries.get(&id).cloned()
    }

    /// Register a handle under a primary key, replacing any previous entry
    pub fn insert(&mut self, id: i64, handle: Handle<T>) {
        self.entries.insert(id, handle);
    }

    /// Unregister a primary key, returning the handle that was registered
    pub fn remove(&mut self, id: i64) -> Option<Handle<T>> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered primary keys in ascending order
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
