//! In-memory record storage
//!
//! A [`RecordStore`] exclusively owns every record of one entity type for the
//! lifetime of the process. Controllers read and mutate through it and keep
//! no private copies.

use crate::core::id::IdentifierSource;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A record addressable by its identifier
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// Store shared across request handlers
///
/// Handlers hold the write guard for the whole pipeline-then-mutation
/// sequence, so no two mutations of the same store interleave.
pub type SharedStore<T> = Arc<RwLock<RecordStore<T>>>;

/// Ordered, mutable collection of records of one entity type
///
/// Iteration order is insertion order. Lookup is indexed by id.
#[derive(Debug, Clone)]
pub struct RecordStore<T: Record> {
    records: IndexMap<String, T>,
}

impl<T: Record> RecordStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }

    /// Wrap the store for sharing between handlers
    pub fn shared(self) -> SharedStore<T> {
        Arc::new(RwLock::new(self))
    }

    /// Append a record and return it
    ///
    /// Returns `None` and leaves the store unchanged when the id is already
    /// taken.
    pub fn append(&mut self, record: T) -> Option<&T> {
        match self.records.entry(record.id().to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => Some(&*slot.insert(record)),
        }
    }

    /// Append a record under a fresh id drawn from `ids`
    ///
    /// Ids already present (seeded records, for instance) are skipped, so an
    /// existing record is never replaced. The source must eventually yield an
    /// unused id.
    pub fn append_new<F>(&mut self, ids: &dyn IdentifierSource, build: F) -> &T
    where
        F: FnOnce(String) -> T,
    {
        let id = loop {
            let candidate = ids.next_id();
            if !self.records.contains_key(&candidate) {
                break candidate;
            }
            tracing::debug!(id = %candidate, "identifier already taken, drawing another");
        };
        let record = build(id.clone());
        let (index, _) = self.records.insert_full(id, record);
        &self.records[index]
    }

    /// Look up a record by exact id
    pub fn find_by_id(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// All records, in insertion order
    pub fn list(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    /// Mutate a stored record in place and return the result
    pub fn update_in_place<F>(&mut self, id: &str, update: F) -> Option<&T>
    where
        F: FnOnce(&mut T),
    {
        let record = self.records.get_mut(id)?;
        update(record);
        Some(&*record)
    }

    /// Remove the record with this id
    ///
    /// Absent ids are a silent no-op; callers check existence beforehand.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.records.shift_remove(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> FromIterator<T> for RecordStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.append(record);
        }
        store
    }
}
