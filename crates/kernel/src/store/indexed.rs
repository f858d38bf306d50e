//! In-memory indexed collection.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::cursor::{decode_cursor, encode_cursor};
use super::{Entity, Page, StoreError, StoreResult};

/// A record slot. `None` marks a record deleted while a mutation held
/// a reference to the slot.
type Cell<E> = Arc<Mutex<Option<E>>>;

struct Slot<E> {
    seq: u64,
    cell: Cell<E>,
}

struct Index<E> {
    next_seq: u64,
    order: BTreeMap<u64, String>,
    slots: HashMap<String, Slot<E>>,
    seeded: bool,
}

impl<E: Entity> Index<E> {
    fn new() -> Self {
        Self {
            next_seq: 1,
            order: BTreeMap::new(),
            slots: HashMap::new(),
            seeded: false,
        }
    }

    fn insert(&mut self, record: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = record.id().to_string();
        self.order.insert(seq, id.clone());
        self.slots.insert(
            id,
            Slot {
                seq,
                cell: Arc::new(Mutex::new(Some(record))),
            },
        );
    }

    fn remove(&mut self, id: &str) -> Option<Cell<E>> {
        let slot = self.slots.remove(id)?;
        self.order.remove(&slot.seq);
        Some(slot.cell)
    }
}

/// A named collection of entities in insertion order.
///
/// Lock order is always index before record. The index lock is never
/// held while a mutation transform runs.
pub struct IndexedStore<E: Entity> {
    index: RwLock<Index<E>>,
}

impl<E: Entity> Default for IndexedStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> std::fmt::Debug for IndexedStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedStore")
            .field("collection", &E::INDEX_NAME)
            .field("len", &self.len())
            .finish()
    }
}

impl<E: Entity> IndexedStore<E> {
    /// Create an empty, unseeded collection.
    pub fn new() -> Self {
        Self {
            index: RwLock::new(Index::new()),
        }
    }

    /// Insert a new record. Fails with [`StoreError::DuplicateKey`] if the
    /// id is taken; existing records are never overwritten.
    pub fn create(&self, record: E) -> StoreResult<E> {
        let mut index = self.index.write();
        if index.slots.contains_key(record.id()) {
            return Err(StoreError::duplicate::<E>(record.id()));
        }
        index.insert(record.clone());
        debug!(entity = E::ENTITY_NAME, id = %record.id(), "record created");
        Ok(record)
    }

    fn cell(&self, id: &str) -> Option<Cell<E>> {
        self.index.read().slots.get(id).map(|s| Arc::clone(&s.cell))
    }

    /// Point lookup.
    pub fn get(&self, id: &str) -> Option<E> {
        self.cell(id)?.lock().clone()
    }

    pub fn exists(&self, id: &str) -> bool {
        self.index.read().slots.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.index.read().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One page of records after `cursor`.
    ///
    /// `limit = None` returns everything after the cursor. A limit of zero
    /// is treated as one so that paging always makes progress.
    pub fn list(&self, cursor: Option<&str>, limit: Option<usize>) -> StoreResult<Page<E>> {
        self.list_filtered(cursor, limit, |_| true)
    }

    /// Like [`list`](Self::list) but only counts records matching
    /// `predicate`, so pages stay full when filtering.
    pub fn list_filtered<P>(
        &self,
        cursor: Option<&str>,
        limit: Option<usize>,
        predicate: P,
    ) -> StoreResult<Page<E>>
    where
        P: Fn(&E) -> bool,
    {
        let after = cursor.map(decode_cursor).transpose()?;
        let start = after.map_or(Bound::Unbounded, Bound::Excluded);
        let limit = limit.map_or(usize::MAX, |l| l.max(1));

        let index = self.index.read();
        let mut items = Vec::new();
        let mut last_seq = None;
        let mut has_more = false;

        for (&seq, id) in index.order.range((start, Bound::Unbounded)) {
            let Some(slot) = index.slots.get(id) else {
                continue;
            };
            let Some(record) = slot.cell.lock().clone() else {
                continue;
            };
            if !predicate(&record) {
                continue;
            }
            if items.len() == limit {
                has_more = true;
                break;
            }
            items.push(record);
            last_seq = Some(seq);
        }

        let next = match (has_more, last_seq) {
            (true, Some(seq)) => Some(encode_cursor(seq)),
            _ => None,
        };

        Ok(Page { items, next })
    }

    /// Every record, in insertion order.
    pub fn snapshot(&self) -> Vec<E> {
        let index = self.index.read();
        index
            .order
            .values()
            .filter_map(|id| index.slots.get(id))
            .filter_map(|slot| slot.cell.lock().clone())
            .collect()
    }

    /// Read-modify-write where the transform may refuse.
    ///
    /// The transform runs under the record's lock, so a check it performs
    /// against the current state cannot be invalidated by a concurrent
    /// mutation. On error nothing is written. For versioned entities the
    /// stored version becomes the previous version plus one, regardless of
    /// what the transform set.
    pub fn try_mutate<F>(&self, id: &str, f: F) -> StoreResult<E>
    where
        F: FnOnce(&E) -> StoreResult<E>,
    {
        let cell = self.cell(id).ok_or_else(|| StoreError::not_found::<E>(id))?;
        let mut guard = cell.lock();
        let current = guard
            .as_ref()
            .ok_or_else(|| StoreError::not_found::<E>(id))?;

        let mut next = f(current)?;
        if next.id() != current.id() {
            return Err(StoreError::Invalid(format!(
                "{} id cannot be changed",
                E::ENTITY_NAME
            )));
        }
        if let Some(version) = current.version() {
            next.set_version(version + 1);
        }

        *guard = Some(next.clone());
        debug!(entity = E::ENTITY_NAME, id = %id, version = ?next.version(), "record mutated");
        Ok(next)
    }

    /// Read-modify-write with an infallible transform.
    pub fn mutate<F>(&self, id: &str, f: F) -> StoreResult<E>
    where
        F: FnOnce(&E) -> E,
    {
        self.try_mutate(id, |current| Ok(f(current)))
    }

    /// Remove a record. Returns whether it existed.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.index.write().remove(id);
        match removed {
            Some(cell) => {
                *cell.lock() = None;
                debug!(entity = E::ENTITY_NAME, id = %id, "record deleted");
                true
            }
            None => false,
        }
    }

    /// Best-effort batch delete. Missing ids are skipped; returns the
    /// number of records actually removed.
    pub fn delete_many<S: AsRef<str>>(&self, ids: &[S]) -> usize {
        let cells: Vec<Cell<E>> = {
            let mut index = self.index.write();
            ids.iter().filter_map(|id| index.remove(id.as_ref())).collect()
        };
        for cell in &cells {
            *cell.lock() = None;
        }
        debug!(entity = E::ENTITY_NAME, requested = ids.len(), deleted = cells.len(), "batch delete");
        cells.len()
    }

    /// Install the entity's seed data if the collection has never been
    /// seeded and is empty. Returns the number of records inserted.
    ///
    /// Safe to call from every request; after the first call it only takes
    /// a read lock.
    pub fn ensure_seed(&self) -> usize {
        if self.index.read().seeded {
            return 0;
        }

        let mut index = self.index.write();
        if index.seeded {
            return 0;
        }
        index.seeded = true;
        if !index.slots.is_empty() {
            return 0;
        }

        let mut count = 0;
        for record in E::seed_data() {
            if index.slots.contains_key(record.id()) {
                warn!(collection = E::INDEX_NAME, id = %record.id(), "duplicate seed record skipped");
                continue;
            }
            index.insert(record);
            count += 1;
        }
        info!(collection = E::INDEX_NAME, count, "seeded collection");
        count
    }

    /// Replace the whole collection, e.g. from a snapshot on disk.
    ///
    /// Marks the collection as seeded so fixtures are not mixed into
    /// restored data.
    pub fn restore(&self, records: Vec<E>) -> usize {
        let mut index = self.index.write();
        let stale: Vec<String> = index.slots.keys().cloned().collect();
        for id in stale {
            if let Some(cell) = index.remove(&id) {
                *cell.lock() = None;
            }
        }

        let mut count = 0;
        for record in records {
            if index.slots.contains_key(record.id()) {
                warn!(collection = E::INDEX_NAME, id = %record.id(), "duplicate record in snapshot skipped");
                continue;
            }
            index.insert(record);
            count += 1;
        }
        index.seeded = true;
        count
    }
}
