//! Recency List Module
//!
//! Doubly-linked recency list stored in an arena of entry slots.

use crate::cache::entry::{CacheEntry, EntryId};

// == Recency List ==
/// Owns every cache entry and orders them by access time.
///
/// Entries live in a `Vec` of slots and link to each other by `EntryId`:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Freed slots are recycled through a free list, so handles stay stable for
/// as long as their entry is alive.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Option<CacheEntry<K, V>>>,
    free: Vec<usize>,
    head: Option<EntryId>,
    tail: Option<EntryId>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Accessors ==
    pub fn get(&self, id: EntryId) -> Option<&CacheEntry<K, V>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut CacheEntry<K, V>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn head(&self) -> Option<EntryId> {
        self.head
    }

    pub fn tail(&self) -> Option<EntryId> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Push Front ==
    /// Links a new entry in as the most recently used one.
    pub fn push_front(&mut self, mut entry: CacheEntry<K, V>) -> EntryId {
        entry.prev = None;
        entry.next = self.head;

        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                EntryId(slot)
            }
            None => {
                self.slots.push(Some(entry));
                EntryId(self.slots.len() - 1)
            }
        };

        match self.head {
            Some(old_head) => self.set_prev(old_head, Some(id)),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;

        id
    }

    // == Touch ==
    /// Marks an entry as most recently used (moves it to the head).
    ///
    /// No-op if the entry is already the head or the handle is stale.
    pub fn touch(&mut self, id: EntryId) {
        if self.head == Some(id) || self.get(id).is_none() {
            return;
        }

        self.unlink(id);

        let old_head = self.head;
        if let Some(entry) = self.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(head) => self.set_prev(head, Some(id)),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    // == Remove ==
    /// Unlinks an entry and releases its slot.
    pub fn remove(&mut self, id: EntryId) -> Option<CacheEntry<K, V>> {
        self.get(id)?;
        self.unlink(id);

        let mut entry = self.slots[id.0].take()?;
        entry.prev = None;
        entry.next = None;
        self.free.push(id.0);
        self.len -= 1;

        Some(entry)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn evict_oldest(&mut self) -> Option<CacheEntry<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Peek ==
    /// Returns the least recently used entry without removing it.
    pub fn peek_oldest(&self) -> Option<&CacheEntry<K, V>> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the most recently used entry.
    pub fn peek_newest(&self) -> Option<&CacheEntry<K, V>> {
        self.head.and_then(|id| self.get(id))
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Walks the list from head (most recent) to tail (least recent).
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Detaches an entry from its neighbours, fixing `head`/`tail` when it
    /// sits at a boundary. The entry's own links are left stale.
    fn unlink(&mut self, id: EntryId) {
        let (prev, next) = match self.get(id) {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };

        match prev {
            Some(prev_id) => self.set_next(prev_id, next),
            None => self.head = next,
        }

        match next {
            Some(next_id) => self.set_prev(next_id, prev),
            None => self.tail = prev,
        }
    }

    fn set_prev(&mut self, id: EntryId, prev: Option<EntryId>) {
        if let Some(entry) = self.get_mut(id) {
            entry.prev = prev;
        }
    }

    fn set_next(&mut self, id: EntryId, next: Option<EntryId>) {
        if let Some(entry) = self.get_mut(id) {
            entry.next = next;
        }
    }
}

// == Iterator ==
/// Head-to-tail iterator yielding each entry with its handle.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<EntryId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (EntryId, &'a CacheEntry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let entry = self.list.get(id)?;
        self.cursor = entry.next;
        Some((id, entry))
    }
}
