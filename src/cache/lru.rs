//! LRU Recency List Module
//!
//! Arena-backed doubly linked list ordering entries by access recency.

use crate::cache::entry::{CacheEntry, Handle, HEAD, TAIL};

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// Nodes live in a `Vec` arena and link to each other by handle:
/// - `HEAD` sentinel side = most recently used
/// - `TAIL` sentinel side = least recently used
///
/// The sentinels close the ring (`HEAD.prev == TAIL`, `TAIL.next == HEAD`), so
/// linking and unlinking never special-case an empty or single-entry list.
#[derive(Debug)]
pub struct RecencyList {
    /// Node storage; slots `HEAD` and `TAIL` are the sentinels
    nodes: Vec<CacheEntry>,
    /// Released slots available for reuse
    free: Vec<Handle>,
    /// Number of linked data entries
    len: usize,
}

impl Default for RecencyList {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty list holding only the two sentinels.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with arena room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(CacheEntry::sentinel());
        nodes.push(CacheEntry::sentinel());
        let mut list = Self {
            nodes,
            free: Vec::new(),
            len: 0,
        };
        list.reset_sentinels();
        list
    }

    // == Push Front ==
    /// Stores a new entry at the most recently used position.
    pub fn push_front(&mut self, key: i64, value: i64) -> Handle {
        let entry = CacheEntry::new(key, value);
        let handle = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = entry;
                slot
            }
            None => {
                self.nodes.push(entry);
                self.nodes.len() - 1
            }
        };
        self.link_front(handle);
        self.len += 1;
        handle
    }

    // == Move To Front ==
    /// Marks an entry as most recently used.
    pub fn move_to_front(&mut self, handle: Handle) {
        debug_assert!(Self::is_data(handle));
        if self.nodes[HEAD].next == handle {
            return;
        }
        self.unlink(handle);
        self.link_front(handle);
    }

    // == Remove ==
    /// Unlinks an entry and releases its slot, returning the entry.
    pub fn remove(&mut self, handle: Handle) -> CacheEntry {
        debug_assert!(Self::is_data(handle));
        self.unlink(handle);
        self.free.push(handle);
        self.len -= 1;
        self.nodes[handle].clone()
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<CacheEntry> {
        let oldest = self.nodes[TAIL].prev;
        if oldest == HEAD {
            return None;
        }
        Some(self.remove(oldest))
    }

    // == Peek Back ==
    /// Returns the least recently used entry without removing it.
    #[allow(dead_code)]
    pub fn back(&self) -> Option<&CacheEntry> {
        let oldest = self.nodes[TAIL].prev;
        (oldest != HEAD).then(|| &self.nodes[oldest])
    }

    // == Access ==
    pub fn get(&self, handle: Handle) -> &CacheEntry {
        &self.nodes[handle]
    }

    pub fn get_mut(&mut self, handle: Handle) -> &mut CacheEntry {
        &mut self.nodes[handle]
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every entry and returns to the sentinel-only state.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.free.clear();
        self.len = 0;
        self.reset_sentinels();
    }

    // == Iterate ==
    /// Walks entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].next,
            remaining: self.len,
        }
    }

    fn is_data(handle: Handle) -> bool {
        handle != HEAD && handle != TAIL
    }

    fn reset_sentinels(&mut self) {
        self.nodes[HEAD].prev = TAIL;
        self.nodes[HEAD].next = TAIL;
        self.nodes[TAIL].prev = HEAD;
        self.nodes[TAIL].next = HEAD;
    }

    fn link_front(&mut self, handle: Handle) {
        let first = self.nodes[HEAD].next;
        self.nodes[handle].prev = HEAD;
        self.nodes[handle].next = first;
        self.nodes[first].prev = handle;
        self.nodes[HEAD].next = handle;
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = (self.nodes[handle].prev, self.nodes[handle].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[handle].prev = HEAD;
        self.nodes[handle].next = TAIL;
    }
}

// == Iterator ==
/// Head-to-tail iterator over a [`RecencyList`].
pub struct Iter<'a> {
    list: &'a RecencyList,
    cursor: Handle,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CacheEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL {
            return None;
        }
        let entry = &self.list.nodes[self.cursor];
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
