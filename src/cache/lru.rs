//! LRU Recency Module
//!
//! Implements the recency order used for least-recently-used eviction.
//!
//! Keys live in an arena of slots linked into a doubly-linked list by index:
//! - Front (head) = Most recently used
//! - Back (tail) = Least recently used
//!
//! Freed slots are chained into a free list and reused, so touching,
//! unlinking and evicting are all O(1).

/// Null link marker.
const NIL: usize = usize::MAX;

// == Recency Handle ==
/// Opaque reference to a key's position in a [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyHandle(usize);

#[derive(Debug)]
struct Slot {
    /// Tracked key, None while the slot sits on the free list
    key: Option<String>,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Tracks access order for LRU eviction strategy.
#[derive(Debug)]
pub struct RecencyList {
    slots: Vec<Slot>,
    head: usize,
    tail: usize,
    /// First reusable slot, linked through `next`
    free: usize,
    len: usize,
}

impl Default for RecencyList {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty recency list with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    // == Push Front ==
    /// Tracks a new key as the most recently used one.
    pub fn push_front(&mut self, key: String) -> RecencyHandle {
        let idx = self.alloc(key);
        self.link_front(idx);
        self.len += 1;
        RecencyHandle(idx)
    }

    // == Touch ==
    /// Marks a tracked key as most recently used (moves to front).
    pub fn move_to_front(&mut self, handle: RecencyHandle) {
        let idx = handle.0;
        if !self.is_live(idx) || self.head == idx {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Stops tracking the key behind `handle`, returning it.
    ///
    /// Returns None if the handle does not point at a tracked key.
    pub fn remove(&mut self, handle: RecencyHandle) -> Option<String> {
        let idx = handle.0;
        if !self.is_live(idx) {
            return None;
        }
        self.unlink(idx);
        self.release(idx)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<String> {
        if self.tail == NIL {
            return None;
        }
        let idx = self.tail;
        self.unlink(idx);
        self.release(idx)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_back(&self) -> Option<&str> {
        self.key_at(self.tail)
    }

    /// Returns the most recently used key.
    pub fn peek_front(&self) -> Option<&str> {
        self.key_at(self.head)
    }

    /// Returns the key tracked behind `handle`.
    pub fn peek_at(&self, handle: RecencyHandle) -> Option<&str> {
        self.key_at(handle.0)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Iterates over tracked keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.len,
        }
    }

    // == Internal Linking ==
    fn is_live(&self, idx: usize) -> bool {
        self.slots.get(idx).is_some_and(|slot| slot.key.is_some())
    }

    fn key_at(&self, idx: usize) -> Option<&str> {
        self.slots.get(idx).and_then(|slot| slot.key.as_deref())
    }

    fn alloc(&mut self, key: String) -> usize {
        if self.free != NIL {
            let idx = self.free;
            let slot = &mut self.slots[idx];
            self.free = slot.next;
            slot.key = Some(key);
            slot.prev = NIL;
            slot.next = NIL;
            idx
        } else {
            self.slots.push(Slot {
                key: Some(key),
                prev: NIL,
                next: NIL,
            });
            self.slots.len() - 1
        }
    }

    fn release(&mut self, idx: usize) -> Option<String> {
        let slot = &mut self.slots[idx];
        let key = slot.key.take();
        slot.prev = NIL;
        slot.next = self.free;
        self.free = idx;
        self.len -= 1;
        key
    }

    fn link_front(&mut self, idx: usize) {
        self.slots[idx].prev = NIL;
        self.slots[idx].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;

        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.slots[idx].prev = NIL;
        self.slots[idx].next = NIL;
    }
}

// == Iterator ==
/// Iterator over tracked keys, most recently used first.
#[derive(Debug)]
pub struct Iter<'a> {
    list: &'a RecencyList,
    current: usize,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.current == NIL {
            return None;
        }
        let slot = &self.list.slots[self.current];
        self.current = slot.next;
        self.remaining -= 1;
        slot.key.as_deref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
