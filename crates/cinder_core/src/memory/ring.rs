//! # Ring Pool
//!
//! Fixed-capacity pool whose allocation never fails.
//!
//! Active entries sit on a circular doubly-linked ring anchored by a
//! sentinel node, newest right after the sentinel and oldest right before
//! it. Free entries sit on a singly-linked list. When the free list is
//! empty, allocation evicts from the oldest end every entry whose key
//! equals the oldest entry's key, then takes one of the freed slots.

use super::pool::SlotHandle;
use super::NIL;

#[derive(Clone, Copy)]
struct Links {
    prev: u32,
    next: u32,
    generation: u32,
    active: bool,
}

/// Result of [`RingPool::allocate_evicting`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingAllocation {
    /// Handle to the freshly allocated entry.
    pub handle: SlotHandle,
    /// Number of entries evicted to make room.
    pub evicted: usize,
}

/// A fixed-capacity pool with O(1) free and batch eviction on exhaustion.
///
/// # Example
///
/// ```rust
/// use cinder_core::RingPool;
///
/// let mut ring: RingPool<u32> = RingPool::new(2);
/// for stamp in [10, 10, 20] {
///     let alloc = ring.allocate_evicting(|v| *v);
///     *ring.get_mut(alloc.handle).unwrap() = stamp;
/// }
/// // Both entries stamped 10 went out together.
/// assert_eq!(ring.active_count(), 1);
/// ```
pub struct RingPool<T> {
    values: Box<[T]>,
    /// One entry per slot plus the sentinel at index `capacity`.
    links: Box<[Links]>,
    free_head: u32,
    active_count: usize,
}

impl<T: Default> RingPool<T> {
    /// Creates a new ring with every slot free.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or does not fit in a `u32` index.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(capacity < NIL as usize, "Capacity exceeds slot index range");

        let values: Vec<T> = (0..capacity).map(|_| T::default()).collect();
        let links = vec![
            Links {
                prev: NIL,
                next: NIL,
                generation: 0,
                active: false,
            };
            capacity + 1
        ];

        let mut ring = Self {
            values: values.into_boxed_slice(),
            links: links.into_boxed_slice(),
            free_head: NIL,
            active_count: 0,
        };
        ring.relink_all_free();
        ring
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn sentinel(&self) -> u32 {
        self.values.len() as u32
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Returns the number of active entries.
    #[inline]
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active_count
    }

    /// Returns the number of free entries.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.capacity() - self.active_count
    }

    /// Allocates an entry, evicting the oldest batch first if the ring is full.
    ///
    /// `key` reads the batch key (a creation timestamp, typically) of an
    /// entry. Eviction reads the key of the oldest entry, then frees entries
    /// from the oldest end for as long as their key equals it. The new entry
    /// is reset to `T::default()` and linked as the newest.
    pub fn allocate_evicting<K: PartialEq>(&mut self, key: impl Fn(&T) -> K) -> RingAllocation {
        let mut evicted = 0;

        if self.free_head == NIL {
            let sentinel = self.sentinel();
            let oldest = self.links[sentinel as usize].prev;
            let batch = key(&self.values[oldest as usize]);

            loop {
                let tail = self.links[sentinel as usize].prev;
                if tail == sentinel || key(&self.values[tail as usize]) != batch {
                    break;
                }
                self.unlink_and_free(tail);
                evicted += 1;
            }
        }

        let index = self.free_head;
        self.free_head = self.links[index as usize].next;
        self.values[index as usize] = T::default();

        let sentinel = self.sentinel();
        let first = self.links[sentinel as usize].next;
        {
            let link = &mut self.links[index as usize];
            link.active = true;
            link.prev = sentinel;
            link.next = first;
        }
        self.links[first as usize].prev = index;
        self.links[sentinel as usize].next = index;
        self.active_count += 1;

        RingAllocation {
            handle: SlotHandle::new(index, self.links[index as usize].generation),
            evicted,
        }
    }

    /// Unlinks an active entry in O(1) and returns it to the free list.
    ///
    /// Returns `false`, changing nothing, if `handle` does not refer to an
    /// active entry. Callers decide how fatal that is.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn free(&mut self, handle: SlotHandle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        self.unlink_and_free(handle.index() as u32);
        true
    }

    /// True when `handle` refers to the current occupant of an active entry.
    #[inline]
    #[must_use]
    pub fn is_live(&self, handle: SlotHandle) -> bool {
        handle.index() < self.capacity()
            && self.links[handle.index()].active
            && self.links[handle.index()].generation == handle.generation()
    }

    /// Gets a reference to an active entry.
    #[must_use]
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        self.is_live(handle).then(|| &self.values[handle.index()])
    }

    /// Gets a mutable reference to an active entry.
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        if self.is_live(handle) {
            Some(&mut self.values[handle.index()])
        } else {
            None
        }
    }

    /// Handle to the oldest active entry.
    #[must_use]
    pub fn oldest(&self) -> Option<SlotHandle> {
        let tail = self.links[self.sentinel() as usize].prev;
        (tail != self.sentinel())
            .then(|| SlotHandle::new(tail, self.links[tail as usize].generation))
    }

    /// Iterates over active entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &T)> + '_ {
        let sentinel = self.sentinel();
        let mut cursor = self.links[sentinel as usize].next;
        std::iter::from_fn(move || {
            if cursor == sentinel {
                return None;
            }
            let link = self.links[cursor as usize];
            let item = (
                SlotHandle::new(cursor, link.generation),
                &self.values[cursor as usize],
            );
            cursor = link.next;
            Some(item)
        })
    }

    /// Visits every active entry, newest first, freeing those for which
    /// `keep` returns `false`. Returns the number freed.
    pub fn retain(&mut self, mut keep: impl FnMut(SlotHandle, &mut T) -> bool) -> usize {
        let sentinel = self.sentinel();
        let mut freed = 0;
        let mut cursor = self.links[sentinel as usize].next;

        while cursor != sentinel {
            let link = self.links[cursor as usize];
            let handle = SlotHandle::new(cursor, link.generation);
            if !keep(handle, &mut self.values[cursor as usize]) {
                self.unlink_and_free(cursor);
                freed += 1;
            }
            cursor = link.next;
        }

        freed
    }

    /// Frees every entry. Outstanding handles are invalidated.
    pub fn reset(&mut self) {
        for (value, link) in self.values.iter_mut().zip(self.links.iter_mut()) {
            if link.active {
                link.generation = link.generation.wrapping_add(1);
            }
            *value = T::default();
        }
        self.relink_all_free();
    }

    /// Walks the ring both ways and the free list, checking that every
    /// entry is on exactly one of them and the back links agree.
    #[must_use]
    pub fn check_integrity(&self) -> bool {
        let capacity = self.capacity();
        let sentinel = self.sentinel();
        let mut seen = vec![false; capacity];

        let mut active = 0;
        let mut prev = sentinel;
        let mut cursor = self.links[sentinel as usize].next;
        while cursor != sentinel {
            let i = cursor as usize;
            if i >= capacity || seen[i] || !self.links[i].active || self.links[i].prev != prev {
                return false;
            }
            seen[i] = true;
            active += 1;
            prev = cursor;
            cursor = self.links[i].next;
        }
        if self.links[sentinel as usize].prev != prev {
            return false;
        }

        let mut free = 0;
        cursor = self.free_head;
        while cursor != NIL {
            let i = cursor as usize;
            if i >= capacity || seen[i] || self.links[i].active {
                return false;
            }
            seen[i] = true;
            free += 1;
            cursor = self.links[i].next;
        }

        active == self.active_count && active + free == capacity
    }

    fn unlink_and_free(&mut self, index: u32) {
        let Links { prev, next, .. } = self.links[index as usize];
        self.links[prev as usize].next = next;
        self.links[next as usize].prev = prev;

        self.values[index as usize] = T::default();
        let free_head = self.free_head;
        let link = &mut self.links[index as usize];
        link.active = false;
        link.generation = link.generation.wrapping_add(1);
        link.prev = NIL;
        link.next = free_head;
        self.free_head = index;
        self.active_count -= 1;
    }

    #[allow(clippy::cast_possible_truncation)]
    fn relink_all_free(&mut self) {
        let capacity = self.capacity();
        let sentinel = self.sentinel();
        for (i, link) in self.links.iter_mut().take(capacity).enumerate() {
            link.active = false;
            link.prev = NIL;
            link.next = if i + 1 < capacity { (i + 1) as u32 } else { NIL };
        }
        let head = &mut self.links[sentinel as usize];
        head.prev = sentinel;
        head.next = sentinel;
        self.free_head = 0;
        self.active_count = 0;
    }
}
