//! # Fixed Pool
//!
//! Fixed-capacity slot pool with intrusive free and active lists.
//!
//! Allocation pops the free list head and pushes the slot onto the active
//! list head. When the free list is empty, allocation fails: nothing is
//! evicted and the caller simply does not get a slot.

use super::NIL;

/// Handle to an occupied slot.
///
/// Carries the slot's generation at allocation time, so a handle kept past
/// its release no longer resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotHandle {
    index: u32,
    generation: u32,
}

impl SlotHandle {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the pool.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when this handle was issued.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

struct Slot<T> {
    value: T,
    next: u32,
    generation: u32,
    active: bool,
}

/// A fixed-capacity pool whose allocation can fail.
///
/// Slots live in one boxed array. Each slot is on exactly one of two
/// singly-linked lists threaded through the array by index: the free list or
/// the active list. Newly allocated slots go to the head of the active list,
/// so iteration visits the newest objects first.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Confine it to the thread that ticks it.
///
/// # Example
///
/// ```rust
/// use cinder_core::FixedPool;
///
/// let mut pool: FixedPool<u32> = FixedPool::new(2);
/// let a = pool.allocate().unwrap();
/// *pool.get_mut(a).unwrap() = 7;
/// let _b = pool.allocate().unwrap();
/// assert!(pool.allocate().is_none());
///
/// pool.release(a);
/// assert_eq!(pool.free_count(), 1);
/// ```
pub struct FixedPool<T> {
    slots: Box<[Slot<T>]>,
    free_head: u32,
    active_head: u32,
    active_count: usize,
}

impl<T: Default> FixedPool<T> {
    /// Creates a new pool with every slot on the free list.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or does not fit in a `u32` index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(capacity < NIL as usize, "Capacity exceeds slot index range");

        let slots: Vec<Slot<T>> = (0..capacity)
            .map(|i| Slot {
                value: T::default(),
                next: if i + 1 < capacity { (i + 1) as u32 } else { NIL },
                generation: 0,
                active: false,
            })
            .collect();

        Self {
            slots: slots.into_boxed_slice(),
            free_head: 0,
            active_head: NIL,
            active_count: 0,
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of active slots.
    #[inline]
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active_count
    }

    /// Returns the number of free slots.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.capacity() - self.active_count
    }

    /// Takes a slot from the free list.
    ///
    /// The slot's value is reset to `T::default()` and the slot becomes the
    /// head of the active list. Returns `None` when the pool is exhausted.
    pub fn allocate(&mut self) -> Option<SlotHandle> {
        if self.free_head == NIL {
            return None;
        }

        let index = self.free_head;
        let active_head = self.active_head;
        let slot = &mut self.slots[index as usize];
        self.free_head = slot.next;

        slot.value = T::default();
        slot.active = true;
        slot.next = active_head;
        self.active_head = index;
        self.active_count += 1;

        Some(SlotHandle::new(index, slot.generation))
    }

    /// Returns a slot to the free list.
    ///
    /// Walks the active list to find the predecessor. Releasing a stale or
    /// already released handle is a caller bug: it asserts in debug builds
    /// and is ignored otherwise.
    pub fn release(&mut self, handle: SlotHandle) {
        if !self.is_live(handle) {
            debug_assert!(false, "release of stale pool handle {handle:?}");
            return;
        }

        let mut prev = NIL;
        let mut cursor = self.active_head;
        while cursor != NIL && cursor != handle.index {
            prev = cursor;
            cursor = self.slots[cursor as usize].next;
        }
        if cursor == NIL {
            debug_assert!(false, "active slot {} missing from active list", handle.index);
            return;
        }

        self.unlink_and_free(prev, cursor);
    }

    /// Visits every active slot, newest first, releasing those for which
    /// `keep` returns `false`. Returns the number released.
    ///
    /// Unlinking happens in O(1) since the walk tracks the predecessor.
    pub fn retain_active(&mut self, mut keep: impl FnMut(SlotHandle, &mut T) -> bool) -> usize {
        let mut released = 0;
        let mut prev = NIL;
        let mut cursor = self.active_head;

        while cursor != NIL {
            let slot = &mut self.slots[cursor as usize];
            let next = slot.next;
            let handle = SlotHandle::new(cursor, slot.generation);

            if keep(handle, &mut slot.value) {
                prev = cursor;
            } else {
                self.unlink_and_free(prev, cursor);
                released += 1;
            }
            cursor = next;
        }

        released
    }

    /// Visits every active slot mutably, newest first.
    pub fn for_each_active_mut(&mut self, mut f: impl FnMut(SlotHandle, &mut T)) {
        let mut cursor = self.active_head;
        while cursor != NIL {
            let slot = &mut self.slots[cursor as usize];
            f(SlotHandle::new(cursor, slot.generation), &mut slot.value);
            cursor = slot.next;
        }
    }

    /// Iterates over active slots, newest first.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &T)> + '_ {
        let mut cursor = self.active_head;
        std::iter::from_fn(move || {
            if cursor == NIL {
                return None;
            }
            let slot = &self.slots[cursor as usize];
            let item = (SlotHandle::new(cursor, slot.generation), &slot.value);
            cursor = slot.next;
            Some(item)
        })
    }

    /// Gets a reference to an active slot's value.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        if self.is_live(handle) {
            Some(&self.slots[handle.index()].value)
        } else {
            None
        }
    }

    /// Gets a mutable reference to an active slot's value.
    #[inline]
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        if self.is_live(handle) {
            Some(&mut self.slots[handle.index()].value)
        } else {
            None
        }
    }

    /// True when `handle` refers to the current occupant of an active slot.
    #[inline]
    #[must_use]
    pub fn is_live(&self, handle: SlotHandle) -> bool {
        self.slots
            .get(handle.index())
            .is_some_and(|slot| slot.active && slot.generation == handle.generation)
    }

    /// Returns every slot to the free list.
    ///
    /// Outstanding handles are invalidated. No memory is freed.
    #[allow(clippy::cast_possible_truncation)]
    pub fn reset(&mut self) {
        let capacity = self.slots.len();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.active {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.value = T::default();
            slot.active = false;
            slot.next = if i + 1 < capacity { (i + 1) as u32 } else { NIL };
        }
        self.free_head = 0;
        self.active_head = NIL;
        self.active_count = 0;
    }

    /// Walks both lists and checks that every slot is on exactly one of
    /// them, with the active flags and counts agreeing.
    #[must_use]
    pub fn check_integrity(&self) -> bool {
        let capacity = self.slots.len();
        let mut seen = vec![false; capacity];

        let mut walk = |head: u32, expect_active: bool| -> Option<usize> {
            let mut count = 0;
            let mut cursor = head;
            while cursor != NIL {
                let i = cursor as usize;
                if i >= capacity || seen[i] || self.slots[i].active != expect_active {
                    return None;
                }
                seen[i] = true;
                count += 1;
                cursor = self.slots[i].next;
            }
            Some(count)
        };

        let active = walk(self.active_head, true);
        let free = walk(self.free_head, false);
        match (active, free) {
            (Some(active), Some(free)) => {
                active == self.active_count && active + free == capacity
            }
            _ => false,
        }
    }

    fn unlink_and_free(&mut self, prev: u32, index: u32) {
        let next = self.slots[index as usize].next;
        if prev == NIL {
            self.active_head = next;
        } else {
            self.slots[prev as usize].next = next;
        }

        let free_head = self.free_head;
        let slot = &mut self.slots[index as usize];
        slot.value = T::default();
        slot.active = false;
        slot.generation = slot.generation.wrapping_add(1);
        slot.next = free_head;
        self.free_head = index;
        self.active_count -= 1;
    }
}
