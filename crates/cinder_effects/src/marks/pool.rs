//! Mark storage on top of the evicting ring pool.

use cinder_core::{RingAllocation, RingPool, SlotHandle};
use cinder_shared::constants::MAX_VERTS_ON_POLY;

use crate::interfaces::{PolyVert, ShaderHandle};

/// One stored mark fragment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarkPoly {
    /// Creation time in render-clock milliseconds.
    pub time: i32,
    /// Shader to draw with.
    pub shader: ShaderHandle,
    /// Base colour, each channel in `[0, 1]`.
    pub color: [f32; 4],
    /// Fade alpha at end of life (otherwise fade colour to black).
    pub alpha_fade: bool,
    /// Vertex storage; only the first `num_verts` are used.
    pub verts: [PolyVert; MAX_VERTS_ON_POLY],
    /// Number of vertices in use.
    pub num_verts: usize,
}

impl MarkPoly {
    /// The vertices in use.
    #[must_use]
    pub fn verts(&self) -> &[PolyVert] {
        &self.verts[..self.num_verts.min(MAX_VERTS_ON_POLY)]
    }

    /// Mutable view of the vertices in use.
    pub fn verts_mut(&mut self) -> &mut [PolyVert] {
        let n = self.num_verts.min(MAX_VERTS_ON_POLY);
        &mut self.verts[..n]
    }
}

/// Fixed pool of marks.
pub struct MarkPool {
    ring: RingPool<MarkPoly>,
}

impl MarkPool {
    /// Creates a pool with every slot free.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: RingPool::new(capacity),
        }
    }

    /// Allocates a cleared mark, evicting the oldest same-time batch when
    /// the pool is full. Never fails.
    pub fn allocate_mark(&mut self) -> RingAllocation {
        let alloc = self.ring.allocate_evicting(|mark| mark.time);
        if alloc.evicted > 0 {
            tracing::debug!("Mark pool full, evicted {} oldest marks", alloc.evicted);
        }
        alloc
    }

    /// Releases an active mark.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is not an active mark. That can only happen
    /// through a bookkeeping bug in the caller.
    pub fn free_mark(&mut self, handle: SlotHandle) {
        if !self.ring.free(handle) {
            tracing::error!("free_mark: mark {} is not active", handle.index());
            panic!("free_mark: mark {} is not active", handle.index());
        }
    }

    /// Gets an active mark.
    #[must_use]
    pub fn get(&self, handle: SlotHandle) -> Option<&MarkPoly> {
        self.ring.get(handle)
    }

    /// Gets an active mark mutably.
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut MarkPoly> {
        self.ring.get_mut(handle)
    }

    /// Iterates over active marks, newest first.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &MarkPoly)> + '_ {
        self.ring.iter()
    }

    /// Visits active marks newest first, releasing those for which `keep`
    /// returns `false`. Returns how many were released.
    pub fn retain(&mut self, keep: impl FnMut(SlotHandle, &mut MarkPoly) -> bool) -> usize {
        self.ring.retain(keep)
    }

    /// Number of active marks.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.ring.active_count()
    }

    /// Number of free slots.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.ring.free_count()
    }

    /// Total slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Releases every mark.
    pub fn reset(&mut self) {
        self.ring.reset();
    }

    /// Checks list membership and counts.
    #[must_use]
    pub fn check_integrity(&self) -> bool {
        self.ring.check_integrity()
    }
}
