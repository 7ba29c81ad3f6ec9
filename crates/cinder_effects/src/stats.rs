//! Per-frame counters.

/// What one tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Particles still active after the pass.
    pub particles_active: usize,
    /// Particles returned to the pool this frame.
    pub particles_released: usize,
    /// Particles that submitted geometry.
    pub particles_rendered: usize,
    /// Particles skipped for distance, visibility link or missing shader.
    pub particles_culled: usize,
    /// Bounce responses.
    pub bounces: usize,
    /// Marks created by particles converting to decals.
    pub decals_spawned: usize,
    /// Spawn requests dropped because the particle pool was full.
    pub dropped_spawns: usize,
    /// Marks still active after the pass.
    pub marks_active: usize,
    /// Marks released for age.
    pub marks_expired: usize,
    /// Marks evicted to make room for new ones.
    pub marks_evicted: usize,
    /// Mark polygons submitted.
    pub mark_polys_submitted: usize,
}

impl FrameStats {
    /// Adds another frame's counters into this one (totals across frames).
    pub fn accumulate(&mut self, other: &Self) {
        self.particles_active = other.particles_active;
        self.marks_active = other.marks_active;
        self.particles_released += other.particles_released;
        self.particles_rendered += other.particles_rendered;
        self.particles_culled += other.particles_culled;
        self.bounces += other.bounces;
        self.decals_spawned += other.decals_spawned;
        self.dropped_spawns += other.dropped_spawns;
        self.marks_expired += other.marks_expired;
        self.marks_evicted += other.marks_evicted;
        self.mark_polys_submitted += other.mark_polys_submitted;
    }
}
