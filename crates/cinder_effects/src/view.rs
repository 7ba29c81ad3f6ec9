//! Per-frame camera bases.
//!
//! Particles are drawn against two bases: the camera's own right/up axes,
//! and a slowly rolling copy of them that smoke uses so stationary puffs
//! still appear to churn.

use cinder_shared::constants::ROLL_PER_MS;
use cinder_shared::math::{rolled_basis, Vec3};

use crate::interfaces::ViewState;

/// Accumulates the global smoke roll across frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct RollClock {
    roll: f32,
    last_time: Option<i32>,
}

impl RollClock {
    /// Restarts the clock at `now`.
    pub fn reset(&mut self, now: i32) {
        self.roll = 0.0;
        self.last_time = Some(now);
    }

    /// Advances to `now` and returns the accumulated roll in degrees.
    #[allow(clippy::cast_precision_loss)]
    pub fn advance(&mut self, now: i32) -> f32 {
        if let Some(last) = self.last_time {
            self.roll = (self.roll + (now - last) as f32 * ROLL_PER_MS) % 360.0;
        }
        self.last_time = Some(now);
        self.roll
    }
}

/// Everything the geometry builder needs to know about this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameView {
    /// Render clock in milliseconds.
    pub now: i32,
    /// Seconds since the previous frame.
    pub frame_seconds: f32,
    /// Eye position.
    pub origin: Vec3,
    /// Camera forward axis.
    pub forward: Vec3,
    /// Camera right axis.
    pub right: Vec3,
    /// Camera up axis.
    pub up: Vec3,
    /// Forward axis of the rolling basis.
    pub roll_forward: Vec3,
    /// Right axis of the rolling basis.
    pub roll_right: Vec3,
    /// Up axis of the rolling basis.
    pub roll_up: Vec3,
    /// Cull distance for smoke and weather.
    pub cull_radius: f32,
    /// Screen height for palette sprite scaling.
    pub vid_height: u32,
}

impl FrameView {
    /// Builds the frame bases from the camera and the global roll.
    #[must_use]
    pub fn new(
        view: &ViewState,
        now: i32,
        frame_seconds: f32,
        global_roll: f32,
        cull_radius: f32,
        vid_height: u32,
    ) -> Self {
        let [forward, right, up] = view.axis;
        let rolling = rolled_basis(forward, global_roll * 0.9);
        Self {
            now,
            frame_seconds,
            origin: view.origin,
            forward,
            right,
            up,
            roll_forward: rolling.forward,
            roll_right: rolling.right,
            roll_up: rolling.up,
            cull_radius,
            vid_height,
        }
    }

    /// True when `point` is farther than the cull radius from the eye.
    #[must_use]
    pub fn beyond_cull(&self, point: Vec3) -> bool {
        self.origin.distance_squared(point) > self.cull_radius * self.cull_radius
    }
}
