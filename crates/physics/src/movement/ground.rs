//! Per-frame ground information cache.
//!
//! Gameplay code (animation, abilities, UI) asks "how far is the ground?"
//! many times per frame. The answer is computed at most once per simulation
//! frame and reused until the frame counter moves on.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::{GroundSampler, GroundTrace};

use super::state::MovementMode;

/// Ground information for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundInfo {
    /// Floor contact (walking) or downward trace result (otherwise).
    pub hit: GroundTrace,

    /// Distance from the bottom of the capsule to the ground.
    pub ground_distance: f32,

    /// Frame this entry was computed in. `None` until the first query.
    pub last_update_frame: Option<u64>,
}

impl GroundInfo {
    /// Check whether this entry was computed in `frame`.
    #[inline]
    pub fn is_current(&self, frame: u64) -> bool {
        self.last_update_frame == Some(frame)
    }
}

/// Actor-local cache of [`GroundInfo`], keyed by the host's frame counter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundInfoCache {
    info: GroundInfo,
}

impl GroundInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last computed entry, whether or not it is current.
    pub fn cached(&self) -> &GroundInfo {
        &self.info
    }

    /// Force the next [`get`](Self::get) to recompute.
    pub fn invalidate(&mut self) {
        self.info.last_update_frame = None;
    }

    /// Return ground info for `current_frame`, recomputing on a frame change.
    ///
    /// While walking the tracked floor contact is reused and no query is
    /// issued. Otherwise a single downward trace is made; nav-walking forces
    /// the distance to zero.
    ///
    /// # Arguments
    ///
    /// * `current_frame` - Monotonic frame counter owned by the simulation loop
    /// * `mode` - Current movement mode
    /// * `position` - Capsule centre
    /// * `capsule_half_height` - Half-height of the current capsule
    /// * `current_floor` - Floor contact tracked while walking
    /// * `trace_distance` - How far below the capsule to look
    /// * `sampler` - Ground trace provider
    #[allow(clippy::too_many_arguments)]
    pub fn get<S: GroundSampler>(
        &mut self,
        current_frame: u64,
        mode: MovementMode,
        position: Vec3,
        capsule_half_height: f32,
        current_floor: GroundTrace,
        trace_distance: f32,
        sampler: &S,
    ) -> &GroundInfo {
        if self.info.is_current(current_frame) {
            return &self.info;
        }

        if mode == MovementMode::Walking {
            self.info.hit = current_floor;
            self.info.ground_distance = 0.0;
        } else {
            let trace = sampler.trace(position, trace_distance, capsule_half_height);

            self.info.hit = trace;
            self.info.ground_distance = trace_distance;

            if mode == MovementMode::NavWalking {
                self.info.ground_distance = 0.0;
            } else if trace.hit {
                self.info.ground_distance = (trace.distance - capsule_half_height).max(0.0);
            }

            log::debug!(
                "ground info refreshed: frame={} mode={:?} hit={} distance={}",
                current_frame,
                mode,
                trace.hit,
                self.info.ground_distance
            );
        }

        self.info.last_update_frame = Some(current_frame);
        &self.info
    }
}
