//! Collision Query Capability
//!
//! The geometry interface the controller consumes. All queries are
//! synchronous point-in-time sweeps; a query that finds nothing returns
//! `None`, which every caller treats as a valid state (airborne, no step,
//! no ceiling) rather than an error.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Bitmask of collision layers a query is allowed to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// Matches nothing.
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask with a single layer bit set.
    pub const fn layer(index: u32) -> LayerMask {
        LayerMask(1 << index)
    }

    /// Whether this mask and `other` share any layer.
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

/// Result of a sweep or raycast that hit something.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// World-space position of the contact.
    pub point: Vec3,
    /// Surface normal at the contact (normalized, outward).
    pub normal: Vec3,
    /// Distance from the query origin to the contact.
    pub distance: f32,
    /// True for immovable geometry: static colliders and kinematic bodies.
    /// Dynamic bodies report false and are ignored by ceiling checks and,
    /// depending on configuration, camera occlusion.
    pub kinematic: bool,
}

/// Synchronous geometry queries against the surrounding world.
pub trait CollisionQuery {
    /// Cast a ray; returns the nearest contact within `max_distance`.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<Contact>;

    /// Sweep a sphere of `radius` along `direction`; returns the nearest
    /// contact of the sphere surface within `max_distance`.
    fn sphere_sweep(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<Contact>;
}
