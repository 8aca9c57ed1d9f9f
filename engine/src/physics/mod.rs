//! Physics Module
//!
//! The collision capability the controller consumes plus a reference
//! implementation.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout): distances in meters,
//! velocities in m/s, accelerations in m/s².
//!
//! # Submodules
//!
//! - [`query`] - [`CollisionQuery`] trait, [`Contact`] and [`LayerMask`]
//! - [`collision`] - slab-method ray/AABB math and [`AabbWorld`], a box-soup
//!   world used by tests and headless tools

pub mod collision;
pub mod query;

pub use collision::{AabbWorld, aabb_surface_normal, ray_aabb_intersect};
pub use query::{CollisionQuery, Contact, LayerMask};
