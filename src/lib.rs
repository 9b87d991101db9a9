//! 2D rigid-body collision engine for rotated square bodies.
//!
//! The engine detects corner contacts between oriented squares, bisects
//! back to the time of first contact within a tick, and resolves the
//! coupled linear/angular impulse with restitution. A per-pair cooldown
//! keeps a body resting against another (or against a boundary wall) from
//! receiving a fresh impulse every frame while still overlapping.
//!
//! The host owns the loop: it calls [`Simulation::tick`] with elapsed time
//! and draws the returned body states (and optional contact point) however
//! it likes. This crate never renders anything.

pub mod api;
pub mod core;

// Re-export key types at crate root for convenience
pub use crate::api::sim::{ContactTiming, SimConfig, Simulation, TickOutput};
pub use crate::api::types::{BodyId, BodyState};
pub use crate::core::body::{Body, BodyError, Boundary, STATIC_MASS};
pub use crate::core::collision::{
    contact_normal, detect, nearest_edge, overlapping, Contact, Edge, Resolution,
};
pub use crate::core::debounce::DebounceTimer;
pub use crate::core::math::{cross, cross_scalar, positive_mod, rotate_about};
pub use crate::core::toi::{time_of_impact, DEFAULT_ITERATIONS};
