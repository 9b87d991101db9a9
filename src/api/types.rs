use glam::Vec2;

use crate::core::body::Boundary;

/// Identifies one of the six bodies a simulation owns: the two dynamic
/// squares by slot index, or one of the four static walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyId {
    Dynamic(usize),
    Wall(Boundary),
}

/// Snapshot of a dynamic body emitted to the host each tick, carrying
/// everything a renderer needs to draw it as a filled rotated rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub id: BodyId,
    pub center: Vec2,
    /// Side length of the square.
    pub size: f32,
    /// Rotation in degrees, unbounded.
    pub rotation: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
}
