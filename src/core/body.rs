use glam::Vec2;
use thiserror::Error;

use crate::core::math::rotate_about;

/// Mass used for immovable boundary bodies. Large enough that an impulse
/// leaves a wall's velocity below `f32` resolution at scene scale, finite so
/// `1 / mass` stays well-formed and the impulse formula needs no branching.
pub const STATIC_MASS: f32 = 1.0e12;

/// Invalid body construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BodyError {
    #[error("body size must be positive and finite, got {0}")]
    InvalidSize(f32),
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f32),
}

/// One of the four static boundary walls, in the fixed evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Left,
    Right,
    Top,
    Bottom,
}

impl Boundary {
    /// All boundaries in evaluation order. The step driver iterates this
    /// order every tick; changing it changes which wall "wins" when a body
    /// hits a corner of the world, so it is part of the reproducibility
    /// contract.
    pub const ALL: [Boundary; 4] = [
        Boundary::Left,
        Boundary::Right,
        Boundary::Top,
        Boundary::Bottom,
    ];

    /// Stable index for fixed-size per-boundary tables.
    pub fn index(self) -> usize {
        match self {
            Boundary::Left => 0,
            Boundary::Right => 1,
            Boundary::Top => 2,
            Boundary::Bottom => 3,
        }
    }
}

/// A rigid square body: center, side length, rotation and the velocities
/// the impulse solver acts on.
///
/// `rotation` is in degrees and unbounded: it accumulates over the body's
/// lifetime and is only ever pushed through periodic trig, never normalized.
/// Angular velocity is degrees per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub center: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub mass: f32,
}

impl Body {
    /// Create a body at rest. Rejects non-positive or non-finite size/mass
    /// here so the physics math downstream never sees NaN or Infinity.
    pub fn new(center: Vec2, size: f32, mass: f32) -> Result<Self, BodyError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(BodyError::InvalidSize(size));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(BodyError::InvalidMass(mass));
        }
        Ok(Self {
            center,
            size,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass,
        })
    }

    /// Construct the static wall just outside one edge of the world
    /// rectangle `[0, world.x] × [0, world.y]` (y-down coordinates). The
    /// wall is oversized so that its inner edge covers the full boundary
    /// and corner contacts anywhere along it resolve against that edge.
    pub fn wall(boundary: Boundary, world: Vec2) -> Self {
        let size = 2.0 * world.x.max(world.y);
        let half = size / 2.0;
        let center = match boundary {
            Boundary::Left => Vec2::new(-half, world.y / 2.0),
            Boundary::Right => Vec2::new(world.x + half, world.y / 2.0),
            Boundary::Top => Vec2::new(world.x / 2.0, -half),
            Boundary::Bottom => Vec2::new(world.x / 2.0, world.y + half),
        };
        Self {
            center,
            size,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass: STATIC_MASS,
        }
    }

    // -- Builder pattern --

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, degrees_per_sec: f32) -> Self {
        self.angular_velocity = degrees_per_sec;
        self
    }

    // -- Geometry --

    /// The four world-space corners, in fixed order: top-left, bottom-left,
    /// top-right, bottom-right (before rotation), each rotated by
    /// `rotation` about the center. Consumers may rely on getting all four
    /// but not on which index is which.
    pub fn corners(&self) -> [Vec2; 4] {
        let h = self.size / 2.0;
        let c = self.center;
        [
            Vec2::new(c.x - h, c.y - h),
            Vec2::new(c.x - h, c.y + h),
            Vec2::new(c.x + h, c.y - h),
            Vec2::new(c.x + h, c.y + h),
        ]
        .map(|p| rotate_about(p, self.rotation, c))
    }

    /// Whether `point` lies inside this body, bounds inclusive.
    ///
    /// Inclusive on all four edges: a point exactly on the boundary counts
    /// as contact, which matters at low relative speeds where the first
    /// overlap can land exactly on an edge.
    pub fn contains(&self, point: Vec2) -> bool {
        let local = rotate_about(point, -self.rotation, self.center);
        let h = self.size / 2.0;
        local.x >= self.center.x - h
            && local.x <= self.center.x + h
            && local.y >= self.center.y - h
            && local.y <= self.center.y + h
    }

    /// Advance position and rotation by `dt` seconds, explicit Euler.
    /// Contacts are found and resolved the same frame, so integration
    /// accuracy beyond first order buys nothing here.
    pub fn integrate(&mut self, dt: f32) {
        self.center += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;
    }

    /// Moment of inertia of a flat square plate about its center,
    /// perpendicular axis: `m * s² / 6`. Always derived from the current
    /// mass and size, never stored.
    pub fn moment_of_inertia(&self) -> f32 {
        self.mass * self.size * self.size / 6.0
    }

    /// Whether this body carries the immovable-wall mass convention.
    pub fn is_static(&self) -> bool {
        self.mass >= STATIC_MASS
    }
}
