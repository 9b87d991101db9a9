use glam::Vec2;

// ---------------------------------------------------------------------------
// 2D helpers the rest of the engine is built on. Angles are degrees
// throughout the crate; only this module touches radians.
// ---------------------------------------------------------------------------

/// Rotate `point` by `degrees` around `pivot`.
///
/// Periodic in the angle, so unbounded rotations (a body that has spun many
/// full turns) are safe to feed in directly.
pub fn rotate_about(point: Vec2, degrees: f32, pivot: Vec2) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = point - pivot;
    pivot + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// 2D cross product of two vectors (the scalar z-component of the 3D cross).
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Cross product of a scalar (z-axis pseudo-vector) and a vector:
/// rotates `v` by 90° counter-clockwise and scales by `s`.
pub fn cross_scalar(s: f32, v: Vec2) -> Vec2 {
    Vec2::new(-s * v.y, s * v.x)
}

/// Componentwise Euclidean modulo. The result is always in `[0, divisor)`
/// per axis, which makes it suitable for wrapping positions across a world
/// rectangle anchored at the origin.
pub fn positive_mod(v: Vec2, divisor: Vec2) -> Vec2 {
    Vec2::new(v.x.rem_euclid(divisor.x), v.y.rem_euclid(divisor.y))
}
