use glam::Vec2;

use crate::api::types::BodyId;
use crate::core::body::Body;
use crate::core::math::{cross, cross_scalar, rotate_about};

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// A detected corner contact between two bodies. The intruder is the body
/// whose corner penetrated; the container is the body it penetrated into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// World position of the intruding corner.
    pub point: Vec2,
    pub intruder: BodyId,
    pub container: BodyId,
}

/// First corner of `a` (in fixed enumeration order) that lies inside `b`.
fn intruding_corner(a: &Body, b: &Body) -> Option<Vec2> {
    a.corners().into_iter().find(|&corner| b.contains(corner))
}

/// Whether any corner of either body lies inside the other.
///
/// Edge-edge overlap with no penetrating corner is not detected; for convex
/// rectangle pairs at the velocities and timestep sizes this engine targets
/// that case does not arise in practice.
pub fn overlapping(a: &Body, b: &Body) -> bool {
    intruding_corner(a, b).is_some() || intruding_corner(b, a).is_some()
}

/// Corner-in-box contact test. Tries `a`'s corners inside `b` first (then
/// `a` is the intruder), the symmetric case second. Returns the first
/// intruding corner found under the fixed corner order; simultaneous
/// multi-corner contacts are not disambiguated further.
pub fn detect(a_id: BodyId, a: &Body, b_id: BodyId, b: &Body) -> Option<Contact> {
    if let Some(point) = intruding_corner(a, b) {
        return Some(Contact {
            point,
            intruder: a_id,
            container: b_id,
        });
    }
    intruding_corner(b, a).map(|point| Contact {
        point,
        intruder: b_id,
        container: a_id,
    })
}

// ---------------------------------------------------------------------------
// Contact normal
// ---------------------------------------------------------------------------

/// One of the container's four edges, in the fixed tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Unit normal in the box's local frame, pointing from this edge toward
    /// the box interior (y-down coordinates: top is the low-y edge).
    pub fn inward_normal(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
        }
    }
}

/// The container edge nearest to `point`. Ties go to whichever edge comes
/// first in left, right, top, bottom order.
pub fn nearest_edge(container: &Body, point: Vec2) -> Edge {
    let local = rotate_about(point, -container.rotation, container.center);
    let h = container.size / 2.0;
    let c = container.center;
    let candidates = [
        (Edge::Left, (local.x - (c.x - h)).abs()),
        (Edge::Right, (local.x - (c.x + h)).abs()),
        (Edge::Top, (local.y - (c.y - h)).abs()),
        (Edge::Bottom, (local.y - (c.y + h)).abs()),
    ];
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// World-frame unit normal on the container's side at `point`: the inward
/// normal of the nearest edge, rotated back by the container's rotation.
pub fn contact_normal(container: &Body, point: Vec2) -> Vec2 {
    rotate_about(
        nearest_edge(container, point).inward_normal(),
        container.rotation,
        Vec2::ZERO,
    )
}

// ---------------------------------------------------------------------------
// Impulse resolution
// ---------------------------------------------------------------------------

/// The solved impulse for a contact: the scalar impulse magnitude, the
/// world normal it acts along, and the velocities both bodies would have
/// after applying it.
///
/// Solving is separated from committing so a caller can inspect the
/// impulse and the would-be velocities before mutating any body. Use
/// [`Resolution::apply_both`] for a dynamic-dynamic pair, or
/// [`Resolution::apply_intruder`] alone when the container is a wall and
/// mutating it would be meaningless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Unit normal on the intruder's side (negation of the container's
    /// own contact normal).
    pub normal: Vec2,
    /// Scalar impulse magnitude `j`.
    pub impulse: f32,
    pub intruder_velocity: Vec2,
    pub intruder_angular_velocity: f32,
    pub container_velocity: Vec2,
    pub container_angular_velocity: f32,
}

impl Resolution {
    /// Solve the coupled linear/angular impulse for `contact`, with
    /// restitution `e` in `[0, 1]` (0 = fully inelastic, 1 = fully
    /// elastic).
    ///
    /// The relative velocity is not checked for separation; an
    /// already-separating contact goes through the same formula. Two
    /// static bodies produce a large but finite denominator and a
    /// negligible velocity change, which needs no special guard.
    pub fn solve(contact: &Contact, intruder: &Body, container: &Body, restitution: f32) -> Self {
        let normal = -contact_normal(container, contact.point);
        let r_a = contact.point - intruder.center;
        let r_b = contact.point - container.center;
        let inertia_a = intruder.moment_of_inertia();
        let inertia_b = container.moment_of_inertia();

        let relative = intruder.velocity - container.velocity;
        let angular_term = (cross_scalar(cross(r_a, normal) / inertia_a, r_a)
            + cross_scalar(cross(r_b, normal) / inertia_b, r_b))
        .dot(normal);
        let denominator = 1.0 / intruder.mass + 1.0 / container.mass + angular_term;
        let impulse = -(1.0 + restitution) * relative.dot(normal) / denominator;

        Self {
            normal,
            impulse,
            intruder_velocity: intruder.velocity + normal * (impulse / intruder.mass),
            intruder_angular_velocity: intruder.angular_velocity
                + cross(r_a, normal * impulse) / inertia_a,
            container_velocity: container.velocity - normal * (impulse / container.mass),
            container_angular_velocity: container.angular_velocity
                - cross(r_b, normal * impulse) / inertia_b,
        }
    }

    /// Commit the solved velocities to both bodies.
    pub fn apply_both(&self, intruder: &mut Body, container: &mut Body) {
        self.apply_intruder(intruder);
        self.apply_container(container);
    }

    /// Commit only the intruder's side. Used when the container is a
    /// static wall.
    pub fn apply_intruder(&self, intruder: &mut Body) {
        intruder.velocity = self.intruder_velocity;
        intruder.angular_velocity = self.intruder_angular_velocity;
    }

    /// Commit only the container's side.
    pub fn apply_container(&self, container: &mut Body) {
        container.velocity = self.container_velocity;
        container.angular_velocity = self.container_angular_velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::Boundary;
    use approx::assert_relative_eq;
    use glam::Vec2;

    const A: BodyId = BodyId::Dynamic(0);
    const B: BodyId = BodyId::Dynamic(1);

    fn body(center: Vec2, size: f32, mass: f32) -> Body {
        Body::new(center, size, mass).unwrap()
    }

    /// A rotated 45° so its right corner points straight at B's left edge,
    /// centers on the same horizontal line. The contact point then lies on
    /// the line of centers, both lever-arm cross terms vanish, and the
    /// impulse reduces to the classic 1D two-body solution, which makes
    /// momentum/energy assertions exact.
    fn head_on_pair() -> (Body, Body, Contact) {
        let a = body(Vec2::ZERO, 10.0, 2.0)
            .with_rotation(45.0)
            .with_velocity(Vec2::new(10.0, 0.0));
        let b = body(Vec2::new(12.0, 0.0), 10.0, 1.0).with_velocity(Vec2::new(-5.0, 0.0));
        let contact = detect(A, &a, B, &b).expect("corner should penetrate");
        assert_eq!(contact.intruder, A);
        (a, b, contact)
    }

    #[test]
    fn detect_reports_first_intruding_corner() {
        let (_, _, contact) = head_on_pair();
        assert_relative_eq!(contact.point.x, 5.0 * (2.0f32).sqrt(), epsilon = 1e-4);
        assert_relative_eq!(contact.point.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn detect_is_none_when_separated() {
        let a = body(Vec2::ZERO, 10.0, 1.0);
        let b = body(Vec2::new(20.0, 0.0), 10.0, 1.0);
        assert_eq!(detect(A, &a, B, &b), None);
        assert!(!overlapping(&a, &b));
    }

    #[test]
    fn detect_finds_symmetric_case() {
        // Only B's corner is inside A, so B must come out as the intruder.
        let a = body(Vec2::ZERO, 20.0, 1.0);
        let b = body(Vec2::new(14.0, 0.0), 10.0, 1.0).with_rotation(45.0);
        let contact = detect(A, &a, B, &b).expect("B's left corner is inside A");
        assert_eq!(contact.intruder, B);
        assert_eq!(contact.container, A);
    }

    #[test]
    fn nearest_edge_picks_the_closest() {
        let container = body(Vec2::ZERO, 10.0, 1.0);
        assert_eq!(nearest_edge(&container, Vec2::new(-4.9, 0.0)), Edge::Left);
        assert_eq!(nearest_edge(&container, Vec2::new(4.9, 0.0)), Edge::Right);
        assert_eq!(nearest_edge(&container, Vec2::new(0.0, -4.9)), Edge::Top);
        assert_eq!(nearest_edge(&container, Vec2::new(0.0, 4.9)), Edge::Bottom);
    }

    #[test]
    fn nearest_edge_tie_goes_to_fixed_order() {
        // Dead center is equidistant from all four edges; Left is tested
        // first.
        let container = body(Vec2::ZERO, 10.0, 1.0);
        assert_eq!(nearest_edge(&container, Vec2::ZERO), Edge::Left);
    }

    #[test]
    fn contact_normal_rotates_with_container() {
        let container = body(Vec2::ZERO, 10.0, 1.0).with_rotation(90.0);
        // After a quarter turn the former left edge faces down (+y world is
        // where its inward normal now points after rotating +x by 90°).
        let point = rotate_about(Vec2::new(-4.9, 0.0), 90.0, Vec2::ZERO);
        let n = contact_normal(&container, point);
        assert_relative_eq!(n.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(n.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn elastic_head_on_conserves_momentum_and_energy() {
        let (a, b, contact) = head_on_pair();
        let resolution = Resolution::solve(&contact, &a, &b, 1.0);

        // 1D elastic with mA=2, vA=10, mB=1, vB=-5.
        assert_relative_eq!(resolution.intruder_velocity.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(resolution.container_velocity.x, 15.0, epsilon = 1e-3);

        let momentum_before = a.mass * a.velocity + b.mass * b.velocity;
        let momentum_after =
            a.mass * resolution.intruder_velocity + b.mass * resolution.container_velocity;
        assert_relative_eq!(momentum_before.x, momentum_after.x, epsilon = 1e-3);
        assert_relative_eq!(momentum_before.y, momentum_after.y, epsilon = 1e-3);

        let ke_before =
            0.5 * a.mass * a.velocity.length_squared() + 0.5 * b.mass * b.velocity.length_squared();
        let ke_after = 0.5 * a.mass * resolution.intruder_velocity.length_squared()
            + 0.5 * b.mass * resolution.container_velocity.length_squared()
            + 0.5 * a.moment_of_inertia() * resolution.intruder_angular_velocity.powi(2)
            + 0.5 * b.moment_of_inertia() * resolution.container_angular_velocity.powi(2);
        assert_relative_eq!(ke_before, ke_after, max_relative = 1e-3);
    }

    #[test]
    fn inelastic_head_on_zeroes_normal_relative_velocity() {
        let (a, b, contact) = head_on_pair();
        let resolution = Resolution::solve(&contact, &a, &b, 0.0);
        let relative_after = resolution.intruder_velocity - resolution.container_velocity;
        assert_relative_eq!(relative_after.dot(resolution.normal), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn solve_computes_without_mutating() {
        let (mut a, mut b, contact) = head_on_pair();
        let before = (a, b);
        let resolution = Resolution::solve(&contact, &a, &b, 1.0);
        assert_eq!((a, b), before);
        resolution.apply_both(&mut a, &mut b);
        assert_relative_eq!(a.velocity.x, resolution.intruder_velocity.x);
        assert_relative_eq!(b.velocity.x, resolution.container_velocity.x);
    }

    #[test]
    fn wall_resolution_leaves_the_wall_at_rest() {
        let world = Vec2::new(800.0, 600.0);
        let wall = Body::wall(Boundary::Left, world);
        let mut mover = body(Vec2::new(4.0, 300.0), 10.0, 1.0).with_velocity(Vec2::new(-50.0, 0.0));
        let contact = detect(A, &mover, BodyId::Wall(Boundary::Left), &wall)
            .expect("corner should be inside the wall");
        assert_eq!(contact.intruder, A);

        let resolution = Resolution::solve(&contact, &mover, &wall, 1.0);
        assert!(resolution.impulse > 0.0);
        resolution.apply_intruder(&mut mover);

        // A corner hit trades some linear motion for spin, so the body
        // slows along the normal and starts rotating.
        assert!(
            mover.velocity.x > -50.0,
            "normal velocity should be pushed outward: {:?}",
            mover.velocity
        );
        assert!(mover.angular_velocity != 0.0);
        assert_eq!(wall.velocity, Vec2::ZERO);
        assert_eq!(wall.angular_velocity, 0.0);
    }
}
