use crate::core::body::Body;
use crate::core::collision::overlapping;

/// Default bisection depth. Eight halvings shrink the bracket to `dt / 256`,
/// well under a frame's worth of visible motion at this engine's scales.
pub const DEFAULT_ITERATIONS: u32 = 8;

/// Estimate the time within `[0, dt]` at which `a` and `b` first touch.
///
/// `a` and `b` are start-of-tick snapshots. The caller must have verified
/// the bracketing precondition: no overlap at `t = 0` and an overlap after
/// advancing both bodies by `dt`. Each bisection step advances value copies
/// of the snapshots to the interval midpoint and keeps the half that still
/// brackets first contact; the result is the midpoint of the final
/// interval, so it can sit up to `dt / 2^(iterations+1)` on either side of
/// the true contact time.
pub fn time_of_impact(a: &Body, b: &Body, dt: f32, iterations: u32) -> f32 {
    let mut left = 0.0_f32;
    let mut right = dt;
    for _ in 0..iterations {
        let mid = (left + right) / 2.0;
        if overlapping(&advanced(a, mid), &advanced(b, mid)) {
            right = mid;
        } else {
            left = mid;
        }
    }
    (left + right) / 2.0
}

fn advanced(body: &Body, dt: f32) -> Body {
    let mut copy = *body;
    copy.integrate(dt);
    copy
}
