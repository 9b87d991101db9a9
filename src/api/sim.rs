use std::time::{Duration, Instant};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{BodyId, BodyState};
use crate::core::body::{Body, Boundary};
use crate::core::collision::{detect, overlapping, Contact, Resolution};
use crate::core::debounce::DebounceTimer;
use crate::core::math::positive_mod;
use crate::core::toi::{time_of_impact, DEFAULT_ITERATIONS};

/// When within a tick a detected collision is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactTiming {
    /// Bisect back to the estimated time of first contact and resolve
    /// there. Avoids the visible "teleport" of resolving deep inside an
    /// overlap.
    Rewind { iterations: u32 },
    /// Resolve at the post-step overlapping state as-is.
    PostStep,
}

/// Configuration for a simulation, provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// World rectangle `[0, x] × [0, y]`; the four static walls sit just
    /// outside it.
    pub world: Vec2,
    /// Scales all integration. Slows or speeds perceived motion without
    /// changing physical units.
    pub speed_scale: f32,
    /// Restitution coefficient in `[0, 1]`: 0 = bodies stick, 1 =
    /// perfectly bouncy.
    pub restitution: f32,
    /// Minimum real-time gap between successive resolutions of the same
    /// pair. Wall-clock based, unaffected by `speed_scale`.
    pub debounce_cooldown: Duration,
    pub contact_timing: ContactTiming,
    /// Wrap body centers across the world rectangle instead of letting
    /// them run out (screen wrap-around).
    pub wrap_world: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: Vec2::new(800.0, 600.0),
            speed_scale: 0.1,
            restitution: 1.0,
            debounce_cooldown: Duration::from_millis(500),
            contact_timing: ContactTiming::Rewind {
                iterations: DEFAULT_ITERATIONS,
            },
            wrap_world: false,
        }
    }
}

impl SimConfig {
    // -- Builder pattern --

    pub fn with_world(mut self, world: Vec2) -> Self {
        self.world = world;
        self
    }

    pub fn with_speed_scale(mut self, scale: f32) -> Self {
        self.speed_scale = scale;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_debounce_cooldown(mut self, cooldown: Duration) -> Self {
        self.debounce_cooldown = cooldown;
        self
    }

    pub fn with_contact_timing(mut self, timing: ContactTiming) -> Self {
        self.contact_timing = timing;
        self
    }

    pub fn with_wrap_world(mut self, wrap: bool) -> Self {
        self.wrap_world = wrap;
        self
    }
}

/// Everything a tick produces: the updated dynamic body states, and the
/// contact point of the first collision resolved this tick (if any) for
/// optional visualization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    pub bodies: [BodyState; 2],
    pub contact: Option<Contact>,
}

/// The simulation aggregate: two dynamic squares, four static walls, and
/// the debounce timers for every tracked pair. Owns all mutable state
/// (there are no globals) and is advanced one tick at a time by the host.
pub struct Simulation {
    config: SimConfig,
    bodies: [Body; 2],
    walls: [Body; 4],
    /// Cooldown for the dynamic-dynamic pair.
    pair_timer: DebounceTimer,
    /// One cooldown per (dynamic body, wall) pair, indexed by body slot
    /// and `Boundary::index`.
    wall_timers: [[DebounceTimer; 4]; 2],
}

impl Simulation {
    /// Create a simulation owning the two given dynamic bodies. The four
    /// walls are derived from `config.world`.
    pub fn new(config: SimConfig, bodies: [Body; 2]) -> Self {
        let walls = Boundary::ALL.map(|b| Body::wall(b, config.world));
        Self {
            config,
            bodies,
            walls,
            pair_timer: DebounceTimer::new(),
            wall_timers: [[DebounceTimer::new(); 4]; 2],
        }
    }

    /// The reference scene: a blue 50-unit square drifting down-right and
    /// a green 70-unit square drifting up-left, on the default config.
    pub fn demo() -> Self {
        let a = Body {
            center: Vec2::new(50.0, 35.0),
            size: 50.0,
            rotation: 0.0,
            velocity: Vec2::new(200.0, 100.0),
            angular_velocity: -1.0,
            mass: 1.0,
        };
        let b = Body {
            center: Vec2::new(500.0, 500.0),
            size: 70.0,
            rotation: 20.0,
            velocity: Vec2::new(-100.0, -200.0),
            angular_velocity: 2.0,
            mass: 1.0,
        };
        Self::new(SimConfig::default(), [a, b])
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replace the configuration. Walls are rebuilt if the world rectangle
    /// changed.
    pub fn configure(&mut self, config: SimConfig) {
        if config.world != self.config.world {
            self.walls = Boundary::ALL.map(|b| Body::wall(b, config.world));
        }
        self.config = config;
    }

    pub fn bodies(&self) -> &[Body; 2] {
        &self.bodies
    }

    pub fn walls(&self) -> &[Body; 4] {
        &self.walls
    }

    /// Advance the simulation by `dt` seconds of host time.
    pub fn tick(&mut self, dt: f32) -> TickOutput {
        self.tick_at(dt, Instant::now())
    }

    /// Advance by `dt`, reading the debounce clock from `now`. One clock
    /// reading covers the whole tick, so every pair resolved this tick
    /// gets the same deadline base.
    ///
    /// Order within a tick is fixed for reproducibility: integrate both
    /// bodies, then the dynamic-dynamic pair, then each body against the
    /// walls in left, right, top, bottom order.
    pub fn tick_at(&mut self, dt: f32, now: Instant) -> TickOutput {
        let scaled = dt * self.config.speed_scale;
        let before = self.bodies;

        for body in &mut self.bodies {
            body.integrate(scaled);
            if self.config.wrap_world {
                body.center = positive_mod(body.center, self.config.world);
            }
        }

        let mut first_contact = None;

        self.resolve_pair(&before, scaled, now, &mut first_contact);
        for slot in 0..2 {
            for boundary in Boundary::ALL {
                self.resolve_wall(slot, boundary, &before, scaled, now, &mut first_contact);
            }
        }

        TickOutput {
            bodies: [self.state(0), self.state(1)],
            contact: first_contact,
        }
    }

    fn state(&self, slot: usize) -> BodyState {
        let body = &self.bodies[slot];
        BodyState {
            id: BodyId::Dynamic(slot),
            center: body.center,
            size: body.size,
            rotation: body.rotation,
            velocity: body.velocity,
            angular_velocity: body.angular_velocity,
        }
    }

    fn resolve_pair(
        &mut self,
        before: &[Body; 2],
        scaled_dt: f32,
        now: Instant,
        first_contact: &mut Option<Contact>,
    ) {
        if self.pair_timer.is_protected_at(now) {
            return;
        }
        let Some(contact) = detect(
            BodyId::Dynamic(0),
            &self.bodies[0],
            BodyId::Dynamic(1),
            &self.bodies[1],
        ) else {
            return;
        };

        let contact = match self.config.contact_timing {
            // Rewind needs the bracketing precondition: clean at the start
            // of the tick, colliding at the end.
            ContactTiming::Rewind { iterations } if !overlapping(&before[0], &before[1]) => {
                let t = time_of_impact(&before[0], &before[1], scaled_dt, iterations);
                let mut a = before[0];
                let mut b = before[1];
                a.integrate(t);
                b.integrate(t);
                match detect(BodyId::Dynamic(0), &a, BodyId::Dynamic(1), &b) {
                    Some(rewound) => {
                        self.bodies[0] = a;
                        self.bodies[1] = b;
                        rewound
                    }
                    // The bisection midpoint can land a hair before first
                    // touch; keep the stepped state in that case.
                    None => contact,
                }
            }
            _ => contact,
        };

        let (intruder, container) = if contact.intruder == BodyId::Dynamic(0) {
            (0, 1)
        } else {
            (1, 0)
        };
        let resolution = Resolution::solve(
            &contact,
            &self.bodies[intruder],
            &self.bodies[container],
            self.config.restitution,
        );
        resolution.apply_intruder(&mut self.bodies[intruder]);
        resolution.apply_container(&mut self.bodies[container]);
        self.pair_timer.arm_at(now, self.config.debounce_cooldown);

        log::debug!(
            "pair contact at {:?}, impulse {:.3}",
            contact.point,
            resolution.impulse
        );
        first_contact.get_or_insert(contact);
    }

    fn resolve_wall(
        &mut self,
        slot: usize,
        boundary: Boundary,
        before: &[Body; 2],
        scaled_dt: f32,
        now: Instant,
        first_contact: &mut Option<Contact>,
    ) {
        if self.wall_timers[slot][boundary.index()].is_protected_at(now) {
            return;
        }
        let wall_id = BodyId::Wall(boundary);
        let Some(contact) = detect(
            BodyId::Dynamic(slot),
            &self.bodies[slot],
            wall_id,
            &self.walls[boundary.index()],
        ) else {
            return;
        };

        let contact = match self.config.contact_timing {
            ContactTiming::Rewind { iterations }
                if !overlapping(&before[slot], &self.walls[boundary.index()]) =>
            {
                let wall = &self.walls[boundary.index()];
                let t = time_of_impact(&before[slot], wall, scaled_dt, iterations);
                let mut rewound = before[slot];
                rewound.integrate(t);
                match detect(BodyId::Dynamic(slot), &rewound, wall_id, wall) {
                    Some(c) => {
                        self.bodies[slot] = rewound;
                        c
                    }
                    None => contact,
                }
            }
            _ => contact,
        };

        // The wall never moves, whichever side of the contact it is on.
        let resolution = if contact.intruder == wall_id {
            let r = Resolution::solve(
                &contact,
                &self.walls[boundary.index()],
                &self.bodies[slot],
                self.config.restitution,
            );
            r.apply_container(&mut self.bodies[slot]);
            r
        } else {
            let r = Resolution::solve(
                &contact,
                &self.bodies[slot],
                &self.walls[boundary.index()],
                self.config.restitution,
            );
            r.apply_intruder(&mut self.bodies[slot]);
            r
        };
        self.wall_timers[slot][boundary.index()].arm_at(now, self.config.debounce_cooldown);

        log::debug!(
            "body {slot} hit {boundary:?} wall at {:?}, impulse {:.3}",
            contact.point,
            resolution.impulse
        );
        first_contact.get_or_insert(contact);
    }
}
