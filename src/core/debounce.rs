use std::time::{Duration, Instant};

/// Per-pair collision cooldown.
///
/// After a pair's collision is resolved the timer is armed, and further
/// resolutions for that pair are suppressed until the deadline passes.
/// Gating is on the wall clock, deliberately independent of the
/// simulation's speed scale: a body resting against a wall stays quiet for
/// the same real-time window no matter how slow the simulation runs.
///
/// The `_at` variants take an explicit instant so callers (and tests) can
/// share one clock reading across a whole tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebounceTimer {
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm protection until `now + cooldown`.
    pub fn arm_at(&mut self, now: Instant, cooldown: Duration) {
        self.deadline = Some(now + cooldown);
    }

    /// Whether the pair is still protected at `now`. A never-armed or
    /// expired timer is not protected.
    pub fn is_protected_at(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    pub fn arm(&mut self, cooldown: Duration) {
        self.arm_at(Instant::now(), cooldown);
    }

    pub fn is_protected(&self) -> bool {
        self.is_protected_at(Instant::now())
    }
}
