//! Animation driver: the frame-stepped state machine behind the shatter.
//!
//! One [`Animator::tick`] corresponds to one display-refresh callback.
//! Ticks are strictly sequential; all shard updates for a tick complete
//! before the caller renders that tick, and the next tick never starts
//! before those renders are issued (the DOM shell only schedules the next
//! frame after applying styles).

#[cfg(test)]
#[path = "anim_test.rs"]
mod anim_test;

use crate::consts::REFERENCE_HEIGHT;
use crate::geom::Size;
use crate::kinetics::{Shard, ShardMotion};

/// Lifecycle of one animation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No tick has run yet.
    #[default]
    Idle,
    /// Shards are in flight.
    Running,
    /// Every shard has fallen past the completion threshold. Terminal.
    Complete,
}

/// Frame counter and phase for one shatter session.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    frame: u32,
    phase: Phase,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames elapsed since the run started.
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance every shard by one frame and report the resulting phase.
    ///
    /// Shards still inside their start delay do not move. Moving shards
    /// translate by their constant velocity, fall by the accelerating
    /// vertical term, and rotate by their constant angular velocity. Once
    /// the run is [`Phase::Complete`] further ticks are no-ops.
    pub fn tick(
        &mut self,
        groups: &mut [Vec<Shard>],
        size: Size,
        acceleration_rate: f64,
    ) -> Phase {
        if self.phase == Phase::Complete {
            return Phase::Complete;
        }
        self.phase = Phase::Running;
        self.frame += 1;

        let gravity = acceleration_rate * size.height / REFERENCE_HEIGHT;
        for shard in groups.iter_mut().flatten() {
            step(&mut shard.motion, self.frame, gravity);
        }

        if all_fallen(groups, size) {
            self.phase = Phase::Complete;
        }
        self.phase
    }
}

/// Advance one shard: constant horizontal drift, gravity-accelerated fall,
/// constant spin. `time` counts from the shard's own start, so every shard
/// follows the same trajectory shape regardless of its delay.
fn step(motion: &mut ShardMotion, frame: u32, gravity: f64) {
    if frame < motion.delay {
        return;
    }
    let time = f64::from(frame - motion.delay);
    motion.offset.x += motion.velocity.x;
    motion.offset.y = motion.velocity.y * time + 0.5 * gravity * time * time;
    motion.rotation += motion.spin;
}

/// Completion predicate: every vertex of every shard, offset by the shard's
/// accumulated vertical displacement, lies below the original frame.
///
/// Rotation is ignored. With positive gravity the predicate is monotonic:
/// once a shard's slowest vertex has cleared the frame it never climbs back.
#[must_use]
pub fn all_fallen(groups: &[Vec<Shard>], size: Size) -> bool {
    groups.iter().flatten().all(|shard| {
        shard
            .polygon
            .points()
            .iter()
            .all(|p| shard.motion.offset.y - p.y > size.height)
    })
}
