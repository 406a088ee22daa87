//! Animated morph of the vertex cloud onto a sphere.

use crate::math::{lerp, Point3};

use super::params::MorphTiming;

/// Progress of the sphere morph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphPhase {
    #[default]
    Idle,
    Animating,
    Settled,
}

/// Circular ease-out: fast start, gentle arrival.
#[must_use]
pub fn ease_out_circ(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    (1.0 - t * t).sqrt()
}

/// Positions produced by one [`SphereMorph::advance`] call.
#[derive(Debug, Clone)]
pub struct MorphFrame {
    /// New position of every vertex, indexed by id.
    pub positions: Vec<Point3>,
    /// `true` on the single frame where the morph reaches its targets.
    pub settled: bool,
}

/// Time-driven interpolation from the current positions to their projections.
///
/// All vertices share one clock, so completion is a single transition
/// rather than one per vertex.
#[derive(Debug, Default)]
pub struct SphereMorph {
    phase: MorphPhase,
    timing: MorphTiming,
    elapsed: f64,
    from: Vec<Point3>,
    to: Vec<Point3>,
}

impl SphereMorph {
    #[must_use]
    pub fn phase(&self) -> MorphPhase {
        self.phase
    }

    /// Starts animating from `from` to `to`.
    pub fn start(&mut self, timing: MorphTiming, from: Vec<Point3>, to: Vec<Point3>) {
        self.phase = MorphPhase::Animating;
        self.timing = timing;
        self.elapsed = 0.0;
        self.from = from;
        self.to = to;
    }

    /// Jumps to [`MorphPhase::Settled`] without interpolating.
    pub fn mark_settled(&mut self) {
        self.phase = MorphPhase::Settled;
        self.from.clear();
        self.to.clear();
    }

    /// Drops any animation and returns to [`MorphPhase::Idle`].
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances the clock by `dt` seconds.
    ///
    /// Returns `None` while idle, settled, or still inside the start delay.
    pub fn advance(&mut self, dt: f64) -> Option<MorphFrame> {
        if self.phase != MorphPhase::Animating {
            return None;
        }
        self.elapsed += dt.max(0.0);
        let moving = self.elapsed - self.timing.delay;
        if moving < 0.0 {
            return None;
        }

        if moving >= self.timing.duration {
            self.phase = MorphPhase::Settled;
            return Some(MorphFrame {
                positions: std::mem::take(&mut self.to),
                settled: true,
            });
        }

        let t = ease_out_circ(moving / self.timing.duration);
        let positions = self
            .from
            .iter()
            .zip(&self.to)
            .map(|(a, b)| lerp(a, b, t))
            .collect();
        Some(MorphFrame {
            positions,
            settled: false,
        })
    }
}
