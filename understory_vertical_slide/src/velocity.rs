// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical velocity estimation over a short trailing window.
//!
//! The estimate uses the impulse strategy: each pair of consecutive samples
//! contributes the work needed to change a unit mass from the running
//! velocity to the pair's velocity, and the accumulated kinetic energy is
//! turned back into a velocity at the end. It is less sensitive to a single
//! jittery sample than a two-point difference.
//!
//! ```
//! use understory_vertical_slide::velocity::VelocityTracker;
//!
//! let mut tracker = VelocityTracker::new();
//! for (i, t) in (0..5).zip((0..).step_by(10)) {
//!     tracker.add(t, f64::from(i) * -50.0);
//! }
//! // 50 px every 10 ms, upwards.
//! let v = tracker.velocity();
//! assert!((v + 5000.0).abs() < 500.0, "got {v}");
//! ```

const HISTORY_SIZE: usize = 20;

/// Samples older than this relative to the newest one are ignored.
const HORIZON_MS: u64 = 100;

/// A gap this long between samples means the pointer stopped.
const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Copy, Clone, Debug)]
struct Sample {
    time: u64,
    position: f64,
}

/// Ring buffer of recent positions and their timestamps.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    /// Records the pointer position at `time` (ms).
    pub fn add(&mut self, time: u64, position: f64) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time, position });
    }

    /// Forgets every sample.
    pub fn clear(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }

    /// Estimated velocity in px/s; `0.0` with fewer than two usable samples.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Walk back from the newest sample, stopping at the horizon or at the
        // first gap that looks like a pause.
        let mut positions = [0.0; HISTORY_SIZE];
        let mut ages = [0.0; HISTORY_SIZE];
        let mut count = 0;
        let mut index = self.newest;
        let mut later = newest;
        while let Some(sample) = self.samples[index] {
            let age = newest.time.saturating_sub(sample.time);
            let gap = later.time.saturating_sub(sample.time);
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            positions[count] = sample.position;
            ages[count] = -(age as f64);
            later = sample;
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            index = if index == 0 { HISTORY_SIZE - 1 } else { index - 1 };
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions[..count], &ages[..count]) * 1000.0
    }

    /// Like [`velocity`](Self::velocity), clamped to `±max` and zeroed when
    /// its magnitude is below `min`.
    #[must_use]
    pub fn velocity_clamped(&self, min: f64, max: f64) -> f64 {
        let v = self.velocity();
        if !v.is_finite() || v.abs() < min {
            return 0.0;
        }
        v.clamp(-max, max)
    }
}

/// Velocity in px/ms from samples ordered newest first.
fn impulse_velocity(positions: &[f64], times: &[f64]) -> f64 {
    let oldest = positions.len() - 1;
    let mut work = 0.0;
    for i in (1..=oldest).rev() {
        let dt = times[i - 1] - times[i];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (positions[i - 1] - positions[i]) / dt;
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

/// `E = v^2 / 2` for a unit mass, keeping the sign of the energy.
fn energy_to_velocity(energy: f64) -> f64 {
    let speed = libm::sqrt(2.0 * energy.abs());
    if energy < 0.0 { -speed } else { speed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_sample_are_still() {
        let mut tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), 0.0);
        tracker.add(5, 40.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn constant_downward_motion() {
        let mut tracker = VelocityTracker::new();
        for step in 0..4_u32 {
            tracker.add(u64::from(step) * 10, f64::from(step) * 100.0);
        }
        let v = tracker.velocity();
        assert!((v - 10_000.0).abs() < 1000.0, "expected ~10000, got {v}");
    }

    #[test]
    fn two_samples_give_their_slope() {
        let mut tracker = VelocityTracker::new();
        tracker.add(0, 0.0);
        tracker.add(10, 30.0);
        let v = tracker.velocity();
        assert!((v - 3000.0).abs() < 1e-6, "got {v}");
    }

    #[test]
    fn pause_before_release_reads_as_stopped() {
        let mut tracker = VelocityTracker::new();
        tracker.add(0, 0.0);
        tracker.add(10, 100.0);
        tracker.add(10 + ASSUME_STOPPED_MS + 1, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn samples_past_the_horizon_are_ignored() {
        let mut tracker = VelocityTracker::new();
        tracker.add(0, 5000.0);
        tracker.add(150, 0.0);
        tracker.add(160, -100.0);
        tracker.add(170, -200.0);
        let v = tracker.velocity();
        assert!((v + 10_000.0).abs() < 1000.0, "got {v}");
    }

    #[test]
    fn clamping_limits_and_floors() {
        let mut tracker = VelocityTracker::new();
        tracker.add(0, 0.0);
        tracker.add(1, -10_000.0);
        assert_eq!(tracker.velocity_clamped(50.0, 8000.0), -8000.0);

        tracker.clear();
        tracker.add(0, 0.0);
        tracker.add(20, 0.5);
        assert_eq!(tracker.velocity_clamped(50.0, 8000.0), 0.0);
    }

    #[test]
    fn wraps_around_the_ring_buffer() {
        let mut tracker = VelocityTracker::new();
        for step in 0..50_u32 {
            tracker.add(u64::from(step) * 5, f64::from(step) * 10.0);
        }
        let v = tracker.velocity();
        assert!((v - 2000.0).abs() < 200.0, "got {v}");
    }
}
