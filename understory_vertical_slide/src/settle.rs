// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle driver: animate the released panel to its resting offset.
//!
//! A [`SettleTask`] is started with the release velocity and then stepped
//! once per animation frame with the frame's timestamp. The duration depends
//! on the distance left and on how fast the pointer was moving; the motion
//! follows a quintic ease-out and lands exactly on the target.
//!
//! ```
//! use understory_vertical_slide::settle::SettleTask;
//! use understory_vertical_slide::{Panel, Thresholds};
//!
//! let thresholds = Thresholds::default();
//! let mut task = SettleTask::start(Panel::Top, -100, -1000, 0.0, 1000, 0, &thresholds);
//! let mut now = 0;
//! let last = loop {
//!     now += 16;
//!     let step = task.step(now);
//!     if step.done {
//!         break step;
//!     }
//! };
//! assert_eq!(last.offset, -1000);
//! ```

use crate::config::Thresholds;
use crate::panel::Panel;

/// Result of one animation frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SettleStep {
    /// Offset of the settling panel for this frame.
    pub offset: i32,
    /// `true` once `offset` is the target and no further frame is needed.
    pub done: bool,
}

/// An in-flight settle animation.
#[derive(Clone, Debug)]
pub struct SettleTask {
    panel: Panel,
    from: i32,
    target: i32,
    start_time: u64,
    duration: u64,
}

impl SettleTask {
    /// Starts settling `panel` from `current` to `target`.
    ///
    /// `velocity` is the release velocity in px/s and `height` is the panel
    /// height, used as the motion range. `now` is the current frame time.
    #[must_use]
    pub fn start(
        panel: Panel,
        current: i32,
        target: i32,
        velocity: f64,
        height: u32,
        now: u64,
        thresholds: &Thresholds,
    ) -> Self {
        let delta = i64::from(target) - i64::from(current);
        let duration = settle_duration(delta, velocity, height, thresholds);
        log::debug!("settling {panel} from {current} to {target} over {duration} ms");
        Self {
            panel,
            from: current,
            target,
            start_time: now,
            duration,
        }
    }

    /// The panel being settled.
    #[must_use]
    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// The resting offset this task ends on.
    #[must_use]
    pub fn target(&self) -> i32 {
        self.target
    }

    /// Total animation length in milliseconds.
    #[must_use]
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Advances to the frame at `now`.
    ///
    /// Frames at or past the end of the animation return the target exactly.
    /// A timestamp earlier than the start is treated as the start.
    #[must_use]
    pub fn step(&self, now: u64) -> SettleStep {
        let elapsed = now.saturating_sub(self.start_time);
        if elapsed >= self.duration {
            return SettleStep {
                offset: self.target,
                done: true,
            };
        }
        let t = elapsed as f64 / self.duration as f64;
        let delta = f64::from(self.target) - f64::from(self.from);
        let offset = round_to_i32(f64::from(self.from) + libm::round(ease_out(t) * delta));
        SettleStep {
            offset,
            done: offset == self.target,
        }
    }
}

/// Quintic ease-out over `[0, 1]`.
fn ease_out(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t * t * t + 1.0
}

/// Milliseconds needed to travel `delta` pixels after a release at `velocity`.
fn settle_duration(delta: i64, velocity: f64, height: u32, thresholds: &Thresholds) -> u64 {
    if delta == 0 {
        return 0;
    }
    let range = f64::from(height.max(1));
    let distance_moved = delta.unsigned_abs() as f64;
    let half = range / 2.0;
    let ratio = (distance_moved / range).min(1.0);
    let distance = half + half * distance_influence(ratio);

    let speed = clamp_speed(velocity, thresholds);
    let duration = if speed > 0.0 {
        4.0 * libm::round(1000.0 * (distance / speed).abs())
    } else {
        libm::trunc((distance_moved / range + 1.0) * thresholds.base_settle_duration as f64)
    };
    to_millis(duration).min(thresholds.max_settle_duration)
}

/// Longer travel slows the snap a little, as a sine of the distance ratio.
fn distance_influence(ratio: f64) -> f64 {
    libm::sin((ratio - 0.5) * 0.3 * core::f64::consts::FRAC_PI_2)
}

fn clamp_speed(velocity: f64, thresholds: &Thresholds) -> f64 {
    let speed = velocity.abs();
    if !speed.is_finite() || speed < thresholds.min_fling_velocity {
        return 0.0;
    }
    speed.min(thresholds.max_fling_velocity)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the value is clamped to the u64 range before the cast"
)]
fn to_millis(ms: f64) -> u64 {
    if ms.is_nan() || ms <= 0.0 {
        return 0;
    }
    ms.min(u64::MAX as f64) as u64
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the value is clamped to the i32 range before the cast"
)]
fn round_to_i32(value: f64) -> i32 {
    value.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(task: &SettleTask, frame: u64) -> (alloc::vec::Vec<i32>, u64) {
        let mut offsets = alloc::vec::Vec::new();
        let mut now = 0;
        loop {
            now += frame;
            let step = task.step(now);
            offsets.push(step.offset);
            if step.done {
                return (offsets, now);
            }
            assert!(now < 10_000, "settle never finished");
        }
    }

    #[test]
    fn zero_velocity_duration_grows_with_distance() {
        let t = Thresholds::default();
        let short = SettleTask::start(Panel::Top, -10, 0, 0.0, 1000, 0, &t);
        let long = SettleTask::start(Panel::Top, -10, -1000, 0.0, 1000, 0, &t);
        assert_eq!(short.duration(), 258);
        assert_eq!(long.duration(), 509);
    }

    #[test]
    fn velocity_shortens_the_settle() {
        let t = Thresholds::default();
        let task = SettleTask::start(Panel::Top, -10, -1000, -7000.0, 1000, 0, &t);
        assert_eq!(task.duration(), 352);
    }

    #[test]
    fn duration_is_capped() {
        let t = Thresholds::default();
        let task = SettleTask::start(Panel::Top, 900, -1000, 0.0, 1000, 0, &t);
        assert_eq!(task.duration(), 600);
    }

    #[test]
    fn slow_velocity_counts_as_none() {
        let t = Thresholds::default();
        let still = SettleTask::start(Panel::Bottom, 70, 1000, 0.0, 1000, 0, &t);
        let crawl = SettleTask::start(Panel::Bottom, 70, 1000, 10.0, 1000, 0, &t);
        assert_eq!(still.duration(), crawl.duration());
    }

    #[test]
    fn zero_distance_is_done_on_first_step() {
        let t = Thresholds::default();
        let task = SettleTask::start(Panel::Top, 0, 0, 5000.0, 1000, 40, &t);
        assert_eq!(task.duration(), 0);
        assert_eq!(
            task.step(40),
            SettleStep {
                offset: 0,
                done: true
            }
        );
    }

    #[test]
    fn converges_exactly_and_monotonically() {
        let t = Thresholds::default();
        for (from, to, v) in [
            (-10, -1000, 0.0),
            (-10, 0, 0.0),
            (70, 1000, 7000.0),
            (900, 0, -200.0),
            (-1, 0, 0.0),
            (0, 1, 0.0),
        ] {
            let task = SettleTask::start(Panel::Top, from, to, v, 1000, 0, &t);
            let (offsets, end) = run(&task, 16);
            assert_eq!(offsets.last(), Some(&to), "{from} -> {to}");
            assert!(end <= task.duration() + 16, "{from} -> {to} overran");
            let mut prev = from;
            for &o in &offsets {
                assert!(
                    (o - prev) * (to - from).signum() >= 0,
                    "{from} -> {to} moved backwards at {o}"
                );
                prev = o;
            }
        }
    }

    #[test]
    fn frames_before_start_hold_position() {
        let t = Thresholds::default();
        let task = SettleTask::start(Panel::Top, -100, 0, 0.0, 1000, 500, &t);
        let step = task.step(400);
        assert_eq!(step.offset, -100);
        assert!(!step.done);
    }

    #[test]
    fn ease_out_endpoints() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert!(ease_out(0.5) > 0.5, "ease-out front-loads the motion");
    }
}
