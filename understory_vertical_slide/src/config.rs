// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tunables for the slide interaction.
///
/// Distances and velocities marked "dp" are density-independent and are
/// converted to pixels once, through [`SlideConfig::resolve`], using the
/// host's density scale. The flick threshold is already in pixels.
///
/// ```
/// use understory_vertical_slide::SlideConfig;
///
/// let thresholds = SlideConfig::default()
///     .with_distance_threshold(40.0)
///     .resolve(2.0);
/// assert_eq!(thresholds.distance, 80);
/// assert_eq!(thresholds.velocity, 6000.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SlideConfig {
    /// Release speed in px/s above which a release counts as a flick.
    pub velocity_threshold: f64,
    /// Release distance in dp past which a slow release still snaps.
    pub distance_threshold: f64,
    /// Divisor applied to every raw per-event drag delta.
    pub damping: i32,
    /// Movement in dp before a gesture is classified as a scroll.
    pub touch_slop: f64,
    /// Capture slop is `touch_slop / capture_sensitivity`.
    pub capture_sensitivity: f64,
    /// Height in dp of the bottom-edge zone that can start a drag.
    pub edge_size: f64,
    /// Fastest release velocity reported, in dp/s.
    pub max_fling_velocity: f64,
    /// Slower releases are reported as zero velocity, in dp/s.
    pub min_fling_velocity: f64,
    /// Settle duration in ms for a zero-velocity settle over zero distance.
    pub base_settle_duration: u64,
    /// Upper bound on any settle duration, in ms.
    pub max_settle_duration: u64,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 6000.0,
            distance_threshold: 60.0,
            damping: 3,
            touch_slop: 8.0,
            capture_sensitivity: 10.0,
            edge_size: 20.0,
            max_fling_velocity: 8000.0,
            min_fling_velocity: 50.0,
            base_settle_duration: 256,
            max_settle_duration: 600,
        }
    }
}

impl SlideConfig {
    /// Sets the flick velocity threshold in px/s.
    #[must_use]
    pub fn with_velocity_threshold(mut self, velocity: f64) -> Self {
        self.velocity_threshold = velocity;
        self
    }

    /// Sets the snap distance threshold in dp.
    #[must_use]
    pub fn with_distance_threshold(mut self, distance: f64) -> Self {
        self.distance_threshold = distance;
        self
    }

    /// Sets the drag damping divisor. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_damping(mut self, damping: i32) -> Self {
        self.damping = damping;
        self
    }

    /// Sets the touch slop in dp.
    #[must_use]
    pub fn with_touch_slop(mut self, slop: f64) -> Self {
        self.touch_slop = slop;
        self
    }

    /// Sets the bottom-edge zone height in dp.
    #[must_use]
    pub fn with_edge_size(mut self, size: f64) -> Self {
        self.edge_size = size;
        self
    }

    /// Sets the settle duration bounds in ms.
    #[must_use]
    pub fn with_settle_durations(mut self, base: u64, max: u64) -> Self {
        self.base_settle_duration = base;
        self.max_settle_duration = max;
        self
    }

    /// Converts the density-independent values to pixels.
    ///
    /// Non-finite or non-positive densities fall back to `1.0`.
    #[must_use]
    pub fn resolve(&self, density: f64) -> Thresholds {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            log::warn!("invalid density scale {density}, using 1.0");
            1.0
        };
        let sensitivity = if self.capture_sensitivity > 0.0 {
            self.capture_sensitivity
        } else {
            1.0
        };
        Thresholds {
            velocity: self.velocity_threshold.abs(),
            distance: dp_to_px(self.distance_threshold, density),
            damping: self.damping.max(1),
            touch_slop: (self.touch_slop * density).max(0.0),
            capture_slop: (self.touch_slop * density / sensitivity).max(0.0),
            edge_size: (self.edge_size * density).max(0.0),
            max_fling_velocity: (self.max_fling_velocity * density).abs(),
            min_fling_velocity: (self.min_fling_velocity * density).abs(),
            base_settle_duration: self.base_settle_duration,
            max_settle_duration: self.max_settle_duration,
        }
    }
}

/// [`SlideConfig`] resolved to pixels for one display density.
#[derive(Clone, Debug, PartialEq)]
pub struct Thresholds {
    /// Flick threshold in px/s.
    pub velocity: f64,
    /// Snap distance in whole pixels.
    pub distance: i32,
    /// Drag damping divisor, at least 1.
    pub damping: i32,
    /// Scroll classification slop in px.
    pub touch_slop: f64,
    /// Capture slop in px.
    pub capture_slop: f64,
    /// Bottom-edge zone height in px.
    pub edge_size: f64,
    /// Velocity clamp in px/s.
    pub max_fling_velocity: f64,
    /// Velocity floor in px/s.
    pub min_fling_velocity: f64,
    /// Base settle duration in ms.
    pub base_settle_duration: u64,
    /// Settle duration cap in ms.
    pub max_settle_duration: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        SlideConfig::default().resolve(1.0)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "distances are clamped to the i32 range before the cast"
)]
fn dp_to_px(dp: f64, density: f64) -> i32 {
    let px = libm::trunc(dp * density);
    if px.is_nan() {
        return 0;
    }
    px.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_at_unit_density() {
        let t = Thresholds::default();
        assert_eq!(t.velocity, 6000.0);
        assert_eq!(t.distance, 60);
        assert_eq!(t.damping, 3);
        assert_eq!(t.touch_slop, 8.0);
        assert!((t.capture_slop - 0.8).abs() < 1e-9, "capture slop {}", t.capture_slop);
        assert_eq!(t.edge_size, 20.0);
    }

    #[test]
    fn density_scales_dp_values_but_not_the_flick_threshold() {
        let t = SlideConfig::default().resolve(2.75);
        assert_eq!(t.distance, 165);
        assert_eq!(t.velocity, 6000.0);
        assert_eq!(t.max_fling_velocity, 22000.0);
    }

    #[test]
    fn distance_truncates_like_a_pixel_cast() {
        let t = SlideConfig::default().resolve(1.333);
        assert_eq!(t.distance, 79);
    }

    #[test]
    fn bad_density_falls_back_to_one() {
        assert_eq!(SlideConfig::default().resolve(f64::NAN), Thresholds::default());
        assert_eq!(SlideConfig::default().resolve(0.0), Thresholds::default());
    }

    #[test]
    fn damping_is_at_least_one() {
        let t = SlideConfig::default().with_damping(0).resolve(1.0);
        assert_eq!(t.damping, 1);
    }
}
