// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracker: capture a panel and turn pointer motion into damped offsets.
//!
//! ## Usage
//!
//! 1) On pointer down, build a [`PendingCapture`] with the panel under the
//!    pointer, found with [`capture_candidate`].
//! 2) Feed moves to [`PendingCapture::observe`] until
//!    [`PendingCapture::is_past_slop`] says the pointer has travelled far
//!    enough, then turn it into a [`DragSession`].
//! 3) On each move, [`DragSession::update`] returns the damped shift to apply
//!    to both panels.
//! 4) On release, read [`DragSession::release_velocity`].
//!
//! Every raw per-event delta is truncated to whole pixels and then divided by
//! the damping factor on its own, so many small moves travel less than one
//! big move of the same total length:
//!
//! ```
//! use understory_vertical_slide::Panel;
//! use understory_vertical_slide::drag::DragSession;
//!
//! let mut session = DragSession::new(Panel::Top, 0.0, 0.0, 0);
//! let mut applied = 0;
//! for (i, y) in [-4.0, -8.0, -12.0].into_iter().enumerate() {
//!     applied += session.update(0.0, y, 16 * (i as u64 + 1), 3);
//! }
//! // Three deltas of -4 damp to -1 each, not to -12 / 3 = -4.
//! assert_eq!(applied, -3);
//! assert_eq!(session.damped_total(), -3);
//! ```

use kurbo::Point;

use crate::config::Thresholds;
use crate::panel::{Panel, PanelOffsets};
use crate::velocity::VelocityTracker;

/// Scales one raw delta by the damping divisor, truncating toward zero.
#[must_use]
pub fn damp(raw_dy: i32, damping: i32) -> i32 {
    raw_dy / damping.max(1)
}

/// Whole-pixel delta between two pointer coordinates, truncated toward zero.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    reason = "the delta is clamped to the i32 range before the cast"
)]
pub fn raw_delta(from: f64, to: f64) -> i32 {
    let delta = libm::trunc(to - from);
    if delta.is_nan() {
        return 0;
    }
    delta.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Finds the panel a pointer down at `pos` may capture.
///
/// A panel under the pointer is always eligible. With no panel under the
/// pointer, a down within `edge_size` of the widget's bottom edge still
/// captures the panel showing most of the viewport.
///
/// The bottom panel covers the bottom edge unless the top panel has been
/// pulled down past `H - edge_size`, which takes about `3 * H` of pointer
/// travel with the default damping. Ordinary swipes from the edge land on a
/// panel and never reach the edge band.
#[must_use]
pub fn capture_candidate(offsets: &PanelOffsets, pos: Point, edge_size: f64) -> Option<Panel> {
    if let Some(panel) = offsets.panel_at(pos.y) {
        return Some(panel);
    }
    let bottom_edge = f64::from(offsets.height());
    if pos.y < bottom_edge && pos.y >= bottom_edge - edge_size {
        return Some(offsets.dominant());
    }
    None
}

/// A pointer that is down but has not yet claimed a panel.
#[derive(Clone, Debug)]
pub struct PendingCapture {
    origin: Point,
    last: Point,
    candidate: Option<Panel>,
    velocity: VelocityTracker,
}

impl PendingCapture {
    /// Starts following a pointer that went down at `pos`.
    #[must_use]
    pub fn new(pos: Point, time: u64, candidate: Option<Panel>) -> Self {
        let mut velocity = VelocityTracker::new();
        velocity.add(time, pos.y);
        Self {
            origin: pos,
            last: pos,
            candidate,
            velocity,
        }
    }

    /// The panel this pointer would capture.
    #[must_use]
    pub fn candidate(&self) -> Option<Panel> {
        self.candidate
    }

    /// Where the pointer went down.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Records a move without capturing.
    pub fn observe(&mut self, pos: Point, time: u64) {
        self.last = pos;
        self.velocity.add(time, pos.y);
    }

    /// Returns `true` once the vertical travel from the origin exceeds `slop`.
    #[must_use]
    pub fn is_past_slop(&self, slop: f64) -> bool {
        (self.last.y - self.origin.y).abs() > slop
    }

    /// Claims `panel`, carrying over the pointer history.
    #[must_use]
    pub fn into_session(self, panel: Panel) -> DragSession {
        DragSession {
            panel,
            last: self.last,
            damped_total: 0,
            velocity: self.velocity,
        }
    }
}

/// State of one drag, alive from capture to release.
#[derive(Clone, Debug)]
pub struct DragSession {
    panel: Panel,
    last: Point,
    damped_total: i32,
    velocity: VelocityTracker,
}

impl DragSession {
    /// Starts a session on `panel` with the pointer at `(x, y)`.
    #[must_use]
    pub fn new(panel: Panel, x: f64, y: f64, time: u64) -> Self {
        PendingCapture::new(Point::new(x, y), time, Some(panel)).into_session(panel)
    }

    /// The captured panel.
    #[must_use]
    pub fn panel(&self) -> Panel {
        self.panel
    }

    /// Last known pointer position.
    #[must_use]
    pub fn last_position(&self) -> Point {
        self.last
    }

    /// Sum of every damped shift applied in this session.
    #[must_use]
    pub fn damped_total(&self) -> i32 {
        self.damped_total
    }

    /// Moves the pointer to `(x, y)` and returns the damped shift to apply.
    ///
    /// The last position always becomes the exact new position, so the
    /// fractional and damped-away parts of each delta are dropped.
    pub fn update(&mut self, x: f64, y: f64, time: u64, damping: i32) -> i32 {
        let dy = damp(raw_delta(self.last.y, y), damping);
        self.follow(Point::new(x, y), time);
        self.damped_total = self.damped_total.saturating_add(dy);
        dy
    }

    /// Records a pointer position without moving the panels.
    pub fn follow(&mut self, pos: Point, time: u64) {
        self.last = pos;
        self.velocity.add(time, pos.y);
    }

    /// Pointer velocity at release in px/s, positive downwards.
    #[must_use]
    pub fn release_velocity(&self, thresholds: &Thresholds) -> f64 {
        self.velocity
            .velocity_clamped(thresholds.min_fling_velocity, thresholds.max_fling_velocity)
    }
}
