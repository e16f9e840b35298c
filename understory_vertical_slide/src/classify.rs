// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture classifier: is this pointer stream a vertical drag?
//!
//! [`classify`] is the whole decision. [`ScrollClassifier`] feeds it the
//! displacement accumulated since the pointer went down, once that
//! displacement has passed the touch slop.
//!
//! ```
//! use kurbo::Point;
//! use understory_vertical_slide::classify::{classify, ScrollClassifier};
//!
//! assert!(classify(3.0, -10.0));
//! assert!(!classify(10.0, 10.0));
//!
//! let mut scroll = ScrollClassifier::new(8.0);
//! scroll.down(Point::new(100.0, 100.0));
//! // Still within the slop.
//! assert!(!scroll.is_vertical(Point::new(101.0, 104.0)));
//! // Past the slop and mostly vertical.
//! assert!(scroll.is_vertical(Point::new(102.0, 130.0)));
//! ```

use kurbo::Point;

/// Returns `true` iff the displacement is more vertical than horizontal.
#[must_use]
pub fn classify(dx: f64, dy: f64) -> bool {
    dy.abs() > dx.abs()
}

/// Tracks one gesture's origin and classifies its moves.
#[derive(Clone, Debug, Default)]
pub struct ScrollClassifier {
    origin: Option<Point>,
    slop: f64,
}

impl ScrollClassifier {
    /// Creates a classifier with the given touch slop in pixels.
    #[must_use]
    pub fn new(slop: f64) -> Self {
        Self { origin: None, slop }
    }

    /// Starts a new gesture at `pos`.
    pub fn down(&mut self, pos: Point) {
        self.origin = Some(pos);
    }

    /// Classifies a move to `pos`.
    ///
    /// Returns `false` while no gesture is active or the pointer has not yet
    /// travelled past the slop.
    #[must_use]
    pub fn is_vertical(&self, pos: Point) -> bool {
        let Some(origin) = self.origin else {
            return false;
        };
        let delta = pos - origin;
        if delta.hypot2() <= self.slop * self.slop {
            return false;
        }
        classify(delta.x, delta.y)
    }

    /// Ends the gesture.
    pub fn end(&mut self) {
        self.origin = None;
    }

    /// Returns `true` while a gesture is being followed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }
}
