// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// What happened to the pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// The pointer went down.
    Down,
    /// The pointer moved while down.
    Move,
    /// The pointer was lifted.
    Up,
    /// The host took the stream away (for example, a parent claimed it).
    Cancel,
}

/// A single-pointer input sample in widget-local coordinates.
///
/// `time` is a host-supplied monotonic timestamp in milliseconds. The crate
/// never reads a clock of its own.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Pointer position relative to the widget's top-left corner.
    pub position: Point,
    /// Timestamp in milliseconds.
    pub time: u64,
}

impl PointerEvent {
    /// Creates an event of the given kind.
    #[must_use]
    pub const fn new(kind: PointerKind, position: Point, time: u64) -> Self {
        Self {
            kind,
            position,
            time,
        }
    }

    /// Pointer down at `(x, y)`.
    #[must_use]
    pub const fn down(x: f64, y: f64, time: u64) -> Self {
        Self::new(PointerKind::Down, Point::new(x, y), time)
    }

    /// Pointer moved to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f64, y: f64, time: u64) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y), time)
    }

    /// Pointer lifted at `(x, y)`.
    #[must_use]
    pub const fn up(x: f64, y: f64, time: u64) -> Self {
        Self::new(PointerKind::Up, Point::new(x, y), time)
    }

    /// Stream cancelled at `(x, y)`.
    #[must_use]
    pub const fn cancel(x: f64, y: f64, time: u64) -> Self {
        Self::new(PointerKind::Cancel, Point::new(x, y), time)
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite()
    }
}
