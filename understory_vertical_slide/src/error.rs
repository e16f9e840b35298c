// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Failures raised while processing pointer input or frames.
///
/// None of these reach the host: the controller's entry points log them,
/// abort any session in progress and carry on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SlideError {
    /// Input arrived before the panels were laid out.
    NotLaidOut,
    /// The layout pass reported a zero panel height.
    ZeroHeight,
    /// A pointer event carried a NaN or infinite coordinate.
    NonFinitePosition {
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
    /// Shifting the panels would leave the `i32` offset range.
    OffsetOverflow {
        /// The top panel's offset before the shift.
        offset: i32,
        /// The requested shift.
        dy: i32,
    },
}

impl fmt::Display for SlideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLaidOut => f.write_str("panels have not been laid out yet"),
            Self::ZeroHeight => f.write_str("panel height is zero"),
            Self::NonFinitePosition { x, y } => {
                write!(f, "pointer position ({x}, {y}) is not finite")
            }
            Self::OffsetOverflow { offset, dy } => {
                write!(f, "shifting offset {offset} by {dy} overflows")
            }
        }
    }
}

impl core::error::Error for SlideError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_names_the_values() {
        let err = SlideError::OffsetOverflow { offset: 7, dy: -3 };
        assert_eq!(err.to_string(), "shifting offset 7 by -3 overflows");
        assert_eq!(
            SlideError::NonFinitePosition {
                x: 1.5,
                y: f64::NAN
            }
            .to_string(),
            "pointer position (1.5, NaN) is not finite"
        );
    }
}
