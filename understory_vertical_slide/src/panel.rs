// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::error::SlideError;

/// One of the two stacked surfaces.
///
/// The identities are assigned once at the first layout: the first child is
/// [`Panel::Top`], the second is [`Panel::Bottom`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    /// The panel shown at rest.
    Top,
    /// The panel revealed by sliding up.
    Bottom,
}

impl Panel {
    /// Returns the other panel of the pair.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
        }
    }
}

/// Vertical offsets of both panels, coupled as one rigid rod.
///
/// Offsets are top coordinates relative to the widget's top edge. Only the
/// top panel's offset is stored; the bottom panel's is always
/// `top + height`, so the pair can only ever move together.
///
/// ```
/// use understory_vertical_slide::{Panel, PanelOffsets};
///
/// let mut offsets = PanelOffsets::at_rest(1000);
/// assert_eq!(offsets.get(Panel::Top), 0);
/// assert_eq!(offsets.get(Panel::Bottom), 1000);
///
/// offsets.shift(-40).unwrap();
/// assert_eq!(offsets.get(Panel::Top), -40);
/// assert_eq!(offsets.get(Panel::Bottom), 960);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PanelOffsets {
    top: i32,
    height: u32,
}

impl PanelOffsets {
    /// Offsets with the top panel fully shown.
    #[must_use]
    pub const fn at_rest(height: u32) -> Self {
        Self { top: 0, height }
    }

    /// Offsets with the given top-panel offset.
    pub(crate) const fn with_top(top: i32, height: u32) -> Self {
        Self { top, height }
    }

    /// The panel height `H` shared by both panels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The top panel's offset.
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.top
    }

    /// The bottom panel's offset, always `top + H`.
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height_i32())
    }

    /// Returns the offset of `panel`.
    #[must_use]
    pub fn get(&self, panel: Panel) -> i32 {
        match panel {
            Panel::Top => self.top(),
            Panel::Bottom => self.bottom(),
        }
    }

    /// Moves both panels by `dy`.
    ///
    /// Fails without changing anything if either offset would leave the
    /// `i32` range.
    pub fn shift(&mut self, dy: i32) -> Result<(), SlideError> {
        let overflow = SlideError::OffsetOverflow {
            offset: self.top,
            dy,
        };
        let top = self.top.checked_add(dy).ok_or(overflow)?;
        top.checked_add(self.height_i32()).ok_or(overflow)?;
        self.top = top;
        Ok(())
    }

    /// Returns the panel whose span `[offset, offset + H)` contains `y`.
    #[must_use]
    pub fn panel_at(&self, y: f64) -> Option<Panel> {
        let top = f64::from(self.top);
        let height = f64::from(self.height);
        if y >= top && y < top + height {
            Some(Panel::Top)
        } else if y >= top + height && y < top + 2.0 * height {
            Some(Panel::Bottom)
        } else {
            None
        }
    }

    /// The panel currently covering most of the viewport.
    #[must_use]
    pub fn dominant(&self) -> Panel {
        if i64::from(self.top) > -(i64::from(self.height) / 2) {
            Panel::Top
        } else {
            Panel::Bottom
        }
    }

    pub(crate) fn height_i32(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_swaps_identity() {
        assert_eq!(Panel::Top.other(), Panel::Bottom);
        assert_eq!(Panel::Bottom.other(), Panel::Top);
    }

    #[test]
    fn bottom_tracks_top_after_every_shift() {
        let mut offsets = PanelOffsets::at_rest(800);
        for dy in [-5, -300, 12, 0, 1000, -1707] {
            offsets.shift(dy).unwrap();
            assert_eq!(
                offsets.bottom(),
                offsets.top() + 800,
                "coupling broken after shifting by {dy}"
            );
        }
    }

    #[test]
    fn overflowing_shift_is_rejected_and_leaves_offsets_untouched() {
        let mut offsets = PanelOffsets::with_top(i32::MAX - 2000, 1000);
        let err = offsets.shift(1500).unwrap_err();
        assert_eq!(
            err,
            SlideError::OffsetOverflow {
                offset: i32::MAX - 2000,
                dy: 1500
            }
        );
        assert_eq!(offsets.top(), i32::MAX - 2000);
    }

    #[test]
    fn panel_at_uses_half_open_spans() {
        let offsets = PanelOffsets::with_top(-250, 1000);
        assert_eq!(offsets.panel_at(-250.0), Some(Panel::Top));
        assert_eq!(offsets.panel_at(749.9), Some(Panel::Top));
        assert_eq!(offsets.panel_at(750.0), Some(Panel::Bottom));
        assert_eq!(offsets.panel_at(1749.9), Some(Panel::Bottom));
        assert_eq!(offsets.panel_at(1750.0), None);
        assert_eq!(offsets.panel_at(-251.0), None);
    }

    #[test]
    fn dominant_panel_flips_past_half_height() {
        assert_eq!(PanelOffsets::with_top(-499, 1000).dominant(), Panel::Top);
        assert_eq!(PanelOffsets::with_top(-500, 1000).dominant(), Panel::Bottom);
        assert_eq!(PanelOffsets::with_top(-1000, 1000).dominant(), Panel::Bottom);
    }
}
