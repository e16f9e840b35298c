// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release resolver: where should the panels come to rest?
//!
//! ```
//! use understory_vertical_slide::release::resolve;
//! use understory_vertical_slide::{Panel, Thresholds};
//!
//! let thresholds = Thresholds::default();
//! // A fast upward flick on the top panel reveals the bottom panel.
//! let release = resolve(Panel::Top, -10, -7000.0, 1000, &thresholds);
//! assert_eq!(release.target, -1000);
//! assert!(release.show_next_page);
//! ```

use crate::config::Thresholds;
use crate::panel::Panel;

/// Outcome of a release.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Release {
    /// Resting offset for the released panel.
    pub target: i32,
    /// Whether the next page should be told to initialize.
    pub show_next_page: bool,
}

/// Picks the resting offset for `panel`, released at `offset` with
/// vertical `velocity` (px/s, positive downwards), for panels of `height`.
///
/// Releasing [`Panel::Top`] fast upwards or further up than the distance
/// threshold slides it fully up to `-height` and asks for the next page.
/// Releasing [`Panel::Bottom`] fast downwards or further down than the
/// threshold slides it back to `+height`. Anything else springs back to `0`.
#[must_use]
pub fn resolve(
    panel: Panel,
    offset: i32,
    velocity: f64,
    height: u32,
    thresholds: &Thresholds,
) -> Release {
    let height = i32::try_from(height).unwrap_or(i32::MAX);
    match panel {
        Panel::Top if velocity < -thresholds.velocity || offset < -thresholds.distance => {
            Release {
                target: -height,
                show_next_page: true,
            }
        }
        Panel::Bottom if velocity > thresholds.velocity || offset > thresholds.distance => {
            Release {
                target: height,
                show_next_page: false,
            }
        }
        _ => Release {
            target: 0,
            show_next_page: false,
        },
    }
}
