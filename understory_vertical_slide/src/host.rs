// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::panel::Panel;

/// The view system hosting the two panels.
///
/// The slide never lays out or draws anything itself. It reads the panel
/// height and the display density from the host and asks the host to move
/// panels and to schedule frames.
pub trait SlideHost {
    /// Measured height of `panel` in pixels, queried once per layout pass.
    fn measured_height(&self, panel: Panel) -> u32;

    /// Shifts `panel` vertically by `dy` pixels relative to where it is.
    fn offset_panel(&mut self, panel: Panel, dy: i32);

    /// Schedules a redraw on the next animation frame.
    ///
    /// May be called several times per frame; one redraw is enough.
    fn request_redraw(&mut self);

    /// Ratio of physical pixels to density-independent pixels.
    fn density_scale(&self) -> f64 {
        1.0
    }
}
