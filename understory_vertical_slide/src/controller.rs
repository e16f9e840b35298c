// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use crate::config::{SlideConfig, Thresholds};
use crate::event::PointerEvent;
use crate::host::SlideHost;
use crate::panel::{Panel, PanelOffsets};
use crate::slide::{Phase, SlideOutput, VerticalSlide};

/// Ties a [`VerticalSlide`] to a [`SlideHost`].
///
/// The controller forwards host input to the state machine and applies what
/// comes back: both panels are shifted together, redraws are requested, and
/// the next-page listener is called synchronously, once per release that
/// reveals the bottom panel.
pub struct SlideController {
    slide: VerticalSlide,
    on_show_next_page: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for SlideController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideController")
            .field("slide", &self.slide)
            .field("on_show_next_page", &self.on_show_next_page.is_some())
            .finish()
    }
}

impl SlideController {
    /// Creates a controller, resolving `config` with the host's density.
    #[must_use]
    pub fn new<H: SlideHost + ?Sized>(config: &SlideConfig, host: &H) -> Self {
        Self {
            slide: VerticalSlide::new(config.resolve(host.density_scale())),
            on_show_next_page: None,
        }
    }

    /// Sets the listener called when a release slides the top panel away.
    pub fn set_on_show_next_page(&mut self, listener: impl FnMut() + 'static) {
        self.on_show_next_page = Some(Box::new(listener));
    }

    /// Removes the next-page listener.
    pub fn clear_on_show_next_page(&mut self) {
        self.on_show_next_page = None;
    }

    /// Runs a layout pass and returns the offsets to place the panels at.
    ///
    /// Returns `None`, leaving the panels where they are, if the host reports
    /// a zero height.
    pub fn on_layout<H: SlideHost + ?Sized>(&mut self, host: &mut H) -> Option<PanelOffsets> {
        let height = host.measured_height(Panel::Top);
        match self.slide.layout(height) {
            Ok(offsets) => Some(offsets),
            Err(err) => {
                log::warn!("layout skipped: {err}");
                None
            }
        }
    }

    /// Returns `true` if the slide should take over the pointer stream.
    pub fn should_intercept<H: SlideHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
    ) -> bool {
        let out = self.slide.intercept(event);
        self.apply(host, out);
        out.claimed
    }

    /// Handles an event of the owned pointer stream.
    ///
    /// Returns `true` for every event once the panels are laid out.
    pub fn on_touch<H: SlideHost + ?Sized>(&mut self, host: &mut H, event: &PointerEvent) -> bool {
        let out = self.slide.touch(event);
        self.apply(host, out);
        out.claimed
    }

    /// Advances the settle animation to the frame at `now` (ms).
    ///
    /// Returns `true` while another frame is needed.
    pub fn compute_scroll<H: SlideHost + ?Sized>(&mut self, host: &mut H, now: u64) -> bool {
        let out = self.slide.frame(now);
        self.apply(host, out);
        out.claimed
    }

    /// Current offsets, once laid out.
    #[must_use]
    pub fn offsets(&self) -> Option<PanelOffsets> {
        self.slide.offsets()
    }

    /// What the slide is doing.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.slide.phase()
    }

    /// Returns `true` while a panel follows the pointer.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase() == Phase::Dragging
    }

    /// Returns `true` while a settle animation is running.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.phase() == Phase::Settling
    }

    /// The panel being dragged or settled, if any.
    #[must_use]
    pub fn captured_panel(&self) -> Option<Panel> {
        self.slide.captured_panel()
    }

    /// Thresholds resolved for the host's density.
    #[must_use]
    pub fn thresholds(&self) -> &Thresholds {
        self.slide.thresholds()
    }

    fn apply<H: SlideHost + ?Sized>(&mut self, host: &mut H, out: SlideOutput) {
        if out.dy != 0 {
            host.offset_panel(Panel::Top, out.dy);
            host.offset_panel(Panel::Bottom, out.dy);
        }
        if out.redraw {
            host.request_redraw();
        }
        if let Some(listener) = self
            .on_show_next_page
            .as_mut()
            .filter(|_| out.show_next_page)
        {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use super::*;

    #[derive(Default)]
    struct Host {
        height: u32,
        shifts: Vec<(Panel, i32)>,
        redraws: usize,
    }

    impl SlideHost for Host {
        fn measured_height(&self, _panel: Panel) -> u32 {
            self.height
        }

        fn offset_panel(&mut self, panel: Panel, dy: i32) {
            self.shifts.push((panel, dy));
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }

        fn density_scale(&self) -> f64 {
            2.0
        }
    }

    fn host() -> Host {
        Host {
            height: 1000,
            ..Host::default()
        }
    }

    #[test]
    fn density_is_read_at_construction() {
        let controller = SlideController::new(&SlideConfig::default(), &host());
        assert_eq!(controller.thresholds().distance, 120);
    }

    #[test]
    fn both_panels_receive_each_shift() {
        let mut host = host();
        let mut controller = SlideController::new(&SlideConfig::default(), &host);
        controller.on_layout(&mut host).unwrap();
        assert!(controller.on_touch(&mut host, &PointerEvent::down(0.0, 500.0, 0)));
        assert!(controller.on_touch(&mut host, &PointerEvent::moved(0.0, 530.0, 16)));
        assert_eq!(host.shifts, [(Panel::Top, 10), (Panel::Bottom, 10)]);
        assert_eq!(host.redraws, 1);
    }

    #[test]
    fn zero_height_layout_leaves_controller_inert() {
        let mut host = Host::default();
        let mut controller = SlideController::new(&SlideConfig::default(), &host);
        assert_eq!(controller.on_layout(&mut host), None);
        assert!(!controller.on_touch(&mut host, &PointerEvent::down(0.0, 0.0, 0)));
        assert!(host.shifts.is_empty());
    }

    #[test]
    fn listener_fires_once_per_revealing_release() {
        let mut host = host();
        let mut controller = SlideController::new(&SlideConfig::default(), &host);
        controller.on_layout(&mut host).unwrap();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        controller.set_on_show_next_page(move || seen.set(seen.get() + 1));

        controller.on_touch(&mut host, &PointerEvent::down(0.0, 900.0, 0));
        controller.on_touch(&mut host, &PointerEvent::moved(0.0, 300.0, 200));
        controller.on_touch(&mut host, &PointerEvent::up(0.0, 300.0, 400));
        assert_eq!(calls.get(), 1);

        let mut now = 400;
        while controller.compute_scroll(&mut host, now + 16) {
            now += 16;
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(controller.offsets().unwrap().top(), -1000);
        let total: i32 = host
            .shifts
            .iter()
            .filter(|(panel, _)| *panel == Panel::Top)
            .map(|(_, dy)| dy)
            .sum();
        assert_eq!(total, -1000);
    }

    #[test]
    fn cleared_listener_is_not_called() {
        let mut host = host();
        let mut controller = SlideController::new(&SlideConfig::default(), &host);
        controller.on_layout(&mut host).unwrap();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        controller.set_on_show_next_page(move || seen.set(seen.get() + 1));
        controller.clear_on_show_next_page();

        controller.on_touch(&mut host, &PointerEvent::down(0.0, 900.0, 0));
        controller.on_touch(&mut host, &PointerEvent::moved(0.0, 300.0, 200));
        controller.on_touch(&mut host, &PointerEvent::up(0.0, 300.0, 400));
        assert_eq!(calls.get(), 0);
        assert!(controller.is_settling());
    }
}
