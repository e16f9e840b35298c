// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::mem;

use crate::classify::ScrollClassifier;
use crate::config::Thresholds;
use crate::drag::{DragSession, PendingCapture, capture_candidate};
use crate::error::SlideError;
use crate::event::{PointerEvent, PointerKind};
use crate::panel::{Panel, PanelOffsets};
use crate::release::{Release, resolve};
use crate::settle::SettleTask;

/// Coarse view of what the slide is doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No pointer down and nothing moving.
    Idle,
    /// A pointer is down but no panel is captured yet.
    Capturing,
    /// A panel follows the pointer.
    Dragging,
    /// A released panel is animating to rest.
    Settling,
}

/// What the host should do after an input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideOutput {
    /// Shift to apply to both panels.
    pub dy: i32,
    /// Whether a redraw should be scheduled.
    pub redraw: bool,
    /// Whether the next page should be told to initialize.
    pub show_next_page: bool,
    /// For [`VerticalSlide::intercept`], take the pointer stream; for
    /// [`VerticalSlide::touch`], the event was consumed; for
    /// [`VerticalSlide::frame`], another frame is needed.
    pub claimed: bool,
}

#[derive(Clone, Debug)]
enum State {
    Idle,
    Capturing(PendingCapture),
    Dragging(DragSession),
    Settling(SettleTask),
}

/// The drag/release/settle state machine for two coupled panels.
///
/// Pointer events and frame ticks go in, [`SlideOutput`]s come out; the
/// machine never calls into the host. Dragging and settling are variants of
/// one state, so at most one of them writes the offsets at any time.
///
/// ```
/// use understory_vertical_slide::{PointerEvent, Thresholds, VerticalSlide};
///
/// let mut slide = VerticalSlide::new(Thresholds::default());
/// slide.layout(1000).unwrap();
///
/// slide.touch(&PointerEvent::down(10.0, 500.0, 0));
/// let out = slide.touch(&PointerEvent::moved(10.0, 470.0, 16));
/// assert_eq!(out.dy, -10);
/// assert_eq!(slide.offsets().unwrap().top(), -10);
/// ```
#[derive(Clone, Debug)]
pub struct VerticalSlide {
    thresholds: Thresholds,
    offsets: Option<PanelOffsets>,
    state: State,
    scroll: ScrollClassifier,
}

impl VerticalSlide {
    /// Creates an un-laid-out slide.
    #[must_use]
    pub fn new(thresholds: Thresholds) -> Self {
        let scroll = ScrollClassifier::new(thresholds.touch_slop);
        Self {
            thresholds,
            offsets: None,
            state: State::Idle,
            scroll,
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Current panel offsets, once laid out.
    #[must_use]
    pub fn offsets(&self) -> Option<PanelOffsets> {
        self.offsets
    }

    /// What the slide is doing.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Capturing(_) => Phase::Capturing,
            State::Dragging(_) => Phase::Dragging,
            State::Settling(_) => Phase::Settling,
        }
    }

    /// The panel being dragged or settled, if any.
    #[must_use]
    pub fn captured_panel(&self) -> Option<Panel> {
        match &self.state {
            State::Dragging(session) => Some(session.panel()),
            State::Settling(task) => Some(task.panel()),
            State::Idle | State::Capturing(_) => None,
        }
    }

    /// Applies a layout pass with panel height `height`.
    ///
    /// The first pass puts the top panel at `0` and the bottom one at
    /// `height`. Later passes with the same height keep everything as is.
    /// A changed height drops any drag or settle and keeps showing the panel
    /// that covered most of the viewport, at its resting offset.
    pub fn layout(&mut self, height: u32) -> Result<PanelOffsets, SlideError> {
        if height == 0 {
            return Err(SlideError::ZeroHeight);
        }
        let offsets = match self.offsets {
            None => PanelOffsets::at_rest(height),
            Some(old) if old.height() == height => old,
            Some(old) => {
                self.abort();
                let rest = PanelOffsets::at_rest(height);
                match old.dominant() {
                    Panel::Top => rest,
                    Panel::Bottom => PanelOffsets::with_top(-rest.height_i32(), height),
                }
            }
        };
        self.offsets = Some(offsets);
        Ok(offsets)
    }

    /// Handles an event offered before the panels' children see it.
    ///
    /// `claimed` is `true` when the stream should be routed to
    /// [`touch`](Self::touch) from now on: the gesture is a vertical scroll
    /// and a panel is captured. Failures answer "not claimed".
    pub fn intercept(&mut self, event: &PointerEvent) -> SlideOutput {
        let result = self.try_intercept(event);
        self.absorb(result, "intercept")
    }

    /// Handles an event of a stream routed to the slide.
    ///
    /// Always consumes the event once laid out, including an event that
    /// fails and aborts the session.
    pub fn touch(&mut self, event: &PointerEvent) -> SlideOutput {
        let laid_out = self.offsets.is_some();
        let result = self.try_touch(event);
        SlideOutput {
            claimed: laid_out,
            ..self.absorb(result, "touch")
        }
    }

    /// Advances a settle animation to the frame at `now` (ms).
    pub fn frame(&mut self, now: u64) -> SlideOutput {
        let result = self.try_frame(now);
        self.absorb(result, "frame")
    }

    /// Drops any capture, drag or settle in progress.
    pub fn abort(&mut self) {
        if !matches!(self.state, State::Idle) {
            log::debug!("aborting {:?}", self.phase());
        }
        self.state = State::Idle;
        self.scroll.end();
    }

    fn absorb(&mut self, result: Result<SlideOutput, SlideError>, what: &str) -> SlideOutput {
        match result {
            Ok(out) => out,
            Err(SlideError::NotLaidOut) => {
                log::debug!("{what}: ignoring input before layout");
                SlideOutput::default()
            }
            Err(err) => {
                log::warn!("{what}: {err}; aborting session");
                self.abort();
                SlideOutput::default()
            }
        }
    }

    fn checked(&self, event: &PointerEvent) -> Result<PanelOffsets, SlideError> {
        let offsets = self.offsets.ok_or(SlideError::NotLaidOut)?;
        if !event.is_finite() {
            return Err(SlideError::NonFinitePosition {
                x: event.position.x,
                y: event.position.y,
            });
        }
        Ok(offsets)
    }

    fn try_intercept(&mut self, event: &PointerEvent) -> Result<SlideOutput, SlideError> {
        let offsets = self.checked(event)?;
        match event.kind {
            PointerKind::Down => {
                self.scroll.down(event.position);
                self.press(event, &offsets, false);
                Ok(SlideOutput::default())
            }
            PointerKind::Move => {
                let vertical = self.scroll.is_vertical(event.position);
                match &mut self.state {
                    State::Capturing(pending) => {
                        pending.observe(event.position, event.time);
                        self.try_capture();
                    }
                    State::Dragging(session) => session.follow(event.position, event.time),
                    State::Idle | State::Settling(_) => {}
                }
                Ok(SlideOutput {
                    claimed: vertical && self.phase() == Phase::Dragging,
                    ..SlideOutput::default()
                })
            }
            PointerKind::Up | PointerKind::Cancel => {
                self.scroll.end();
                // A panel caught mid-settle but never claimed must not stay
                // between resting positions.
                self.lift(0.0, event.time)
            }
        }
    }

    fn try_touch(&mut self, event: &PointerEvent) -> Result<SlideOutput, SlideError> {
        let offsets = self.checked(event)?;
        match event.kind {
            PointerKind::Down => {
                self.press(event, &offsets, true);
                Ok(SlideOutput::default())
            }
            PointerKind::Move => self.drag(event),
            PointerKind::Up => {
                let velocity = match &mut self.state {
                    State::Dragging(session) => {
                        session.follow(event.position, event.time);
                        session.release_velocity(&self.thresholds)
                    }
                    _ => 0.0,
                };
                self.lift(velocity, event.time)
            }
            PointerKind::Cancel => self.lift(0.0, event.time),
        }
    }

    fn try_frame(&mut self, now: u64) -> Result<SlideOutput, SlideError> {
        let State::Settling(task) = &self.state else {
            return Ok(SlideOutput::default());
        };
        let offsets = self.offsets.as_mut().ok_or(SlideError::NotLaidOut)?;
        let step = task.step(now);
        let current = offsets.get(task.panel());
        let dy = step
            .offset
            .checked_sub(current)
            .ok_or(SlideError::OffsetOverflow {
                offset: current,
                dy: step.offset,
            })?;
        offsets.shift(dy)?;
        log::trace!("settle frame at {now}: dy={dy} done={}", step.done);
        if step.done {
            self.state = State::Idle;
        }
        Ok(SlideOutput {
            dy,
            redraw: dy != 0 || !step.done,
            show_next_page: false,
            claimed: !step.done,
        })
    }

    /// Pointer down: stop any settle, then capture or start following.
    fn press(&mut self, event: &PointerEvent, offsets: &PanelOffsets, capture_now: bool) {
        let settling = matches!(self.state, State::Settling(_));
        if settling {
            log::debug!("pointer down preempts settle");
        }
        let pos = event.position;
        let under = offsets.panel_at(pos.y);
        let candidate = capture_candidate(offsets, pos, self.thresholds.edge_size);
        let pending = PendingCapture::new(pos, event.time, candidate);
        self.state = match under {
            Some(panel) if capture_now || settling => State::Dragging(pending.into_session(panel)),
            _ => State::Capturing(pending),
        };
    }

    /// Promotes a pending capture once the pointer has moved past the slop.
    fn try_capture(&mut self) {
        let State::Capturing(pending) = &self.state else {
            return;
        };
        let Some(panel) = pending.candidate() else {
            return;
        };
        if !pending.is_past_slop(self.thresholds.capture_slop) {
            return;
        }
        if let State::Capturing(pending) = mem::replace(&mut self.state, State::Idle) {
            log::debug!("captured {panel}");
            self.state = State::Dragging(pending.into_session(panel));
        }
    }

    fn drag(&mut self, event: &PointerEvent) -> Result<SlideOutput, SlideError> {
        let offsets = self.offsets.as_mut().ok_or(SlideError::NotLaidOut)?;
        match &mut self.state {
            State::Capturing(pending) => {
                pending.observe(event.position, event.time);
                self.try_capture();
                Ok(SlideOutput::default())
            }
            State::Dragging(session) => {
                let dy = session.update(
                    event.position.x,
                    event.position.y,
                    event.time,
                    self.thresholds.damping,
                );
                if dy == 0 {
                    return Ok(SlideOutput::default());
                }
                offsets.shift(dy)?;
                Ok(SlideOutput {
                    dy,
                    redraw: true,
                    ..SlideOutput::default()
                })
            }
            State::Idle | State::Settling(_) => Ok(SlideOutput::default()),
        }
    }

    /// Pointer up or cancel: release a dragged panel, or settle panels left
    /// between resting positions.
    fn lift(&mut self, velocity: f64, now: u64) -> Result<SlideOutput, SlideError> {
        let offsets = self.offsets.ok_or(SlideError::NotLaidOut)?;
        match mem::replace(&mut self.state, State::Idle) {
            State::Dragging(session) => self.release(session.panel(), velocity, now),
            State::Capturing(_) if !is_at_rest(&offsets) => {
                self.release(offsets.dominant(), 0.0, now)
            }
            State::Settling(task) => {
                self.state = State::Settling(task);
                Ok(SlideOutput::default())
            }
            State::Capturing(_) | State::Idle => Ok(SlideOutput::default()),
        }
    }

    fn release(
        &mut self,
        panel: Panel,
        velocity: f64,
        now: u64,
    ) -> Result<SlideOutput, SlideError> {
        let offsets = self.offsets.ok_or(SlideError::NotLaidOut)?;
        let current = offsets.get(panel);
        let Release {
            target,
            show_next_page,
        } = resolve(panel, current, velocity, offsets.height(), &self.thresholds);
        log::debug!("released {panel} at {current} with v={velocity}: target {target}");
        if target == current {
            self.state = State::Idle;
        } else {
            self.state = State::Settling(SettleTask::start(
                panel,
                current,
                target,
                velocity,
                offsets.height(),
                now,
                &self.thresholds,
            ));
        }
        Ok(SlideOutput {
            dy: 0,
            redraw: target != current,
            show_next_page,
            claimed: false,
        })
    }
}

fn is_at_rest(offsets: &PanelOffsets) -> bool {
    offsets.top() == 0 || offsets.top() == -offsets.height_i32()
}
