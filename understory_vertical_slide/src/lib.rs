// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_vertical_slide --heading-base-level=0

//! Understory Vertical Slide: a two-panel vertical slide interaction.
//!
//! Two panels of equal height are stacked vertically and move as one rigid
//! unit. The user drags them with a single pointer; on release they either
//! snap so the other panel fills the view or spring back, depending on how
//! fast and how far the pointer travelled.
//!
//! The crate owns only the interaction state machine:
//!
//! - [`classify`]: decide whether a gesture is a vertical drag.
//! - [`drag`]: capture a panel and turn pointer motion into damped shifts.
//! - [`velocity`]: estimate the release velocity.
//! - [`release`]: pick the resting offset at pointer up.
//! - [`settle`]: animate to that offset, one frame at a time.
//!
//! [`VerticalSlide`] composes these into a message-passing state machine:
//! pointer events and frame ticks go in, [`SlideOutput`]s come out.
//! [`SlideController`] applies those outputs to a [`SlideHost`], the view
//! system that measures, moves and redraws the panels, and calls the
//! next-page listener.
//!
//! It does **not** lay out, draw, or route events through a view tree.
//! Callers are expected to:
//! - Report panel height on layout and place the panels at the returned
//!   [`PanelOffsets`].
//! - Offer pointer events to [`SlideController::should_intercept`] before the
//!   panels' contents see them, and route the stream to
//!   [`SlideController::on_touch`] once it returns `true`.
//! - Call [`SlideController::compute_scroll`] on every animation frame while
//!   it returns `true`.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_vertical_slide::{
//!     Panel, PointerEvent, SlideConfig, SlideController, SlideHost,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     top: i32,
//!     bottom: i32,
//!     redraw: bool,
//! }
//!
//! impl SlideHost for Host {
//!     fn measured_height(&self, _panel: Panel) -> u32 {
//!         800
//!     }
//!     fn offset_panel(&mut self, panel: Panel, dy: i32) {
//!         match panel {
//!             Panel::Top => self.top += dy,
//!             Panel::Bottom => self.bottom += dy,
//!         }
//!     }
//!     fn request_redraw(&mut self) {
//!         self.redraw = true;
//!     }
//! }
//!
//! let mut host = Host::default();
//! let mut slide = SlideController::new(&SlideConfig::default(), &host);
//! let offsets = slide.on_layout(&mut host).unwrap();
//! host.top = offsets.top();
//! host.bottom = offsets.bottom();
//!
//! // Drag the top panel up by 450 px, then let go.
//! slide.on_touch(&mut host, &PointerEvent::down(10.0, 600.0, 0));
//! slide.on_touch(&mut host, &PointerEvent::moved(10.0, 150.0, 100));
//! slide.on_touch(&mut host, &PointerEvent::up(10.0, 150.0, 200));
//!
//! // Damping moved the panels by a third; far enough to snap.
//! let mut now = 200;
//! while slide.compute_scroll(&mut host, now) {
//!     now += 16;
//! }
//! assert_eq!(host.top, -800);
//! assert_eq!(host.bottom, 0);
//! ```
//!
//! ## Coupling
//!
//! Offsets are top coordinates relative to the widget. The top panel rests
//! at `0` and the bottom panel at `H`; at every step
//! `bottom == top + H`, which [`PanelOffsets`] guarantees by storing only
//! the top offset.
//!
//! ## Failures
//!
//! Touch handling never fails outward. Input before layout is ignored, and
//! any other [`SlideError`] is logged through the `log` facade and aborts
//! the session in progress.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod classify;
pub mod drag;
pub mod release;
pub mod settle;
pub mod velocity;

mod config;
mod controller;
mod error;
mod event;
mod host;
mod panel;
mod slide;

pub use config::{SlideConfig, Thresholds};
pub use controller::SlideController;
pub use error::SlideError;
pub use event::{PointerEvent, PointerKind};
pub use host::SlideHost;
pub use panel::{Panel, PanelOffsets};
pub use slide::{Phase, SlideOutput, VerticalSlide};
