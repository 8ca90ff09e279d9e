//! src/engine/viewport.rs
//!
//! Horizontal viewport: auto-follow versus manual pan.
//!
//! # Modes
//! - **Auto** keeps the newest sample pinned to the right edge; every data
//!   arrival moves the window.
//! - **Manual** is entered by any drag begin or user scroll. The offset then
//!   only changes on user input and is clamped to `[0, max_offset]`.
//!
//! # Reversion
//! Ending a drag within `snap_tolerance_px` of the right edge returns to Auto
//! at once. Otherwise a revert timer is armed for `idle_timeout`; any new
//! interaction cancels it and the next drag end re-arms it. The timer is
//! polled through [`ViewportController::tick`] with an explicit `now`, and
//! fires at most once per arming.
//!
//! # Drag arithmetic
//! A thumb drag moves the content by
//! `delta * (content_width - width) / (track_width - thumb_width)`.
//! A canvas drag moves it by the inverse pointer delta (dragging right shows
//! older data).

use std::time::{Duration, Instant};

use log::{debug, info};

use super::config::{FeedDirection, ViewportConfig};
use super::mapper::CoordinateMapper;
use super::range::RangeState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Auto,
    Manual,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragSource {
    #[default]
    None,
    ScrollThumb,
    Canvas,
}

/// User input delivered by the drawing surface, in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    DragBegin { source: DragSource, x: f64 },
    DragMove { x: f64 },
    DragEnd,
    /// The pointer left the surface; ends an active drag.
    PointerLeave,
    /// Absolute scroll position chosen by the user.
    ScrollTo { offset: f64 },
    /// Relative scroll (wheel, arrow keys).
    ScrollBy { delta: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub mode: Mode,
    pub horizontal_offset: f64,
    pub scale: f64,
    pub drag_source: DragSource,
    pub last_interaction: Option<Instant>,
}

/// Scrollbar thumb placement along a track as wide as the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scrollbar {
    pub track_width: f64,
    pub thumb_left: f64,
    pub thumb_width: f64,
}

impl Scrollbar {
    pub fn contains(&self, x: f64) -> bool {
        x >= self.thumb_left && x <= self.thumb_left + self.thumb_width
    }
}

/// Cancellable one-shot deadline.
#[derive(Clone, Copy, Debug, Default)]
struct RevertTimer {
    deadline: Option<Instant>,
}

impl RevertTimer {
    fn arm(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    /// `true` exactly once, the first time `now` reaches the deadline.
    fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum DragAnchor {
    Thumb { start_x: f64, start_offset: f64 },
    Canvas { last_x: f64 },
}

/// Sole owner of [`ViewportState`].
#[derive(Debug)]
pub struct ViewportController {
    config: ViewportConfig,
    state: ViewportState,
    width: f64,
    height: f64,
    highest: Option<i64>,
    anchor: Option<DragAnchor>,
    revert: RevertTimer,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        let state = ViewportState {
            mode: Mode::Auto,
            horizontal_offset: 0.0,
            scale: config.scale,
            drag_source: DragSource::None,
            last_interaction: None,
        };
        Self {
            config,
            state,
            width: 0.0,
            height: 0.0,
            highest: None,
            anchor: None,
            revert: RevertTimer::default(),
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn offset(&self) -> f64 {
        self.state.horizontal_offset
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Deadline of a pending return to Auto, if armed.
    pub fn revert_deadline(&self) -> Option<Instant> {
        self.revert.deadline
    }

    /// Logical width of the whole session.
    pub fn content_width(&self) -> f64 {
        self.highest
            .map_or(0.0, |h| h.max(0) as f64 * self.state.scale)
    }

    pub fn max_offset(&self) -> f64 {
        (self.content_width() - self.width).max(0.0)
    }

    /// Blank space before index 0 while the session is narrower than the view.
    pub fn lead(&self) -> f64 {
        match self.config.feed {
            FeedDirection::FromRight => (self.width - self.content_width()).max(0.0),
            FeedDirection::FromLeft => 0.0,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.settle();
    }

    /// New highest index after a data arrival.
    pub fn on_data(&mut self, highest: Option<i64>) {
        self.highest = highest;
        self.settle();
    }

    /// Change the horizontal zoom. Manual mode keeps the left edge index.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        let scale = scale.clamp(self.config.min_scale, self.config.max_scale);
        let left_index = self.state.horizontal_offset / self.state.scale;
        self.state.scale = scale;
        self.state.horizontal_offset = left_index * scale;
        self.settle();
    }

    /// Explicit return to auto-follow.
    pub fn follow_latest(&mut self) {
        self.end_drag();
        self.revert.cancel();
        self.enter_auto();
    }

    /// Apply one input event. Returns `true` when the offset or mode changed.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> bool {
        let before = (self.state.mode, self.state.horizontal_offset);
        match event {
            InputEvent::DragBegin { source, x } => self.begin_drag(source, x, now),
            InputEvent::DragMove { x } => self.drag_to(x, now),
            InputEvent::DragEnd | InputEvent::PointerLeave => {
                if self.end_drag() {
                    self.finish_interaction(now);
                }
            }
            // A scroll completes any drag in progress.
            InputEvent::ScrollTo { offset } => {
                if offset.is_finite() {
                    self.end_drag();
                    self.enter_manual(now);
                    self.state.horizontal_offset = self.clamp_offset(offset);
                    self.finish_interaction(now);
                }
            }
            InputEvent::ScrollBy { delta } => {
                if delta.is_finite() {
                    self.end_drag();
                    self.enter_manual(now);
                    let target = self.state.horizontal_offset + delta;
                    self.state.horizontal_offset = self.clamp_offset(target);
                    self.finish_interaction(now);
                }
            }
        }
        before != (self.state.mode, self.state.horizontal_offset)
    }

    /// Poll the revert timer. Returns `true` on the transition back to Auto.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.anchor.is_some() || self.state.mode == Mode::Auto {
            return false;
        }
        if self.revert.fire_if_due(now) {
            info!("idle timeout elapsed, resuming auto-follow");
            self.enter_auto();
            return true;
        }
        false
    }

    pub fn scrollbar(&self) -> Option<Scrollbar> {
        let content = self.content_width();
        if content <= self.width || self.width <= 0.0 {
            return None;
        }
        let track_width = self.width;
        let thumb_width = (self.width * self.width / content)
            .max(self.config.min_thumb_width)
            .min(track_width);
        let travel = track_width - thumb_width;
        let max = self.max_offset();
        let thumb_left = if max > 0.0 {
            self.state.horizontal_offset / max * travel
        } else {
            0.0
        };
        Some(Scrollbar {
            track_width,
            thumb_left,
            thumb_width,
        })
    }

    /// Mapper for the current window and the given value range.
    pub fn mapper(&self, range: &RangeState) -> CoordinateMapper {
        CoordinateMapper {
            width: self.width,
            height: self.height,
            scale: self.state.scale,
            offset: self.state.horizontal_offset,
            lead: self.lead(),
            margin_top: self.config.margin_top,
            margin_bottom: self.config.margin_bottom,
            display_min: range.display_min,
            display_max: range.display_max,
        }
    }

    fn begin_drag(&mut self, source: DragSource, x: f64, now: Instant) {
        if !x.is_finite() {
            return;
        }
        let anchor = match source {
            DragSource::ScrollThumb => DragAnchor::Thumb {
                start_x: x,
                start_offset: self.state.horizontal_offset,
            },
            DragSource::Canvas => DragAnchor::Canvas { last_x: x },
            DragSource::None => return,
        };
        self.enter_manual(now);
        self.anchor = Some(anchor);
        self.state.drag_source = source;
    }

    fn drag_to(&mut self, x: f64, now: Instant) {
        if !x.is_finite() {
            return;
        }
        let Some(anchor) = self.anchor else {
            return;
        };
        self.enter_manual(now);
        match anchor {
            DragAnchor::Thumb {
                start_x,
                start_offset,
            } => {
                let Some(bar) = self.scrollbar() else {
                    return;
                };
                let travel = bar.track_width - bar.thumb_width;
                if travel <= f64::EPSILON {
                    return;
                }
                let ratio = self.max_offset() / travel;
                let target = start_offset + (x - start_x) * ratio;
                self.state.horizontal_offset = self.clamp_offset(target);
            }
            DragAnchor::Canvas { last_x } => {
                let target = self.state.horizontal_offset - (x - last_x);
                self.state.horizontal_offset = self.clamp_offset(target);
                self.anchor = Some(DragAnchor::Canvas { last_x: x });
            }
        }
    }

    /// Drop the drag anchor. Returns `true` if a drag was active.
    fn end_drag(&mut self) -> bool {
        self.state.drag_source = DragSource::None;
        self.anchor.take().is_some()
    }

    fn enter_manual(&mut self, now: Instant) {
        self.revert.cancel();
        self.state.last_interaction = Some(now);
        if self.state.mode == Mode::Auto {
            debug!("manual pan at offset {:.1}", self.state.horizontal_offset);
            self.state.mode = Mode::Manual;
        }
    }

    fn enter_auto(&mut self) {
        self.state.mode = Mode::Auto;
        self.settle();
    }

    fn finish_interaction(&mut self, now: Instant) {
        let edge = self.max_offset() - self.config.snap_tolerance_px;
        if self.state.horizontal_offset >= edge {
            self.revert.cancel();
            self.enter_auto();
        } else {
            self.revert.arm(now, self.config.idle_timeout);
        }
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        if offset.is_finite() {
            offset.clamp(0.0, self.max_offset())
        } else {
            0.0
        }
    }

    /// Pin in Auto mode, clamp in Manual mode.
    fn settle(&mut self) {
        self.state.horizontal_offset = match self.state.mode {
            Mode::Auto => self.max_offset(),
            Mode::Manual => self.clamp_offset(self.state.horizontal_offset),
        };
    }
}
