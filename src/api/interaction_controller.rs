use tracing::trace;

use crate::core::ZoomTransform;
use crate::error::GanttResult;
use crate::interaction::{Gesture, InputEvent, InteractionMode};
use crate::render::Renderer;

use super::GanttEngine;
use super::hover::HoverEvent;

/// What `handle_input` did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not a gesture for this chart; the host may handle it (e.g. page scroll).
    Ignored,
    /// State changed without a render.
    Updated,
    /// Transform changed and a frame was rendered.
    Rendered,
    /// Transform changed and a debounced render is pending; see `poll`.
    Scheduled,
}

impl<R: Renderer> GanttEngine<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Feeds one raw input event. Coordinates are viewport pixels and
    /// `now_ms` is the host clock used for render debouncing.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: u64) -> GanttResult<InputOutcome> {
        let Some(gesture) = self.config.gesture_filter.admit(event) else {
            trace!(?event, "input ignored");
            return Ok(InputOutcome::Ignored);
        };
        trace!(?gesture, "gesture");

        match gesture {
            Gesture::PanStart => {
                self.interaction.on_pan_start();
                Ok(InputOutcome::Updated)
            }
            Gesture::PanEnd => {
                self.interaction.on_pan_end();
                Ok(InputOutcome::Updated)
            }
            Gesture::Pan { dx } => {
                if self.interaction.mode() != InteractionMode::Panning {
                    return Ok(InputOutcome::Ignored);
                }
                self.controller.pan_by_pixels(dx)?;
                self.after_gesture(now_ms)
            }
            Gesture::WheelZoom { anchor_px, delta_y } => {
                let anchor_px = anchor_px - self.config.margins.left;
                self.controller.wheel_zoom(delta_y, anchor_px)?;
                self.after_gesture(now_ms)
            }
            Gesture::WheelPan { delta_x } => {
                self.controller.wheel_pan(delta_x)?;
                self.after_gesture(now_ms)
            }
        }
    }

    /// Runs a debounced render once its delay has elapsed.
    ///
    /// Returns `true` when a frame was rendered.
    pub fn poll(&mut self, now_ms: u64) -> GanttResult<bool> {
        let fired = self
            .debouncer
            .as_mut()
            .is_some_and(|debouncer| debouncer.fire_if_due(now_ms));
        if fired && self.mounted {
            self.render()?;
            return Ok(true);
        }
        Ok(false)
    }

    #[must_use]
    pub fn has_pending_render(&self) -> bool {
        self.debouncer
            .is_some_and(|debouncer| debouncer.is_pending())
    }

    /// Clamps and stores `raw`, rendering immediately when mounted.
    pub fn apply_gesture(&mut self, raw: ZoomTransform) -> GanttResult<ZoomTransform> {
        let stored = self.controller.apply_gesture(raw)?;
        self.after_programmatic_change()?;
        Ok(stored)
    }

    pub fn pan_by_pixels(&mut self, dx: f64) -> GanttResult<ZoomTransform> {
        let stored = self.controller.pan_by_pixels(dx)?;
        self.after_programmatic_change()?;
        Ok(stored)
    }

    /// Zooms around a plot-local anchor pixel.
    pub fn zoom_at(&mut self, factor: f64, anchor_px: f64) -> GanttResult<ZoomTransform> {
        let stored = self.controller.zoom_at(factor, anchor_px)?;
        self.after_programmatic_change()?;
        Ok(stored)
    }

    pub fn reset_zoom(&mut self) -> GanttResult<()> {
        self.controller.reset();
        self.after_programmatic_change()
    }

    /// Updates hover state for a pointer at viewport coordinates `(x, y)`.
    ///
    /// Hit testing uses the last rendered commands, so nothing is reported
    /// while unmounted.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Vec<HoverEvent> {
        self.interaction.on_pointer_move(x, y);
        if !self.mounted {
            return Vec::new();
        }
        let plot_x = x - self.config.margins.left;
        let plot_y = y - self.config.margins.top - self.config.axis_height_px;
        let hit_row = self
            .last_commands
            .as_ref()
            .and_then(|commands| commands.row_at(plot_x, plot_y));
        let events = self.hover.update(hit_row, &self.steps, x, y);
        if let Some(tooltip) = self.tooltip.as_mut() {
            for event in &events {
                tooltip.apply(event);
            }
        }
        events
    }

    pub fn pointer_leave(&mut self) -> Option<HoverEvent> {
        self.interaction.on_pointer_leave();
        let event = self.hover.leave()?;
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.apply(&event);
        }
        Some(event)
    }

    fn after_gesture(&mut self, now_ms: u64) -> GanttResult<InputOutcome> {
        if !self.mounted {
            self.last_commands = None;
            return Ok(InputOutcome::Updated);
        }
        match self.debouncer.as_mut() {
            Some(debouncer) => {
                debouncer.schedule(now_ms);
                Ok(InputOutcome::Scheduled)
            }
            None => {
                self.render()?;
                Ok(InputOutcome::Rendered)
            }
        }
    }

    fn after_programmatic_change(&mut self) -> GanttResult<()> {
        if self.mounted {
            if let Some(debouncer) = self.debouncer.as_mut() {
                debouncer.cancel();
            }
            self.render()
        } else {
            self.last_commands = None;
            Ok(())
        }
    }
}
