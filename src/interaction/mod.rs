mod debounce;

pub use debounce::Debouncer;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// Keyboard modifiers held while an input event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    #[must_use]
    pub fn contains(self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Alt => self.alt,
            ModifierKey::Meta => self.meta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierKey {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

/// Raw input forwarded by the embedding surface, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerDrag { dx: f64 },
    PointerUp,
    TouchStart { x: f64, y: f64 },
    TouchDrag { dx: f64 },
    TouchEnd,
    Wheel {
        x: f64,
        delta_x: f64,
        delta_y: f64,
        modifiers: Modifiers,
    },
}

/// Gesture admitted by the filter and ready for the viewport controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    PanStart,
    Pan { dx: f64 },
    PanEnd,
    WheelZoom { anchor_px: f64, delta_y: f64 },
    WheelPan { delta_x: f64 },
}

/// Decides which raw events turn into gestures.
///
/// Drags always pan. Wheel events only zoom or pan while `wheel_modifier` is
/// held, so plain scrolling stays with the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureFilter {
    pub wheel_modifier: ModifierKey,
    pub drag_pan: bool,
    pub touch_pan: bool,
}

impl Default for GestureFilter {
    fn default() -> Self {
        Self {
            wheel_modifier: ModifierKey::Shift,
            drag_pan: true,
            touch_pan: true,
        }
    }
}

impl GestureFilter {
    #[must_use]
    pub fn admit(self, event: InputEvent) -> Option<Gesture> {
        match event {
            InputEvent::PointerDown { .. } if self.drag_pan => Some(Gesture::PanStart),
            InputEvent::PointerDrag { dx } if self.drag_pan => Some(Gesture::Pan { dx }),
            InputEvent::PointerUp if self.drag_pan => Some(Gesture::PanEnd),
            InputEvent::TouchStart { .. } if self.touch_pan => Some(Gesture::PanStart),
            InputEvent::TouchDrag { dx } if self.touch_pan => Some(Gesture::Pan { dx }),
            InputEvent::TouchEnd if self.touch_pan => Some(Gesture::PanEnd),
            InputEvent::Wheel {
                x,
                delta_x,
                delta_y,
                modifiers,
            } => {
                if !modifiers.contains(self.wheel_modifier) {
                    return None;
                }
                // Some platforms report shift+wheel as a horizontal delta.
                if delta_y != 0.0 {
                    Some(Gesture::WheelZoom {
                        anchor_px: x,
                        delta_y,
                    })
                } else if delta_x != 0.0 {
                    Some(Gesture::WheelPan { delta_x })
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    cursor_x: f64,
    cursor_y: f64,
    pointer_inside: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            cursor_x: 0.0,
            cursor_y: 0.0,
            pointer_inside: false,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn cursor(self) -> Option<(f64, f64)> {
        self.pointer_inside
            .then_some((self.cursor_x, self.cursor_y))
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor_x = x;
        self.cursor_y = y;
        self.pointer_inside = true;
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer_inside = false;
    }

    pub fn on_pan_start(&mut self) {
        self.mode = InteractionMode::Panning;
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}
