//! Converts raw platform events into camera commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! button and modifier state) and the key-binding map. It is the only
//! thing that sits between raw window events and the session's
//! [`execute`](crate::session::ViewerSession::execute) method.

use glam::Vec2;

use super::event::InputEvent;
use crate::camera::MoveDirection;
use crate::options::KeybindingOptions;

/// Camera actions produced from input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Orbit around the target by a cursor delta in pixels.
    Rotate {
        /// Cursor motion since the last event.
        delta: Vec2,
    },
    /// Slide the target and eye in the view plane.
    Pan {
        /// Cursor motion since the last event.
        delta: Vec2,
    },
    /// Dolly toward (positive) or away from the target.
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
    /// A movement key changed state.
    Move {
        /// Bound direction.
        direction: MoveDirection,
        /// `true` while held.
        pressed: bool,
    },
}

/// Converts raw window events into [`CameraCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = processor.handle_event(event) {
///     session.execute(cmd);
/// }
/// if let Some(cmd) = processor.handle_key("KeyW", true) {
///     session.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Last cursor position, `None` until the first move.
    cursor: Option<Vec2>,
    /// Whether the primary mouse button is currently held.
    mouse_pressed: bool,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a processor with the given key bindings.
    #[must_use]
    pub fn new(key_bindings: KeybindingOptions) -> Self {
        Self {
            key_bindings,
            ..Self::default()
        }
    }

    /// Last known cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace the key bindings (e.g. after reloading options).
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
    }

    /// Forget held buttons and modifiers, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.mouse_pressed = false;
        self.shift_pressed = false;
    }

    /// Map a physical key string (`"KeyW"`, `"ArrowUp"`, ...) to a
    /// movement command, if bound.
    #[must_use]
    pub fn handle_key(&self, code: &str, pressed: bool) -> Option<CameraCommand> {
        self.key_bindings
            .lookup(code)
            .map(|direction| CameraCommand::Move { direction, pressed })
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<CameraCommand> {
        match event {
            InputEvent::Cursor { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::PrimaryButton { pressed } => {
                self.mouse_pressed = pressed;
                None
            }
            InputEvent::Wheel { delta } => Some(CameraCommand::Zoom { delta }),
            InputEvent::Shift { held } => {
                self.shift_pressed = held;
                None
            }
        }
    }

    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<CameraCommand> {
        let pos = Vec2::new(x, y);
        let last = self.cursor.replace(pos)?;
        if !self.mouse_pressed {
            return None;
        }

        let delta = pos - last;
        if delta == Vec2::ZERO {
            return None;
        }
        if self.shift_pressed {
            Some(CameraCommand::Pan { delta })
        } else {
            Some(CameraCommand::Rotate { delta })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(processor: &mut InputProcessor) {
        let _ = processor.handle_event(InputEvent::PrimaryButton { pressed: true });
    }

    #[test]
    fn hover_without_button_does_nothing() {
        let mut p = InputProcessor::default();
        assert_eq!(p.handle_event(InputEvent::Cursor { x: 1.0, y: 1.0 }), None);
        assert_eq!(p.handle_event(InputEvent::Cursor { x: 5.0, y: 1.0 }), None);
    }

    #[test]
    fn drag_rotates_by_delta() {
        let mut p = InputProcessor::default();
        let _ = p.handle_event(InputEvent::Cursor { x: 10.0, y: 10.0 });
        press(&mut p);
        let cmd = p.handle_event(InputEvent::Cursor { x: 14.0, y: 7.0 });
        assert_eq!(
            cmd,
            Some(CameraCommand::Rotate {
                delta: Vec2::new(4.0, -3.0)
            })
        );
    }

    #[test]
    fn shift_drag_pans() {
        let mut p = InputProcessor::default();
        let _ = p.handle_event(InputEvent::Cursor { x: 0.0, y: 0.0 });
        press(&mut p);
        let _ = p.handle_event(InputEvent::Shift { held: true });
        let cmd = p.handle_event(InputEvent::Cursor { x: 2.0, y: 0.0 });
        assert!(matches!(cmd, Some(CameraCommand::Pan { .. })));
    }

    #[test]
    fn first_move_after_press_does_not_jump() {
        let mut p = InputProcessor::default();
        press(&mut p);
        assert_eq!(
            p.handle_event(InputEvent::Cursor { x: 300.0, y: 200.0 }),
            None
        );
    }

    #[test]
    fn release_ends_drag() {
        let mut p = InputProcessor::default();
        let _ = p.handle_event(InputEvent::Cursor { x: 0.0, y: 0.0 });
        press(&mut p);
        let _ = p.handle_event(InputEvent::PrimaryButton { pressed: false });
        assert_eq!(p.handle_event(InputEvent::Cursor { x: 3.0, y: 3.0 }), None);
    }

    #[test]
    fn scroll_zooms() {
        let mut p = InputProcessor::default();
        assert_eq!(
            p.handle_event(InputEvent::Wheel { delta: 1.5 }),
            Some(CameraCommand::Zoom { delta: 1.5 })
        );
    }

    #[test]
    fn bound_keys_map_to_movement() {
        let p = InputProcessor::default();
        assert_eq!(
            p.handle_key("KeyA", true),
            Some(CameraCommand::Move {
                direction: MoveDirection::Left,
                pressed: true
            })
        );
        assert_eq!(p.handle_key("KeyQ", true), None);
    }
}
