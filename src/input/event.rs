/// Pointer and modifier changes the orbit controls react to.
///
/// Only the primary button drags, so other buttons never become events.
/// Keys go through [`InputProcessor::handle_key`](super::InputProcessor::handle_key)
/// instead, by physical key code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor position in physical pixels.
    Cursor {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Primary button went down or up.
    PrimaryButton {
        /// `true` while held.
        pressed: bool,
    },
    /// Wheel or trackpad scroll in lines; positive zooms in.
    Wheel {
        /// Scroll amount.
        delta: f32,
    },
    /// Shift modifier changed. Held shift turns drags into pans.
    Shift {
        /// `true` while held.
        held: bool,
    },
}

/// Trackpad pixels per wheel line.
#[cfg(feature = "viewer")]
const PIXELS_PER_LINE: f32 = 100.0;

#[cfg(feature = "viewer")]
impl InputEvent {
    /// Translate a winit window event, if the controls care about it.
    #[must_use]
    pub fn from_window_event(event: &winit::event::WindowEvent) -> Option<Self> {
        use winit::event::{ElementState, MouseButton, WindowEvent};

        match event {
            WindowEvent::CursorMoved { position, .. } => Some(Self::Cursor {
                x: position.x as f32,
                y: position.y as f32,
            }),
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => Some(Self::PrimaryButton {
                pressed: *state == ElementState::Pressed,
            }),
            WindowEvent::MouseWheel { delta, .. } => Some(Self::Wheel {
                delta: wheel_lines(*delta),
            }),
            WindowEvent::ModifiersChanged(modifiers) => Some(Self::Shift {
                held: modifiers.state().shift_key(),
            }),
            _ => None,
        }
    }
}

/// Wheel delta in lines, whichever unit the platform reports.
#[cfg(feature = "viewer")]
fn wheel_lines(delta: winit::event::MouseScrollDelta) -> f32 {
    match delta {
        winit::event::MouseScrollDelta::LineDelta(_, y) => y,
        winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
    }
}
