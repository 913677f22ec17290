//! Held-button tracker fed from winit mouse events.

use winit::event::ElementState;

use crate::key::MouseButton;

/// Per-button flags for the current frame.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    held: bool,
    pressed: bool,
    tapped: bool,
}

/// Maps a [`MouseButton`] to an index 0..5.
fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
    }
}

/// Tracks which mouse buttons are held.
///
/// Same frame contract as [`KeyboardState`](crate::KeyboardState): a click
/// that starts and ends between two polls reads as pressed for one frame, a
/// button held across a poll is up as soon as it is released.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    buttons: [ButtonFrame; 5],
}

impl MouseState {
    /// Creates a new `MouseState` with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit `MouseInput` event. `Other(_)` buttons are ignored.
    pub fn on_winit_button(&mut self, button: winit::event::MouseButton, state: ElementState) {
        if let Some(button) = MouseButton::from_winit(button) {
            self.on_button(button, state);
        }
    }

    /// Process a press or release of `button`.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let b = &mut self.buttons[button_index(button)];
        match state {
            ElementState::Pressed => {
                b.held = true;
                b.pressed = true;
            }
            ElementState::Released => {
                if b.held && b.pressed {
                    b.tapped = true;
                }
                b.held = false;
            }
        }
    }

    /// Whether a mouse button is held, or was clicked during this frame.
    #[must_use]
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        let b = self.buttons[button_index(button)];
        b.held || b.tapped
    }

    /// Forgets clicks from the frame that just ended.
    pub fn end_frame(&mut self) {
        for b in &mut self.buttons {
            b.pressed = false;
            b.tapped = false;
        }
    }

    /// Releases every button.
    pub fn release_all(&mut self) {
        self.buttons = [ButtonFrame::default(); 5];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_press_and_release_tracked() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Left, ElementState::Pressed);
        assert!(ms.is_pressed(MouseButton::Left));
        assert!(!ms.is_pressed(MouseButton::Right));

        ms.end_frame();
        assert!(ms.is_pressed(MouseButton::Left));
        ms.on_button(MouseButton::Left, ElementState::Released);
        assert!(!ms.is_pressed(MouseButton::Left));
    }

    #[test]
    fn test_click_within_one_frame() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Right, ElementState::Pressed);
        ms.on_button(MouseButton::Right, ElementState::Released);
        assert!(ms.is_pressed(MouseButton::Right));
        ms.end_frame();
        assert!(!ms.is_pressed(MouseButton::Right));
    }

    #[test]
    fn test_winit_other_button_ignored() {
        let mut ms = MouseState::new();
        ms.on_winit_button(winit::event::MouseButton::Other(7), ElementState::Pressed);
        assert!(MouseButton::ALL.iter().all(|&b| !ms.is_pressed(b)));

        ms.on_winit_button(winit::event::MouseButton::Back, ElementState::Pressed);
        assert!(ms.is_pressed(MouseButton::Back));
    }

    #[test]
    fn test_release_all() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Middle, ElementState::Pressed);
        ms.release_all();
        assert!(!ms.is_pressed(MouseButton::Middle));
    }
}
