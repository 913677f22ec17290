//! The physical input source polled during a frame advance.

use rustc_hash::FxHashSet;
use winit::event::{KeyEvent, WindowEvent};

use crate::key::{Key, MouseButton};
use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;

/// Answers "is this key / button down right now".
///
/// [`Controls::advance`](crate::Controls::advance) polls it once per
/// primitive control per frame. Implementations must not change their answer
/// in the middle of an advance.
pub trait InputBackend {
    /// Whether `key` is currently pressed.
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Whether `button` is currently pressed.
    fn is_button_pressed(&self, button: MouseButton) -> bool;
}

/// Backend driven by winit window events.
#[derive(Debug, Clone, Default)]
pub struct WinitInput {
    /// Keyboard half.
    pub keyboard: KeyboardState,
    /// Mouse half.
    pub mouse: MouseState,
}

impl WinitInput {
    /// Creates a backend with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a window event. Returns `true` if the event was input-related.
    ///
    /// Losing focus releases everything, since the matching release events
    /// go to another window.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.process_key_event(event);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_winit_button(*button, *state);
                true
            }
            WindowEvent::Focused(false) => {
                self.release_all();
                true
            }
            _ => false,
        }
    }

    /// Feeds a keyboard event.
    pub fn process_key_event(&mut self, event: &KeyEvent) {
        self.keyboard.process_event(event);
    }

    /// Call after each frame advance.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
    }

    /// Releases every key and button.
    pub fn release_all(&mut self) {
        self.keyboard.release_all();
        self.mouse.release_all();
    }
}

impl InputBackend for WinitInput {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.keyboard.is_pressed(key)
    }

    fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse.is_pressed(button)
    }
}

/// Backend holding an explicit set of pressed codes.
///
/// Used by tests and headless drivers to script input frame by frame.
#[derive(Debug, Clone, Default)]
pub struct PressedSet {
    keys: FxHashSet<Key>,
    buttons: FxHashSet<MouseButton>,
}

impl PressedSet {
    /// Nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` pressed.
    pub fn press(&mut self, key: Key) -> &mut Self {
        self.keys.insert(key);
        self
    }

    /// Marks `key` released.
    pub fn release(&mut self, key: Key) -> &mut Self {
        self.keys.remove(&key);
        self
    }

    /// Marks `button` pressed.
    pub fn press_button(&mut self, button: MouseButton) -> &mut Self {
        self.buttons.insert(button);
        self
    }

    /// Marks `button` released.
    pub fn release_button(&mut self, button: MouseButton) -> &mut Self {
        self.buttons.remove(&button);
        self
    }

    /// Releases everything.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }
}

impl InputBackend for PressedSet {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }
}
