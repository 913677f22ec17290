//! Held-key tracker fed from winit keyboard events.
//!
//! [`KeyboardState`] answers "is this key down right now" for the
//! [`InputBackend`](crate::InputBackend) a [`Controls`](crate::Controls)
//! registry polls once per frame. A key pressed and released between two
//! polls still reads as pressed for that one frame, so quick taps are not lost
//! to frame granularity. A key held across a poll and then released reads as
//! up immediately.
//!
//! Physical key codes are used throughout so that bindings work identically
//! regardless of the user's keyboard layout.

use rustc_hash::FxHashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

use crate::key::Key;

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is a repeat event.
    pub repeat: bool,
}

/// Tracks which physical keys are held.
///
/// # Usage
///
/// 1. Forward every [`KeyEvent`] to [`process_event`](Self::process_event).
/// 2. Poll it (through [`WinitInput`](crate::WinitInput)) in the frame advance.
/// 3. Call [`end_frame`](Self::end_frame) after the advance.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: FxHashSet<Key>,
    pressed_this_frame: FxHashSet<Key>,
    tapped: FxHashSet<Key>,
}

impl KeyboardState {
    /// Creates a new `KeyboardState` with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a winit [`KeyEvent`].
    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Processes a [`RawKeyEvent`] (platform-independent, test-friendly).
    ///
    /// Repeat events and keys outside [`Key::ALL`] are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        let Some(key) = Key::from_physical(event.key) else {
            return;
        };
        match event.state {
            ElementState::Pressed => {
                self.held.insert(key);
                self.pressed_this_frame.insert(key);
            }
            ElementState::Released => {
                if self.held.remove(&key) && self.pressed_this_frame.contains(&key) {
                    self.tapped.insert(key);
                }
            }
        }
    }

    /// `true` while the key is held, or if it was both pressed and released
    /// since the last [`end_frame`](Self::end_frame).
    #[must_use]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key) || self.tapped.contains(&key)
    }

    /// Forgets taps from the frame that just ended.
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.tapped.clear();
    }

    /// Releases every key, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.pressed_this_frame.clear();
        self.tapped.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    /// Helper to create a [`RawKeyEvent`] for testing.
    fn raw(code: KeyCode, state: ElementState, repeat: bool) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat,
        }
    }

    #[test]
    fn test_initial_state_no_keys_pressed() {
        let kb = KeyboardState::new();
        for &k in &[Key::KeyW, Key::KeyA, Key::Space, Key::Escape] {
            assert!(!kb.is_pressed(k));
        }
    }

    #[test]
    fn test_press_then_release_across_frames() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyW, ElementState::Pressed, false));
        assert!(kb.is_pressed(Key::KeyW));
        kb.end_frame();
        assert!(kb.is_pressed(Key::KeyW), "held keys survive end_frame");

        kb.process_raw(raw(KeyCode::KeyW, ElementState::Released, false));
        assert!(
            !kb.is_pressed(Key::KeyW),
            "a key held over a frame boundary is up as soon as it is released"
        );
    }

    #[test]
    fn test_tap_within_one_frame_is_seen_once() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::Space, ElementState::Pressed, false));
        kb.process_raw(raw(KeyCode::Space, ElementState::Released, false));
        assert!(kb.is_pressed(Key::Space));
        kb.end_frame();
        assert!(!kb.is_pressed(Key::Space));
    }

    #[test]
    fn test_tap_after_hold_in_same_frame_is_latched() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyE, ElementState::Pressed, false));
        kb.end_frame();
        kb.process_raw(raw(KeyCode::KeyE, ElementState::Released, false));
        kb.process_raw(raw(KeyCode::KeyE, ElementState::Pressed, false));
        kb.process_raw(raw(KeyCode::KeyE, ElementState::Released, false));
        assert!(kb.is_pressed(Key::KeyE));
        kb.end_frame();
        assert!(!kb.is_pressed(Key::KeyE));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyQ, ElementState::Released, false));
        assert!(!kb.is_pressed(Key::KeyQ));
    }

    #[test]
    fn test_multiple_keys_tracked_independently() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyW, ElementState::Pressed, false));
        kb.process_raw(raw(KeyCode::KeyD, ElementState::Pressed, false));
        kb.process_raw(raw(KeyCode::KeyW, ElementState::Released, false));
        kb.end_frame();

        assert!(!kb.is_pressed(Key::KeyW));
        assert!(kb.is_pressed(Key::KeyD));
    }

    #[test]
    fn test_repeat_events_ignored() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyA, ElementState::Pressed, true));
        assert!(!kb.is_pressed(Key::KeyA));
    }

    #[test]
    fn test_unmapped_key_ignored() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::F24, ElementState::Pressed, false));
        assert!(Key::ALL.iter().all(|&k| !kb.is_pressed(k)));
    }

    #[test]
    fn test_release_all() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::ShiftLeft, ElementState::Pressed, false));
        kb.release_all();
        assert!(!kb.is_pressed(Key::ShiftLeft));
    }
}
