//! Hold-to-confirm: a custom control built on top of the key controls.

use clavier::{Activation, Control, Frame, Key, State};

/// Active once `key` has been held for `frames` consecutive frames, and until
/// it is released.
pub struct Hold {
    key: Key,
    frames: u32,
    held_for: u32,
    state: State,
}

impl Hold {
    /// `frames` of zero behaves like one.
    #[must_use]
    pub fn new(key: Key, frames: u32) -> Self {
        Self {
            key,
            frames: frames.max(1),
            held_for: 0,
            state: State::default(),
        }
    }

    /// The watched key.
    #[must_use]
    pub fn key(&self) -> Key {
        self.key
    }

    /// Consecutive frames the key has been down.
    #[must_use]
    pub fn held_for(&self) -> u32 {
        self.held_for
    }
}

impl Activation for Hold {
    fn state(&self) -> State {
        self.state
    }
}

impl Control for Hold {
    fn update(&mut self, frame: &Frame<'_>) {
        if frame.key(self.key).is_active() {
            self.held_for = self.held_for.saturating_add(1);
        } else {
            self.held_for = 0;
        }
        self.state = self.state.next(self.held_for >= self.frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clavier::{Controls, PressedSet};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_activates_after_threshold() {
        let mut controls = Controls::new();
        let hold = Rc::new(RefCell::new(Hold::new(Key::KeyE, 3)));
        let _handle = controls.register(hold.clone());
        let mut input = PressedSet::new();
        input.press(Key::KeyE);

        controls.advance(&input);
        controls.advance(&input);
        assert!(hold.borrow().is_still_inactive());

        controls.advance(&input);
        assert!(hold.borrow().is_just_activated());

        controls.advance(&input);
        assert!(hold.borrow().is_still_active());
        assert_eq!(hold.borrow().held_for(), 4);
    }

    #[test]
    fn test_short_press_never_activates() {
        let mut controls = Controls::new();
        let hold = Rc::new(RefCell::new(Hold::new(Key::KeyE, 3)));
        let _handle = controls.register(hold.clone());
        let mut input = PressedSet::new();

        input.press(Key::KeyE);
        controls.advance(&input);
        controls.advance(&input);
        input.release(Key::KeyE);
        controls.advance(&input);

        assert!(hold.borrow().is_still_inactive());
        assert_eq!(hold.borrow().held_for(), 0);
    }

    #[test]
    fn test_release_deactivates() {
        let mut controls = Controls::new();
        let hold = Rc::new(RefCell::new(Hold::new(Key::KeyE, 1)));
        let _handle = controls.register(hold.clone());
        let mut input = PressedSet::new();

        input.press(Key::KeyE);
        controls.advance(&input);
        assert!(hold.borrow().is_just_activated());

        input.release(Key::KeyE);
        controls.advance(&input);
        assert!(hold.borrow().is_just_deactivated());
    }
}
