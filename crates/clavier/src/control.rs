//! Built-in controls and the extension point for custom ones.
//!
//! Keys, mouse buttons and key combos are concrete types owned by the
//! [`Controls`](crate::Controls) registry. Anything else implements
//! [`Control`] and is registered at runtime; it is updated after every
//! built-in control and sees their fresh states through a [`Frame`].

use rustc_hash::FxHashMap;

use crate::backend::InputBackend;
use crate::combo::{Combo, ComboOrder};
use crate::key::{Key, MouseButton};
use crate::query::Activation;
use crate::state::State;

/// A caller-defined control advanced alongside the built-ins.
pub trait Control: Activation {
    /// Computes this frame's state. Called exactly once per frame advance.
    fn update(&mut self, frame: &Frame<'_>);
}

/// A single keyboard key.
#[derive(Debug, Clone)]
pub struct KeyControl {
    key: Key,
    state: State,
}

impl KeyControl {
    pub(crate) fn new(key: Key) -> Self {
        Self {
            key,
            state: State::default(),
        }
    }

    /// The key this control tracks.
    #[must_use]
    pub fn key(&self) -> Key {
        self.key
    }

    pub(crate) fn update(&mut self, input: &dyn InputBackend) {
        self.state = self.state.next(input.is_key_pressed(self.key));
    }
}

impl Activation for KeyControl {
    fn state(&self) -> State {
        self.state
    }
}

/// A single mouse button.
#[derive(Debug, Clone)]
pub struct ButtonControl {
    button: MouseButton,
    state: State,
}

impl ButtonControl {
    pub(crate) fn new(button: MouseButton) -> Self {
        Self {
            button,
            state: State::default(),
        }
    }

    /// The button this control tracks.
    #[must_use]
    pub fn button(&self) -> MouseButton {
        self.button
    }

    pub(crate) fn update(&mut self, input: &dyn InputBackend) {
        self.state = self.state.next(input.is_button_pressed(self.button));
    }
}

impl Activation for ButtonControl {
    fn state(&self) -> State {
        self.state
    }
}

/// Several keys that must all be active at once.
///
/// Active on a frame only when every member key's own control is active on
/// that frame, so it must update after the key controls. An empty combo
/// never activates.
#[derive(Debug, Clone)]
pub struct ComboControl {
    combo: Combo,
    state: State,
}

impl ComboControl {
    pub(crate) fn new(combo: Combo) -> Self {
        Self {
            combo,
            state: State::default(),
        }
    }

    /// The combo this control tracks.
    #[must_use]
    pub fn combo(&self) -> &Combo {
        &self.combo
    }

    pub(crate) fn update(&mut self, keys: &FxHashMap<Key, KeyControl>) {
        let all_active = !self.combo.is_empty()
            && self
                .combo
                .keys()
                .iter()
                .all(|key| keys.get(key).is_some_and(Activation::is_active));
        self.state = self.state.next(all_active);
    }
}

impl Activation for ComboControl {
    fn state(&self) -> State {
        self.state
    }
}

/// Read-only view of one frame, handed to [`Control::update`].
///
/// Built-in states are already final for the frame when a custom control
/// sees them.
pub struct Frame<'a> {
    pub(crate) number: u64,
    pub(crate) input: &'a dyn InputBackend,
    pub(crate) keys: &'a FxHashMap<Key, KeyControl>,
    pub(crate) buttons: &'a FxHashMap<MouseButton, ButtonControl>,
    pub(crate) combos: &'a FxHashMap<Combo, ComboControl>,
    pub(crate) combo_order: ComboOrder,
}

impl Frame<'_> {
    /// Frame counter, starting at 1 for the first advance.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Raw backend query for `key`.
    #[must_use]
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.input.is_key_pressed(key)
    }

    /// Raw backend query for `button`.
    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.input.is_button_pressed(button)
    }

    /// This frame's state of `key`.
    #[must_use]
    pub fn key(&self, key: Key) -> State {
        self.keys.get(&key).map_or(State::StillInactive, Activation::state)
    }

    /// This frame's state of `button`.
    #[must_use]
    pub fn button(&self, button: MouseButton) -> State {
        self.buttons
            .get(&button)
            .map_or(State::StillInactive, Activation::state)
    }

    /// This frame's state of an already registered combo.
    ///
    /// `combo` is matched under the registry's [`ComboOrder`], exactly like
    /// [`Controls::find_combo`](crate::Controls::find_combo).
    #[must_use]
    pub fn combo(&self, combo: &Combo) -> Option<State> {
        self.combos
            .get(&combo.clone().arranged(self.combo_order))
            .map(Activation::state)
    }
}
