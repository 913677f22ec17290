//! The [`Controls`] registry: owns every control and advances them each frame.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::backend::InputBackend;
use crate::combo::{Combo, ComboOrder};
use crate::control::{ButtonControl, ComboControl, Control, Frame, KeyControl};
use crate::id::ControlId;
use crate::key::{Key, MouseButton};
use crate::query::Activation;
use crate::state::State;

/// Receipt for a registered custom control, used to unregister it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "dropping the handle makes the control impossible to unregister"]
pub struct CustomHandle {
    slot: usize,
    generation: u64,
}

struct CustomEntry {
    generation: u64,
    control: Rc<RefCell<dyn Control>>,
}

/// Every live control of one input session.
///
/// Key and mouse-button controls exist from construction for every code in
/// [`Key::ALL`] and [`MouseButton::ALL`]; combos are created on first request;
/// custom controls are added with [`register`](Self::register).
///
/// Call [`advance`](Self::advance) exactly once per frame, before querying.
/// Each advance updates all keys, then all buttons, then all combos, then
/// all custom controls, so combos always read this frame's key states.
pub struct Controls {
    keys: FxHashMap<Key, KeyControl>,
    buttons: FxHashMap<MouseButton, ButtonControl>,
    combos: FxHashMap<Combo, ComboControl>,
    custom: FxHashMap<usize, CustomEntry>,
    combo_order: ComboOrder,
    next_generation: u64,
    frame: u64,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controls {
    /// Creates a registry where combo key order is significant.
    #[must_use]
    pub fn new() -> Self {
        Self::with_combo_order(ComboOrder::default())
    }

    /// Creates a registry using `combo_order` to derive combo identity.
    #[must_use]
    pub fn with_combo_order(combo_order: ComboOrder) -> Self {
        Self {
            keys: Key::ALL.iter().map(|&k| (k, KeyControl::new(k))).collect(),
            buttons: MouseButton::ALL
                .iter()
                .map(|&b| (b, ButtonControl::new(b)))
                .collect(),
            combos: FxHashMap::default(),
            custom: FxHashMap::default(),
            combo_order,
            next_generation: 0,
            frame: 0,
        }
    }

    /// How this registry derives combo identity.
    #[must_use]
    pub fn combo_order(&self) -> ComboOrder {
        self.combo_order
    }

    /// Number of completed frame advances.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The control for `key`.
    #[must_use]
    pub fn key(&self, key: Key) -> &KeyControl {
        &self.keys[&key]
    }

    /// The control for `button`.
    #[must_use]
    pub fn button(&self, button: MouseButton) -> &ButtonControl {
        &self.buttons[&button]
    }

    /// The control for a key combination, created on first request.
    ///
    /// Later calls with the same combo return the same control. Whether
    /// `[A, B]` and `[B, A]` are the same combo depends on
    /// [`combo_order`](Self::combo_order). Passing no keys creates a combo
    /// that never activates.
    pub fn combo(&mut self, keys: impl Into<Combo>) -> &ComboControl {
        let combo = keys.into().arranged(self.combo_order);
        self.combos.entry(combo).or_insert_with_key(|combo| {
            if combo.is_empty() {
                warn!("registered an empty key combo; it will never activate");
            } else {
                debug!(%combo, "registered key combo");
            }
            ComboControl::new(combo.clone())
        })
    }

    /// Looks up a combo without creating it.
    #[must_use]
    pub fn find_combo(&self, keys: impl Into<Combo>) -> Option<&ComboControl> {
        self.combos.get(&keys.into().arranged(self.combo_order))
    }

    /// Makes sure the control named by `id` exists, creating a combo if needed.
    pub fn ensure(&mut self, id: &ControlId) {
        if let ControlId::Combo(combo) = id {
            let _ = self.combo(combo.clone());
        }
    }

    /// Current state of the control named by `id`, creating a combo if needed.
    pub fn state(&mut self, id: &ControlId) -> State {
        match id {
            ControlId::Key(key) => self.key(*key).state(),
            ControlId::Button(button) => self.button(*button).state(),
            ControlId::Combo(combo) => self.combo(combo.clone()).state(),
        }
    }

    /// Current state of the control named by `id`, or `None` for a combo that
    /// was never registered.
    #[must_use]
    pub fn peek(&self, id: &ControlId) -> Option<State> {
        match id {
            ControlId::Key(key) => Some(self.key(*key).state()),
            ControlId::Button(button) => Some(self.button(*button).state()),
            ControlId::Combo(combo) => self.find_combo(combo.clone()).map(Activation::state),
        }
    }

    /// Number of registered combos.
    #[must_use]
    pub fn combo_count(&self) -> usize {
        self.combos.len()
    }

    /// Number of registered custom controls.
    #[must_use]
    pub fn custom_count(&self) -> usize {
        self.custom.len()
    }

    /// Adds a custom control, to be updated on every advance until unregistered.
    ///
    /// The registry keeps a clone of the `Rc`; the caller keeps querying its
    /// own. Registering the same instance again returns the existing handle.
    /// Do not hold a `RefCell` borrow of the control across
    /// [`advance`](Self::advance).
    pub fn register<C: Control + 'static>(&mut self, control: Rc<RefCell<C>>) -> CustomHandle {
        let slot = Rc::as_ptr(&control).cast::<()>() as usize;
        if let Some(entry) = self.custom.get(&slot) {
            return CustomHandle {
                slot,
                generation: entry.generation,
            };
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        let control: Rc<RefCell<dyn Control>> = control;
        self.custom.insert(
            slot,
            CustomEntry {
                generation,
                control,
            },
        );
        debug!(generation, "registered custom control");
        CustomHandle { slot, generation }
    }

    /// Stops advancing the control behind `handle`.
    ///
    /// Returns `true` if a control was removed. Calling it again, or with a
    /// handle whose control is already gone, does nothing and returns `false`.
    /// The control keeps its last state.
    pub fn unregister(&mut self, handle: &CustomHandle) -> bool {
        match self.custom.get(&handle.slot) {
            Some(entry) if entry.generation == handle.generation => {
                self.custom.remove(&handle.slot);
                debug!(generation = handle.generation, "unregistered custom control");
                true
            }
            _ => false,
        }
    }

    /// Advances every control by one frame, reading physical state from `input`.
    pub fn advance(&mut self, input: &dyn InputBackend) {
        self.frame += 1;
        trace!(frame = self.frame, "advancing controls");

        for control in self.keys.values_mut() {
            control.update(input);
        }
        for control in self.buttons.values_mut() {
            control.update(input);
        }
        for control in self.combos.values_mut() {
            control.update(&self.keys);
        }

        let frame = Frame {
            number: self.frame,
            input,
            keys: &self.keys,
            buttons: &self.buttons,
            combos: &self.combos,
            combo_order: self.combo_order,
        };
        for entry in self.custom.values() {
            entry.control.borrow_mut().update(&frame);
        }
    }
}
