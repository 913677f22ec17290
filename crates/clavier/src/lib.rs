//! Frame-based activation tracking for keys, mouse buttons and key combos.
//!
//! Each control is a four-state machine ([`State`]) advanced once per frame by
//! a [`Controls`] registry, which polls an [`InputBackend`] for physical state.
//! Queries go through the [`Activation`] predicates and distinguish a
//! single-frame trigger (`is_just_activated`) from a hold (`is_still_active`).
//!
//! ```
//! use clavier::{Activation, Controls, Key, PressedSet};
//!
//! let mut controls = Controls::new();
//! let mut input = PressedSet::new();
//!
//! input.press(Key::Space);
//! controls.advance(&input);
//! assert!(controls.key(Key::Space).is_just_activated());
//!
//! controls.advance(&input);
//! assert!(controls.key(Key::Space).is_still_active());
//! ```

pub mod backend;
pub mod bindings;
pub mod combo;
pub mod control;
pub mod error;
pub mod id;
pub mod key;
pub mod keyboard;
pub mod mouse;
pub mod query;
pub mod registry;
pub mod state;

pub use backend::{InputBackend, PressedSet, WinitInput};
pub use bindings::{Bindings, Conflict};
pub use combo::{COMBO_SEPARATOR, Combo, ComboOrder};
pub use control::{ButtonControl, ComboControl, Control, Frame, KeyControl};
pub use error::{BindingError, ParseControlError};
pub use id::ControlId;
pub use key::{Key, MouseButton};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
pub use query::Activation;
pub use registry::{Controls, CustomHandle};
pub use state::State;
