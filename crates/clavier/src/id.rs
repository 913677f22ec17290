//! Tagged identity of a built-in control.

use std::fmt;
use std::str::FromStr;

use crate::combo::{COMBO_SEPARATOR, Combo};
use crate::error::ParseControlError;
use crate::key::{Key, MouseButton};

/// Identifies one built-in control in a [`Controls`](crate::Controls) registry.
///
/// Text form: a key name (`KeyW`), a mouse button name (`MouseLeft`), or keys
/// joined with `+` (`ControlLeft+KeyS`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// A single keyboard key.
    Key(Key),
    /// A single mouse button.
    Button(MouseButton),
    /// Several keys held together.
    Combo(Combo),
}

impl From<Key> for ControlId {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for ControlId {
    fn from(button: MouseButton) -> Self {
        Self::Button(button)
    }
}

impl From<Combo> for ControlId {
    fn from(combo: Combo) -> Self {
        Self::Combo(combo)
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => fmt::Display::fmt(key, f),
            Self::Button(button) => fmt::Display::fmt(button, f),
            Self::Combo(combo) => fmt::Display::fmt(combo, f),
        }
    }
}

impl FromStr for ControlId {
    type Err = ParseControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(COMBO_SEPARATOR) {
            s.parse().map(Self::Combo)
        } else if s.starts_with("Mouse") {
            s.parse().map(Self::Button)
        } else {
            s.parse().map(Self::Key)
        }
    }
}
