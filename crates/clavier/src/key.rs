//! Physical key and mouse button codes.
//!
//! Both enums are closed: every value is a known code, so a registry can hold
//! one control per code from the start. Names follow winit's [`KeyCode`]
//! variant names (`KeyW`, `ControlLeft`, ...), which keeps config files
//! readable and lets key codes convert to and from winit one-to-one.

use std::fmt;
use std::str::FromStr;

use winit::keyboard::{KeyCode, PhysicalKey};

use crate::error::ParseControlError;

macro_rules! keys {
    ($($name:ident),+ $(,)?) => {
        /// A physical (layout-independent) keyboard key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[allow(missing_docs)]
        pub enum Key {
            $($name,)+
        }

        impl Key {
            /// Every key this crate knows about.
            pub const ALL: &'static [Key] = &[$(Key::$name,)+];

            /// Stable name, identical to the winit [`KeyCode`] variant.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$name => stringify!($name),)+
                }
            }

            /// Converts a winit key code. Returns `None` for codes outside [`Key::ALL`].
            #[must_use]
            pub fn from_winit(code: KeyCode) -> Option<Self> {
                match code {
                    $(KeyCode::$name => Some(Key::$name),)+
                    _ => None,
                }
            }

            /// The winit key code for this key.
            #[must_use]
            pub fn to_winit(self) -> KeyCode {
                match self {
                    $(Key::$name => KeyCode::$name,)+
                }
            }
        }
    };
}

keys! {
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
    KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Space, Enter, Escape, Tab, Backspace, Delete, Insert, Home, End, PageUp, PageDown,
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    ShiftLeft, ShiftRight, ControlLeft, ControlRight, AltLeft, AltRight,
    SuperLeft, SuperRight, CapsLock,
    Backquote, Minus, Equal, BracketLeft, BracketRight, Backslash, Semicolon, Quote,
    Comma, Period, Slash,
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4, Numpad5, Numpad6, Numpad7, Numpad8,
    Numpad9, NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide, NumpadDecimal,
    NumpadEnter, NumLock,
    ScrollLock, PrintScreen, Pause, ContextMenu,
}

impl Key {
    /// Converts a winit [`PhysicalKey`]. Unidentified scan codes map to `None`.
    #[must_use]
    pub fn from_physical(key: PhysicalKey) -> Option<Self> {
        match key {
            PhysicalKey::Code(code) => Self::from_winit(code),
            PhysicalKey::Unidentified(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = ParseControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| ParseControlError::UnknownKey(s.to_string()))
    }
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
    /// Side button, usually "back".
    Back,
    /// Side button, usually "forward".
    Forward,
}

impl MouseButton {
    /// Every mouse button this crate knows about.
    pub const ALL: &'static [MouseButton] = &[
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Back,
        MouseButton::Forward,
    ];

    /// Stable name, prefixed with `Mouse` so it never collides with a key name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "MouseLeft",
            Self::Right => "MouseRight",
            Self::Middle => "MouseMiddle",
            Self::Back => "MouseBack",
            Self::Forward => "MouseForward",
        }
    }

    /// Converts a winit mouse button. `Other(_)` buttons map to `None`.
    #[must_use]
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        use winit::event::MouseButton as W;
        match button {
            W::Left => Some(Self::Left),
            W::Right => Some(Self::Right),
            W::Middle => Some(Self::Middle),
            W::Back => Some(Self::Back),
            W::Forward => Some(Self::Forward),
            W::Other(_) => None,
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MouseButton {
    type Err = ParseControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.name() == s)
            .ok_or_else(|| ParseControlError::UnknownButton(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_unique() {
        let mut sorted = Key::ALL.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), Key::ALL.len());
    }

    #[test]
    fn test_key_name_matches_winit_debug() {
        for &key in Key::ALL {
            assert_eq!(key.name(), format!("{:?}", key.to_winit()));
        }
    }

    #[test]
    fn test_parse_key_by_name() {
        assert_eq!("KeyW".parse::<Key>(), Ok(Key::KeyW));
        assert_eq!(" ControlLeft ".parse::<Key>(), Ok(Key::ControlLeft));
        assert_eq!(
            "Hyper".parse::<Key>(),
            Err(ParseControlError::UnknownKey("Hyper".to_string()))
        );
    }

    #[test]
    fn test_unmapped_winit_key_is_none() {
        assert_eq!(Key::from_winit(KeyCode::F24), None);
        assert_eq!(Key::from_physical(PhysicalKey::Code(KeyCode::Space)), Some(Key::Space));
    }

    #[test]
    fn test_mouse_button_names() {
        assert_eq!(MouseButton::Left.to_string(), "MouseLeft");
        assert_eq!("MouseForward".parse::<MouseButton>(), Ok(MouseButton::Forward));
        assert!("Left".parse::<MouseButton>().is_err());
    }

    #[test]
    fn test_other_mouse_button_is_none() {
        assert_eq!(MouseButton::from_winit(winit::event::MouseButton::Other(9)), None);
        assert_eq!(
            MouseButton::from_winit(winit::event::MouseButton::Middle),
            Some(MouseButton::Middle)
        );
    }
}
